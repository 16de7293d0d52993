use clap::Parser;
use perceptual_metrics::config::cli::{init_logging, parse_or_usage, print_metric, CommonArgs};
use perceptual_metrics::diagnostics::SpatialInfoReport;
use perceptual_metrics::image::io::{load_raster, save_gray_png, write_json_file};
use perceptual_metrics::spatial_information;

/// Spatial information of images: mean Sobel gradient magnitude.
#[derive(Parser)]
#[command(name = "si", version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let Some(cli) = parse_or_usage::<Cli>()? else {
        return Ok(());
    };
    let args = cli.common;
    let config = args.resolve_config()?;
    init_logging(config.verbose);

    let raster = load_raster(&args.input)?;
    let si = spatial_information(raster.as_view(), &config)?;
    let report = SpatialInfoReport::from_result(Some(&args.input), &si);

    if config.verbose {
        for line in report.diagnostic_lines() {
            eprintln!("{line}");
        }
    }
    if let Some(path) = &args.output {
        save_gray_png(&si.gradient_map, path)?;
    }
    if let Some(path) = &args.json {
        write_json_file(path, &report)?;
    }

    print_metric(si.mean)?;
    Ok(())
}
