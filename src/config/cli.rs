//! Command-line surface shared by the `si` and `msss` binaries.
use super::{load_config, MetricsConfig};
use crate::error::Result;
use clap::{Args, CommandFactory, Parser};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Input image (PNG or JPEG)
    #[arg(value_name = "IMAGE")]
    pub input: PathBuf,

    /// Store a control image (8-bit gray PNG) at this path
    #[arg(short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print additional information on stderr
    #[arg(short = 'v')]
    pub verbose: bool,

    /// JSON run configuration; command-line flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write a JSON report to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

impl CommonArgs {
    /// Merge the optional config file with the command-line flags.
    pub fn resolve_config(&self) -> Result<MetricsConfig> {
        let base = match &self.config {
            Some(path) => load_config(path)?,
            None => MetricsConfig::default(),
        };
        let verbose = base.verbose || self.verbose;
        Ok(base.with_verbose(verbose))
    }
}

/// Parse the process arguments into `P`.
///
/// A bare invocation prints usage to stdout and yields `None`, so the caller
/// can exit with status 0. Malformed arguments and `--help` are handled by
/// clap as usual.
pub fn parse_or_usage<P: Parser>() -> std::io::Result<Option<P>> {
    let args: Vec<OsString> = std::env::args_os().collect();
    match parse_args::<P>(&args) {
        Some(parsed) => Ok(Some(parsed)),
        None => {
            P::command().print_help()?;
            Ok(None)
        }
    }
}

/// `None` when `args` holds nothing beyond the program name.
fn parse_args<P: Parser>(args: &[OsString]) -> Option<P> {
    if args.len() <= 1 {
        return None;
    }
    Some(P::parse_from(args))
}

/// Initialise logging; verbose runs default to `debug`.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

/// Print the metric as a plain decimal with no trailing newline.
pub fn print_metric(value: f64) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{value:.6}")?;
    stdout.flush()
}
