use super::*;
use crate::color::{LabConverter, LabImage};
use crate::config::MetricsConfig;
use crate::error::MetricsError;
use crate::image::{ChannelPlane, RgbaRaster};

fn prepare(raster: &RgbaRaster) -> (LabImage, LabIntegrals) {
    let lab = LabImage::from_raster(raster.as_view(), &LabConverter::default());
    surround_inputs(&lab)
}

/// Gray background with a bright square in the middle.
fn square_raster(size: usize, inner: usize) -> RgbaRaster {
    let lo = (size - inner) / 2;
    let hi = lo + inner;
    let mut data = Vec::with_capacity(size * size * 4);
    for y in 0..size {
        for x in 0..size {
            let inside = (lo..hi).contains(&x) && (lo..hi).contains(&y);
            let px = if inside {
                [230, 40, 40, 255]
            } else {
                [90, 90, 90, 255]
            };
            data.extend_from_slice(&px);
        }
    }
    RgbaRaster::new(size, size, data).unwrap()
}

#[test]
fn surround_is_symmetric_in_the_interior() {
    let win = symmetric_surround(3, 2, 10, 8);
    assert_eq!(
        win,
        SurroundWindow {
            x1: 0,
            y1: 0,
            x2: 6,
            y2: 4
        }
    );
    assert_eq!(win.area(), 35);
}

#[test]
fn surround_collapses_on_borders() {
    assert_eq!(symmetric_surround(0, 0, 5, 5).area(), 1);
    let right = symmetric_surround(4, 2, 5, 5);
    assert_eq!((right.x1, right.x2), (4, 4));
    assert_eq!((right.y1, right.y2), (0, 4));
    let center = symmetric_surround(2, 2, 5, 5);
    assert_eq!(center.area(), 25);
}

#[test]
fn surround_near_far_edge_uses_distance_to_last_index() {
    // Distance to the right border of a width-6 image from x=4 is one pixel.
    let win = symmetric_surround(4, 0, 6, 1);
    assert_eq!((win.x1, win.x2), (3, 5));
}

#[test]
fn uniform_image_has_zero_raw_saliency() {
    let raster = RgbaRaster::filled(6, 5, [37, 140, 201, 255]);
    let (smoothed, integrals) = prepare(&raster);
    let map = raw_saliency(&smoothed, &integrals);
    assert!(map.plane().data.iter().all(|&v| v == 0.0));
}

#[test]
fn normalize_rejects_flat_map() {
    let mut map = SaliencyMap::from_plane(ChannelPlane::filled(4, 4, 0.0));
    let err = map.normalize().unwrap_err();
    assert!(matches!(err, MetricsError::DegenerateRange { min, max } if min == 0.0 && max == 0.0));
    assert!(map.plane().data.iter().all(|&v| v == 0.0));
}

#[test]
fn normalize_stretches_to_full_range() {
    let plane = ChannelPlane::from_vec(2, 2, vec![2.0, 4.0, 6.0, 10.0]).unwrap();
    let mut map = SaliencyMap::from_plane(plane);
    let range = map.normalize().unwrap();
    assert_eq!(range, ValueRange { min: 2.0, max: 10.0 });
    assert_eq!(map.plane().data, vec![0.0, 63.75, 127.5, 255.0]);
}

#[test]
fn preview_applies_gain_and_saturates() {
    let plane = ChannelPlane::from_vec(3, 1, vec![0.0, 100.0, 255.0]).unwrap();
    let gray = SaliencyMap::from_plane(plane).to_gray(1.1);
    assert_eq!(gray.data(), &[0, 110, 255]);
}

#[test]
fn salient_square_scores_above_background() {
    let raster = square_raster(24, 6);
    let result = maximum_symmetric_surround(raster.as_view(), &MetricsConfig::default()).unwrap();
    let plane = result.map.plane();
    let center = plane.get(12, 12);
    let corner_region = plane.get(3, 20);
    assert!(
        center > corner_region,
        "centre {center} should exceed background {corner_region}"
    );
    assert!(plane.data.iter().all(|&v| (-1e-9..=255.0 + 1e-9).contains(&v)));
    assert!(plane.data.iter().any(|&v| v > 254.999));
    assert!(plane.data.iter().any(|&v| v == 0.0));
    assert!(result.mean > 0.0 && result.mean < 255.0);
}

#[test]
fn flat_image_fails_end_to_end() {
    let raster = RgbaRaster::filled(4, 4, [128, 128, 128, 255]);
    let err = maximum_symmetric_surround(raster.as_view(), &MetricsConfig::default()).unwrap_err();
    assert!(matches!(err, MetricsError::DegenerateRange { .. }));
}

#[test]
fn verbose_run_records_stage_timings() {
    let raster = square_raster(16, 4);
    let config = MetricsConfig {
        verbose: true,
        ..Default::default()
    };
    let result = maximum_symmetric_surround(raster.as_view(), &config).unwrap();
    let timings = result.timings.expect("timings in verbose mode");
    for label in ["to lab", "smooth+integral", "surround", "normalize"] {
        assert!(timings.stage(label).is_some(), "missing stage {label}");
    }
}

#[test]
fn shifting_planes_does_not_change_scores() {
    let raster = square_raster(12, 4);
    let lab = LabImage::from_raster(raster.as_view(), &LabConverter::default());
    let (smoothed, integrals) = surround_inputs(&lab);
    let shifted = raw_saliency(&smoothed, &integrals);

    let unshifted_smooth = LabImage {
        l: crate::filters::smooth(&lab.l, &crate::filters::SMOOTH_3TAP),
        a: crate::filters::smooth(&lab.a, &crate::filters::SMOOTH_3TAP),
        b: crate::filters::smooth(&lab.b, &crate::filters::SMOOTH_3TAP),
    };
    let unshifted_integrals = LabIntegrals {
        l: crate::integral::IntegralImage::build(&lab.l),
        a: crate::integral::IntegralImage::build(&lab.a),
        b: crate::integral::IntegralImage::build(&lab.b),
    };
    let direct = raw_saliency(&unshifted_smooth, &unshifted_integrals);
    for (s, d) in shifted.plane().data.iter().zip(&direct.plane().data) {
        assert!((s - d).abs() <= 1e-9 * d.abs().max(1.0), "{s} vs {d}");
    }
}
