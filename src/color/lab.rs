//! CIE L*a*b* conversion for sRGB-encoded pixels.
//!
//! Samples in [0, 1] are linearized with the inverse sRGB companding curve,
//! mapped to XYZ with the sRGB/D65 matrix, divided by the reference white and
//! passed through the CIE nonlinearity.
use crate::image::{ChannelPlane, RasterView};
use crate::parallel;
use nalgebra::{Matrix3, Vector3};

/// Actual CIE standard threshold between the cube-root and linear branches.
pub const CIE_EPSILON: f64 = 0.008856;
/// Actual CIE standard slope of the linear branch.
pub const CIE_KAPPA: f64 = 903.3;

/// Reference white (Xr, Yr, Zr).
pub const REFERENCE_WHITE: [f64; 3] = [0.950456, 1.0, 1.088754];

/// Linear sRGB → XYZ (D65), row-major.
#[rustfmt::skip]
pub const SRGB_TO_XYZ: [f64; 9] = [
    0.4124564, 0.3575761, 0.1804375,
    0.2126729, 0.7151522, 0.0721750,
    0.0193339, 0.1191920, 0.9503041,
];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

#[inline]
fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn cie_f(t: f64) -> f64 {
    if t > CIE_EPSILON {
        t.cbrt()
    } else {
        (CIE_KAPPA * t + 16.0) / 116.0
    }
}

/// Stateless pixel converter holding the fixed transform constants.
#[derive(Clone, Debug)]
pub struct LabConverter {
    rgb_to_xyz: Matrix3<f64>,
    white: Vector3<f64>,
}

impl Default for LabConverter {
    fn default() -> Self {
        Self {
            rgb_to_xyz: Matrix3::from_row_slice(&SRGB_TO_XYZ),
            white: Vector3::from(REFERENCE_WHITE),
        }
    }
}

impl LabConverter {
    /// Convert one pixel with channels already scaled to [0, 1].
    pub fn convert(&self, rgb: [f64; 3]) -> Lab {
        let linear = Vector3::from(rgb.map(srgb_to_linear));
        let relative = (self.rgb_to_xyz * linear).component_div(&self.white);
        let f = relative.map(cie_f);
        Lab {
            l: 116.0 * f.y - 16.0,
            a: 500.0 * (f.x - f.y),
            b: 200.0 * (f.y - f.z),
        }
    }

    /// Convert an 8-bit RGBA sample; alpha is ignored.
    #[inline]
    pub fn convert_rgba8(&self, rgba: [u8; 4]) -> Lab {
        self.convert([
            rgba[0] as f64 / 255.0,
            rgba[1] as f64 / 255.0,
            rgba[2] as f64 / 255.0,
        ])
    }
}

/// L, a and b planes of one raster, sharing width and stride.
#[derive(Clone, Debug)]
pub struct LabImage {
    pub l: ChannelPlane,
    pub a: ChannelPlane,
    pub b: ChannelPlane,
}

impl LabImage {
    /// Convert every pixel of `raster`, one task per row.
    pub fn from_raster(raster: RasterView<'_>, converter: &LabConverter) -> Self {
        let (w, h) = (raster.w, raster.h);
        let mut pixels = vec![Lab::default(); w * h];
        parallel::for_each_row(&mut pixels, w, |y, row| {
            let src = raster.row_bytes(y);
            for (dst, px) in row.iter_mut().zip(src.chunks_exact(4)) {
                *dst = converter.convert_rgba8([px[0], px[1], px[2], px[3]]);
            }
        });

        let mut l = ChannelPlane::new(w, h);
        let mut a = ChannelPlane::new(w, h);
        let mut b = ChannelPlane::new(w, h);
        for (i, px) in pixels.iter().enumerate() {
            l.data[i] = px.l;
            a.data[i] = px.a;
            b.data[i] = px.b;
        }
        Self { l, a, b }
    }

    /// Copy with every plane shifted so that its top-left sample is zero.
    pub fn shifted_to_origin(&self) -> Self {
        let shift = |plane: &ChannelPlane| {
            let mut out = plane.clone();
            if let Some(&origin) = plane.data.first() {
                out.data.iter_mut().for_each(|v| *v -= origin);
            }
            out
        };
        Self {
            l: shift(&self.l),
            a: shift(&self.a),
            b: shift(&self.b),
        }
    }

    pub fn width(&self) -> usize {
        self.l.w
    }

    pub fn height(&self) -> usize {
        self.l.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RgbaRaster;

    #[test]
    fn white_maps_to_full_lightness() {
        let lab = LabConverter::default().convert([1.0, 1.0, 1.0]);
        assert!((lab.l - 100.0).abs() < 1e-3, "L={}", lab.l);
        // The reference white is not exactly the matrix row sums: these
        // constants give a = 0.0024383 and b = -0.0046469, so the chroma
        // bound is 1e-2 rather than 1e-3.
        assert!(lab.a.abs() < 1e-2, "a={}", lab.a);
        assert!(lab.b.abs() < 1e-2, "b={}", lab.b);
    }

    #[test]
    fn black_maps_to_origin() {
        let lab = LabConverter::default().convert([0.0, 0.0, 0.0]);
        assert!(lab.l.abs() < 1e-9);
        assert!(lab.a.abs() < 1e-9);
        assert!(lab.b.abs() < 1e-9);
    }

    #[test]
    fn pure_red_has_positive_a_and_b() {
        let lab = LabConverter::default().convert_rgba8([255, 0, 0, 255]);
        assert!((lab.l - 53.2).abs() < 0.5, "L={}", lab.l);
        assert!(lab.a > 70.0, "a={}", lab.a);
        assert!(lab.b > 60.0, "b={}", lab.b);
    }

    #[test]
    fn dark_values_use_linear_companding_branch() {
        let c = 0.04;
        assert!((srgb_to_linear(c) - c / 12.92).abs() < 1e-15);
        assert!((cie_f(0.0) - 16.0 / 116.0).abs() < 1e-15);
    }

    #[test]
    fn raster_conversion_fills_all_planes() {
        let raster = RgbaRaster::filled(4, 3, [128, 128, 128, 255]);
        let lab = LabImage::from_raster(raster.as_view(), &LabConverter::default());
        assert_eq!(lab.width(), 4);
        assert_eq!(lab.height(), 3);
        assert_eq!(lab.l.data.len(), 12);
        let expected = LabConverter::default().convert_rgba8([128, 128, 128, 255]);
        assert!(lab.l.data.iter().all(|&v| v == expected.l));
        assert!(lab.a.data.iter().all(|&v| v == expected.a));

        let shifted = lab.shifted_to_origin();
        assert!(shifted.l.data.iter().all(|&v| v == 0.0));
        assert!(shifted.b.data.iter().all(|&v| v == 0.0));
    }
}
