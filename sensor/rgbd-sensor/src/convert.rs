//! Depth encoding: `f32` meters to saturating `u16` millimeters.

use rgbd_types::{ImageDepth16U, ImageDepth32F};

/// Largest depth the 16-bit millimeter encoding can represent: 65534 mm.
pub const DEPTH_16U_MAX_MM: u16 = u16::MAX - 1;

/// Largest depth in meters that survives the 16-bit millimeter encoding
/// without saturating (65.534 m).
pub const DEPTH_16U_MAX_M: f64 = DEPTH_16U_MAX_MM as f64 / 1000.0;

/// Converts a depth in meters to millimeters, truncating toward zero and
/// saturating at [`DEPTH_16U_MAX_MM`].
///
/// Truncation (not rounding) is deliberate: `convert(d) == floor(d * 1000)`
/// for every `d` in `[0, 65.534]`. Negative or non-finite inputs are not
/// guarded; they take whatever the clamp-and-truncate path yields.
///
/// # Example
///
/// ```
/// use rgbd_sensor::depth_to_millimeters;
///
/// assert_eq!(depth_to_millimeters(5.0), 5000);
/// assert_eq!(depth_to_millimeters(0.0105), 10);
/// assert_eq!(depth_to_millimeters(100.0), 65534);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn depth_to_millimeters(meters: f32) -> u16 {
    // `as` saturates, so the floor result past 65534.0 clamps on its own;
    // the min keeps the saturation value one below u16::MAX.
    let millimeters = (f64::from(meters) * 1000.0).floor();
    millimeters.min(f64::from(DEPTH_16U_MAX_MM)) as u16
}

/// Converts a depth image from `f32` meters to `u16` millimeters, pixel by
/// pixel via [`depth_to_millimeters`].
///
/// Each pixel is independent, so the conversion is order-free. `dst` must
/// already have the same shape as `src`; only the overlapping pixels are
/// written otherwise.
pub fn convert_depth_image(src: &ImageDepth32F, dst: &mut ImageDepth16U) {
    debug_assert!(src.same_shape(dst));
    for (d16, &d32) in dst.as_mut_slice().iter_mut().zip(src.as_slice()) {
        *d16 = depth_to_millimeters(d32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_by_truncation() {
        assert_eq!(depth_to_millimeters(0.0), 0);
        assert_eq!(depth_to_millimeters(0.001), 1);
        assert_eq!(depth_to_millimeters(1.2345), 1234);
        assert_eq!(depth_to_millimeters(1.2349), 1234);
        assert_eq!(depth_to_millimeters(5.0), 5000);
    }

    #[test]
    fn saturates_past_encoding_limit() {
        assert_eq!(depth_to_millimeters(65.5345), 65534);
        assert_eq!(depth_to_millimeters(65.6), 65534);
        assert_eq!(depth_to_millimeters(1.0e6), 65534);
        assert_eq!(depth_to_millimeters(f32::INFINITY), 65534);
    }

    #[test]
    fn monotonic_over_valid_domain() {
        let mut last = 0;
        let mut d = 0.0_f32;
        while d < 66.0 {
            let mm = depth_to_millimeters(d);
            assert!(mm >= last, "not monotonic at {d}");
            last = mm;
            d += 0.0137;
        }
    }

    #[test]
    fn image_conversion_is_per_pixel() {
        let mut src = ImageDepth32F::new(4, 3);
        *src.at_mut(0, 0).unwrap() = 0.5;
        *src.at_mut(3, 2).unwrap() = 70.0;
        *src.at_mut(1, 1).unwrap() = 1.9996;

        let mut dst = ImageDepth16U::new(4, 3);
        convert_depth_image(&src, &mut dst);

        assert_eq!(dst.get(0, 0), Some(500));
        assert_eq!(dst.get(3, 2), Some(65534));
        assert_eq!(dst.get(1, 1), Some(1999));
        assert_eq!(dst.get(2, 0), Some(0));
    }
}
