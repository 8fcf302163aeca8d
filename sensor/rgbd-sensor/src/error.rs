//! Error types for sensor construction.

use thiserror::Error;

/// Errors that can occur when constructing a sensor.
///
/// These cover plainly invalid configuration only. Accepted-but-suboptimal
/// configurations (asymmetric intrinsics, depth ranges past the 16-bit
/// millimeter ceiling) log a warning instead and construction succeeds.
#[derive(Debug, Error)]
pub enum SensorError {
    /// The sampling period of a discrete sensor must be positive and finite.
    #[error("sampling period must be positive and finite, got {0} s")]
    InvalidPeriod(f64),

    /// A camera specification could not be built.
    #[error(transparent)]
    Camera(#[from] rgbd_types::CameraError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SensorError::InvalidPeriod(-0.1);
        let msg = format!("{err}");
        assert!(msg.contains("sampling period"));
        assert!(msg.contains("-0.1"));
    }

    #[test]
    fn camera_error_passes_through() {
        let err: SensorError = rgbd_types::CameraError::InvalidDepthRange { min: 1.0, max: 0.5 }.into();
        assert!(format!("{err}").contains("invalid depth range"));
    }
}
