//! Error types for camera specifications.

use thiserror::Error;

/// Errors that can occur when constructing camera specifications.
#[derive(Debug, Error)]
pub enum CameraError {
    /// Depth range is inverted, degenerate, or negative.
    #[error("invalid depth range: min {min} m, max {max} m (need 0 <= min < max)")]
    InvalidDepthRange {
        /// Requested minimum depth in meters.
        min: f64,
        /// Requested maximum depth in meters.
        max: f64,
    },

    /// Clipping range is inverted or non-positive.
    #[error("invalid clipping range: near {near} m, far {far} m (need 0 < near < far)")]
    InvalidClippingRange {
        /// Requested near plane in meters.
        near: f64,
        /// Requested far plane in meters.
        far: f64,
    },
}
