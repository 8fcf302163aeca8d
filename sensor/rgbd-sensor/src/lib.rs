//! Simulated RGB-D camera sensor.
//!
//! This crate models an RGB-D camera rigidly attached to a moving body in a
//! 3-D scene. Given a scene query (the external collaborator that actually
//! renders pixels and reports frame poses), the sensor produces:
//!
//! - a color image (RGBA, 8 bits per channel)
//! - a depth image in `f32` meters
//! - a depth image in saturating `u16` millimeters
//! - a semantic label image (`i16` per pixel)
//! - the world pose of the sensor body as translation + unit quaternion
//!
//! Two flavors are provided:
//!
//! - [`RgbdSensor`] - continuous: every output is recomputed from the current
//!   scene state each time it is read.
//! - [`RgbdSensorDiscrete`] - wraps an owned `RgbdSensor` and latches the
//!   image outputs at a fixed period; the pose output passes through
//!   unsampled.
//!
//! # Frames
//!
//! Pose names follow the `X_AB` convention: the pose of frame B measured in
//! frame A, composed as `X_AC = X_AB * X_BC`. The sensor body frame B is
//! fixed at `X_PB` relative to its parent frame P; the color and depth
//! optical frames C and D are fixed at `X_BC`/`X_BD` relative to the body.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero engine dependencies**. The renderer is
//! reached only through the [`SceneQuery`] trait.
//!
//! # Example
//!
//! ```no_run
//! use rgbd_sensor::{CameraPoses, FrameId, RgbdSensor};
//! use rgbd_types::{CameraProperties, DepthCameraProperties};
//! use nalgebra::Isometry3;
//!
//! let color = CameraProperties::new(640, 480, 1.0, "vtk");
//! let depth = DepthCameraProperties::new(640, 480, 1.0, "vtk", 0.1, 5.0);
//! let sensor = RgbdSensor::from_properties(
//!     FrameId::WORLD,
//!     Isometry3::translation(0.0, 0.0, 1.0),
//!     &color,
//!     &depth,
//!     &CameraPoses::default(),
//!     false,
//! )?;
//!
//! let mut color_image = sensor.new_color_image();
//! # let query: Box<dyn rgbd_sensor::SceneQuery> = unimplemented!();
//! sensor.calc_color_image(query.as_ref(), &mut color_image);
//! # Ok::<(), rgbd_sensor::SensorError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_const_for_fn, clippy::suboptimal_flops)]

mod convert;
mod discrete;
mod error;
mod scene;
mod sensor;

pub use convert::{convert_depth_image, depth_to_millimeters, DEPTH_16U_MAX_M, DEPTH_16U_MAX_MM};
pub use discrete::RgbdSensorDiscrete;
pub use error::SensorError;
pub use scene::{FrameId, SceneQuery};
pub use sensor::{CameraPoses, PoseVector, RgbdSensor};

/// Result type for sensor operations.
pub type Result<T> = std::result::Result<T, SensorError>;
