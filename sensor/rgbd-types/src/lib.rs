//! Camera specifications and image buffers for simulated RGB-D sensors.
//!
//! This crate provides the data types a simulated RGB-D camera is described
//! with and the pixel buffers it renders into:
//!
//! - [`CameraIntrinsics`] - Pinhole intrinsics (focal lengths, principal point)
//! - [`ClippingRange`] - Renderer near/far clip planes
//! - [`DepthRange`] - Valid depth interval for a depth camera
//! - [`RenderCameraCore`] - Intrinsics + clipping + optical-frame pose
//! - [`ColorRenderCamera`] / [`DepthRenderCamera`] - Full render-camera records
//! - [`CameraProperties`] / [`DepthCameraProperties`] - Simplified descriptors
//!   handed to a renderer
//! - [`Image`] - Fixed-shape row-major pixel buffer with typed aliases
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero engine dependencies**. It can be used in:
//! - Headless simulation loops
//! - Dataset generation tools
//! - Renderer backends
//!
//! # Design Philosophy
//!
//! These are **immutable value records**. A render camera is fully described
//! at construction and never mutated afterwards; specialized camera types
//! embed a shared [`RenderCameraCore`] instead of forming a type hierarchy.
//!
//! # Example
//!
//! ```
//! use rgbd_types::{CameraProperties, color_camera_from_properties};
//! use nalgebra::Isometry3;
//!
//! let props = CameraProperties::new(640, 480, std::f64::consts::FRAC_PI_2, "vtk");
//! let camera = color_camera_from_properties(&props, false, Isometry3::identity());
//!
//! assert_eq!(camera.core().intrinsics().width(), 640);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_const_for_fn, clippy::suboptimal_flops)]

mod camera;
mod error;
mod image;
mod properties;

pub use camera::{
    CameraIntrinsics, ClippingRange, ColorRenderCamera, DepthRange, DepthRenderCamera,
    RenderCameraCore,
};
pub use error::CameraError;
pub use image::{Image, ImageDepth16U, ImageDepth32F, ImageLabel16I, ImageRgba8};
pub use properties::{
    color_camera_from_properties, depth_camera_from_properties, CameraProperties,
    DepthCameraProperties,
};
