//! The scene-query seam between the sensor and its collaborators.
//!
//! Rendering and the frame hierarchy live outside this crate. The sensor only
//! needs two capabilities from them: render an image for a camera posed
//! relative to a known frame, and report the world pose of a frame. Both are
//! reached through [`SceneQuery`].

use nalgebra::Isometry3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rgbd_types::{
    CameraProperties, DepthCameraProperties, ImageDepth32F, ImageLabel16I, ImageRgba8,
};

/// Identifier of a frame registered with the external scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameId(pub u64);

impl FrameId {
    /// The designated world (root) frame.
    pub const WORLD: Self = Self(0);

    /// Create a new frame ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns true if this is the world frame.
    #[must_use]
    pub const fn is_world(self) -> bool {
        self.0 == Self::WORLD.0
    }
}

impl From<u64> for FrameId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}

/// A queryable scene: renders images and reports frame poses.
///
/// Implemented by the surrounding system; the sensor calls into it
/// synchronously on the reading thread. All camera poses are given relative
/// to a parent frame so the implementor can resolve the camera's world pose
/// from its own frame hierarchy.
///
/// Failures (unconnected scene, renderer faults) are the implementor's
/// responsibility; from the sensor's point of view these calls do not fail.
pub trait SceneQuery {
    /// Renders a color image for a camera posed at `x_pc` relative to
    /// `parent_frame`, into `output` (already sized to the camera).
    fn render_color_image(
        &self,
        camera: &CameraProperties,
        parent_frame: FrameId,
        x_pc: &Isometry3<f64>,
        show_window: bool,
        output: &mut ImageRgba8,
    );

    /// Renders a depth image in meters for a camera posed at `x_pd` relative
    /// to `parent_frame`, into `output` (already sized to the camera).
    fn render_depth_image(
        &self,
        camera: &DepthCameraProperties,
        parent_frame: FrameId,
        x_pd: &Isometry3<f64>,
        output: &mut ImageDepth32F,
    );

    /// Renders a semantic label image for a camera posed at `x_pc` relative
    /// to `parent_frame`, into `output` (already sized to the camera).
    fn render_label_image(
        &self,
        camera: &CameraProperties,
        parent_frame: FrameId,
        x_pc: &Isometry3<f64>,
        show_window: bool,
        output: &mut ImageLabel16I,
    );

    /// Returns the current world pose of `frame`.
    fn world_pose(&self, frame: FrameId) -> Isometry3<f64>;
}
