//! Simplified camera properties and the pure builders that expand them.
//!
//! Renderers take a small, flat camera description; the sensor stores the
//! full [`ColorRenderCamera`]/[`DepthRenderCamera`] records. The functions
//! here expand the simple form into the full one using the legacy clip
//! planes, with no hidden state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use nalgebra::Isometry3;

use crate::{
    CameraError, CameraIntrinsics, ClippingRange, ColorRenderCamera, DepthRange,
    DepthRenderCamera, RenderCameraCore,
};

/// Simplified description of a color/label render camera.
///
/// # Example
///
/// ```
/// use rgbd_types::CameraProperties;
///
/// let props = CameraProperties::new(640, 480, 1.0, "vtk");
/// assert_eq!(props.width, 640);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraProperties {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Vertical field of view in radians.
    pub fov_y: f64,
    /// Identifier of the renderer that should service this camera.
    pub renderer_name: String,
}

impl CameraProperties {
    /// Creates simplified camera properties.
    #[must_use]
    pub fn new(width: u32, height: u32, fov_y: f64, renderer_name: impl Into<String>) -> Self {
        Self {
            width,
            height,
            fov_y,
            renderer_name: renderer_name.into(),
        }
    }

    /// Expands these properties into full intrinsics.
    #[must_use]
    pub fn intrinsics(&self) -> CameraIntrinsics {
        CameraIntrinsics::from_fov_y(self.width, self.height, self.fov_y)
    }
}

/// Simplified description of a depth render camera.
///
/// Adds the valid depth interval `[z_near, z_far]` to the plain camera
/// properties.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DepthCameraProperties {
    /// The underlying camera description.
    pub camera: CameraProperties,
    /// Minimum valid depth in meters.
    pub z_near: f64,
    /// Maximum valid depth in meters.
    pub z_far: f64,
}

impl DepthCameraProperties {
    /// Creates simplified depth camera properties.
    #[must_use]
    pub fn new(
        width: u32,
        height: u32,
        fov_y: f64,
        renderer_name: impl Into<String>,
        z_near: f64,
        z_far: f64,
    ) -> Self {
        Self {
            camera: CameraProperties::new(width, height, fov_y, renderer_name),
            z_near,
            z_far,
        }
    }
}

/// Builds a full color render camera from simplified properties.
///
/// Uses the legacy clip planes (near 0.01 m, far 10.0 m). `x_bc` is the pose
/// of the color optical frame relative to the sensor body. Behavior is
/// undefined for zero image dimensions.
#[must_use]
pub fn color_camera_from_properties(
    props: &CameraProperties,
    show_window: bool,
    x_bc: Isometry3<f64>,
) -> ColorRenderCamera {
    let core = RenderCameraCore::new(
        props.renderer_name.clone(),
        props.intrinsics(),
        ClippingRange::legacy(),
        x_bc,
    );
    ColorRenderCamera::new(core, show_window)
}

/// Builds a full depth render camera from simplified properties.
///
/// Uses the legacy clip planes (near 0.01 m, far 10.0 m) and the properties'
/// `[z_near, z_far]` as the valid depth interval. `x_bd` is the pose of the
/// depth optical frame relative to the sensor body.
///
/// # Errors
///
/// Returns [`CameraError::InvalidDepthRange`] if `[z_near, z_far]` is not a
/// valid depth interval.
pub fn depth_camera_from_properties(
    props: &DepthCameraProperties,
    x_bd: Isometry3<f64>,
) -> Result<DepthRenderCamera, CameraError> {
    let core = RenderCameraCore::new(
        props.camera.renderer_name.clone(),
        props.camera.intrinsics(),
        ClippingRange::legacy(),
        x_bd,
    );
    let range = DepthRange::new(props.z_near, props.z_far)?;
    Ok(DepthRenderCamera::new(core, range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn color_camera_uses_legacy_clipping() {
        let props = CameraProperties::new(640, 480, 1.0, "vtk");
        let camera = color_camera_from_properties(&props, false, Isometry3::identity());

        assert_relative_eq!(camera.core().clipping().near(), 0.01);
        assert_relative_eq!(camera.core().clipping().far(), 10.0);
        assert_eq!(camera.core().renderer_name(), "vtk");
        assert!(!camera.show_window());
    }

    #[test]
    fn depth_camera_carries_depth_range() {
        let props = DepthCameraProperties::new(64, 48, 1.0, "vtk", 0.1, 5.0);
        let camera = depth_camera_from_properties(&props, Isometry3::identity()).unwrap();

        assert_relative_eq!(camera.depth_range().min_depth(), 0.1);
        assert_relative_eq!(camera.depth_range().max_depth(), 5.0);
        assert_relative_eq!(camera.core().clipping().near(), 0.01);
        assert_relative_eq!(camera.core().clipping().far(), 10.0);
    }

    #[test]
    fn depth_camera_rejects_inverted_range() {
        let props = DepthCameraProperties::new(64, 48, 1.0, "vtk", 5.0, 0.1);
        assert!(depth_camera_from_properties(&props, Isometry3::identity()).is_err());
    }

    #[test]
    fn builder_preserves_optical_pose() {
        let props = CameraProperties::new(64, 48, 1.0, "vtk");
        let x_bc = Isometry3::translation(0.0, 0.05, 0.0);
        let camera = color_camera_from_properties(&props, false, x_bc);

        assert_relative_eq!(
            camera.core().camera_pose_in_body().translation.y,
            0.05
        );
    }

    #[test]
    fn properties_intrinsics_are_centered() {
        let props = CameraProperties::new(64, 48, 1.0, "vtk");
        assert!(props.intrinsics().is_symmetric_and_centered());
    }
}
