//! Render-camera description records.
//!
//! A render camera groups pinhole intrinsics, renderer clip planes, and the
//! pose of the optical frame relative to the sensor body. Color and depth
//! cameras share one [`RenderCameraCore`] record and add their own fields by
//! composition.

use nalgebra::Isometry3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::CameraError;

/// Pinhole camera intrinsics.
///
/// # Pinhole Model
///
/// Projects a 3D point `[X, Y, Z]` in the optical frame to pixel coordinates:
/// ```text
/// u = fx * X/Z + cx
/// v = fy * Y/Z + cy
/// ```
///
/// # Symmetry
///
/// Downstream renderers currently only fully support radially symmetric,
/// centered intrinsics (`fx == fy`, principal point at
/// `(width/2 + 0.5, height/2 + 0.5)`). Other intrinsics are representable
/// and accepted; [`CameraIntrinsics::is_symmetric_and_centered`] reports
/// which case an instance is.
///
/// # Example
///
/// ```
/// use rgbd_types::CameraIntrinsics;
///
/// let intrinsics = CameraIntrinsics::from_fov_y(640, 480, std::f64::consts::FRAC_PI_2);
/// assert!(intrinsics.is_symmetric_and_centered());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraIntrinsics {
    width: u32,
    height: u32,
    fx: f64,
    fy: f64,
    cx: f64,
    cy: f64,
}

impl CameraIntrinsics {
    /// Creates intrinsics from explicit focal lengths and principal point.
    ///
    /// Behavior is undefined for `width == 0` or `height == 0`.
    #[must_use]
    pub const fn new(width: u32, height: u32, fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self {
            width,
            height,
            fx,
            fy,
            cx,
            cy,
        }
    }

    /// Creates symmetric, centered intrinsics from a vertical field of view.
    ///
    /// Both focal lengths are `height / (2 * tan(fov_y / 2))` and the
    /// principal point sits at `(width/2 + 0.5, height/2 + 0.5)`.
    ///
    /// Behavior is undefined for `width == 0` or `height == 0`.
    #[must_use]
    pub fn from_fov_y(width: u32, height: u32, fov_y: f64) -> Self {
        let focal = f64::from(height) / (2.0 * (fov_y / 2.0).tan());
        Self {
            width,
            height,
            fx: focal,
            fy: focal,
            cx: f64::from(width) / 2.0 + 0.5,
            cy: f64::from(height) / 2.0 + 0.5,
        }
    }

    /// Returns the image width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the focal length in pixels (x direction).
    #[must_use]
    pub const fn focal_x(&self) -> f64 {
        self.fx
    }

    /// Returns the focal length in pixels (y direction).
    #[must_use]
    pub const fn focal_y(&self) -> f64 {
        self.fy
    }

    /// Returns the principal point x-coordinate in pixels.
    #[must_use]
    pub const fn center_x(&self) -> f64 {
        self.cx
    }

    /// Returns the principal point y-coordinate in pixels.
    #[must_use]
    pub const fn center_y(&self) -> f64 {
        self.cy
    }

    /// Returns the vertical field of view in radians.
    #[must_use]
    pub fn fov_y(&self) -> f64 {
        2.0 * (f64::from(self.height) / (2.0 * self.fy)).atan()
    }

    /// Returns the horizontal field of view in radians.
    #[must_use]
    pub fn fov_x(&self) -> f64 {
        2.0 * (f64::from(self.width) / (2.0 * self.fx)).atan()
    }

    /// Returns true if the intrinsics are radially symmetric and centered.
    ///
    /// The comparison is exact: `fx == fy` with the principal point at
    /// `(width/2 + 0.5, height/2 + 0.5)`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_symmetric_and_centered(&self) -> bool {
        self.fx == self.fy
            && self.cx == f64::from(self.width) / 2.0 + 0.5
            && self.cy == f64::from(self.height) / 2.0 + 0.5
    }
}

/// Near and far clip planes for a render camera, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClippingRange {
    near: f64,
    far: f64,
}

impl ClippingRange {
    /// Creates a clipping range.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::InvalidClippingRange`] unless `0 < near < far`.
    pub fn new(near: f64, far: f64) -> Result<Self, CameraError> {
        if !(near > 0.0 && far > near) {
            return Err(CameraError::InvalidClippingRange { near, far });
        }
        Ok(Self { near, far })
    }

    /// The legacy renderer clip planes: near 0.01 m, far 10.0 m.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            near: 0.01,
            far: 10.0,
        }
    }

    /// Returns the near plane in meters.
    #[must_use]
    pub const fn near(&self) -> f64 {
        self.near
    }

    /// Returns the far plane in meters.
    #[must_use]
    pub const fn far(&self) -> f64 {
        self.far
    }
}

impl Default for ClippingRange {
    fn default() -> Self {
        Self::legacy()
    }
}

/// Valid depth interval for a depth camera, in meters.
///
/// Distinct from [`ClippingRange`]: the clip planes bound what the renderer
/// draws, while the depth range bounds which returns count as valid
/// measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DepthRange {
    min_depth: f64,
    max_depth: f64,
}

impl DepthRange {
    /// Creates a depth range.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::InvalidDepthRange`] unless
    /// `0 <= min_depth < max_depth`.
    pub fn new(min_depth: f64, max_depth: f64) -> Result<Self, CameraError> {
        if !(min_depth >= 0.0 && max_depth > min_depth) {
            return Err(CameraError::InvalidDepthRange {
                min: min_depth,
                max: max_depth,
            });
        }
        Ok(Self {
            min_depth,
            max_depth,
        })
    }

    /// Returns the minimum valid depth in meters.
    #[must_use]
    pub const fn min_depth(&self) -> f64 {
        self.min_depth
    }

    /// Returns the maximum valid depth in meters.
    #[must_use]
    pub const fn max_depth(&self) -> f64 {
        self.max_depth
    }
}

/// Shared description of one render camera.
///
/// Groups the renderer identifier, the intrinsics, the clip planes, and the
/// fixed pose `X_BC` of the optical frame C relative to the sensor body B.
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderCameraCore {
    renderer_name: String,
    intrinsics: CameraIntrinsics,
    clipping: ClippingRange,
    x_bc: Isometry3<f64>,
}

impl RenderCameraCore {
    /// Creates a render-camera core.
    #[must_use]
    pub fn new(
        renderer_name: impl Into<String>,
        intrinsics: CameraIntrinsics,
        clipping: ClippingRange,
        x_bc: Isometry3<f64>,
    ) -> Self {
        Self {
            renderer_name: renderer_name.into(),
            intrinsics,
            clipping,
            x_bc,
        }
    }

    /// Returns the identifier of the renderer this camera targets.
    #[must_use]
    pub fn renderer_name(&self) -> &str {
        &self.renderer_name
    }

    /// Returns the camera intrinsics.
    #[must_use]
    pub const fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    /// Returns the clip planes.
    #[must_use]
    pub const fn clipping(&self) -> &ClippingRange {
        &self.clipping
    }

    /// Returns the pose of the optical frame relative to the sensor body.
    #[must_use]
    pub const fn camera_pose_in_body(&self) -> &Isometry3<f64> {
        &self.x_bc
    }
}

/// A color render camera: shared core plus a diagnostic window flag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorRenderCamera {
    core: RenderCameraCore,
    show_window: bool,
}

impl ColorRenderCamera {
    /// Creates a color render camera.
    #[must_use]
    pub const fn new(core: RenderCameraCore, show_window: bool) -> Self {
        Self { core, show_window }
    }

    /// Returns the shared camera core.
    #[must_use]
    pub const fn core(&self) -> &RenderCameraCore {
        &self.core
    }

    /// Returns true if the renderer should show a diagnostic window.
    #[must_use]
    pub const fn show_window(&self) -> bool {
        self.show_window
    }
}

/// A depth render camera: shared core plus a valid depth interval.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DepthRenderCamera {
    core: RenderCameraCore,
    depth_range: DepthRange,
}

impl DepthRenderCamera {
    /// Creates a depth render camera.
    #[must_use]
    pub const fn new(core: RenderCameraCore, depth_range: DepthRange) -> Self {
        Self { core, depth_range }
    }

    /// Returns the shared camera core.
    #[must_use]
    pub const fn core(&self) -> &RenderCameraCore {
        &self.core
    }

    /// Returns the valid depth interval.
    #[must_use]
    pub const fn depth_range(&self) -> &DepthRange {
        &self.depth_range
    }
}
