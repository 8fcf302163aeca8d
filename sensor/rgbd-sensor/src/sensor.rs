//! The continuous RGB-D sensor.

use nalgebra::{Isometry3, UnitQuaternion, Vector3};
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rgbd_types::{
    color_camera_from_properties, depth_camera_from_properties, CameraProperties,
    ColorRenderCamera, DepthCameraProperties, DepthRenderCamera, ImageDepth16U, ImageDepth32F,
    ImageLabel16I, ImageRgba8,
};

use crate::convert::{convert_depth_image, DEPTH_16U_MAX_M};
use crate::scene::{FrameId, SceneQuery};
use crate::Result;

/// Fixed poses of the two optical frames relative to the sensor body.
///
/// `x_bc` places the color (and label) camera, `x_bd` the depth camera. Both
/// default to identity, i.e. optical frames coincident with the body frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraPoses {
    /// Pose of the color optical frame C relative to the body frame B.
    pub x_bc: Isometry3<f64>,
    /// Pose of the depth optical frame D relative to the body frame B.
    pub x_bd: Isometry3<f64>,
}

impl CameraPoses {
    /// Creates camera poses with both optical frames at the body origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the color optical frame pose.
    #[must_use]
    pub fn with_x_bc(mut self, x_bc: Isometry3<f64>) -> Self {
        self.x_bc = x_bc;
        self
    }

    /// Sets the depth optical frame pose.
    #[must_use]
    pub fn with_x_bd(mut self, x_bd: Isometry3<f64>) -> Self {
        self.x_bd = x_bd;
        self
    }
}

impl Default for CameraPoses {
    fn default() -> Self {
        Self {
            x_bc: Isometry3::identity(),
            x_bd: Isometry3::identity(),
        }
    }
}

/// A rigid pose decomposed for sensor output: translation plus unit
/// quaternion.
///
/// # Example
///
/// ```
/// use rgbd_sensor::PoseVector;
///
/// let pose = PoseVector::identity();
/// assert_eq!(pose.to_array(), [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoseVector {
    /// Translation in meters.
    pub translation: Vector3<f64>,
    /// Rotation as a unit quaternion.
    pub rotation: UnitQuaternion<f64>,
}

impl PoseVector {
    /// The identity pose.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Decomposes an isometry into a pose vector.
    #[must_use]
    pub fn from_isometry(iso: &Isometry3<f64>) -> Self {
        Self {
            translation: iso.translation.vector,
            rotation: iso.rotation,
        }
    }

    /// Recomposes the pose into an isometry.
    #[must_use]
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(self.translation.into(), self.rotation)
    }

    /// Returns the 7 components as `[x, y, z, qw, qx, qy, qz]`.
    #[must_use]
    pub fn to_array(&self) -> [f64; 7] {
        let q = self.rotation.quaternion();
        [
            self.translation.x,
            self.translation.y,
            self.translation.z,
            q.w,
            q.i,
            q.j,
            q.k,
        ]
    }
}

impl Default for PoseVector {
    fn default() -> Self {
        Self::identity()
    }
}

/// A simulated RGB-D camera rigidly attached to a body frame.
///
/// The sensor owns its two render-camera specifications and its extrinsic
/// pose `X_PB`; everything else (the scene, the renderer, the frame
/// hierarchy) is reached through the [`SceneQuery`] passed to each output
/// computation. Outputs are recomputed from current scene state on every
/// call; nothing is cached here.
///
/// Construction accepts asymmetric or off-center intrinsics and depth ranges
/// past the 16-bit millimeter ceiling, logging a warning for either.
pub struct RgbdSensor {
    parent_frame: FrameId,
    x_pb: Isometry3<f64>,
    color_camera: ColorRenderCamera,
    depth_camera: DepthRenderCamera,
}

impl RgbdSensor {
    /// Creates a sensor from full render-camera specifications.
    ///
    /// `parent_frame` is the frame P the body is attached to; `x_pb` is the
    /// fixed pose of the body frame B in P.
    #[must_use]
    pub fn new(
        parent_frame: FrameId,
        x_pb: Isometry3<f64>,
        color_camera: ColorRenderCamera,
        depth_camera: DepthRenderCamera,
    ) -> Self {
        let color = color_camera.core().intrinsics();
        let depth = depth_camera.core().intrinsics();
        if !color.is_symmetric_and_centered() || !depth.is_symmetric_and_centered() {
            warn!(
                color_focal_x = color.focal_x(),
                color_focal_y = color.focal_y(),
                color_center_x = color.center_x(),
                color_center_y = color.center_y(),
                depth_focal_x = depth.focal_x(),
                depth_focal_y = depth.focal_y(),
                depth_center_x = depth.center_x(),
                depth_center_y = depth.center_y(),
                "camera specification is not radially symmetric and centered; \
                 renderers currently only fully support the symmetric centered case"
            );
        }

        let max_depth = depth_camera.depth_range().max_depth();
        if max_depth > DEPTH_16U_MAX_M {
            warn!(
                max_depth_m = max_depth,
                encoding_limit_m = DEPTH_16U_MAX_M,
                "max depth exceeds the 16-bit millimeter encoding; \
                 the millimeter depth image will saturate"
            );
        }

        Self {
            parent_frame,
            x_pb,
            color_camera,
            depth_camera,
        }
    }

    /// Creates a sensor from simplified color and depth camera properties.
    ///
    /// Both cameras get the legacy clip planes; the optical frames are placed
    /// per `poses`.
    ///
    /// # Errors
    ///
    /// Returns an error if the depth properties' `[z_near, z_far]` is not a
    /// valid depth range.
    pub fn from_properties(
        parent_frame: FrameId,
        x_pb: Isometry3<f64>,
        color_properties: &CameraProperties,
        depth_properties: &DepthCameraProperties,
        poses: &CameraPoses,
        show_window: bool,
    ) -> Result<Self> {
        let color_camera = color_camera_from_properties(color_properties, show_window, poses.x_bc);
        let depth_camera = depth_camera_from_properties(depth_properties, poses.x_bd)?;
        Ok(Self::new(parent_frame, x_pb, color_camera, depth_camera))
    }

    /// Creates a sensor whose color camera reuses the depth camera's shape
    /// and field of view.
    ///
    /// # Errors
    ///
    /// Returns an error if the depth properties' `[z_near, z_far]` is not a
    /// valid depth range.
    pub fn from_depth_properties(
        parent_frame: FrameId,
        x_pb: Isometry3<f64>,
        depth_properties: &DepthCameraProperties,
        poses: &CameraPoses,
        show_window: bool,
    ) -> Result<Self> {
        Self::from_properties(
            parent_frame,
            x_pb,
            &depth_properties.camera,
            depth_properties,
            poses,
            show_window,
        )
    }

    /// Returns the parent frame the sensor body is attached to.
    #[must_use]
    pub const fn parent_frame_id(&self) -> FrameId {
        self.parent_frame
    }

    /// Returns the fixed pose of the body frame in the parent frame.
    #[must_use]
    pub const fn x_pb(&self) -> &Isometry3<f64> {
        &self.x_pb
    }

    /// Returns the pose of the color optical frame in the body frame.
    #[must_use]
    pub const fn x_bc(&self) -> &Isometry3<f64> {
        self.color_camera.core().camera_pose_in_body()
    }

    /// Returns the pose of the depth optical frame in the body frame.
    #[must_use]
    pub const fn x_bd(&self) -> &Isometry3<f64> {
        self.depth_camera.core().camera_pose_in_body()
    }

    /// Returns the full color render camera.
    #[must_use]
    pub const fn color_camera(&self) -> &ColorRenderCamera {
        &self.color_camera
    }

    /// Returns the full depth render camera.
    #[must_use]
    pub const fn depth_camera(&self) -> &DepthRenderCamera {
        &self.depth_camera
    }

    /// Returns the color camera intrinsics.
    #[must_use]
    pub const fn color_camera_info(&self) -> &rgbd_types::CameraIntrinsics {
        self.color_camera.core().intrinsics()
    }

    /// Returns the depth camera intrinsics.
    #[must_use]
    pub const fn depth_camera_info(&self) -> &rgbd_types::CameraIntrinsics {
        self.depth_camera.core().intrinsics()
    }

    /// Allocates a color image buffer shaped for this sensor.
    #[must_use]
    pub fn new_color_image(&self) -> ImageRgba8 {
        let info = self.color_camera_info();
        ImageRgba8::new(info.width(), info.height())
    }

    /// Allocates a meter depth image buffer shaped for this sensor.
    #[must_use]
    pub fn new_depth_image_32f(&self) -> ImageDepth32F {
        let info = self.depth_camera_info();
        ImageDepth32F::new(info.width(), info.height())
    }

    /// Allocates a millimeter depth image buffer shaped for this sensor.
    #[must_use]
    pub fn new_depth_image_16u(&self) -> ImageDepth16U {
        let info = self.depth_camera_info();
        ImageDepth16U::new(info.width(), info.height())
    }

    /// Allocates a label image buffer shaped for this sensor.
    #[must_use]
    pub fn new_label_image(&self) -> ImageLabel16I {
        let info = self.color_camera_info();
        ImageLabel16I::new(info.width(), info.height())
    }

    /// Renders the color image from current scene state.
    ///
    /// The camera is posed at `X_PB * X_BC` relative to the parent frame.
    pub fn calc_color_image(&self, query: &dyn SceneQuery, output: &mut ImageRgba8) {
        let camera = self.simple_color_properties();
        query.render_color_image(
            &camera,
            self.parent_frame,
            &(self.x_pb * self.x_bc()),
            self.color_camera.show_window(),
            output,
        );
    }

    /// Renders the depth image in meters from current scene state.
    ///
    /// The camera is posed at `X_PB * X_BD` relative to the parent frame.
    pub fn calc_depth_image_32f(&self, query: &dyn SceneQuery, output: &mut ImageDepth32F) {
        let camera = self.simple_depth_properties();
        query.render_depth_image(
            &camera,
            self.parent_frame,
            &(self.x_pb * self.x_bd()),
            output,
        );
    }

    /// Renders the depth image in saturating millimeters from current scene
    /// state.
    ///
    /// Renders the meter image through the same path as
    /// [`calc_depth_image_32f`](Self::calc_depth_image_32f), then converts
    /// per pixel.
    pub fn calc_depth_image_16u(&self, query: &dyn SceneQuery, output: &mut ImageDepth16U) {
        let mut meters = ImageDepth32F::new(output.width(), output.height());
        self.calc_depth_image_32f(query, &mut meters);
        convert_depth_image(&meters, output);
    }

    /// Renders the semantic label image from current scene state.
    ///
    /// Uses the color camera, posed at `X_PB * X_BC`.
    pub fn calc_label_image(&self, query: &dyn SceneQuery, output: &mut ImageLabel16I) {
        let camera = self.simple_color_properties();
        query.render_label_image(
            &camera,
            self.parent_frame,
            &(self.x_pb * self.x_bc()),
            self.color_camera.show_window(),
            output,
        );
    }

    /// Computes the current world pose `X_WB` of the sensor body.
    ///
    /// When the parent frame is the world frame this is `X_PB` exactly and
    /// the scene is not consulted; otherwise `X_WB = X_WP * X_PB` with
    /// `X_WP` read from the scene query.
    #[must_use]
    pub fn calc_pose(&self, query: &dyn SceneQuery) -> PoseVector {
        let x_wb = if self.parent_frame.is_world() {
            self.x_pb
        } else {
            query.world_pose(self.parent_frame) * self.x_pb
        };
        PoseVector::from_isometry(&x_wb)
    }

    fn simple_color_properties(&self) -> CameraProperties {
        let core = self.color_camera.core();
        CameraProperties::new(
            core.intrinsics().width(),
            core.intrinsics().height(),
            core.intrinsics().fov_y(),
            core.renderer_name(),
        )
    }

    fn simple_depth_properties(&self) -> DepthCameraProperties {
        let core = self.depth_camera.core();
        let range = self.depth_camera.depth_range();
        DepthCameraProperties::new(
            core.intrinsics().width(),
            core.intrinsics().height(),
            core.intrinsics().fov_y(),
            core.renderer_name(),
            range.min_depth(),
            range.max_depth(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_sensor(parent: FrameId, x_pb: Isometry3<f64>) -> RgbdSensor {
        let color = CameraProperties::new(64, 48, 1.0, "vtk");
        let depth = DepthCameraProperties::new(64, 48, 1.0, "vtk", 0.1, 5.0);
        RgbdSensor::from_properties(parent, x_pb, &color, &depth, &CameraPoses::default(), false)
            .unwrap()
    }

    #[test]
    fn pose_vector_layout() {
        let iso = Isometry3::from_parts(
            Vector3::new(1.0, 2.0, 3.0).into(),
            UnitQuaternion::from_euler_angles(0.0, 0.0, std::f64::consts::FRAC_PI_2),
        );
        let pose = PoseVector::from_isometry(&iso);
        let arr = pose.to_array();

        assert_relative_eq!(arr[0], 1.0);
        assert_relative_eq!(arr[1], 2.0);
        assert_relative_eq!(arr[2], 3.0);
        // 90 degrees about z: [cos(45), 0, 0, sin(45)]
        assert_relative_eq!(arr[3], std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(arr[6], std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn pose_vector_roundtrip() {
        let iso = Isometry3::from_parts(
            Vector3::new(0.5, -0.5, 2.0).into(),
            UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3),
        );
        let back = PoseVector::from_isometry(&iso).to_isometry();
        assert_relative_eq!(iso.translation.vector, back.translation.vector);
        assert_relative_eq!(iso.rotation.angle_to(&back.rotation), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn sensor_buffer_shapes() {
        let sensor = test_sensor(FrameId::WORLD, Isometry3::identity());
        assert_eq!(sensor.new_color_image().width(), 64);
        assert_eq!(sensor.new_color_image().height(), 48);
        assert_eq!(sensor.new_depth_image_32f().pixel_count(), 64 * 48);
        assert_eq!(sensor.new_depth_image_16u().pixel_count(), 64 * 48);
        assert_eq!(sensor.new_label_image().pixel_count(), 64 * 48);
    }

    #[test]
    fn sensor_accessors() {
        let x_pb = Isometry3::translation(1.0, 0.0, 0.5);
        let poses = CameraPoses::new()
            .with_x_bc(Isometry3::translation(0.0, 0.01, 0.0))
            .with_x_bd(Isometry3::translation(0.0, -0.01, 0.0));
        let color = CameraProperties::new(64, 48, 1.0, "vtk");
        let depth = DepthCameraProperties::new(32, 24, 1.0, "vtk", 0.1, 5.0);
        let sensor = RgbdSensor::from_properties(
            FrameId::new(3),
            x_pb,
            &color,
            &depth,
            &poses,
            false,
        )
        .unwrap();

        assert_eq!(sensor.parent_frame_id(), FrameId::new(3));
        assert_relative_eq!(sensor.x_pb().translation.x, 1.0);
        assert_relative_eq!(sensor.x_bc().translation.y, 0.01);
        assert_relative_eq!(sensor.x_bd().translation.y, -0.01);
        assert_eq!(sensor.color_camera_info().width(), 64);
        assert_eq!(sensor.depth_camera_info().width(), 32);
    }

    #[test]
    fn from_depth_properties_shares_camera_shape() {
        let depth = DepthCameraProperties::new(32, 24, 1.0, "vtk", 0.1, 5.0);
        let sensor = RgbdSensor::from_depth_properties(
            FrameId::WORLD,
            Isometry3::identity(),
            &depth,
            &CameraPoses::default(),
            false,
        )
        .unwrap();

        assert_eq!(sensor.color_camera_info().width(), 32);
        assert_eq!(sensor.color_camera_info().height(), 24);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn pose_vector_serialization() {
        let pose = PoseVector::identity();
        let json = serde_json::to_string(&pose).ok();
        assert!(json.is_some());
    }

    #[test]
    fn oversized_depth_range_is_accepted() {
        // Warns but constructs; saturation is exercised in the conversion tests.
        let depth = DepthCameraProperties::new(64, 48, 1.0, "vtk", 0.1, 100.0);
        let sensor = RgbdSensor::from_depth_properties(
            FrameId::WORLD,
            Isometry3::identity(),
            &depth,
            &CameraPoses::default(),
            false,
        );
        assert!(sensor.is_ok());
    }
}
