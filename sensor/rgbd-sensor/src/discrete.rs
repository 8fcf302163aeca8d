//! Fixed-rate sampled variant of the RGB-D sensor.

use rgbd_types::{ImageDepth16U, ImageDepth32F, ImageLabel16I, ImageRgba8};

use crate::scene::SceneQuery;
use crate::sensor::{PoseVector, RgbdSensor};
use crate::{Result, SensorError};

/// An RGB-D sensor whose image outputs are sampled at a fixed period.
///
/// Owns one inner [`RgbdSensor`] plus a held buffer per sampled output.
/// Image outputs update together at sample instants `k * period` and stay
/// constant in between; the pose output is forwarded from the inner sensor
/// with no hold, reading current scene state every time.
///
/// Each sampled output is in one of two states: *held* (the value latched at
/// the last instant) or *updating* (inside [`sample`](Self::sample), where
/// all held buffers are recomputed from the scene state of that instant).
/// The holds latch in the same call, so a reader never sees a mix of old and
/// new values.
///
/// The label output is decided at construction: when disabled there is no
/// label hold at all, not a permanently empty one.
///
/// # Example
///
/// ```no_run
/// use rgbd_sensor::{CameraPoses, FrameId, RgbdSensor, RgbdSensorDiscrete};
/// use rgbd_types::DepthCameraProperties;
/// use nalgebra::Isometry3;
///
/// let depth = DepthCameraProperties::new(640, 480, 1.0, "vtk", 0.1, 5.0);
/// let sensor = RgbdSensor::from_depth_properties(
///     FrameId::WORLD,
///     Isometry3::identity(),
///     &depth,
///     &CameraPoses::default(),
///     false,
/// )?;
/// let mut discrete = RgbdSensorDiscrete::new(sensor, 1.0 / 30.0, true)?;
///
/// # let query: Box<dyn rgbd_sensor::SceneQuery> = unimplemented!();
/// discrete.sample(0.0, query.as_ref());
/// let color = discrete.color_image();
/// # Ok::<(), rgbd_sensor::SensorError>(())
/// ```
pub struct RgbdSensorDiscrete {
    sensor: RgbdSensor,
    period: f64,
    last_step: Option<u64>,
    color_held: ImageRgba8,
    depth_32f_held: ImageDepth32F,
    depth_16u_held: ImageDepth16U,
    label_held: Option<ImageLabel16I>,
}

impl RgbdSensorDiscrete {
    /// Wraps `sensor`, sampling its image outputs every `period` seconds.
    ///
    /// `render_label_image` decides once whether the composite has a label
    /// output. Before the first sample instant the holds contain zeroed
    /// images.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::InvalidPeriod`] unless `period` is positive
    /// and finite.
    pub fn new(sensor: RgbdSensor, period: f64, render_label_image: bool) -> Result<Self> {
        if !(period.is_finite() && period > 0.0) {
            return Err(SensorError::InvalidPeriod(period));
        }
        let color_held = sensor.new_color_image();
        let depth_32f_held = sensor.new_depth_image_32f();
        let depth_16u_held = sensor.new_depth_image_16u();
        let label_held = render_label_image.then(|| sensor.new_label_image());
        Ok(Self {
            sensor,
            period,
            last_step: None,
            color_held,
            depth_32f_held,
            depth_16u_held,
            label_held,
        })
    }

    /// Returns the sampling period in seconds.
    #[must_use]
    pub const fn period(&self) -> f64 {
        self.period
    }

    /// Returns the inner continuous sensor.
    #[must_use]
    pub const fn sensor(&self) -> &RgbdSensor {
        &self.sensor
    }

    /// Returns true if the composite exposes a label output.
    #[must_use]
    pub const fn has_label_output(&self) -> bool {
        self.label_held.is_some()
    }

    /// Returns the number of outputs the composite exposes.
    ///
    /// Color, both depth encodings and the pose, plus the label output when
    /// enabled: 4 or 5.
    #[must_use]
    pub fn output_count(&self) -> usize {
        if self.has_label_output() {
            5
        } else {
            4
        }
    }

    /// Returns the next sample instant, in seconds.
    #[must_use]
    pub fn next_sample_time(&self) -> f64 {
        match self.last_step {
            None => 0.0,
            #[allow(clippy::cast_precision_loss)]
            Some(step) => (step + 1) as f64 * self.period,
        }
    }

    /// Latches all sampled outputs if `time` has entered a new sampling
    /// interval.
    ///
    /// With period `T`, interval `k` spans `[kT, (k+1)T)`. The first call
    /// inside an interval recomputes every held image from the inner sensor
    /// against current scene state, atomically; later calls in the same
    /// interval do nothing. Returns whether an update occurred.
    ///
    /// Negative or non-finite times never latch.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sample(&mut self, time: f64, query: &dyn SceneQuery) -> bool {
        if !time.is_finite() || time < 0.0 {
            return false;
        }
        let step = (time / self.period).floor() as u64;
        if self.last_step == Some(step) {
            return false;
        }

        self.sensor.calc_color_image(query, &mut self.color_held);
        self.sensor
            .calc_depth_image_32f(query, &mut self.depth_32f_held);
        self.sensor
            .calc_depth_image_16u(query, &mut self.depth_16u_held);
        if let Some(label) = self.label_held.as_mut() {
            self.sensor.calc_label_image(query, label);
        }
        self.last_step = Some(step);
        true
    }

    /// Returns the color image held since the last sample instant.
    #[must_use]
    pub const fn color_image(&self) -> &ImageRgba8 {
        &self.color_held
    }

    /// Returns the meter depth image held since the last sample instant.
    #[must_use]
    pub const fn depth_image_32f(&self) -> &ImageDepth32F {
        &self.depth_32f_held
    }

    /// Returns the millimeter depth image held since the last sample instant.
    #[must_use]
    pub const fn depth_image_16u(&self) -> &ImageDepth16U {
        &self.depth_16u_held
    }

    /// Returns the held label image, or `None` if the label output was
    /// disabled at construction.
    #[must_use]
    pub fn label_image(&self) -> Option<&ImageLabel16I> {
        self.label_held.as_ref()
    }

    /// Computes the current body world pose, unsampled.
    ///
    /// Forwarded straight to the inner sensor; uses whatever scene state is
    /// current at read time, independent of the sampling period.
    #[must_use]
    pub fn pose(&self, query: &dyn SceneQuery) -> PoseVector {
        self.sensor.calc_pose(query)
    }
}
