//! Fixed-shape image buffers for rendered sensor output.
//!
//! Buffers are sized once at construction and keep that shape for their whole
//! life; render calls write into them in place.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fixed-shape, row-major image buffer.
///
/// Pixel `(x, y)` lives at index `y * width + x`. The shape is fixed at
/// construction; only pixel values can change.
///
/// # Example
///
/// ```
/// use rgbd_types::ImageDepth32F;
///
/// let mut image = ImageDepth32F::new(64, 48);
/// image.fill(1.5);
///
/// assert_eq!(image.pixel_count(), 64 * 48);
/// assert_eq!(image.get(10, 10), Some(1.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Image<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

/// Color image: RGBA, 8 bits per channel.
pub type ImageRgba8 = Image<[u8; 4]>;

/// Depth image: one `f32` per pixel, in meters.
pub type ImageDepth32F = Image<f32>;

/// Depth image: one `u16` per pixel, in millimeters, saturating.
pub type ImageDepth16U = Image<u16>;

/// Label image: one `i16` semantic id per pixel.
pub type ImageLabel16I = Image<i16>;

impl<T: Clone + Default> Image<T> {
    /// Creates an image of the given shape filled with the default pixel value.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width as usize * height as usize],
        }
    }
}

impl<T> Image<T> {
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

    /// Returns the total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns true if this image has the same shape as `other`.
    #[must_use]
    pub fn same_shape<U>(&self, other: &Image<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Returns a reference to the pixel at `(x, y)`.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn at(&self, x: u32, y: u32) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y as usize * self.width as usize + x as usize)
    }

    /// Returns a mutable reference to the pixel at `(x, y)`.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn at_mut(&mut self, x: u32, y: u32) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get_mut(y as usize * self.width as usize + x as usize)
    }

    /// Returns the raw pixel data in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the raw pixel data mutably, in row-major order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Copy> Image<T> {
    /// Gets the pixel value at `(x, y)`.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<T> {
        self.at(x, y).copied()
    }

    /// Sets every pixel to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}
