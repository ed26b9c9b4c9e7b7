use std::sync::Arc;

use image::{RgbaImage, Rgba, imageops};
use parking_lot::Mutex;

use crate::error::{CanvasError, CanvasResult};
use crate::geometry::Region;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Buffer handle shared between the input thread and display consumers.
///
/// Hold the lock only for short copy/paint spans.
pub type SharedBuffer = Arc<Mutex<PixelBuffer>>;

/// The page raster. Its size is fixed when it is created.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// A blank white page
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, WHITE),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub(crate) fn pixel_mut(&mut self, x: u32, y: u32) -> &mut Rgba<u8> {
        self.image.get_pixel_mut(x, y)
    }

    /// Reset every pixel to white without reallocating
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = WHITE;
        }
    }

    /// Copy of the pixels inside `region`
    pub fn snapshot(&self, region: &Region) -> RgbaImage {
        imageops::crop_imm(&self.image, region.left, region.top, region.width(), region.height())
            .to_image()
    }

    /// Write a snapshot back with its top-left corner at `origin`
    pub fn restore(&mut self, origin: (u32, u32), snapshot: &RgbaImage) {
        imageops::replace(&mut self.image, snapshot, i64::from(origin.0), i64::from(origin.1));
    }

    /// Draw a page image over the buffer, scaled to the buffer size when the
    /// dimensions differ.
    pub fn draw_page(&mut self, page: &RgbaImage) {
        if page.dimensions() == self.image.dimensions() {
            imageops::overlay(&mut self.image, page, 0, 0);
        } else {
            log::warn!(
                "Scaling page image {}x{} to buffer {}x{}",
                page.width(),
                page.height(),
                self.width(),
                self.height()
            );
            let scaled = imageops::resize(
                page,
                self.width(),
                self.height(),
                imageops::FilterType::Triangle,
            );
            imageops::overlay(&mut self.image, &scaled, 0, 0);
        }
    }

    /// Wrap into the shared, lockable handle
    pub fn into_shared(self) -> SharedBuffer {
        Arc::new(Mutex::new(self))
    }
}
