use image::RgbaImage;

use crate::geometry::Region;
use crate::raster::PixelBuffer;

/// Pixels of one region captured right before and right after a single
/// buffer mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct EditRecord {
    origin: (u32, u32),
    before: RgbaImage,
    after: RgbaImage,
}

impl EditRecord {
    pub fn new(region: Region, before: RgbaImage, after: RgbaImage) -> Self {
        debug_assert_eq!(before.dimensions(), (region.width(), region.height()));
        debug_assert_eq!(before.dimensions(), after.dimensions());
        Self {
            origin: region.origin(),
            before,
            after,
        }
    }

    pub fn origin(&self) -> (u32, u32) {
        self.origin
    }

    pub fn region(&self) -> Region {
        let (left, top) = self.origin;
        Region::new(left, top, left + self.before.width(), top + self.before.height())
    }

    pub fn before(&self) -> &RgbaImage {
        &self.before
    }

    pub fn after(&self) -> &RgbaImage {
        &self.after
    }

    /// Put the pre-edit pixels back
    pub fn revert(&self, buffer: &mut PixelBuffer) {
        buffer.restore(self.origin, &self.before);
    }

    /// Put the post-edit pixels back
    pub fn reapply(&self, buffer: &mut PixelBuffer) {
        buffer.restore(self.origin, &self.after);
    }
}
