use egui::{Pos2, Rect};

use super::TouchPoint;

/// Integer pixel rectangle `[left, right) x [top, bottom)` inside the page buffer.
///
/// A region is the unit of snapshot capture and therefore of undo granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Region {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self { left, top, right, bottom }
    }

    /// The whole buffer
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Rounds `bounds` outward to whole pixels, pads it by `margin` on every
    /// side and clamps it to a `width` x `height` buffer.
    ///
    /// Returns `None` when nothing of the padded rectangle lies on the buffer.
    pub fn from_bounds(bounds: Rect, margin: u32, width: u32, height: u32) -> Option<Self> {
        if !bounds.is_finite() || bounds.min.x > bounds.max.x || bounds.min.y > bounds.max.y {
            return None;
        }

        let margin = i64::from(margin);
        let clamp = |value: i64, limit: u32| value.clamp(0, i64::from(limit)) as u32;

        // Float to int casts saturate, so the padding must too.
        let left = clamp((bounds.min.x.floor() as i64).saturating_sub(margin), width);
        let top = clamp((bounds.min.y.floor() as i64).saturating_sub(margin), height);
        let right = clamp((bounds.max.x.ceil() as i64).saturating_add(margin), width);
        let bottom = clamp((bounds.max.y.ceil() as i64).saturating_add(margin), height);

        let region = Self::new(left, top, right, bottom);
        (!region.is_empty()).then_some(region)
    }

    /// Region affected by a raw point list
    pub fn of_points(points: &[TouchPoint], margin: u32, width: u32, height: u32) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let bounds = Rect::from_points(&points.iter().map(|p| p.pos()).collect::<Vec<Pos2>>());
        Self::from_bounds(bounds, margin, width, height)
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Top-left corner, where snapshots are written back
    pub fn origin(&self) -> (u32, u32) {
        (self.left, self.top)
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}
