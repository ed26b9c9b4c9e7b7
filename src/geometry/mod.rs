//! Float geometry for incoming samples and the integer regions they touch.

pub mod hit_testing;
mod region;

pub use region::Region;

use egui::Pos2;
use serde::{Deserialize, Serialize};

/// One stylus sample in buffer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn pos(self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }
}

impl From<Pos2> for TouchPoint {
    fn from(pos: Pos2) -> Self {
        Self::new(pos.x, pos.y)
    }
}

impl From<(f32, f32)> for TouchPoint {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}
