//! The page pixel buffer and the code that paints strokes into it.

mod buffer;
mod paint;
mod rasterizer;

pub use buffer::{PixelBuffer, SharedBuffer, WHITE};
pub use paint::Paint;
pub use rasterizer::stroke_path;
