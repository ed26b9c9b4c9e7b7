#![warn(clippy::all, rust_2018_idioms)]

pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod raster;
pub mod renderer;
pub mod state;
pub mod stroke;
pub mod tools;
pub mod util;

pub use command::{EditHistory, EditRecord};
pub use config::EngineConfig;
pub use engine::CanvasEngine;
pub use error::{CanvasError, CanvasResult};
pub use event::{CanvasEvent, CanvasListener, ChannelListener};
pub use geometry::{Region, TouchPoint};
pub use raster::{PixelBuffer, SharedBuffer};
pub use state::GestureState;
pub use stroke::StrokePath;
pub use tools::ToolKind;
pub use util::time::{Clock, ManualClock, SystemClock};
