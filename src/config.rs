use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};

pub const DEFAULT_PEN_WIDTH: f32 = 3.0;
pub const DEFAULT_ERASER_WIDTH: f32 = 30.0;
pub const DEFAULT_REGION_MARGIN: u32 = 5;
pub const DEFAULT_JUMP_THRESHOLD: f32 = 30.0;
pub const DEFAULT_ERASE_FLUSH_POINTS: usize = 100;
pub const DEFAULT_ERASE_FLUSH_INTERVAL_MS: u64 = 300;
pub const DEFAULT_CURVE_TOLERANCE: f32 = 0.25;

/// Tunables for the canvas engine.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Stroke width of the pen in pixels
    pub pen_width: f32,
    /// Stroke width of the eraser in pixels
    pub eraser_width: f32,
    /// Padding added around every edit region
    pub region_margin: u32,
    /// Vertical jump between samples treated as a device glitch
    pub jump_threshold: f32,
    /// Accumulated erase points that force a flush
    pub erase_flush_points: usize,
    /// Time since the last flush that forces one on the next erase point
    pub erase_flush_interval_ms: u64,
    /// Maximum number of undo entries; `None` keeps everything
    pub max_history: Option<usize>,
    /// Maximum deviation when flattening curve segments
    pub curve_tolerance: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pen_width: DEFAULT_PEN_WIDTH,
            eraser_width: DEFAULT_ERASER_WIDTH,
            region_margin: DEFAULT_REGION_MARGIN,
            jump_threshold: DEFAULT_JUMP_THRESHOLD,
            erase_flush_points: DEFAULT_ERASE_FLUSH_POINTS,
            erase_flush_interval_ms: DEFAULT_ERASE_FLUSH_INTERVAL_MS,
            max_history: None,
            curve_tolerance: DEFAULT_CURVE_TOLERANCE,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> CanvasResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> CanvasResult<()> {
        ensure_positive("pen_width", self.pen_width)?;
        ensure_positive("eraser_width", self.eraser_width)?;
        ensure_positive("jump_threshold", self.jump_threshold)?;
        ensure_positive("curve_tolerance", self.curve_tolerance)?;
        if self.erase_flush_points == 0 {
            return Err(CanvasError::InvalidConfig(
                "erase_flush_points must be at least 1".to_string(),
            ));
        }
        if self.max_history == Some(0) {
            return Err(CanvasError::InvalidConfig(
                "max_history must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn erase_flush_interval(&self) -> Duration {
        Duration::from_millis(self.erase_flush_interval_ms)
    }
}

fn ensure_positive(name: &str, value: f32) -> CanvasResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CanvasError::InvalidConfig(format!(
            "{name} must be positive, got {value}"
        )))
    }
}
