use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::raster::Paint;

/// Which instrument strokes are painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pen => "Pen",
            Self::Eraser => "Eraser",
        }
    }
}

/// Current tool plus the fixed paint of each tool
#[derive(Debug, Clone)]
pub struct ToolState {
    current: ToolKind,
    pen: Paint,
    eraser: Paint,
}

impl ToolState {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            current: ToolKind::Pen,
            pen: Paint::pen(config.pen_width),
            eraser: Paint::eraser(config.eraser_width),
        }
    }

    pub fn current(&self) -> ToolKind {
        self.current
    }

    pub fn is_eraser(&self) -> bool {
        self.current == ToolKind::Eraser
    }

    /// Paint of the current tool
    pub fn paint(&self) -> &Paint {
        self.paint_for(self.current)
    }

    pub fn paint_for(&self, tool: ToolKind) -> &Paint {
        match tool {
            ToolKind::Pen => &self.pen,
            ToolKind::Eraser => &self.eraser,
        }
    }

    /// Switch tools. Returns false when `tool` is already current.
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        if self.current == tool {
            return false;
        }
        self.current = tool;
        true
    }
}
