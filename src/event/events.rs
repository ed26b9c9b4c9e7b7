use crate::geometry::Region;
use crate::tools::ToolKind;

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// Buffer pixels changed; `None` means the whole page
    BufferChanged { region: Option<Region> },
    UndoStateChanged { can_undo: bool, can_redo: bool },
    /// The display layer should repaint and re-arm its input overlay
    RefreshRequested,
    ToolChanged { tool: ToolKind },
    PageChanged { index: usize },
}
