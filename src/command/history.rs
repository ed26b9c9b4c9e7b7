use std::collections::VecDeque;

use super::EditRecord;
use crate::geometry::Region;
use crate::raster::PixelBuffer;

/// Undo/redo stacks of region snapshots.
///
/// Undo and redo restore stored pixels; nothing is ever redrawn.
#[derive(Debug, Default)]
pub struct EditHistory {
    /// Oldest entry at the front so a bounded history can evict it
    undo_stack: VecDeque<EditRecord>,
    redo_stack: Vec<EditRecord>,
    limit: Option<usize>,
}

impl EditHistory {
    /// Creates an unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history keeping at most `limit` undo entries
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record a finished edit. Clears the redo stack.
    pub fn push(&mut self, record: EditRecord) {
        self.undo_stack.push_back(record);
        self.redo_stack.clear();

        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                let evicted = self.undo_stack.pop_front();
                log::debug!(
                    "Evicted oldest edit at {:?}",
                    evicted.map(|record| record.origin())
                );
            }
        }
    }

    /// Revert the most recent edit. Returns the restored region, or `None`
    /// when there is nothing to undo.
    pub fn undo(&mut self, buffer: &mut PixelBuffer) -> Option<Region> {
        let record = self.undo_stack.pop_back()?;
        record.revert(buffer);
        let region = record.region();
        self.redo_stack.push(record);
        Some(region)
    }

    /// Re-apply the most recently undone edit. Returns the restored region,
    /// or `None` when there is nothing to redo.
    pub fn redo(&mut self, buffer: &mut PixelBuffer) -> Option<Region> {
        let record = self.redo_stack.pop()?;
        record.reapply(buffer);
        let region = record.region();
        self.undo_stack.push_back(record);
        Some(region)
    }

    /// Returns true if there are edits that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are edits that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn record(x: u32, value: u8) -> EditRecord {
        let region = Region::new(x, 0, x + 2, 2);
        EditRecord::new(
            region,
            RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])),
            RgbaImage::from_pixel(2, 2, Rgba([value, value, value, 255])),
        )
    }

    #[test]
    fn test_empty_history_is_a_no_op() {
        let mut history = EditHistory::new();
        let mut buffer = PixelBuffer::new(4, 4).unwrap();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(&mut buffer), None);
        assert_eq!(history.redo(&mut buffer), None);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = EditHistory::new();
        let mut buffer = PixelBuffer::new(8, 4).unwrap();
        history.push(record(0, 0));
        history.push(record(2, 10));
        history.undo(&mut buffer);
        assert!(history.can_redo());

        history.push(record(4, 20));
        assert!(!history.can_redo());
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = EditHistory::with_limit(Some(2));
        let mut buffer = PixelBuffer::new(8, 4).unwrap();
        history.push(record(0, 0));
        history.push(record(2, 10));
        history.push(record(4, 20));
        assert_eq!(history.undo_len(), 2);

        assert_eq!(history.undo(&mut buffer), Some(Region::new(4, 0, 6, 2)));
        assert_eq!(history.undo(&mut buffer), Some(Region::new(2, 0, 4, 2)));
        assert_eq!(history.undo(&mut buffer), None);
    }

    #[test]
    fn test_undo_redo_restores_snapshots() {
        let mut history = EditHistory::new();
        let mut buffer = PixelBuffer::new(4, 4).unwrap();
        let edit = record(1, 0);
        edit.reapply(&mut buffer);
        history.push(edit);

        history.undo(&mut buffer);
        assert_eq!(buffer.pixel(1, 1), Rgba([255, 255, 255, 255]));
        history.redo(&mut buffer);
        assert_eq!(buffer.pixel(1, 1), Rgba([0, 0, 0, 255]));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }
}
