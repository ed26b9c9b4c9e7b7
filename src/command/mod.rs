mod history;
mod record;
mod sequence;

pub use history::EditHistory;
pub use record::EditRecord;
pub use sequence::{CommandKind, SequenceGuard};
