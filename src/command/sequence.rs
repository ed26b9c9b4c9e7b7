/// Host commands that may be re-delivered with the same token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Undo,
    Redo,
    Refresh,
}

impl CommandKind {
    fn slot(self) -> usize {
        match self {
            Self::Undo => 0,
            Self::Redo => 1,
            Self::Refresh => 2,
        }
    }
}

/// Remembers the last accepted token per command kind so re-delivered
/// commands run once.
#[derive(Debug, Default, Clone)]
pub struct SequenceGuard {
    last: [Option<u64>; 3],
}

impl SequenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `token` if it is newer than the last accepted one for `kind`.
    /// Tokens at or below it are stale.
    pub fn accept(&mut self, kind: CommandKind, token: u64) -> bool {
        let last = &mut self.last[kind.slot()];
        match *last {
            Some(seen) if token <= seen => false,
            _ => {
                *last = Some(token);
                true
            }
        }
    }

    pub fn last(&self, kind: CommandKind) -> Option<u64> {
        self.last[kind.slot()]
    }
}
