/// Index of the page currently loaded into the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageState {
    index: usize,
}

impl PageState {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to `index`. Returns false when it is already current.
    pub fn set(&mut self, index: usize) -> bool {
        if self.index == index {
            return false;
        }
        self.index = index;
        true
    }
}
