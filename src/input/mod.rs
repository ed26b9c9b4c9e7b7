mod erase_batch;

pub use erase_batch::EraseBatcher;
