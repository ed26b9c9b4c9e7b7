mod gesture;
mod page;

pub use gesture::GestureState;
pub use page::PageState;
