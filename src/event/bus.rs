use parking_lot::Mutex;

use super::{CanvasEvent, CanvasListener};

/// Fans engine events out to every subscribed listener
pub struct EventBus {
    handlers: Mutex<Vec<Box<dyn CanvasListener>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.lock().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn CanvasListener>) {
        self.handlers.lock().push(handler);
    }

    /// Emit an event to all registered handlers.
    ///
    /// Not reentrant: a handler that emits on the same bus deadlocks.
    pub fn emit(&self, event: CanvasEvent) {
        for handler in self.handlers.lock().iter_mut() {
            handler.handle_event(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
