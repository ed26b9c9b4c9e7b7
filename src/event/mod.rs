mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::CanvasEvent;
pub use handlers::ChannelListener;

/// Receives engine notifications.
///
/// Called synchronously on the thread that performed the change, never while
/// the buffer lock is held. The bus keeps its listener list locked during
/// dispatch, so `handle_event` must not subscribe listeners or call engine
/// methods that emit events. Hosts that react to an event with another engine
/// call receive events through a [`ChannelListener`] and make the call after
/// `handle_event` has returned.
pub trait CanvasListener: Send {
    fn handle_event(&mut self, event: &CanvasEvent);
}

impl<F> CanvasListener for F
where
    F: FnMut(&CanvasEvent) + Send,
{
    fn handle_event(&mut self, event: &CanvasEvent) {
        self(event)
    }
}
