use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::{CanvasEvent, CanvasListener};

/// Forwards every event into an unbounded channel, for display layers that
/// consume events on their own thread or executor.
#[derive(Debug)]
pub struct ChannelListener {
    sender: UnboundedSender<CanvasEvent>,
}

impl ChannelListener {
    pub fn new(sender: UnboundedSender<CanvasEvent>) -> Self {
        Self { sender }
    }

    /// A listener and the receiving end of its channel
    pub fn channel() -> (Self, UnboundedReceiver<CanvasEvent>) {
        let (sender, receiver) = mpsc::unbounded();
        (Self::new(sender), receiver)
    }
}

impl CanvasListener for ChannelListener {
    fn handle_event(&mut self, event: &CanvasEvent) {
        if let Err(err) = self.sender.unbounded_send(event.clone()) {
            log::debug!("Dropping {:?}: receiver gone ({})", event, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventBus;

    #[test]
    fn test_forwards_events_in_order() {
        let bus = EventBus::new();
        let (listener, mut receiver) = ChannelListener::channel();
        bus.subscribe(Box::new(listener));

        bus.emit(CanvasEvent::RefreshRequested);
        bus.emit(CanvasEvent::PageChanged { index: 3 });

        assert_eq!(receiver.try_next().unwrap(), Some(CanvasEvent::RefreshRequested));
        assert_eq!(receiver.try_next().unwrap(), Some(CanvasEvent::PageChanged { index: 3 }));
        assert!(receiver.try_next().is_err());
    }

    #[test]
    fn test_closed_receiver_is_ignored() {
        let (mut listener, receiver) = ChannelListener::channel();
        drop(receiver);
        listener.handle_event(&CanvasEvent::RefreshRequested);
    }
}
