//! Cart change notifications.
//!
//! Every cart mutation ends with one [`CartUpdated`] event, delivered
//! synchronously to the store's [`CartNotifier`] before the mutating call
//! returns. Renderers subscribe through [`BroadcastNotifier`] or pass a
//! closure.

use boutique_core::LineItem;
use tokio::sync::broadcast;

/// Snapshot of the cart after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartUpdated {
    pub lines: Vec<LineItem>,
    pub total_items: u64,
}

/// Receives cart change notifications.
pub trait CartNotifier {
    fn notify(&self, event: &CartUpdated);
}

impl<F> CartNotifier for F
where
    F: Fn(&CartUpdated),
{
    fn notify(&self, event: &CartUpdated) {
        self(event);
    }
}

/// Discards notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl CartNotifier for NoopNotifier {
    fn notify(&self, _event: &CartUpdated) {}
}

/// Fans notifications out to any number of async subscribers.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<CartUpdated>,
}

impl BroadcastNotifier {
    /// Create a notifier buffering up to `capacity` undelivered events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to future events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartUpdated> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(16)
    }
}

impl CartNotifier for BroadcastNotifier {
    fn notify(&self, event: &CartUpdated) {
        // No subscribers is normal on pages without a cart widget.
        if self.sender.send(event.clone()).is_err() {
            tracing::trace!("cart update dropped, no subscribers");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn event(total_items: u64) -> CartUpdated {
        CartUpdated {
            lines: Vec::new(),
            total_items,
        }
    }

    #[test]
    fn test_closure_notifier_receives_events() {
        let seen = RefCell::new(Vec::new());
        let notifier = |e: &CartUpdated| seen.borrow_mut().push(e.total_items);
        notifier.notify(&event(3));
        notifier.notify(&event(5));
        assert_eq!(*seen.borrow(), vec![3, 5]);
    }

    #[tokio::test]
    async fn test_broadcast_notifier_delivers_to_subscribers() {
        let notifier = BroadcastNotifier::default();
        let mut rx = notifier.subscribe();
        notifier.notify(&event(2));
        assert_eq!(rx.recv().await.unwrap().total_items, 2);
    }

    #[test]
    fn test_broadcast_without_subscribers_is_silent() {
        BroadcastNotifier::new(0).notify(&event(1));
    }
}
