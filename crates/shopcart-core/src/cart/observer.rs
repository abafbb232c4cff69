//! Change notification for cart consumers.

use crate::cart::CartItem;

/// Receives the cart contents after every change.
///
/// Observers run synchronously on the mutating thread, after the new state
/// has been handed to storage.
pub trait CartObserver {
    /// Called with the full, updated collection.
    fn cart_changed(&self, items: &[CartItem]);
}

impl<F> CartObserver for F
where
    F: Fn(&[CartItem]),
{
    fn cart_changed(&self, items: &[CartItem]) {
        self(items)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers, notified in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn CartObserver>)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn CartObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() < len_before
    }

    pub(crate) fn notify(&self, items: &[CartItem]) {
        for (_, observer) in &self.entries {
            observer.cart_changed(items);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
