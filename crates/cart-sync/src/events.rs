//! Cart Event Channel
//!
//! Process-wide `cartUpdate` broadcast. Publishers announce a fresh summary;
//! subscribers react without holding references to each other.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::domain::CartSummary;

/// Handle returned by [`CartEvents::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&CartSummary)>;

#[derive(Default)]
pub struct CartEvents {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
}

impl CartEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&CartSummary) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Returns false when the id was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    /// Deliver to every current subscriber in subscription order.
    ///
    /// The list is snapshotted first, so listeners may subscribe or
    /// unsubscribe while being called.
    pub fn publish(&self, summary: &CartSummary) {
        let snapshot: Vec<Listener> = self.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in snapshot {
            listener(summary);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}
