// ChangeBus - Synchronous observer registry for change events
//
// Observers subscribe per action kind and are invoked in subscription
// order, on the editing thread, immediately after each mutation. Batch
// actions notify through their children, so there is nothing to subscribe
// to under the Batch kind.

use crate::action::kind::ActionKind;
use crate::event::change::ChangeEvent;
use std::collections::HashMap;

/// Handle returned by [`ChangeBus::subscribe`], used to unsubscribe
pub type SubscriptionId = u64;

type Observer = Box<dyn FnMut(&ChangeEvent)>;

/// Dispatches change events to registered observers
///
/// Delivery is synchronous: `emit` returns only after every observer of the
/// event's kind has run. Observers must not assume anything about other
/// subscribers; ordering is guaranteed only within one kind.
pub struct ChangeBus {
    observers: HashMap<ActionKind, Vec<(SubscriptionId, Observer)>>,
    next_id: SubscriptionId,
}

impl ChangeBus {
    /// Create a bus with no observers
    pub fn new() -> Self {
        Self {
            observers: HashMap::new(),
            next_id: 1,
        }
    }

    /// Register an observer for one action kind
    ///
    /// Returns a handle that can be passed to [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<F>(&mut self, kind: ActionKind, observer: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;

        self.observers
            .entry(kind)
            .or_default()
            .push((id, Box::new(observer)));

        id
    }

    /// Remove a previously registered observer
    ///
    /// Returns false if the handle was already removed or never existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut removed = false;

        for observers in self.observers.values_mut() {
            let before = observers.len();
            observers.retain(|(observer_id, _)| *observer_id != id);
            removed |= observers.len() != before;
        }

        removed
    }

    /// Deliver an event to every observer of its kind, in subscription order
    pub fn emit(&mut self, event: &ChangeEvent) {
        if let Some(observers) = self.observers.get_mut(&event.kind()) {
            for (_, observer) in observers.iter_mut() {
                observer(event);
            }
        }
    }

    /// Number of observers registered for a kind
    pub fn observer_count(&self, kind: ActionKind) -> usize {
        self.observers.get(&kind).map_or(0, |o| o.len())
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}
