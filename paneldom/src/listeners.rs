//! Listener side-table.
//!
//! Maps `(element_id, event_kind)` to a handler closure. A table is built
//! together with the view tree it belongs to and is replaced with it, so a
//! re-render can never leave stale handlers behind.

use std::collections::HashMap;
use std::sync::Arc;

use crate::event::{Event, EventKind};

/// A listener closure.
pub type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

#[derive(Default, Clone)]
pub struct Listeners {
    handlers: HashMap<(String, EventKind), Listener>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for an element event, replacing any previous one.
    pub fn on(
        &mut self,
        element_id: impl Into<String>,
        kind: EventKind,
        handler: impl Fn(&Event) + Send + Sync + 'static,
    ) {
        let element_id = element_id.into();
        if element_id.is_empty() {
            log::warn!("ignoring {kind:?} listener on an anonymous element");
            return;
        }
        self.handlers.insert((element_id, kind), Arc::new(handler));
    }

    /// Get the listener for an element event.
    pub fn get(&self, element_id: &str, kind: EventKind) -> Option<Listener> {
        self.handlers.get(&(element_id.to_string(), kind)).cloned()
    }

    pub fn contains(&self, element_id: &str, kind: EventKind) -> bool {
        self.handlers.contains_key(&(element_id.to_string(), kind))
    }

    /// Merge another table into this one (later registrations win).
    pub fn extend(&mut self, other: Listeners) {
        self.handlers.extend(other.handlers);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.handlers.keys().collect();
        keys.sort();
        f.debug_struct("Listeners").field("keys", &keys).finish()
    }
}
