//! Per-receiver event name filter.
//!
//! The bus delivers every event to every receiver; callers that only care
//! about some event names apply an [`EventFilter`] on their side.

use std::collections::HashSet;

use super::SocketEvent;

/// Selects events by normalized name, with an optional wildcard.
#[derive(Debug, Default)]
pub struct EventFilter {
    /// Subscribed event names. Ignored when `subscribe_all` is set.
    names: HashSet<String>,
    /// Whether every event matches.
    subscribe_all: bool,
}

impl EventFilter {
    /// Creates an empty filter matching nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds event names to the filter. `"*"` enables the wildcard.
    pub fn subscribe(&mut self, names: &[&str]) {
        for name in names {
            if *name == "*" {
                self.subscribe_all = true;
            } else {
                self.names.insert((*name).to_string());
            }
        }
    }

    /// Removes event names from the filter.
    pub fn unsubscribe(&mut self, names: &[&str]) {
        for name in names {
            self.names.remove(*name);
        }
    }

    /// Returns `true` if the given event matches the filter.
    #[must_use]
    pub fn matches(&self, event: &SocketEvent) -> bool {
        self.subscribe_all || self.names.contains(event.name())
    }

    /// Returns the number of explicitly subscribed names.
    #[must_use]
    pub fn count(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}
