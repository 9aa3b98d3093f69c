//! # Routing
//!
//! The URL query is the single source of truth for list view state. Controllers
//! never reload directly after a sort or page change: they build a new [`RouteQuery`]
//! and hand it to a [`Navigator`]; whoever observes the route (the list
//! subscription) reloads.

use std::collections::BTreeMap;
use tokio::sync::{broadcast, watch};
use tracing::debug;

/// Query parameter carrying the sort token.
pub const SORT_PARAM: &str = "sort";
/// Query parameter carrying the 1-based page number.
pub const PAGE_PARAM: &str = "page";
/// Query parameter carrying the page size.
pub const SIZE_PARAM: &str = "size";

/// Query parameters of the current list route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteQuery {
    params: BTreeMap<String, String>,
}

impl RouteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets `key` when `value` is present; removes it otherwise.
    pub fn with_opt(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        let key = key.into();
        match value {
            Some(value) => {
                self.params.insert(key, value);
            }
            None => {
                self.params.remove(&key);
            }
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parses `key` as a number; missing or malformed values yield `None`.
    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Navigation effects other than a query change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Query(RouteQuery),
    /// Return to the previous view (after a successful save).
    Back,
    /// The resolved record does not exist.
    NotFound,
}

/// Router collaborator, passed explicitly to controllers.
pub trait Navigator: Send + Sync {
    fn navigate(&self, query: RouteQuery);
    fn previous_state(&self);
    fn not_found(&self);
}

/// In-process router: the current query lives in a `watch` channel, other
/// navigation events are broadcast.
pub struct RouteBus {
    query: watch::Sender<RouteQuery>,
    events: broadcast::Sender<NavigationEvent>,
}

impl RouteBus {
    pub fn new(initial: RouteQuery) -> Self {
        let (query, _) = watch::channel(initial);
        let (events, _) = broadcast::channel(32);
        Self { query, events }
    }

    /// Receiver that fires on every query change.
    pub fn subscribe(&self) -> watch::Receiver<RouteQuery> {
        self.query.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<NavigationEvent> {
        self.events.subscribe()
    }

    pub fn current(&self) -> RouteQuery {
        self.query.borrow().clone()
    }

    fn publish(&self, event: NavigationEvent) {
        // No listener is fine: nobody is rendering navigation right now.
        let _ = self.events.send(event);
    }
}

impl Default for RouteBus {
    fn default() -> Self {
        Self::new(RouteQuery::new())
    }
}

impl Navigator for RouteBus {
    fn navigate(&self, query: RouteQuery) {
        debug!(?query, "Navigate");
        self.query.send_replace(query.clone());
        self.publish(NavigationEvent::Query(query));
    }

    fn previous_state(&self) {
        debug!("Navigate back");
        self.publish(NavigationEvent::Back);
    }

    fn not_found(&self) {
        debug!("Navigate to not-found");
        self.publish(NavigationEvent::NotFound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_opt_removes_absent_values() {
        let query = RouteQuery::new().with(SORT_PARAM, "id,asc").with_opt(SORT_PARAM, None);
        assert_eq!(query.get(SORT_PARAM), None);
    }

    #[test]
    fn malformed_numbers_are_ignored() {
        let query = RouteQuery::new().with(PAGE_PARAM, "two");
        assert_eq!(query.get_u32(PAGE_PARAM), None);
    }

    #[tokio::test]
    async fn navigate_updates_subscribers() {
        let bus = RouteBus::default();
        let mut rx = bus.subscribe();
        bus.navigate(RouteQuery::new().with(PAGE_PARAM, "3"));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().get_u32(PAGE_PARAM), Some(3));
    }
}
