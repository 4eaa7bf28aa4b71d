//! Host event abstraction.
//!
//! The engine never registers with the host's native callback mechanism
//! directly; hosts adapt their hook lists to this bus, which keeps the
//! engine substitutable in tests. Everything runs on the host's single
//! event timeline, so handlers are plain `FnMut` with no send bounds.

use std::fmt;

/// Host events the engine reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A different theme was selected.
    ThemeChanged { theme_id: String },
    /// The host finished opening a profile/session; reapply.
    ProfileOpened,
    /// A document view is about to render; style injection point.
    ContentWillRender,
}

/// Event classes available for subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ThemeChanged,
    ProfileOpened,
    ContentWillRender,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ThemeChanged { .. } => EventKind::ThemeChanged,
            Event::ProfileOpened => EventKind::ProfileOpened,
            Event::ContentWillRender => EventKind::ContentWillRender,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription#{}", self.0)
    }
}

pub type Handler = Box<dyn FnMut(&Event)>;

/// Subscription surface the host exposes to the engine.
pub trait EventBus {
    fn subscribe(&mut self, kind: EventKind, handler: Handler) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Single-threaded bus implementation for hosts and tests.
#[derive(Default)]
pub struct LocalEventBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, EventKind, Handler)>,
}

impl LocalEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to every matching subscriber, in subscription
    /// order.
    pub fn emit(&mut self, event: &Event) {
        let kind = event.kind();
        for (_, subscribed_kind, handler) in &mut self.subscribers {
            if *subscribed_kind == kind {
                handler(event);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl EventBus for LocalEventBus {
    fn subscribe(&mut self, kind: EventKind, handler: Handler) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push((id, kind, handler));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub_id, _, _)| *sub_id != id);
    }
}
