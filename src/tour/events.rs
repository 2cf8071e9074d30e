//! Tour end events and listener registry.
//!
//! The registry outlives individual tour sessions (the host binding keeps
//! one across runs), so attach/detach must stay symmetric or handlers leak
//! into later tours.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Terminal tour events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourEvent {
    Complete,
    Cancel,
}

impl std::fmt::Display for TourEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

/// Handle returned by [`EventRegistry::on`]; used to detach the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

pub type EventListener = Arc<dyn Fn(TourEvent) + Send + Sync>;

/// Listener registry with idempotent, counted attach/detach.
pub struct EventRegistry {
    listeners: Mutex<Vec<(ListenerId, TourEvent, EventListener)>>,
    next_id: AtomicU64,
    attached: AtomicU64,
    detached: AtomicU64,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            attached: AtomicU64::new(0),
            detached: AtomicU64::new(0),
        }
    }

    /// Attach a listener for `event`.
    pub fn on(&self, event: TourEvent, listener: EventListener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, event, listener));
        self.attached.fetch_add(1, Ordering::Relaxed);
        id
    }

    /// Detach a listener. Idempotent: detaching twice is a no-op and counts
    /// only once.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(lid, _, _)| *lid != id);
        let removed = listeners.len() < before;
        drop(listeners);
        if removed {
            self.detached.fetch_add(1, Ordering::Relaxed);
        }
        removed
    }

    /// Emit `event` to all matching listeners.
    ///
    /// Listeners are cloned out of the lock before being called, so a
    /// handler may detach itself (or others) while running.
    pub fn emit(&self, event: TourEvent) {
        let to_call: Vec<EventListener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, e, _)| *e == event)
            .map(|(_, _, l)| Arc::clone(l))
            .collect();
        tracing::debug!(event = %event, listeners = to_call.len(), "Emitting tour event");
        for listener in to_call {
            listener(event);
        }
    }

    /// Total listener attaches since creation.
    pub fn attach_count(&self) -> u64 {
        self.attached.load(Ordering::Relaxed)
    }

    /// Total effective listener detaches since creation.
    pub fn detach_count(&self) -> u64 {
        self.detached.load(Ordering::Relaxed)
    }

    /// Number of currently attached listeners.
    pub fn active_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Groups listeners so they can be detached together, idempotently.
///
/// Clones share the same id list: any clone's `detach_all` detaches every
/// listener attached through the group, exactly once. Used by the host
/// binding so one terminal event tears down the listeners for both.
#[derive(Clone)]
pub struct EventsListenerGuard {
    registry: Arc<EventRegistry>,
    ids: Arc<Mutex<Vec<ListenerId>>>,
}

impl EventsListenerGuard {
    pub fn new(registry: Arc<EventRegistry>) -> Self {
        Self {
            registry,
            ids: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn attach(&self, event: TourEvent, listener: EventListener) -> ListenerId {
        let id = self.registry.on(event, listener);
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id);
        id
    }

    pub fn detach_all(&self) {
        let ids: Vec<ListenerId> = self
            .ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        for id in ids {
            self.registry.off(id);
        }
    }
}
