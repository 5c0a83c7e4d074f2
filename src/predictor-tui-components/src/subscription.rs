//! Outside-press subscriptions.
//!
//! A popup that must close when the pointer is pressed elsewhere registers
//! with a [`PointerHub`] and keeps the returned [`Subscription`]. The
//! subscription is removed from the hub when the guard is dropped, so a
//! component that goes away never leaves a stale listener behind.

use std::sync::Arc;

use parking_lot::Mutex;
use ratatui::layout::{Position, Rect};

/// Identifier of a registered subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Debug)]
struct Entry {
    id: SubscriptionId,
    regions: Vec<Rect>,
    active: bool,
}

#[derive(Debug, Default)]
struct HubInner {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Dispatches pointer presses to the subscriptions they fall outside of.
#[derive(Debug, Clone, Default)]
pub struct PointerHub {
    inner: Arc<Mutex<HubInner>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, initially inactive, subscription.
    pub fn subscribe_outside_press(&self) -> Subscription {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.entries.push(Entry {
            id,
            regions: Vec::new(),
            active: false,
        });
        Subscription {
            id,
            hub: Arc::clone(&self.inner),
        }
    }

    /// Active subscriptions whose regions do not contain `(x, y)`.
    pub fn press_outside(&self, x: u16, y: u16) -> Vec<SubscriptionId> {
        let pos = Position::new(x, y);
        self.inner
            .lock()
            .entries
            .iter()
            .filter(|e| e.active && !e.regions.iter().any(|r| r.contains(pos)))
            .map(|e| e.id)
            .collect()
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registration guard; dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    hub: Arc<Mutex<HubInner>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Screen regions considered "inside" the owning component.
    pub fn set_regions(&self, regions: Vec<Rect>) {
        if let Some(entry) = self.hub.lock().entries.iter_mut().find(|e| e.id == self.id) {
            entry.regions = regions;
        }
    }

    /// Only active subscriptions receive outside presses.
    pub fn set_active(&self, active: bool) {
        if let Some(entry) = self.hub.lock().entries.iter_mut().find(|e| e.id == self.id) {
            entry.active = active;
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.lock().entries.retain(|e| e.id != self.id);
    }
}
