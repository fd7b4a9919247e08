//! Single-writer, multi-reader state cells.
//!
//! Both camera state and the published live-set snapshot are shared between
//! the interaction/simulation writers and a renderer reading every frame.
//! Each is swapped as a whole `Arc`, never field by field, so a reader can
//! never observe a new cell size paired with a stale center, or a partially
//! built generation.

use std::sync::Arc;

use parking_lot::RwLock;

use super::ViewportState;
use crate::domain::LiveSet;

/// A synchronized cell holding an immutable snapshot behind an `Arc`.
///
/// `load` hands out the current snapshot; `store` swaps in a fully built
/// replacement. The lock is held only for the pointer clone or swap, never
/// across the computation of the next value.
pub struct Shared<T> {
    slot: RwLock<Arc<T>>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: RwLock::new(Arc::new(value)),
        }
    }

    /// Current snapshot. Stays coherent even if a writer swaps afterwards.
    pub fn load(&self) -> Arc<T> {
        Arc::clone(&self.slot.read())
    }

    /// Publish a replacement snapshot.
    pub fn store(&self, value: Arc<T>) {
        *self.slot.write() = value;
    }

    /// Convenience for publishing an owned value.
    pub fn replace(&self, value: T) {
        self.store(Arc::new(value));
    }
}

pub type SharedViewport = Shared<ViewportState>;
pub type SharedLiveSet = Shared<LiveSet>;
