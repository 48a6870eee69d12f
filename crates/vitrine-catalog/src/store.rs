//! The process-wide holder of the live catalog snapshot.
//!
//! Readers clone an `Arc` under a read lock; publishing swaps the `Arc` under
//! a write lock. Neither lock is ever held while a snapshot is being built,
//! and a reader that already holds an `Arc` keeps a consistent view even
//! after a newer snapshot is published.

use std::sync::{Arc, PoisonError, RwLock};

use crate::snapshot::CatalogSnapshot;

/// A published snapshot together with its publication number.
#[derive(Debug, Clone)]
pub struct Published {
    /// Starts at 1 for the first snapshot and increases by one per publish.
    pub generation: u64,
    /// The snapshot itself.
    pub snapshot: Arc<CatalogSnapshot>,
}

/// Holds exactly one current snapshot.
#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Published>,
}

impl CatalogStore {
    /// Creates a store publishing `initial` as generation 1.
    #[must_use]
    pub fn new(initial: CatalogSnapshot) -> Self {
        Self {
            current: RwLock::new(Published {
                generation: 1,
                snapshot: Arc::new(initial),
            }),
        }
    }

    /// Returns the currently published snapshot.
    #[must_use]
    pub fn current(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.published().snapshot)
    }

    /// Returns the current snapshot with its generation.
    #[must_use]
    pub fn published(&self) -> Published {
        // The guarded value is always a whole `Arc`, so a poisoned lock still
        // holds a usable snapshot.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the generation of the current snapshot.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.published().generation
    }

    /// Atomically replaces the current snapshot and returns its generation.
    pub fn publish(&self, snapshot: CatalogSnapshot) -> u64 {
        let snapshot = Arc::new(snapshot);
        let (generation, previous) = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let generation = current.generation + 1;
            let previous = std::mem::replace(
                &mut *current,
                Published {
                    generation,
                    snapshot,
                },
            );
            (generation, previous)
        };
        // Freed outside the lock; in-flight readers may still hold it.
        drop(previous);
        generation
    }
}
