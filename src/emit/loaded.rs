//! Process-wide table of loaded implementation types.
//!
//! Finished implementation types are loaded into a single [`LoadedTypes`] table
//! for the lifetime of the process, mirroring a runtime's class space. The table
//! is append-only and multi-indexed: primary storage is ordered by generation
//! sequence, with a secondary name index for lookups by generated type name.
//!
//! # Thread Safety
//!
//! Both indices are lock-free; generation sequences come from a single atomic
//! counter, so names are collision-free even across repeated generation attempts
//! for the same interface.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::emit::class::ImplClass;

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Claim the next process-wide generation sequence number.
pub(crate) fn next_sequence() -> u64 {
    SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

/// Append-only, multi-indexed store of loaded implementation types.
#[derive(Default)]
pub struct LoadedTypes {
    by_sequence: SkipMap<u64, Arc<ImplClass>>,
    by_name: DashMap<String, Arc<ImplClass>>,
}

impl LoadedTypes {
    fn new() -> Self {
        LoadedTypes {
            by_sequence: SkipMap::new(),
            by_name: DashMap::new(),
        }
    }

    pub(crate) fn insert(&self, class: &Arc<ImplClass>) {
        self.by_sequence.insert(class.sequence(), class.clone());
        self.by_name.insert(class.name().to_string(), class.clone());
    }

    /// Look up a loaded type by generation sequence.
    #[must_use]
    pub fn get(&self, sequence: u64) -> Option<Arc<ImplClass>> {
        self.by_sequence
            .get(&sequence)
            .map(|entry| entry.value().clone())
    }

    /// Look up a loaded type by generated name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<Arc<ImplClass>> {
        self.by_name.get(name).map(|entry| entry.clone())
    }

    /// The number of loaded types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_sequence.len()
    }

    /// Returns `true` if no types have been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_sequence.is_empty()
    }
}

/// The process-wide loaded-types table.
///
/// Created on first use, never torn down mid-run.
#[must_use]
pub fn loaded_types() -> &'static LoadedTypes {
    static LOADED: OnceLock<LoadedTypes> = OnceLock::new();
    LOADED.get_or_init(LoadedTypes::new)
}
