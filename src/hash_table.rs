use std::{
    alloc::{Layout, handle_alloc_error},
    mem,
};

use tracing::{debug, error, trace};

use crate::{prime::next_prime, probe::probe_index};

/// Base size of a freshly created table, and the floor for shrinking
pub const DEFAULT_BASE_SIZE: usize = 50;
/// Load percentage above which an insert grows the table first
pub const GROW_LOAD: usize = 70;
/// Load percentage below which a delete shrinks the table first
pub const SHRINK_LOAD: usize = 10;
/// Largest base size a table is sized from; larger requests are clamped to it.
///
/// Half of the largest slot array the allocator can describe, so the next prime above it still
/// has a valid array layout.
pub const MAX_BASE_SIZE: usize = isize::MAX.unsigned_abs() / 2 / mem::size_of::<Slot>();

/// A key-value pair owned by an occupied slot
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    /// The key the entry is stored under
    key: String,
    /// The value associated with the key
    value: String,
}

/// State of a single slot in the table
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    /// Never used; terminates every probe sequence passing through it
    Empty,
    /// Previously occupied; probe sequences continue past it
    Tombstone,
    /// Holds a live entry
    Occupied(Entry),
}

/// Outcome of walking the probe sequence of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The key lives at `index`
    Found {
        /// Slot holding the key
        index: usize,
        /// Slots inspected, including `index`
        inspected: usize,
    },
    /// The sequence reached the empty slot at `index` before finding the key
    Vacant {
        /// First empty slot on the sequence
        index: usize,
        /// Slots inspected, including `index`
        inspected: usize,
    },
    /// Every attempt hit a tombstone or another key
    Exhausted {
        /// Slots inspected
        inspected: usize,
    },
}

/// A hash table mapping string keys to string values.
///
/// Collisions are resolved with open addressing and double hashing over a slot array whose
/// length is always prime. Deleted entries leave tombstones behind so that longer probe
/// sequences stay intact; tombstones are only cleared when the table is rebuilt by a resize.
///
/// The table grows to twice its base size when an insert finds it more than 70% full, and
/// shrinks to half its base size (never below [`DEFAULT_BASE_SIZE`]) when a delete finds it less
/// than 10% full. Load is computed with truncating integer arithmetic, `len * 100 / capacity`.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock to share it.
#[derive(Debug, Clone)]
pub struct HashTable {
    /// The slot array, `next_prime(base_size)` long
    slots: Vec<Slot>,
    /// Logical capacity the slot array was sized from, used to compute resize targets
    base_size: usize,
    /// Number of occupied slots
    count: usize,
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for HashTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl HashTable {
    /// Creates an empty table with the default base size
    #[must_use]
    pub fn new() -> Self {
        Self::sized(DEFAULT_BASE_SIZE)
    }

    /// Creates an empty table sized for `base_size` entries.
    ///
    /// Base sizes below [`DEFAULT_BASE_SIZE`] are raised to it.
    #[must_use]
    pub fn with_base_size(base_size: usize) -> Self {
        Self::sized(base_size.max(DEFAULT_BASE_SIZE))
    }

    /// Allocates `next_prime(base_size)` empty slots.
    ///
    /// Failing to allocate the slot array is fatal: the failure is logged and handed to the
    /// global allocation error handler, which aborts the process.
    fn sized(base_size: usize) -> Self {
        let base_size = base_size.min(MAX_BASE_SIZE);
        let size = slot_count(base_size);

        let mut slots = Vec::new();
        if slots.try_reserve_exact(size).is_err() {
            error!(base_size, size, "failed to allocate hash table slots");
            handle_alloc_error(Layout::array::<Slot>(size).unwrap_or_else(|_| Layout::new::<Slot>()));
        }
        slots.resize(size, Slot::Empty);
        Self { slots, base_size, count: 0 }
    }

    /// Walks the probe sequence of `key` until it finds the key, an empty slot, or runs out of
    /// attempts
    fn probe(&self, key: &str) -> Probe {
        let size = self.slots.len();
        for attempt in 0..size {
            let index = probe_index(key, size, attempt);
            let inspected = attempt.saturating_add(1);
            match self.slots.get(index) {
                None | Some(Slot::Empty) => return Probe::Vacant { index, inspected },
                Some(Slot::Occupied(entry)) if entry.key == key => {
                    return Probe::Found { index, inspected };
                }
                Some(Slot::Occupied(_) | Slot::Tombstone) => {}
            }
        }
        Probe::Exhausted { inspected: size }
    }

    /// Inserts a key-value pair, returning the previous value if the key was already present.
    ///
    /// Growth happens before the entry is placed, so the load check sees the pre-insert count.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.insert_entry(Entry { key: key.into(), value: value.into() })
    }

    /// Load check followed by placement; also used to migrate entries during a resize
    fn insert_entry(&mut self, entry: Entry) -> Option<String> {
        if self.load() > GROW_LOAD {
            self.resize(self.base_size.saturating_mul(2));
        }

        loop {
            match self.probe(&entry.key) {
                Probe::Found { index, .. } => {
                    let slot = self.slots.get_mut(index)?;
                    return match mem::replace(slot, Slot::Occupied(entry)) {
                        Slot::Occupied(old) => Some(old.value),
                        Slot::Empty | Slot::Tombstone => None,
                    };
                }
                Probe::Vacant { index, .. } => {
                    if let Some(slot) = self.slots.get_mut(index) {
                        *slot = Slot::Occupied(entry);
                        self.count = self.count.saturating_add(1);
                    }
                    return None;
                }
                Probe::Exhausted { inspected } => {
                    // Either a stride congruent to zero or a sequence clogged by tombstones;
                    // a rebuild at a new prime size clears both.
                    trace!(key = %entry.key, inspected, "probe sequence exhausted, growing");
                    self.resize(self.base_size.saturating_mul(2));
                }
            }
        }
    }

    /// Retrieves the value stored under `key`
    #[must_use]
    pub fn search(&self, key: &str) -> Option<&str> {
        let Probe::Found { index, .. } = self.probe(key) else { return None };
        match self.slots.get(index) {
            Some(Slot::Occupied(entry)) => Some(entry.value.as_str()),
            _ => None,
        }
    }

    /// Returns true if the table holds `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self.probe(key), Probe::Found { .. })
    }

    /// Removes `key`, returning its value. Deleting a missing key does nothing.
    ///
    /// Shrinking happens before the key is looked up, so the load check sees the pre-delete
    /// count.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        if self.load() < SHRINK_LOAD {
            self.resize(self.base_size / 2);
        }

        let Probe::Found { index, .. } = self.probe(key) else { return None };
        let slot = self.slots.get_mut(index)?;
        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.count = self.count.saturating_sub(1);
                Some(entry.value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Rebuilds the table around `new_base_size`, reinserting every live entry.
    ///
    /// Requests below [`DEFAULT_BASE_SIZE`] are ignored. Tombstones do not survive a rebuild.
    pub fn resize(&mut self, new_base_size: usize) {
        if new_base_size < DEFAULT_BASE_SIZE {
            return;
        }

        let old_size = self.slots.len();
        let old_base_size = self.base_size;
        let mut rebuilt = Self::sized(new_base_size);
        for slot in mem::take(&mut self.slots) {
            if let Slot::Occupied(entry) = slot {
                rebuilt.insert_entry(entry);
            }
        }

        debug!(
            old_size,
            new_size = rebuilt.slots.len(),
            old_base_size,
            new_base_size = rebuilt.base_size,
            count = rebuilt.count,
            "resized hash table"
        );
        *self = rebuilt;
    }

    /// Releases the table and every entry it owns.
    ///
    /// Dropping the table has the same effect.
    pub fn destroy(self) {
        trace!(count = self.count, size = self.slots.len(), "destroying hash table");
        drop(self);
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots, always a prime
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the base size the current slot array was derived from
    #[must_use]
    pub fn base_size(&self) -> usize {
        self.base_size
    }

    /// Returns the load as a truncated percentage of occupied slots
    #[must_use]
    pub fn load(&self) -> usize {
        self.count.saturating_mul(100).checked_div(self.slots.len()).unwrap_or(0)
    }

    /// Returns the number of tombstones left behind by deletes since the last rebuild
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|slot| matches!(slot, Slot::Tombstone)).count()
    }

    /// Returns the number of slots a search for `key` inspects
    #[must_use]
    pub fn probe_length(&self, key: &str) -> usize {
        match self.probe(key) {
            Probe::Found { inspected, .. }
            | Probe::Vacant { inspected, .. }
            | Probe::Exhausted { inspected } => inspected,
        }
    }
}

/// Number of slots allocated for `base_size`, the smallest prime at or above it.
///
/// Every base size up to [`MAX_BASE_SIZE`] has a prime above it well within `usize`.
fn slot_count(base_size: usize) -> usize {
    next_prime(base_size).unwrap_or(base_size)
}
