//! The raw table: a sparse probe index over a dense, gap-free entry array.
//!
//! [`HashTable`] knows nothing about keys. Every operation takes the hash of
//! the entry it is looking for together with an equality predicate, and
//! removals additionally take a hasher so the entry relocated by swap-erase
//! can be found in the index again. [`HashMap`](crate::HashMap) is the
//! key/value wrapper most users want.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;

use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::error::probe_exhausted;

/// Smallest number of index slots a table ever allocates.
pub const MIN_INDEX_CAPACITY: usize = 8;

/// Number of index slots needed to hold `len` entries at a load factor of at
/// most one half.
#[inline]
fn index_capacity_for(len: usize) -> usize {
    len.saturating_mul(2)
        .checked_next_power_of_two()
        .expect("capacity overflow")
        .max(MIN_INDEX_CAPACITY)
}

/// A purge is due once fewer than this many slots are free.
#[inline(always)]
fn min_free(index_capacity: usize) -> usize {
    index_capacity / 8
}

/// One slot of the probe index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    /// Never claimed since the last reindex. Terminates every probe.
    Free,
    /// References the dense entry at `position`, whose hash is `hash`.
    Busy { hash: u64, position: usize },
    /// Claimed, then erased. Skipped by probes until the next reindex.
    Tombstone,
}

/// Outcome of a probe that stopped before exhausting the index.
#[derive(Clone, Copy, Debug)]
enum Probe {
    Match { slot: usize, position: usize },
    Vacant { slot: usize },
}

/// An open-addressing hash table with linear probing, tombstones and
/// swap-erase.
///
/// Entries live in a dense `Vec<T>` with no gaps; the index is a separate
/// power-of-two array of slots that each cache the full hash of the entry
/// they point at. This has a few consequences:
///
/// - **Iteration** walks the dense array directly and never inspects empty
///   or erased slots.
/// - **Removal** marks the slot as a tombstone and moves the last entry into
///   the hole (swap-erase), so the relative order of entries changes.
/// - **Growth** only rebuilds the index from the cached hashes. Entries are
///   never moved, hashed or compared while the index grows.
///
/// The table grows as soon as more than half of the index is in use, and
/// rebuilds the index in place when erased slots crowd out the free ones.
///
/// # Reference stability
///
/// No reference, iterator or dense position survives a structural mutation.
/// Inserting may reallocate both arrays, and removing relocates the last
/// entry. Positions returned by [`find_index`](HashTable::find_index) and
/// [`OccupiedEntry::index`] are plain integers and must be looked up again
/// after any insertion or removal.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use dense_hash::hash_table::Entry;
/// # use dense_hash::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
/// #
/// #[derive(Debug, PartialEq)]
/// struct Person {
///     id: u64,
///     name: String,
/// }
///
/// let mut table = HashTable::with_capacity(100);
/// let hash = hash_id(123);
///
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     Entry::Occupied(_) => unreachable!(),
/// }
///
/// let removed = table.remove(hash, |p| p.id == 123, |p| hash_id(p.id));
/// assert_eq!(removed.map(|p| p.name), Some("Alice".to_string()));
/// ```
#[derive(Clone)]
pub struct HashTable<T> {
    index: Vec<Slot>,
    entries: Vec<T>,
    free: usize,
}

impl<T> Debug for HashTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::string::String;

        f.debug_struct("HashTable")
            .field(
                "index",
                &self
                    .index
                    .chunks(16)
                    .map(|row| {
                        row.iter()
                            .map(|slot| match slot {
                                Slot::Free => '.',
                                Slot::Busy { .. } => '#',
                                Slot::Tombstone => 'x',
                            })
                            .collect::<String>()
                    })
                    .collect::<Vec<_>>(),
            )
            .field("len", &self.entries.len())
            .field("free", &self.free)
            .field("tombstones", &self.tombstones())
            .finish()
    }
}

impl<T> Default for HashTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HashTable<T> {
    /// Creates an empty table with the minimum index size.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a table that can hold at least `capacity` entries without
    /// reindexing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dense_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert!(table.capacity() >= 100);
    /// assert!(table.index_capacity().is_power_of_two());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let index_capacity = index_capacity_for(capacity);
        Self {
            index: vec![Slot::Free; index_capacity],
            entries: Vec::with_capacity(capacity),
            free: index_capacity,
        }
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries the table can hold before the index
    /// grows.
    pub fn capacity(&self) -> usize {
        self.index.len() / 2
    }

    /// Returns the number of slots in the probe index. Always a power of two.
    pub fn index_capacity(&self) -> usize {
        self.index.len()
    }

    /// Returns the number of erased slots still occupying the index.
    pub fn tombstones(&self) -> usize {
        self.index.len() - self.free - self.entries.len()
    }

    /// Returns the dense entry array.
    ///
    /// The slice has exactly [`len`](HashTable::len) elements, in the same
    /// order [`iter`](HashTable::iter) yields them.
    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    /// Returns the entry stored at dense position `index`.
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    /// Returns the entry stored at dense position `index`, mutably.
    ///
    /// The caller must not change the entry in a way that changes its hash.
    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut T> {
        self.entries.get_mut(index)
    }

    /// Returns an iterator over all entries in dense order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use dense_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table
    ///     .entry(hash_str("key1"), |s: &String| s == "key1")
    ///     .or_insert("key1".to_string());
    /// table
    ///     .entry(hash_str("key2"), |s: &String| s == "key2")
    ///     .or_insert("key2".to_string());
    ///
    /// let values: Vec<&String> = table.iter().collect();
    /// assert_eq!(values, ["key1", "key2"]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over mutable references to all entries.
    ///
    /// The caller must not change entries in a way that changes their hash.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            inner: self.entries.iter_mut(),
        }
    }

    /// Removes every entry, yielding them in dense order.
    ///
    /// The index keeps its size. The table is empty as soon as this returns,
    /// even if the iterator is not consumed.
    pub fn drain(&mut self) -> Drain<'_, T> {
        self.index.fill(Slot::Free);
        self.free = self.index.len();
        Drain {
            inner: self.entries.drain(..),
        }
    }

    /// Removes every entry while keeping the index size.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dense_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// table.entry(2, |&n: &u64| n == 2).or_insert(2);
    /// let index_capacity = table.index_capacity();
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.tombstones(), 0);
    /// assert_eq!(table.index_capacity(), index_capacity);
    /// ```
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.fill(Slot::Free);
        self.free = self.index.len();
    }

    /// Reserves room for at least `additional` more entries.
    ///
    /// Grows the index up front when needed so that the next `additional`
    /// insertions do not reindex.
    pub fn reserve(&mut self, additional: usize) {
        let required = index_capacity_for(self.entries.len().saturating_add(additional));
        if required > self.index.len() {
            trace!(
                from = self.index.len(),
                to = required,
                "Reserving index capacity."
            );
            self.reindex(required);
        }
        self.entries.reserve(additional);
    }

    /// Shrinks the index to the smallest size that fits the current entries
    /// and drops every tombstone.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dense_hash::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<u64> = HashTable::with_capacity(1000);
    /// table.entry(42, |&v| v == 5).or_insert(5);
    /// table.entry(123, |&v| v == 10).or_insert(10);
    ///
    /// table.shrink_to_fit();
    /// assert!(table.capacity() < 1000);
    /// assert!(table.capacity() >= 2);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        let target = index_capacity_for(self.entries.len());
        if target < self.index.len() || self.tombstones() > 0 {
            trace!(
                from = self.index.len(),
                to = target,
                len = self.entries.len(),
                "Shrinking index."
            );
            self.reindex(target);
        }
        self.entries.shrink_to_fit();
    }

    /// Finds an entry by hash and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use dense_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(hash_u64(42), |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.find(hash_u64(42), |&n| n == 42), Some(&42));
    /// assert_eq!(table.find(hash_u64(99), |&n| n == 99), None);
    /// ```
    #[inline]
    pub fn find(&self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&T> {
        let position = self.find_index(hash, eq)?;
        Some(&self.entries[position])
    }

    /// Finds an entry by hash and equality predicate, returning a mutable
    /// reference.
    #[inline]
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&mut T> {
        let position = self.find_index(hash, eq)?;
        Some(&mut self.entries[position])
    }

    /// Finds the dense position of an entry by hash and equality predicate.
    pub fn find_index(&self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }

        match self.probe(hash, eq) {
            Some(Probe::Match { position, .. }) => Some(position),
            Some(Probe::Vacant { .. }) => None,
            None => probe_exhausted(self.index.len()),
        }
    }

    /// Gets the entry for the given hash and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use dense_hash::hash_table::Entry;
    /// # use dense_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("hello");
    ///
    /// match table.entry(hash, |s: &String| s == "hello") {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert("hello".to_string());
    ///     }
    ///     Entry::Occupied(_) => unreachable!(),
    /// }
    ///
    /// match table.entry(hash, |s: &String| s == "hello") {
    ///     Entry::Occupied(entry) => assert_eq!(entry.index(), 0),
    ///     Entry::Vacant(_) => unreachable!(),
    /// }
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Entry<'_, T> {
        let probe = match self.probe(hash, &eq) {
            Some(probe) => probe,
            None => {
                warn!(
                    index_capacity = self.index.len(),
                    len = self.entries.len(),
                    tombstones = self.tombstones(),
                    "Probe exhausted the index, forcing a reindex."
                );
                self.reindex(self.grown_capacity());
                self.probe(hash, &eq)
                    .unwrap_or_else(|| probe_exhausted(self.index.len()))
            }
        };

        match probe {
            Probe::Match { slot, position } => Entry::Occupied(OccupiedEntry {
                table: self,
                slot,
                position,
            }),
            Probe::Vacant { slot } => Entry::Vacant(VacantEntry {
                table: self,
                slot,
                hash,
            }),
        }
    }

    /// Removes and returns an entry.
    ///
    /// The erased slot becomes a tombstone and the last entry of the dense
    /// array is moved into the hole. `hasher` must return the same hash the
    /// moved entry was inserted with; it is used to find that entry's slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use dense_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// for n in [1u64, 2, 3] {
    ///     table.entry(hash_u64(n), |&v: &u64| v == n).or_insert(n);
    /// }
    ///
    /// assert_eq!(table.remove(hash_u64(1), |&v| v == 1, |&v| hash_u64(v)), Some(1));
    /// assert_eq!(table.as_slice(), &[3, 2]);
    ///
    /// // Removing an absent entry is a no-op.
    /// assert_eq!(table.remove(hash_u64(1), |&v| v == 1, |&v| hash_u64(v)), None);
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn remove(
        &mut self,
        hash: u64,
        eq: impl Fn(&T) -> bool,
        hasher: impl Fn(&T) -> u64,
    ) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }

        match self.probe(hash, eq) {
            Some(Probe::Match { slot, position }) => Some(self.remove_at(slot, position, hasher)),
            Some(Probe::Vacant { .. }) => None,
            None => probe_exhausted(self.index.len()),
        }
    }

    /// Retains only the entries for which `f` returns `true`.
    ///
    /// Every entry is visited exactly once. Removed entries are swap-erased,
    /// so `hasher` has the same contract as in [`remove`](HashTable::remove).
    pub fn retain(&mut self, mut f: impl FnMut(&mut T) -> bool, hasher: impl Fn(&T) -> u64) {
        let mut position = 0;
        while position < self.entries.len() {
            if f(&mut self.entries[position]) {
                position += 1;
                continue;
            }

            let slot = self.locate(hasher(&self.entries[position]), position);
            // The former last entry now sits at `position` and is visited next.
            self.remove_at(slot, position, &hasher);
        }
    }

    /// Scans from the home bucket of `hash` for a matching or free slot,
    /// visiting each slot at most once.
    #[inline]
    fn probe(&self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<Probe> {
        let mask = self.index.len() - 1;
        let mut slot = hash as usize & mask;

        for _ in 0..self.index.len() {
            match self.index[slot] {
                Slot::Free => return Some(Probe::Vacant { slot }),
                Slot::Busy {
                    hash: cached,
                    position,
                } if cached == hash && eq(&self.entries[position]) => {
                    return Some(Probe::Match { slot, position });
                }
                _ => {}
            }
            slot = (slot + 1) & mask;
        }

        None
    }

    /// Finds the busy slot that references dense `position`, probing from the
    /// home bucket of `hash`.
    fn locate(&self, hash: u64, position: usize) -> usize {
        let mask = self.index.len() - 1;
        let mut slot = hash as usize & mask;

        for _ in 0..self.index.len() {
            match self.index[slot] {
                Slot::Busy { position: p, .. } if p == position => return slot,
                Slot::Free => break,
                _ => {}
            }
            slot = (slot + 1) & mask;
        }

        panic!("entry at dense position {position} is not reachable from its hash")
    }

    fn remove_at(&mut self, slot: usize, position: usize, hasher: impl Fn(&T) -> u64) -> T {
        debug_assert!(matches!(
            self.index[slot],
            Slot::Busy { position: p, .. } if p == position
        ));
        self.index[slot] = Slot::Tombstone;

        let last = self.entries.len() - 1;
        if position != last {
            let moved = self.locate(hasher(&self.entries[last]), last);
            if let Slot::Busy { position: p, .. } = &mut self.index[moved] {
                *p = position;
            }
        }

        self.entries.swap_remove(position)
    }

    /// Runs after every entry appended to the dense array.
    fn after_insert(&mut self) {
        let index_capacity = self.index.len();
        if self.entries.len() * 2 > index_capacity {
            debug!(
                from = index_capacity,
                to = index_capacity * 2,
                len = self.entries.len(),
                tombstones = self.tombstones(),
                "Growing index."
            );
            self.reindex(self.grown_capacity());
        } else if self.free < min_free(index_capacity) {
            debug!(
                index_capacity,
                len = self.entries.len(),
                tombstones = self.tombstones(),
                "Purging tombstones."
            );
            self.reindex(index_capacity);
        }
    }

    #[inline]
    fn grown_capacity(&self) -> usize {
        self.index.len().checked_mul(2).expect("capacity overflow")
    }

    /// Rebuilds the index with `index_capacity` slots from the cached hashes
    /// of the busy slots. Free and tombstone slots are dropped; the dense
    /// array is left untouched.
    #[cold]
    #[inline(never)]
    fn reindex(&mut self, index_capacity: usize) {
        debug_assert!(index_capacity.is_power_of_two());
        debug_assert!(index_capacity > self.entries.len());

        let old = core::mem::replace(&mut self.index, vec![Slot::Free; index_capacity]);
        let mask = index_capacity - 1;
        for slot in old {
            if let Slot::Busy { hash, .. } = slot {
                let mut bucket = hash as usize & mask;
                while self.index[bucket] != Slot::Free {
                    bucket = (bucket + 1) & mask;
                }
                self.index[bucket] = slot;
            }
        }

        self.free = index_capacity - self.entries.len();
    }
}

#[cfg(any(test, feature = "stats"))]
impl<T> HashTable<T> {
    /// Computes a histogram of probe distances.
    ///
    /// The distance of an entry is the number of slots between its home
    /// bucket (`hash mod index_capacity`) and the slot that references it.
    /// Entry `d` of the histogram counts the entries at distance `d`.
    pub fn probe_histogram(&self) -> ProbeHistogram {
        let mask = self.index.len() - 1;
        let mut counts = Vec::new();
        for (slot, state) in self.index.iter().enumerate() {
            if let Slot::Busy { hash, .. } = *state {
                let distance = slot.wrapping_sub(hash as usize) & mask;
                if counts.len() <= distance {
                    counts.resize(distance + 1, 0);
                }
                counts[distance] += 1;
            }
        }

        ProbeHistogram {
            counts,
            len: self.entries.len(),
        }
    }

    /// Returns occupancy and memory statistics for the table.
    pub fn debug_stats(&self) -> DebugStats {
        let slot_size = core::mem::size_of::<Slot>();
        let entry_size = core::mem::size_of::<T>();
        let index_capacity = self.index.len();
        let len = self.entries.len();

        DebugStats {
            len,
            index_capacity,
            free_slots: self.free,
            tombstones: self.tombstones(),
            load_factor: len as f64 / index_capacity as f64,
            total_bytes: self.index.capacity() * slot_size + self.entries.capacity() * entry_size,
            wasted_bytes: (index_capacity - len) * slot_size
                + (self.entries.capacity() - len) * entry_size,
        }
    }
}

/// Probe-distance histogram returned by [`HashTable::probe_histogram`].
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    counts: Vec<usize>,
    len: usize,
}

#[cfg(any(test, feature = "stats"))]
impl ProbeHistogram {
    /// Number of entries at each probe distance.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// The longest probe distance of any entry, or zero for an empty table.
    pub fn max_distance(&self) -> usize {
        self.counts.len().saturating_sub(1)
    }

    /// Mean probe distance over all entries.
    pub fn mean_distance(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        let total: usize = self
            .counts
            .iter()
            .enumerate()
            .map(|(distance, count)| distance * count)
            .sum();
        total as f64 / self.len as f64
    }

    /// Pretty-prints the histogram as a horizontal bar chart.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!(
            "probe histogram ({} entries, mean distance {:.3}):",
            self.len,
            self.mean_distance()
        );

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = (count as u128 * total_units as u128).div_ceil(max as u128) as usize;
            let mut bar = "█".repeat(units / 8);
            match units % 8 {
                1 => bar.push('▏'),
                2 => bar.push('▎'),
                3 => bar.push('▍'),
                4 => bar.push('▌'),
                5 => bar.push('▋'),
                6 => bar.push('▊'),
                7 => bar.push('▉'),
                _ => {}
            }
            bar
        };

        for (distance, &count) in self.counts.iter().enumerate() {
            println!("{:>3} | {} ({})", distance, make_bar(count), count);
        }
    }
}

/// Occupancy statistics returned by [`HashTable::debug_stats`].
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries in the dense array
    pub len: usize,
    /// Number of slots in the probe index
    pub index_capacity: usize,
    /// Index slots never claimed since the last reindex
    pub free_slots: usize,
    /// Index slots left behind by removals
    pub tombstones: usize,
    /// Load factor (len / index_capacity)
    pub load_factor: f64,
    /// Total memory in bytes held by both arrays
    pub total_bytes: usize,
    /// Memory in bytes not holding a live entry or a busy slot
    pub wasted_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.len,
            self.index_capacity,
            self.load_factor * 100.0
        );
        println!(
            "Index: {} free, {} tombstones",
            self.free_slots, self.tombstones
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
        println!(
            "Memory: {} bytes wasted ({:.02}%)",
            self.wasted_bytes,
            if self.total_bytes == 0 {
                0.0
            } else {
                (self.wasted_bytes as f64 / self.total_bytes as f64) * 100.0
            }
        );
    }
}

/// A view into a single entry in the table, which may be vacant or occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, T> {
    /// No entry matched; holds the free slot the entry would be indexed in.
    Vacant(VacantEntry<'a, T>),
    /// A matching entry exists.
    Occupied(OccupiedEntry<'a, T>),
}

impl<'a, T> Entry<'a, T> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the entry.
    pub fn or_insert(self, default: T) -> &'a mut T {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the entry. `default` is not called otherwise.
    pub fn or_insert_with(self, default: impl FnOnce() -> T) -> &'a mut T {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Applies `f` to an occupied entry. Vacant entries are left alone and
    /// yield `None`.
    pub fn and_modify(self, f: impl FnOnce(&mut T)) -> Option<&'a mut T> {
        match self {
            Entry::Occupied(entry) => {
                let value = entry.into_mut();
                f(value);
                Some(value)
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Inserts `T::default()` if the entry is vacant and returns a mutable
    /// reference to the entry.
    pub fn or_default(self) -> &'a mut T
    where
        T: Default,
    {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the table.
///
/// Holds the free index slot found by the probe.
pub struct VacantEntry<'a, T> {
    table: &'a mut HashTable<T>,
    slot: usize,
    hash: u64,
}

impl<'a, T> VacantEntry<'a, T> {
    /// Appends `value` to the dense array, indexes it in the vacant slot and
    /// returns a mutable reference to it.
    ///
    /// May grow or rebuild the index afterwards.
    pub fn insert(self, value: T) -> &'a mut T {
        let VacantEntry { table, slot, hash } = self;

        let position = table.entries.len();
        table.entries.push(value);

        debug_assert_eq!(table.index[slot], Slot::Free);
        table.index[slot] = Slot::Busy { hash, position };
        table.free -= 1;

        table.after_insert();
        &mut table.entries[position]
    }
}

/// A view into an occupied entry in the table.
pub struct OccupiedEntry<'a, T> {
    table: &'a mut HashTable<T>,
    slot: usize,
    position: usize,
}

impl<'a, T> OccupiedEntry<'a, T> {
    /// Gets a reference to the entry.
    pub fn get(&self) -> &T {
        &self.table.entries[self.position]
    }

    /// Gets a mutable reference to the entry.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.table.entries[self.position]
    }

    /// Converts into a mutable reference with the lifetime of the table
    /// borrow.
    pub fn into_mut(self) -> &'a mut T {
        &mut self.table.entries[self.position]
    }

    /// Returns the dense position of the entry.
    pub fn index(&self) -> usize {
        self.position
    }

    /// Swap-erases the entry and returns it. See [`HashTable::remove`] for
    /// the contract of `hasher`.
    pub fn remove(self, hasher: impl Fn(&T) -> u64) -> T {
        self.table.remove_at(self.slot, self.position, hasher)
    }
}

/// An iterator over the entries of a [`HashTable`], in dense order.
///
/// This struct is created by the [`iter`] method on [`HashTable`].
///
/// [`iter`]: HashTable::iter
#[derive(Clone)]
pub struct Iter<'a, T> {
    inner: core::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// A mutable iterator over the entries of a [`HashTable`].
pub struct IterMut<'a, T> {
    inner: core::slice::IterMut<'a, T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// A draining iterator over the entries of a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`].
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, T> {
    inner: alloc::vec::Drain<'a, T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}
impl<T> FusedIterator for Drain<'_, T> {}

/// An owning iterator over the entries of a [`HashTable`].
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for HashTable<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a HashTable<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut HashTable<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
