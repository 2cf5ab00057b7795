//! Insertion-ordered slot storage for nodes and edges
//!
//! Values live in a slot vector; a hash index maps each key to its slot.
//! Removal leaves a tombstone so it stays O(1) and iteration keeps insertion
//! order. Once tombstones outnumber live values (and exceed the configured
//! threshold) the slots are compacted in place, which preserves order.

use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// A value that knows its own arena key
pub(crate) trait Keyed {
    type Key: Copy + Eq + Hash + Debug;

    fn key(&self) -> Self::Key;
}

#[derive(Debug, Clone)]
pub(crate) struct Arena<V: Keyed> {
    slots: Vec<Option<V>>,
    index: FxHashMap<V::Key, usize>,
    compaction_threshold: usize,
}

impl<V: Keyed> Arena<V> {
    pub(crate) fn with_capacity(capacity: usize, compaction_threshold: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(capacity);
        Arena {
            slots: Vec::with_capacity(capacity),
            index,
            compaction_threshold,
        }
    }

    /// Append a value. Returns false (and drops nothing) if the key is taken.
    pub(crate) fn insert(&mut self, value: V) -> bool {
        let key = value.key();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.slots.len());
        self.slots.push(Some(value));
        true
    }

    pub(crate) fn remove(&mut self, key: &V::Key) -> Option<V> {
        let slot = self.index.remove(key)?;
        let value = self.slots.get_mut(slot).and_then(Option::take);
        debug_assert!(value.is_some(), "arena index pointed at an empty slot");
        self.maybe_compact();
        value
    }

    pub(crate) fn get(&self, key: &V::Key) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, key: &V::Key) -> Option<&mut V> {
        let slot = *self.index.get(key)?;
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    pub(crate) fn contains_key(&self, key: &V::Key) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    /// Live values in insertion order
    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.index.len(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    fn tombstones(&self) -> usize {
        self.slots.len() - self.index.len()
    }

    fn maybe_compact(&mut self) {
        let tombstones = self.tombstones();
        if tombstones >= self.compaction_threshold && tombstones > self.index.len() {
            self.compact();
        }
    }

    fn compact(&mut self) {
        let before = self.slots.len();
        self.slots.retain(Option::is_some);
        self.index.clear();
        for (slot, value) in self.slots.iter().enumerate() {
            if let Some(value) = value {
                self.index.insert(value.key(), slot);
            }
        }
        debug!("Compacted arena from {} to {} slots", before, self.slots.len());
    }
}

/// Insertion-ordered iterator over an arena's live values
#[derive(Debug, Clone)]
pub(crate) struct Iter<'a, V> {
    slots: std::slice::Iter<'a, Option<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        let value = self.slots.by_ref().find_map(Option::as_ref)?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(u32, &'static str);

    impl Keyed for Item {
        type Key = u32;

        fn key(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut arena = Arena::with_capacity(4, 8);
        assert!(arena.insert(Item(1, "a")));
        assert!(arena.insert(Item(2, "b")));
        assert!(!arena.insert(Item(1, "dup")));

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(&1), Some(&Item(1, "a")));
        assert!(arena.contains_key(&2));
        assert!(arena.get(&3).is_none());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut arena = Arena::with_capacity(4, 8);
        for (k, v) in [(1, "a"), (2, "b"), (3, "c")] {
            arena.insert(Item(k, v));
        }
        assert_eq!(arena.remove(&2), Some(Item(2, "b")));
        assert_eq!(arena.remove(&2), None);

        let keys: Vec<u32> = arena.iter().map(|i| i.0).collect();
        assert_eq!(keys, vec![1, 3]);

        // Re-inserting a removed key appends it at the end
        arena.insert(Item(2, "b"));
        let keys: Vec<u32> = arena.iter().map(|i| i.0).collect();
        assert_eq!(keys, vec![1, 3, 2]);
    }

    #[test]
    fn test_compaction_preserves_order_and_lookup() {
        let mut arena = Arena::with_capacity(16, 2);
        for k in 0..10 {
            arena.insert(Item(k, "x"));
        }
        for k in 0..7 {
            arena.remove(&k);
        }
        // 7 tombstones against 3 live values must have triggered compaction
        assert!(arena.tombstones() <= arena.len());

        let keys: Vec<u32> = arena.iter().map(|i| i.0).collect();
        assert_eq!(keys, vec![7, 8, 9]);
        assert_eq!(arena.get(&8), Some(&Item(8, "x")));
        assert!(arena.get_mut(&9).is_some());
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::with_capacity(4, 8);
        arena.insert(Item(1, "a"));
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.iter().count(), 0);
    }

    #[test]
    fn test_iter_len_skips_tombstones() {
        let mut arena = Arena::with_capacity(4, 8);
        for k in 0..4 {
            arena.insert(Item(k, "x"));
        }
        arena.remove(&1);

        let mut iter = arena.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.map(|i| i.0).collect::<Vec<_>>(), vec![2, 3]);
    }
}
