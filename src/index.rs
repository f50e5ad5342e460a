//! Ordered associative container.
//!
//! [`OrderedIndex`] maps keys to values while keeping a key sequence
//! continuously sorted by a comparison key derived from the values. Every
//! insert re-sorts the sequence: mutation is batch-at-load in this crate, so
//! the O(n log n) per-mutation cost never shows up on the read path. The sort
//! is stable, so keys whose derived comparison keys are equal stay in
//! first-insertion order.

use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

/// A mapping kept continuously sorted by a key derived from its values.
///
/// `key_fn` extracts the comparison key from a value; `reverse` flips the
/// ordering (e.g. newest-first for publication dates).
pub struct OrderedIndex<K, V, O> {
    map: FxHashMap<K, V>,
    order: Vec<K>,
    key_fn: Box<dyn Fn(&V) -> O + Send + Sync>,
    reverse: bool,
}

impl<K, V, O> OrderedIndex<K, V, O>
where
    K: Eq + Hash + Clone,
    O: Ord,
{
    pub fn new(reverse: bool, key_fn: impl Fn(&V) -> O + Send + Sync + 'static) -> Self {
        Self {
            map: FxHashMap::default(),
            order: Vec::new(),
            key_fn: Box::new(key_fn),
            reverse,
        }
    }

    /// Upsert a value and re-sort the key sequence.
    ///
    /// A new key is appended before the re-sort, so among equal comparison
    /// keys it lands after the keys already present. Replacing an existing
    /// key keeps its position among equals but still re-sorts, since the
    /// replacement may have changed the comparison key.
    ///
    /// Returns the previous value when the key already existed.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.map.insert(key.clone(), value);
        if previous.is_none() {
            self.order.push(key);
        }
        self.resort();
        previous
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.get(key)
    }

    /// Remove a key from both the mapping and the order.
    ///
    /// Removing an absent key is an error-free no-op returning `None`.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let previous = self.map.remove(key)?;
        self.order.retain(|k| k.borrow() != key);
        Some(previous)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    /// Values in current sorted order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.order.iter().map(|k| &self.map[k])
    }

    /// `(key, value)` pairs in current sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().map(|k| (k, &self.map[k]))
    }

    /// Keys in current sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// Stable re-sort of the key sequence by derived comparison key.
    fn resort(&mut self) {
        let map = &self.map;
        let key_fn = &self.key_fn;
        let reverse = self.reverse;
        self.order.sort_by(|a, b| {
            let ka = key_fn(&map[a]);
            let kb = key_fn(&map[b]);
            if reverse { kb.cmp(&ka) } else { ka.cmp(&kb) }
        });
    }
}

impl<K, V, O> fmt::Debug for OrderedIndex<K, V, O>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedIndex")
            .field("map", &self.map)
            .field("order", &self.order)
            .field("reverse", &self.reverse)
            .finish_non_exhaustive()
    }
}
