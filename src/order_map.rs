// Copyright 2018 Mohammad Rezaei.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Portions copyright The Rust Project Developers. Licensed under
// the MIT License.

//! # `OrderMap`: a hash map that remembers insertion order.
//! Entries live in a dense log in the order they were first inserted. A separate
//! open-addressing table maps hashes to positions in that log, so lookups,
//! inserts and removes stay amortized O(1) while iteration follows insertion order.
//!
//! - Removing an entry leaves a hole in the log and a tombstone in the table.
//!     Holes are compacted away once they outnumber the live entries.
//! - Probing scans the cache line of the home slot first, then falls back to
//!     double hashing with an odd stride, which reaches every slot of a power of two table.
//! - Re-inserting an existing key replaces its value in place; the key keeps its position.
//!

use crate::key_hasher::*;
use crate::util::*;

use std::borrow::Borrow;
use std::cmp;
use std::error::Error;
use std::fmt::{self, Debug};
use std::hash::BuildHasher;
use std::hash::Hash;
use std::hash::Hasher;
use std::iter::FromIterator;
use std::iter::FusedIterator;
use std::mem;
use std::ops::Index;
use std::slice;
use std::vec;

const EMPTY: usize = usize::MAX;
const REMOVED: usize = usize::MAX - 1;
const SLOTS_PER_LINE: usize = 64 / mem::size_of::<usize>();

/// A hash map that iterates in insertion order.
///
/// Keys must implement [`Eq`] and [`Hash`]. As with `std::collections::HashMap`,
/// it is a logic error for a key to be modified in such a way that its hash or
/// its equality changes while it is in the map.
///
/// # Examples
///
/// ```
/// use keyset::order_map::OrderMap;
///
/// let mut scores = OrderMap::new();
/// scores.insert("carol", 7);
/// scores.insert("alice", 12);
/// scores.insert("bob", 3);
///
/// scores.remove("alice");
/// scores.insert("alice", 9);
///
/// let order: Vec<_> = scores.keys().cloned().collect();
/// assert_eq!(order, ["carol", "bob", "alice"]);
/// ```
///
/// [`Eq`]: https://doc.rust-lang.org/std/cmp/trait.Eq.html
/// [`Hash`]: https://doc.rust-lang.org/std/hash/trait.Hash.html
#[derive(Clone)]
pub struct OrderMap<K, V, S = SpreadHasherBuilder> {
    hasher: S,
    entries: Vec<Option<(K, V)>>,
    table: Vec<usize>,
    occupied: usize,
    removed: usize,
}

/// The error returned by [`OrderMap::try_reserve`] when the requested
/// capacity cannot be represented.
///
/// [`OrderMap::try_reserve`]: struct.OrderMap.html#method.try_reserve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapacityOverflow;

impl fmt::Display for CapacityOverflow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("capacity overflow")
    }
}

impl Error for CapacityOverflow {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BucketState {
    Empty,
    Full,
    Removed,
}

/// An iterator over the entries of an `OrderMap`, in insertion order.
pub struct Iter<'a, K: 'a, V: 'a> {
    iter: slice::Iter<'a, Option<(K, V)>>,
    remaining: usize,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter { iter: self.iter.clone(), remaining: self.remaining }
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        for entry in self.iter.by_ref() {
            if let Some((ref k, ref v)) = *entry {
                self.remaining -= 1;
                return Some((k, v));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> ExactSizeIterator for Iter<'a, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, K: 'a, V: 'a> FusedIterator for Iter<'a, K, V> {}

/// A mutable iterator over the entries of an `OrderMap`, in insertion order.
pub struct IterMut<'a, K: 'a, V: 'a> {
    iter: slice::IterMut<'a, Option<(K, V)>>,
    remaining: usize,
}

impl<'a, K: 'a, V: 'a> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        for entry in self.iter.by_ref() {
            if let Some((k, v)) = entry {
                self.remaining -= 1;
                return Some((&*k, v));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> ExactSizeIterator for IterMut<'a, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, K: 'a, V: 'a> FusedIterator for IterMut<'a, K, V> {}

/// An iterator over the keys of an `OrderMap`, in insertion order.
pub struct Keys<'a, K: 'a, V: 'a> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self {
        Keys { inner: self.inner.clone() }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

/// An iterator over the values of an `OrderMap`, in insertion order.
pub struct Values<'a, K: 'a, V: 'a> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

/// A mutable iterator over the values of an `OrderMap`, in insertion order.
pub struct ValuesMut<'a, K: 'a, V: 'a> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a, K, V> FusedIterator for ValuesMut<'a, K, V> {}

/// An owning iterator over the entries of an `OrderMap`, in insertion order.
pub struct IntoIter<K, V> {
    iter: vec::IntoIter<Option<(K, V)>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<(K, V)> {
        for entry in self.iter.by_ref() {
            if entry.is_some() {
                self.remaining -= 1;
                return entry;
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> OrderMap<K, V, SpreadHasherBuilder> {
    /// Creates an empty `OrderMap`.
    ///
    /// The map is initially created with a capacity of 0, so it will not allocate until it
    /// is first inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    /// let mut map: OrderMap<&str, i32> = OrderMap::new();
    /// assert_eq!(map.capacity(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        OrderMap::with_hasher(SpreadHasherBuilder::new())
    }

    /// Creates an empty `OrderMap` able to hold at least `capacity` entries
    /// without rehashing.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    /// let map: OrderMap<&str, i32> = OrderMap::with_capacity(10);
    /// assert!(map.capacity() >= 10);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderMap::with_capacity_and_hasher(capacity, SpreadHasherBuilder::new())
    }
}

impl<K, V, S> OrderMap<K, V, S> {
    /// Creates an empty `OrderMap` which will use the given hash builder to hash keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    /// use keyset::key_hasher::SpreadHasherBuilder;
    ///
    /// let mut map = OrderMap::with_hasher(SpreadHasherBuilder::with_seed(17));
    /// map.insert(1, 2);
    /// ```
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        OrderMap {
            hasher: hash_builder,
            entries: Vec::new(),
            table: Vec::new(),
            occupied: 0,
            removed: 0,
        }
    }

    /// Creates an empty `OrderMap` with at least the specified capacity, using
    /// `hash_builder` to hash the keys.
    ///
    /// # Panics
    ///
    /// Panics if the table size for `capacity` overflows `usize`.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let table_size = table_size_for(capacity).unwrap_or_else(|| capacity_overflow());
        OrderMap {
            hasher: hash_builder,
            entries: Vec::with_capacity(capacity),
            table: vec![EMPTY; table_size],
            occupied: 0,
            removed: 0,
        }
    }

    /// Returns a reference to the map's [`BuildHasher`].
    ///
    /// [`BuildHasher`]: https://doc.rust-lang.org/std/hash/trait.BuildHasher.html
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Returns the number of entries the map can hold without rehashing.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    /// let map: OrderMap<i32, i32> = OrderMap::with_capacity(100);
    /// assert!(map.capacity() >= 100);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        max_occupied(self.table.len())
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    ///
    /// let mut a = OrderMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, 17);
    /// assert_eq!(a.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.occupied
    }

    /// Returns `true` if the map contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// An iterator visiting all key-value pairs in insertion order.
    /// The iterator element type is `(&'a K, &'a V)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    ///
    /// let mut map = OrderMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// map.insert("c", 3);
    ///
    /// let pairs: Vec<_> = map.iter().collect();
    /// assert_eq!(pairs, [(&"a", &1), (&"b", &2), (&"c", &3)]);
    /// ```
    pub fn iter(&self) -> Iter<K, V> {
        Iter { iter: self.entries.iter(), remaining: self.occupied }
    }

    /// An iterator visiting all key-value pairs in insertion order,
    /// with mutable references to the values.
    pub fn iter_mut(&mut self) -> IterMut<K, V> {
        IterMut { iter: self.entries.iter_mut(), remaining: self.occupied }
    }

    /// An iterator visiting all keys in insertion order.
    pub fn keys(&self) -> Keys<K, V> {
        Keys { inner: self.iter() }
    }

    /// An iterator visiting all values in insertion order.
    pub fn values(&self) -> Values<K, V> {
        Values { inner: self.iter() }
    }

    /// An iterator visiting all values mutably in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    ///
    /// let mut map = OrderMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    ///
    /// for val in map.values_mut() {
    ///     *val = *val + 10;
    /// }
    /// assert_eq!(map["a"], 11);
    /// assert_eq!(map["b"], 12);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Clears the map, removing all key-value pairs. Keeps the allocated memory
    /// for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    ///
    /// let mut a = OrderMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.entries.clear();
        for slot in self.table.iter_mut() {
            *slot = EMPTY;
        }
        self.occupied = 0;
        self.removed = 0;
    }

    #[inline]
    fn walk<F>(&self, hash: u64, mut visit: F) -> (usize, BucketState)
        where F: FnMut(usize) -> Option<(usize, BucketState)>
    {
        let mask = self.table.len() - 1;
        let home = hash as usize & mask;
        let line_end = cmp::min((home | (SLOTS_PER_LINE - 1)) + 1, self.table.len());
        for slot in home..line_end {
            if let Some(found) = visit(slot) {
                return found;
            }
        }
        let stride = spread_two(hash) as usize | 1;
        let mut slot = home;
        loop {
            slot = slot.wrapping_add(stride) & mask;
            if let Some(found) = visit(slot) {
                return found;
            }
        }
    }
}

impl<K, V, S> OrderMap<K, V, S>
    where K: Eq + Hash,
          S: BuildHasher
{
    /// Reserves capacity for at least `additional` more entries.
    ///
    /// # Panics
    ///
    /// Panics if the new table size overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    /// let mut map: OrderMap<&str, i32> = OrderMap::new();
    /// map.reserve(10);
    /// assert!(map.capacity() >= 10);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        if self.try_reserve(additional).is_err() {
            capacity_overflow();
        }
    }

    /// Tries to reserve capacity for at least `additional` more entries.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityOverflow`] if the resulting size cannot be represented.
    /// The map is left unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::{CapacityOverflow, OrderMap};
    ///
    /// let mut map: OrderMap<i32, i32> = OrderMap::new();
    /// assert_eq!(map.try_reserve(usize::max_value()), Err(CapacityOverflow));
    /// assert_eq!(map.try_reserve(16), Ok(()));
    /// ```
    ///
    /// [`CapacityOverflow`]: struct.CapacityOverflow.html
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), CapacityOverflow> {
        let needed = self.occupied.checked_add(additional).ok_or(CapacityOverflow)?;
        let logged = self.entries.len().checked_add(additional).ok_or(CapacityOverflow)?;
        if logged.checked_mul(mem::size_of::<Option<(K, V)>>()).map_or(true, |bytes| bytes > isize::max_value() as usize) {
            return Err(CapacityOverflow);
        }
        if needed.saturating_add(self.removed) <= max_occupied(self.table.len()) {
            self.entries.reserve(additional);
            return Ok(());
        }
        let new_size = table_size_for(needed).ok_or(CapacityOverflow)?;
        if new_size.checked_mul(mem::size_of::<usize>()).map_or(true, |bytes| bytes > isize::max_value() as usize) {
            return Err(CapacityOverflow);
        }
        self.entries.reserve(additional);
        self.rehash_for_size(cmp::max(new_size, self.table.len()));
        Ok(())
    }

    /// Shrinks the capacity of the map as much as possible while keeping
    /// every entry, dropping holes left by removals.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    ///
    /// let mut map: OrderMap<i32, i32> = OrderMap::with_capacity(100);
    /// map.insert(1, 2);
    /// map.insert(3, 4);
    /// assert!(map.capacity() >= 100);
    /// map.shrink_to_fit();
    /// assert!(map.capacity() >= 2);
    /// assert!(map.capacity() < 100);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        let new_size = table_size_for(self.occupied).unwrap_or(self.table.len());
        self.rehash_for_size(new_size);
        self.entries.shrink_to_fit();
        self.table.shrink_to_fit();
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, [`None`] is returned and the
    /// entry goes to the end of the iteration order.
    ///
    /// If the map did have this key present, the value is updated in place and
    /// the old value is returned. The key and its position are not updated.
    ///
    /// [`None`]: https://doc.rust-lang.org/std/option/enum.Option.html#variant.None
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    ///
    /// let mut map = OrderMap::new();
    /// assert_eq!(map.insert(37, 123), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, 289);
    /// assert_eq!(map.insert(37, 333), Some(289));
    /// assert_eq!(map[&37], 333);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.table.is_empty() {
            self.table = vec![EMPTY; MIN_TABLE_SIZE];
        }
        let hash = self.hash(&key);
        let (slot, state) = self.probe(&key, hash);
        if state == BucketState::Full {
            let index = self.table[slot];
            return self.entries[index].as_mut().map(|entry| mem::replace(&mut entry.1, value));
        }
        if state == BucketState::Removed {
            self.removed -= 1;
        }
        self.table[slot] = self.entries.len();
        self.entries.push(Some((key, value)));
        self.occupied += 1;
        if self.occupied + self.removed > max_occupied(self.table.len()) {
            self.rehash();
        }
        None
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// The key may be any borrowed form of the map's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    ///
    /// let mut map = OrderMap::new();
    /// map.insert(String::from("one"), 1);
    /// assert_eq!(map.contains_key("one"), true);
    /// assert_eq!(map.contains_key("two"), false);
    /// ```
    ///
    /// [`Eq`]: https://doc.rust-lang.org/std/cmp/trait.Eq.html
    /// [`Hash`]: https://doc.rust-lang.org/std/hash/trait.Hash.html
    #[inline]
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
        where K: Borrow<Q>,
              Q: Hash + Eq
    {
        self.find(key).is_some()
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    ///
    /// let mut map = OrderMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
        where K: Borrow<Q>,
              Q: Hash + Eq
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    ///
    /// let mut map = OrderMap::new();
    /// map.insert(1, 17);
    /// map.insert(7, 42);
    /// assert_eq!(map.get_key_value(&1), Some((&1, &17)));
    /// assert_eq!(map.get_key_value(&7), Some((&7, &42)));
    /// assert_eq!(map.get_key_value(&2), None);
    /// ```
    pub fn get_key_value<Q: ?Sized>(&self, key: &Q) -> Option<(&K, &V)>
        where K: Borrow<Q>,
              Q: Hash + Eq
    {
        let index = self.find(key)?;
        self.entries[index].as_ref().map(|(k, v)| (k, v))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    ///
    /// let mut map = OrderMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
        where K: Borrow<Q>,
              Q: Hash + Eq
    {
        let index = self.find(key)?;
        self.entries[index].as_mut().map(|entry| &mut entry.1)
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map. The order of the remaining entries is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    ///
    /// let mut map = OrderMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
        where K: Borrow<Q>,
              Q: Hash + Eq
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    ///
    /// let mut map = OrderMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
        where K: Borrow<Q>,
              Q: Hash + Eq
    {
        if self.occupied == 0 {
            return None;
        }
        let hash = self.hash(key);
        let (slot, state) = self.probe(key, hash);
        if state != BucketState::Full {
            return None;
        }
        let index = self.table[slot];
        self.table[slot] = REMOVED;
        self.removed += 1;
        self.occupied -= 1;
        let entry = self.entries[index].take();
        while let Some(None) = self.entries.last() {
            self.entries.pop();
        }
        let holes = self.entries.len() - self.occupied;
        if holes >= MIN_TABLE_SIZE && holes > self.occupied {
            let new_size = table_size_for(self.occupied * 2).unwrap_or(self.table.len());
            self.rehash_for_size(cmp::max(new_size, MIN_TABLE_SIZE));
        }
        entry
    }

    /// Prints the raw layout of the map to stdout: counters, the entry log
    /// (holes shown as `_`) and every non-empty table slot.
    pub fn debug(&self)
        where K: Debug,
              V: Debug
    {
        println!("occupied {}, removed {}, holes {}, table size {}", self.occupied, self.removed,
                 self.entries.len() - self.occupied, self.table.len());
        for (index, entry) in self.entries.iter().enumerate() {
            match *entry {
                Some((ref k, ref v)) => println!("#{} [{:?},{:?}]", index, k, v),
                None => println!("#{} _", index),
            }
        }
        for (slot, &index) in self.table.iter().enumerate() {
            match index {
                EMPTY => {}
                REMOVED => println!("@{} removed", slot),
                _ => println!("@{} -> #{}", slot, index),
            }
        }
    }

    #[inline]
    fn hash<Q: ?Sized + Hash>(&self, key: &Q) -> u64 {
        let mut state = self.hasher.build_hasher();
        key.hash(&mut state);
        state.finish()
    }

    #[inline]
    fn find<Q: ?Sized>(&self, key: &Q) -> Option<usize>
        where K: Borrow<Q>,
              Q: Hash + Eq
    {
        if self.occupied == 0 {
            return None;
        }
        let hash = self.hash(key);
        match self.probe(key, hash) {
            (slot, BucketState::Full) => Some(self.table[slot]),
            _ => None,
        }
    }

    // The first tombstone on the probe path is handed back for reuse,
    // but only after the key is known to be absent.
    fn probe<Q: ?Sized>(&self, key: &Q, hash: u64) -> (usize, BucketState)
        where K: Borrow<Q>,
              Q: Eq
    {
        let mut removed = None;
        self.walk(hash, |slot| match self.table[slot] {
            EMPTY => Some(match removed {
                Some(removed_slot) => (removed_slot, BucketState::Removed),
                None => (slot, BucketState::Empty),
            }),
            REMOVED => {
                if removed.is_none() {
                    removed = Some(slot);
                }
                None
            }
            index => match self.entries[index] {
                Some((ref k, _)) if key.eq(k.borrow()) => Some((slot, BucketState::Full)),
                _ => None,
            },
        })
    }

    fn rehash(&mut self) {
        let mut new_size = self.table.len();
        // mostly live entries: grow; mostly tombstones: rebuild at the same size
        if self.occupied > max_occupied(new_size) >> 1 {
            new_size = new_size.checked_mul(2).unwrap_or_else(|| capacity_overflow());
        }
        self.rehash_for_size(new_size);
    }

    fn rehash_for_size(&mut self, new_size: usize) {
        self.entries.retain(Option::is_some);
        self.removed = 0;
        if new_size == 0 {
            self.table = Vec::new();
            return;
        }
        self.table = vec![EMPTY; new_size];
        for index in 0..self.entries.len() {
            let hash = match self.entries[index] {
                Some((ref key, _)) => self.hash(key),
                None => continue,
            };
            let (slot, _) = self.walk(hash, |slot| {
                if self.table[slot] == EMPTY { Some((slot, BucketState::Empty)) } else { None }
            });
            self.table[slot] = index;
        }
    }
}

#[cold]
fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

impl<'a, K, Q: ?Sized, V, S> Index<&'a Q> for OrderMap<K, V, S>
    where K: Eq + Hash + Borrow<Q>,
          Q: Eq + Hash,
          S: BuildHasher
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `OrderMap`.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, S> Debug for OrderMap<K, V, S>
    where K: Debug,
          V: Debug
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for OrderMap<K, V, S>
    where K: Eq + Hash,
          V: PartialEq,
          S: BuildHasher
{
    /// Two maps are equal when they hold the same entries, in any order.
    fn eq(&self, other: &OrderMap<K, V, S>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(key, value)| other.get(key).map_or(false, |v| *value == *v))
    }
}

impl<K, V, S> Eq for OrderMap<K, V, S>
    where K: Eq + Hash,
          V: Eq,
          S: BuildHasher
{}

impl<K, V, S> Default for OrderMap<K, V, S>
    where S: Default
{
    fn default() -> OrderMap<K, V, S> {
        OrderMap::with_hasher(Default::default())
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut OrderMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for OrderMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Creates a consuming iterator, that is, one that moves each key-value
    /// pair out of the map in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::order_map::OrderMap;
    ///
    /// let mut map = OrderMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    ///
    /// let vec: Vec<(&str, i32)> = map.into_iter().collect();
    /// assert_eq!(vec, [("a", 1), ("b", 2)]);
    /// ```
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter { remaining: self.occupied, iter: self.entries.into_iter() }
    }
}

impl<K, V, S> Extend<(K, V)> for OrderMap<K, V, S>
    where K: Eq + Hash,
          S: BuildHasher
{
    fn extend<T: IntoIterator<Item=(K, V)>>(&mut self, iter: T) {
        // Keys may repeat, so only reserve the whole lower bound when empty;
        // otherwise half of it, which bounds the resizes to two.
        let iter = iter.into_iter();
        let reserve = if self.is_empty() {
            iter.size_hint().0
        } else {
            (iter.size_hint().0 + 1) >> 1
        };
        self.reserve(reserve);
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for OrderMap<K, V, S>
    where K: Eq + Hash + Copy,
          V: Copy,
          S: BuildHasher
{
    fn extend<T: IntoIterator<Item=(&'a K, &'a V)>>(&mut self, iter: T) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, S> FromIterator<(K, V)> for OrderMap<K, V, S>
    where K: Eq + Hash,
          S: BuildHasher + Default
{
    fn from_iter<T: IntoIterator<Item=(K, V)>>(iter: T) -> OrderMap<K, V, S> {
        let mut map = OrderMap::with_hasher(Default::default());
        map.extend(iter);
        map
    }
}
