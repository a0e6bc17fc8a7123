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

//! # `KeySet`: a set of unique elements composed over `OrderMap`.
//! Every element is a key of the underlying map, stored against the unit
//! presence marker `()`. Membership is key presence, nothing else.
//! Lookups, inserts and removes inherit the map's amortized O(1) cost,
//! and iteration follows the order in which elements were first added.

use crate::key_hasher::*;
use crate::order_map::{self, OrderMap};

use std::borrow::Borrow;
use std::fmt;
use std::hash::BuildHasher;
use std::hash::Hash;
use std::iter::FromIterator;
use std::iter::FusedIterator;

/// A hash set implemented as an `OrderMap` where the value is `()`.
///
/// Elements must implement [`Eq`] and [`Hash`]. If you implement these yourself,
/// it is important that the following property holds:
///
/// ```text
/// k1 == k2 -> hash(k1) == hash(k2)
/// ```
///
/// It is a logic error for an item to be modified in such a way that the
/// item's hash or its equality changes while it is in the set.
///
/// The mutating operations `add`, `delete` and `clear` return the set itself,
/// so calls can be chained.
///
/// # Examples
///
/// ```
/// use keyset::key_set::KeySet;
///
/// let mut nums = KeySet::from_sequence(vec![17, 42, 225, 42]);
/// assert_eq!(nums.len(), 3);
///
/// nums.add(-5).delete(&225);
///
/// if !nums.contains(&44) {
///     println!("We have {} nums, but 44 ain't one.", nums.len());
/// }
///
/// assert_eq!(nums.inspect(), "Set: {17, 42, -5}");
/// ```
///
/// Any type deriving [`Eq`] and [`Hash`] can be an element:
///
/// ```
/// use keyset::key_set::KeySet;
///
/// #[derive(Hash, Eq, PartialEq, Debug)]
/// struct Color {
///     r: u8, g: u8, b: u8
/// }
///
/// let mut colors = KeySet::new();
/// colors.add(Color { r: 255, g: 255, b: 255 })
///       .add(Color { r: 255, g: 255, b: 0 })
///       .add(Color { r: 255, g: 255, b: 255 });
///
/// assert_eq!(colors.len(), 2);
/// colors.each(|c| println!("{:?}", c));
/// ```
///
/// [`Eq`]: https://doc.rust-lang.org/std/cmp/trait.Eq.html
/// [`Hash`]: https://doc.rust-lang.org/std/hash/trait.Hash.html
#[derive(Clone)]
pub struct KeySet<T, S = SpreadHasherBuilder> {
    map: OrderMap<T, (), S>,
}

impl<T: Hash + Eq> KeySet<T, SpreadHasherBuilder> {
    /// Creates an empty `KeySet`.
    ///
    /// The set is initially created with a capacity of 0, so it will not allocate until it
    /// is first inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    /// let set: KeySet<i32> = KeySet::new();
    /// assert_eq!(set.len(), 0);
    /// ```
    #[inline]
    pub fn new() -> KeySet<T, SpreadHasherBuilder> {
        KeySet { map: OrderMap::new() }
    }

    /// Creates an empty `KeySet` able to hold at least `capacity` elements
    /// without rehashing.
    #[inline]
    pub fn with_capacity(capacity: usize) -> KeySet<T, SpreadHasherBuilder> {
        KeySet { map: OrderMap::with_capacity(capacity) }
    }

    /// Creates a set holding the distinct elements of `source`.
    ///
    /// The source is iterated once and each element is added in turn, so a
    /// repeated element collapses into its first occurrence and keeps that
    /// position in the iteration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    ///
    /// let set = KeySet::from_sequence(vec![1, 2, 3, 3, 4, 4]);
    /// assert_eq!(set.len(), 4);
    /// assert_eq!(set.inspect(), "Set: {1, 2, 3, 4}");
    /// ```
    pub fn from_sequence<I: IntoIterator<Item=T>>(source: I) -> KeySet<T, SpreadHasherBuilder> {
        let mut set = KeySet::new();
        for value in source {
            set.add(value);
        }
        set
    }
}

impl<T, S> KeySet<T, S> {
    /// Creates a new empty set which will use the given hasher to hash elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    /// use keyset::key_hasher::SpreadHasherBuilder;
    ///
    /// let mut set = KeySet::with_hasher(SpreadHasherBuilder::with_seed(7));
    /// set.add(2);
    /// ```
    #[inline]
    pub fn with_hasher(hasher: S) -> KeySet<T, S> {
        KeySet { map: OrderMap::with_hasher(hasher) }
    }

    /// Creates an empty set with at least the specified capacity, using
    /// `hasher` to hash the elements.
    #[inline]
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> KeySet<T, S> {
        KeySet { map: OrderMap::with_capacity_and_hasher(capacity, hasher) }
    }

    /// Returns a reference to the set's [`BuildHasher`].
    ///
    /// [`BuildHasher`]: https://doc.rust-lang.org/std/hash/trait.BuildHasher.html
    pub fn hasher(&self) -> &S {
        self.map.hasher()
    }

    /// Returns the number of elements the set can hold without rehashing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Returns the number of distinct elements in the set. This is the count
    /// the underlying map keeps, not a traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    ///
    /// let mut v = KeySet::new();
    /// assert_eq!(v.len(), 0);
    /// v.add(1).add(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// An iterator visiting all elements in insertion order.
    /// The iterator element type is `&'a T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    /// let mut set = KeySet::new();
    /// set.add(7).add(22);
    ///
    /// let seen: Vec<_> = set.iter().collect();
    /// assert_eq!(seen, [&7, &22]);
    /// ```
    pub fn iter(&self) -> Iter<T> {
        Iter { iter: self.map.keys() }
    }

    /// Calls `visitor` once for every element, in insertion order, then
    /// returns the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    ///
    /// let set = KeySet::from_sequence(vec![3, 1, 2]);
    /// let mut total = 0;
    /// let mut order = Vec::new();
    /// set.each(|&x| total += x).each(|&x| order.push(x));
    /// assert_eq!(total, 6);
    /// assert_eq!(order, [3, 1, 2]);
    /// ```
    pub fn each<F>(&self, mut visitor: F) -> &KeySet<T, S>
        where F: FnMut(&T)
    {
        for value in self.iter() {
            visitor(value);
        }
        self
    }

    /// Removes every element, keeping the allocated memory, and returns the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    ///
    /// let mut v = KeySet::from_sequence(vec![1, 2, 3]);
    /// v.clear().add(9);
    /// assert_eq!(v.len(), 1);
    /// assert!(!v.contains(&1));
    /// ```
    pub fn clear(&mut self) -> &mut KeySet<T, S> {
        self.map.clear();
        self
    }
}

impl<T, S> KeySet<T, S>
    where T: Eq + Hash,
          S: BuildHasher
{
    /// Reserves capacity for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the new allocation size overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional)
    }

    /// Returns `true` if the set contains a value. This is a single hashed
    /// lookup in the underlying map.
    ///
    /// The value may be any borrowed form of the set's element type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    ///
    /// let set = KeySet::from_sequence(vec![1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    ///
    /// let words = KeySet::from_sequence(vec![String::from("hello")]);
    /// assert!(words.contains("hello"));
    /// ```
    ///
    /// [`Eq`]: https://doc.rust-lang.org/std/cmp/trait.Eq.html
    /// [`Hash`]: https://doc.rust-lang.org/std/hash/trait.Hash.html
    #[inline]
    pub fn contains<Q: ?Sized>(&self, value: &Q) -> bool
        where T: Borrow<Q>,
              Q: Hash + Eq
    {
        self.map.contains_key(value)
    }

    /// Adds a value to the set.
    ///
    /// If the set did not have this value present, `true` is returned.
    ///
    /// If the set did have this value present, `false` is returned and the
    /// stored element is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    ///
    /// let mut set = KeySet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        // an existing key only has its () marker replaced; the key is kept
        self.map.insert(value, ()).is_none()
    }

    /// Adds a value to the set if it is not already present, and returns the
    /// set so further calls can be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    ///
    /// let mut set = KeySet::new();
    /// set.add(1).add(2).add(1);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn add(&mut self, value: T) -> &mut KeySet<T, S> {
        self.insert(value);
        self
    }

    /// Removes a value from the set. Returns whether the value was
    /// present in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    ///
    /// let mut set = KeySet::new();
    ///
    /// set.add(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, value: &Q) -> bool
        where T: Borrow<Q>,
              Q: Hash + Eq
    {
        self.map.remove(value).is_some()
    }

    /// Removes a value from the set if present, and returns the set.
    /// Deleting an absent value does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    ///
    /// let mut set = KeySet::from_sequence(vec![1, 2, 3]);
    /// set.delete(&1).delete(&10);
    /// assert_eq!(set.len(), 2);
    /// assert!(!set.contains(&1));
    /// ```
    pub fn delete<Q: ?Sized>(&mut self, value: &Q) -> &mut KeySet<T, S>
        where T: Borrow<Q>,
              Q: Hash + Eq
    {
        self.remove(value);
        self
    }
}

impl<T: fmt::Display, S> KeySet<T, S> {
    /// Renders the set as `Set: {e1, e2, e3}`, elements in iteration order.
    /// Same text as the `Display` impl.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    ///
    /// let mut set = KeySet::from_sequence(vec![1, 2, 3]);
    /// assert_eq!(set.inspect(), "Set: {1, 2, 3}");
    /// set.clear();
    /// assert_eq!(set.inspect(), "Set: {}");
    /// ```
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl<T: fmt::Display, S> fmt::Display for KeySet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Set: {")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(value, f)?;
        }
        f.write_str("}")
    }
}

impl<T: fmt::Debug, S> fmt::Debug for KeySet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> PartialEq for KeySet<T, S>
    where T: Eq + Hash,
          S: BuildHasher
{
    /// Sets are equal when they hold the same elements, in any order.
    fn eq(&self, other: &KeySet<T, S>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|key| other.contains(key))
    }
}

impl<T, S> Eq for KeySet<T, S>
    where T: Eq + Hash,
          S: BuildHasher
{}

impl<T, S> Default for KeySet<T, S>
    where S: Default
{
    /// Creates an empty `KeySet<T, S>` with the `Default` value for the hasher.
    fn default() -> KeySet<T, S> {
        KeySet { map: OrderMap::default() }
    }
}

impl<T, S> FromIterator<T> for KeySet<T, S>
    where T: Eq + Hash,
          S: BuildHasher + Default
{
    fn from_iter<I: IntoIterator<Item=T>>(iter: I) -> KeySet<T, S> {
        let mut set = KeySet::with_hasher(Default::default());
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for KeySet<T, S>
    where T: Eq + Hash,
          S: BuildHasher
{
    fn extend<I: IntoIterator<Item=T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let reserve = if self.is_empty() {
            iter.size_hint().0
        } else {
            (iter.size_hint().0 + 1) >> 1
        };
        self.reserve(reserve);
        for value in iter {
            self.add(value);
        }
    }
}

impl<'a, T, S> Extend<&'a T> for KeySet<T, S>
    where T: 'a + Eq + Hash + Copy,
          S: BuildHasher
{
    fn extend<I: IntoIterator<Item=&'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T: Eq + Hash> From<Vec<T>> for KeySet<T, SpreadHasherBuilder> {
    fn from(values: Vec<T>) -> Self {
        KeySet::from_sequence(values)
    }
}

impl<T: Eq + Hash, const N: usize> From<[T; N]> for KeySet<T, SpreadHasherBuilder> {
    fn from(values: [T; N]) -> Self {
        KeySet::from_sequence(values)
    }
}

/// An iterator over the elements of a `KeySet`, in insertion order.
pub struct Iter<'a, K: 'a> {
    iter: order_map::Keys<'a, K, ()>,
}

/// An owning iterator over the elements of a `KeySet`, in insertion order.
pub struct IntoIter<K> {
    iter: order_map::IntoIter<K, ()>,
}

impl<'a, T, S> IntoIterator for &'a KeySet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, S> IntoIterator for KeySet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Creates a consuming iterator, that is, one that moves each value out
    /// of the set in insertion order. The set cannot be used after calling this.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyset::key_set::KeySet;
    /// let mut set = KeySet::new();
    /// set.add("a".to_string()).add("b".to_string());
    ///
    /// let v: Vec<String> = set.into_iter().collect();
    /// assert_eq!(v, ["a", "b"]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { iter: self.map.into_iter() }
    }
}

impl<'a, K> Clone for Iter<'a, K> {
    fn clone(&self) -> Iter<'a, K> {
        Iter { iter: self.iter.clone() }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.iter.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K> ExactSizeIterator for Iter<'a, K> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<'a, K> FusedIterator for Iter<'a, K> {}

impl<'a, K: fmt::Debug> fmt::Debug for Iter<'a, K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.iter.next().map(|(k, _)| k)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<K> FusedIterator for IntoIter<K> {}
