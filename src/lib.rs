// Copyright 2018 Mohammad Rezaei.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//

//! # Key Set for Rust
//! A set of unique elements built from a key-presence map.
//!
//! `KeySet` owns a single `OrderMap<T, ()>`. An element is in the set exactly when
//! it is a key of that map; the `()` stored against it carries no information.
//! Uniqueness comes for free from the map's own key uniqueness, and membership,
//! insertion and deletion cost one hashed map operation each, amortized O(1).
//!
//! `OrderMap` is an open-addressing hash map that keeps entries in insertion
//! order. `KeySet` therefore iterates, prints and visits its elements in the
//! order they were first added.
//!
//! Mutating calls return the set, so they chain:
//!
//! ```rust
//! use keyset::key_set::KeySet;
//!
//! let mut set = KeySet::from_sequence(vec![1, 2, 3]);
//! set.add(4).delete(&1).add(4);
//! assert_eq!(set.len(), 3);
//! assert_eq!(set.inspect(), "Set: {2, 3, 4}");
//! ```
//!
//! A typical caller scans a sequence for its first repeated value:
//!
//! ```rust
//! use keyset::key_set::KeySet;
//!
//! fn first_repeat(values: &[i32]) -> Option<i32> {
//!     let mut seen = KeySet::new();
//!     for &value in values {
//!         if seen.contains(&value) {
//!             return Some(value);
//!         }
//!         seen.add(value);
//!     }
//!     None
//! }
//!
//! assert_eq!(first_repeat(&[2, 5, 1, 2, 3, 5, 1, 2, 4]), Some(2));
//! assert_eq!(first_repeat(&[1, 2, 3]), None);
//! ```
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! keyset = "0.1.0"
//! ```
//!

pub mod key_hasher;
pub mod key_set;
pub mod order_map;
#[doc(hidden)]
pub mod util;

/// Creates a [`KeySet`] containing the arguments.
///
/// `keyset!` takes its elements as discrete arguments and forwards them, in
/// order, to [`KeySet::from_sequence`]. Repeated arguments collapse into one
/// element.
///
/// ```
/// # #[macro_use] extern crate keyset;
/// # use keyset::key_set::KeySet;
/// # fn main() {
/// let s = keyset![1, 2, 3, 3];
/// assert_eq!(s.len(), 3);
/// assert!(s.contains(&2));
///
/// let empty: KeySet<u8> = keyset![];
/// assert!(empty.is_empty());
/// # }
/// ```
///
/// [`KeySet`]: key_set/struct.KeySet.html
/// [`KeySet::from_sequence`]: key_set/struct.KeySet.html#method.from_sequence
#[macro_export]
macro_rules! keyset {
    () => ({
        $crate::key_set::KeySet::new()
    });
    ($($x:expr),+ $(,)*) => ({
        $crate::key_set::KeySet::from_sequence([$($x),+])
    });
}
