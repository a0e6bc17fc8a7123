// Copyright 2018 Mohammad Rezaei.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//

#[macro_use]
extern crate keyset;

use keyset::key_hasher::SpreadHasherBuilder;
use keyset::key_set::KeySet;
use num::BigInt;
use ordered_float::OrderedFloat;
use rand::*;
use xoshiro::Xoshiro512StarStar;

use std::collections::HashSet;

fn create_rand_vec(size: usize, modulo: u32) -> Vec<u32> {
    let mut rng1 = Xoshiro512StarStar::from_seed_u64(0x1234_5678_9ABC_DEF1);
    let mut vec = Vec::with_capacity(size);
    for _i in 0..size {
        vec.push(rng1.next_u32() % modulo);
    }
    vec
}

#[test]
fn scenario_a_duplicates_collapse() {
    assert_eq!(4, KeySet::from_sequence(vec![1, 2, 3, 3, 4, 4]).len());
}

#[test]
fn scenario_b_membership() {
    let set = KeySet::from_sequence(vec![1, 2, 3]);
    assert_eq!(true, set.contains(&1));
    assert_eq!(false, set.contains(&4));
}

#[test]
fn scenario_c_add() {
    let mut s = KeySet::from_sequence(vec![1, 2, 3]);
    s.add(4);
    assert_eq!(4, s.len());
    assert!(s.contains(&4));
}

#[test]
fn scenario_d_delete() {
    let mut s = KeySet::from_sequence(vec![1, 2, 3]);
    s.delete(&1);
    assert_eq!(2, s.len());
    assert!(!s.contains(&1));
}

#[test]
fn scenario_e_clear() {
    let mut s = KeySet::from_sequence(vec![1, 2, 3]);
    s.clear();
    assert_eq!(0, s.len());
    assert_eq!("Set: {}", s.inspect());
}

#[test]
fn scenario_f_inspect() {
    assert_eq!("Set: {1, 2, 3}", KeySet::from_sequence(vec![1, 2, 3]).inspect());
    assert_eq!("Set: {1, 2, 3}", keyset![1, 2, 3].inspect());
}

#[test]
fn size_is_distinct_count_for_random_input() {
    for &modulo in &[1u32, 7, 100, 10_000, 1_000_000] {
        let src = create_rand_vec(50_000, modulo);
        let expected: HashSet<u32> = src.iter().cloned().collect();
        let set = KeySet::from_sequence(src.iter().cloned());
        assert_eq!(expected.len(), set.len(), "modulo {}", modulo);
    }
}

#[test]
fn add_then_contains_delete_then_not() {
    let src = create_rand_vec(20_000, 5_000);
    let mut set = KeySet::new();
    for v in &src {
        set.add(*v);
        assert!(set.contains(v));
    }
    for v in &src {
        let before = set.len();
        let was_present = set.contains(v);
        set.delete(v);
        assert!(!set.contains(v));
        assert_eq!(before - was_present as usize, set.len());
    }
    assert!(set.is_empty());
}

#[test]
fn add_is_idempotent() {
    let mut once = KeySet::new();
    let mut twice = KeySet::new();
    for v in create_rand_vec(1_000, 300) {
        once.add(v);
        twice.add(v).add(v);
    }
    assert_eq!(once.len(), twice.len());
    assert_eq!(once, twice);
    assert_eq!(once.inspect(), twice.inspect());
}

#[test]
fn delete_absent_is_noop() {
    let mut set = keyset![10, 20, 30];
    set.delete(&40).delete(&50);
    assert_eq!(3, set.len());
    assert_eq!("Set: {10, 20, 30}", set.inspect());

    let mut empty: KeySet<u64> = keyset![];
    empty.delete(&0);
    assert!(empty.is_empty());
}

#[test]
fn iteration_follows_first_insertion() {
    let src = create_rand_vec(10_000, 2_000);
    let mut expected = Vec::new();
    let mut seen = HashSet::new();
    for v in &src {
        if seen.insert(*v) {
            expected.push(*v);
        }
    }
    let set = KeySet::from_sequence(src);
    let mut visited = Vec::with_capacity(set.len());
    set.each(|v| visited.push(*v));
    assert_eq!(expected, visited);
    assert_eq!(expected, set.iter().cloned().collect::<Vec<_>>());
    assert_eq!(expected, set.into_iter().collect::<Vec<_>>());
}

#[test]
fn shuffled_deletes_keep_remaining_order() {
    let mut rng1 = Xoshiro512StarStar::from_seed_u64(0x1234_5678_9ABC_DEF1);
    let mut set: KeySet<u32> = (0..5_000).collect();
    let mut doomed: Vec<u32> = (0..5_000).filter(|v| v % 3 != 0).collect();
    rng1.shuffle(&mut doomed);
    for v in &doomed {
        set.delete(v);
    }
    let expected: Vec<u32> = (0..5_000).filter(|v| v % 3 == 0).collect();
    assert_eq!(expected, set.iter().cloned().collect::<Vec<_>>());
}

#[test]
fn fixed_seed_hasher() {
    let mut a = KeySet::with_hasher(SpreadHasherBuilder::with_seed(1));
    let mut b = KeySet::with_hasher(SpreadHasherBuilder::with_seed(2));
    for v in create_rand_vec(1_000, 1_000) {
        a.add(v);
        b.add(v);
    }
    assert_eq!(a, b);
    assert_eq!(a.inspect(), b.inspect());
}

#[test]
fn big_integer_elements() {
    let big = num::pow(BigInt::from(2u32), 100);
    let mut set = KeySet::new();
    for i in 0..100u32 {
        set.add(&big + BigInt::from(i % 10));
    }
    assert_eq!(10, set.len());
    assert!(set.contains(&(&big + BigInt::from(9u32))));
    assert!(set.contains(&big));
    assert!(!set.contains(&(&big + BigInt::from(10u32))));
    assert_eq!(
        format!("Set: {{{}, {}}}", &big, &big + BigInt::from(1u32)),
        KeySet::from_sequence(vec![big.clone(), &big + BigInt::from(1u32), big.clone()]).inspect());
}

#[test]
fn float_elements_through_ordered_float() {
    let mut set = KeySet::new();
    set.add(OrderedFloat(1.5f64))
        .add(OrderedFloat(2.5))
        .add(OrderedFloat(1.5))
        .add(OrderedFloat(std::f64::NAN))
        .add(OrderedFloat(std::f64::NAN));
    assert_eq!(3, set.len());
    assert!(set.contains(&OrderedFloat(2.5)));
    assert!(set.contains(&OrderedFloat(std::f64::NAN)));
    assert!(!set.contains(&OrderedFloat(3.5)));
}

#[test]
fn string_elements_looked_up_by_str() {
    let words = "the quick brown fox jumps over the lazy dog the end";
    let set: KeySet<String> = words.split(' ').map(String::from).collect();
    assert_eq!(9, set.len());
    assert!(set.contains("fox"));
    assert!(!set.contains("cat"));
    assert_eq!("Set: {the, quick, brown, fox, jumps, over, lazy, dog, end}", set.inspect());
}
