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

use keyset::key_hasher::*;
use keyset::order_map::OrderMap;
use rand::*;
use xoshiro::Xoshiro512StarStar;

use std::collections::HashMap;

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
struct Color {
    r: u8,
    g: u8,
    b: u8,
}

#[test]
fn custom_key()
{
    let mut order_map = OrderMap::new();
    order_map.insert(Color {r: 0, g: 0, b: 0}, 17);
    order_map.insert(Color {r: 0, g: 0, b: 1}, 42);
    order_map.insert(Color {r: 1, g: 1, b: 1}, 1);

    assert_eq!(17, *order_map.get(&Color {r: 0, g: 0, b: 0}).unwrap());
    assert_eq!(42, *order_map.get(&Color {r: 0, g: 0, b: 1}).unwrap());
    assert_eq!(1, *order_map.get(&Color {r: 1, g: 1, b: 1}).unwrap());
    assert_eq!(vec![Color {r: 0, g: 0, b: 0}, Color {r: 0, g: 0, b: 1}, Color {r: 1, g: 1, b: 1}],
               order_map.keys().cloned().collect::<Vec<_>>());
}

#[test]
fn test_simple_insert() {
    let order_map = map_1_m();
    assert_eq!(1_000_000, order_map.len());
}

fn map_1_m() -> OrderMap<i32, u32, SpreadHasherBuilder> {
    let mut order_map = OrderMap::new();
    let mut c: i32 = 0;
    while c < 1_000_000 {
        order_map.insert(c, c.wrapping_mul(10) as u32);
        c += 1;
    }
    order_map
}

#[test]
fn test_simple_get() {
    let mut order_map = OrderMap::new();
    assert_eq!(None, order_map.get(&0));
    assert_eq!(None, order_map.get(&1));
    assert_eq!(None, order_map.get(&100));
    order_map.insert(0i32, 100u32);
    let mut c = 1;
    while c < 1_000_000 {
        order_map.insert(c, c.wrapping_mul(10) as u32);
        c += 1;
    }
    assert_eq!(1_000_000, order_map.len());
    assert_eq!(100u32, *order_map.get(&0i32).unwrap());
    c = 1;
    while c < 1_000_000 {
        assert_eq!(c.wrapping_mul(10) as u32, *order_map.get(&c).unwrap());
        c += 1;
    }
    while c < 2_000_000 {
        assert_eq!(None, order_map.get(&c));
        c += 1;
    }
}

#[test]
fn test_remove()
{
    let mut order_map = map_1_m();
    assert_eq!(1_000_000, order_map.len());
    let mut c: i32 = 0;
    while c < 1_000_000 {
        assert_eq!(Some(c.wrapping_mul(10) as u32), order_map.remove(&c), "For key {}", c);
        c += 1;
    }
    assert_eq!(0, order_map.len());
    c = 0;
    while c < 1_000_000 {
        assert_eq!(None, order_map.remove(&c));
        c += 1;
    }
}

#[test]
fn test_contains_key()
{
    let empty_map: OrderMap<i32, u32, SpreadHasherBuilder> = OrderMap::new();
    assert_eq!(false, empty_map.contains_key(&0));
    assert_eq!(false, empty_map.contains_key(&1));
    let order_map = map_1_m();
    let mut c: i32 = 0;
    while c < 1_000_000 {
        assert_eq!(true, order_map.contains_key(&c), "For key {}", c);
        c += 1;
    }
    while c < 2_000_000 {
        assert_eq!(false, order_map.contains_key(&c));
        c += 1;
    }
}

#[test]
fn test_iter() {
    let mut map: OrderMap<i32, u32, SpreadHasherBuilder> = OrderMap::new();
    {
        let iter = map.iter();
        for _kv in iter {
            assert!(false, "should not get here");
        }
    }
    map.insert(0, 100);
    {
        let iter = map.iter();
        for kv in iter {
            assert_eq!((0, 100), (*kv.0, *kv.1));
        }
    }
    map.clear();
    assert_eq!(0, map.len());
    map.insert(100, 200);
    map.insert(1, 100);
    assert_eq!(vec![(&100, &200), (&1, &100)], map.iter().collect::<Vec<_>>());

    let map = map_1_m();
    {
        let mut expected = 0;
        for kv in map.iter() {
            assert_eq!(expected, *kv.0);
            assert_eq!(*kv.1 as u64, *kv.0 as u64 * 10);
            expected += 1;
        }
        assert_eq!(1_000_000, expected);
    }
}

#[test]
fn test_into_iter() {
    let map = map_1_m();
    let vec: Vec<(i32, u32)> = map.into_iter().collect();
    assert_eq!(1_000_000, vec.len());
    assert_eq!((999_999, 9_999_990), vec[999_999]);
}

#[test]
fn test_random_ops_match_std() {
    let mut rng1 = Xoshiro512StarStar::from_seed_u64(0x1234_5678_9ABC_DEF1);
    let mut order_map: OrderMap<u32, u32> = OrderMap::new();
    let mut std_map: HashMap<u32, u32> = HashMap::new();
    for step in 0..200_000u32 {
        let key = rng1.next_u32() % 4_096;
        match rng1.next_u32() % 4 {
            0 | 1 => assert_eq!(std_map.insert(key, step), order_map.insert(key, step)),
            2 => assert_eq!(std_map.remove(&key), order_map.remove(&key)),
            _ => assert_eq!(std_map.get(&key), order_map.get(&key)),
        }
        assert_eq!(std_map.len(), order_map.len());
    }
    for (k, v) in &std_map {
        assert_eq!(Some(v), order_map.get(k));
    }
    assert_eq!(std_map.len(), order_map.iter().count());
}

#[test]
fn test_random_order_matches_log() {
    let mut rng1 = Xoshiro512StarStar::from_seed_u64(0x0FED_CBA9_8765_4321);
    let mut order_map: OrderMap<u32, ()> = OrderMap::new();
    let mut log: Vec<u32> = Vec::new();
    for _ in 0..20_000 {
        let key = rng1.next_u32() % 512;
        if rng1.next_u32() % 3 == 0 {
            order_map.remove(&key);
            log.retain(|&k| k != key);
        } else if order_map.insert(key, ()).is_none() {
            log.push(key);
        }
    }
    assert_eq!(log, order_map.keys().cloned().collect::<Vec<_>>());
}
