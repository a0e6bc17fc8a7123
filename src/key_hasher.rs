// Copyright 2018 Mohammad Rezaei.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//

//! The default `Hasher` used by `OrderMap`/`KeySet`.
use crate::util::*;

use std::hash::BuildHasher;
use std::hash::Hasher;
use std::sync::atomic::{AtomicU64, Ordering};

const SEED_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;
const FOLD: u64 = 0x517c_c1b7_2722_0a95;

static SEED: AtomicU64 = AtomicU64::new(0xcafe_babe);

fn next_seed() -> u64 {
    spread_two(SEED.fetch_add(SEED_GAMMA, Ordering::Relaxed))
}

/// Builds `SpreadHasher`s. Every builder draws its own seed, so two maps
/// rarely share a hash layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpreadHasherBuilder {
    seed: u64,
}

/// Folds each written word into the state and mixes the result on `finish`.
/// The final mix is what lets `OrderMap` mask off low bits for sequential keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpreadHasher {
    hash: u64,
}

impl Default for SpreadHasherBuilder {
    fn default() -> Self {
        SpreadHasherBuilder::new()
    }
}

impl SpreadHasherBuilder {
    pub fn new() -> Self {
        SpreadHasherBuilder { seed: next_seed() }
    }

    /// A builder with a fixed seed, for reproducible table layouts.
    pub fn with_seed(seed: u64) -> Self {
        SpreadHasherBuilder { seed }
    }
}

impl BuildHasher for SpreadHasherBuilder {
    type Hasher = SpreadHasher;

    #[inline]
    fn build_hasher(&self) -> SpreadHasher {
        SpreadHasher::new(self.seed)
    }
}

impl SpreadHasher {
    #[inline]
    pub fn new(seed: u64) -> Self {
        SpreadHasher { hash: seed }
    }

    #[inline(always)]
    fn fold(&mut self, word: u64) {
        self.hash = (self.hash.rotate_left(5) ^ word).wrapping_mul(FOLD);
    }
}

macro_rules! write_as_word {
    ($($name:ident: $t:ty),*) => ($(
        #[inline(always)]
        fn $name(&mut self, i: $t) {
            self.fold(i as u64)
        }
    )*)
}

impl Hasher for SpreadHasher {
    #[inline(always)]
    fn finish(&self) -> u64 {
        spread_one(self.hash)
    }

    fn write(&mut self, bytes: &[u8]) {
        let mut chunks = bytes.chunks_exact(8);
        for chunk in &mut chunks {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            self.fold(u64::from_le_bytes(word));
        }
        let rest = chunks.remainder();
        if !rest.is_empty() {
            let mut word = [0u8; 8];
            word[..rest.len()].copy_from_slice(rest);
            // tag with the tail length so "a\0" and "a" fold differently
            self.fold(u64::from_le_bytes(word) ^ ((rest.len() as u64) << 59));
        }
    }

    write_as_word!(write_u8: u8, write_u16: u16, write_u32: u32, write_u64: u64, write_usize: usize,
                   write_i8: i8, write_i16: i16, write_i32: i32, write_i64: i64, write_isize: isize);

    #[inline(always)]
    fn write_u128(&mut self, i: u128) {
        self.fold(i as u64);
        self.fold((i >> 64) as u64);
    }

    #[inline(always)]
    fn write_i128(&mut self, i: i128) {
        self.write_u128(i as u128)
    }
}
