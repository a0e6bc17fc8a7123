// Copyright 2018 Mohammad Rezaei.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//

use std::cmp;

/// Smallest non-empty index table.
pub const MIN_TABLE_SIZE: usize = 16;

/// Number of occupied + removed slots a table of `table_size` tolerates before a rehash (62.5%).
#[inline]
pub fn max_occupied(table_size: usize) -> usize {
    (table_size >> 1) + (table_size >> 3)
}

/// Power of two table size able to hold `capacity` entries, `None` on overflow.
/// A capacity of zero needs no table at all.
pub fn table_size_for(capacity: usize) -> Option<usize> {
    if capacity == 0 {
        return Some(0);
    }
    let wanted = capacity.checked_mul(8)?.checked_add(4)? / 5;
    let mut size = cmp::max(MIN_TABLE_SIZE, wanted.checked_next_power_of_two()?);
    while max_occupied(size) < capacity {
        size = size.checked_mul(2)?;
    }
    Some(size)
}

/// 64-bit finalizer, a bijection that spreads low bit differences over the whole word.
#[inline]
pub fn spread_one(code: u64) -> u64 {
    let mut r = code;
    r ^= r >> 33;
    r = r.wrapping_mul(0xff51_afd7_ed55_8ccd);
    r ^= r >> 33;
    r = r.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    r ^= r >> 33;
    r
}

/// Independent mixer, used for secondary probe strides and seed generation.
#[inline]
pub fn spread_two(code: u64) -> u64 {
    let mut r = code;
    r ^= r >> 30;
    r = r.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    r ^= r >> 27;
    r = r.wrapping_mul(0x94d0_49bb_1331_11eb);
    r ^= r >> 31;
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_size_for() {
        assert_eq!(table_size_for(0), Some(0));
        assert_eq!(table_size_for(1), Some(16));
        assert_eq!(table_size_for(10), Some(16));
        assert_eq!(table_size_for(11), Some(32));
        assert_eq!(table_size_for(384), Some(1024));
        assert_eq!(table_size_for(usize::max_value()), None);
        for capacity in 1..2000 {
            let size = table_size_for(capacity).unwrap();
            assert!(size.is_power_of_two());
            assert!(max_occupied(size) >= capacity);
        }
    }

    #[test]
    fn test_spread_is_bijective_on_sample() {
        let ones: HashSet<u64> = (0..10_000u64).map(spread_one).collect();
        let twos: HashSet<u64> = (0..10_000u64).map(spread_two).collect();
        assert_eq!(ones.len(), 10_000);
        assert_eq!(twos.len(), 10_000);
        assert_eq!(spread_one(0), 0);
    }
}
