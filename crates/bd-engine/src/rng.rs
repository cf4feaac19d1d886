//! Small seedable generator for boards without a hardware RNG.

use crate::hal::RandomSource;

/// Xoroshiro128+ state. Not cryptographic; only picks LED colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rng {
    s0: u64,
    s1: u64,
}

impl Rng {
    /// The state must not be all zero; a zero pair is nudged to `(1, 0)`.
    pub const fn new(s0: u64, s1: u64) -> Self {
        let s0 = if s0 == 0 && s1 == 0 { 1 } else { s0 };
        Self { s0, s1 }
    }

    /// Expand one seed into the two state words with splitmix64.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(splitmix64(seed), splitmix64(seed.wrapping_add(0x9e37_79b9_7f4a_7c15)))
    }

    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.s0;
        let mut s1 = self.s1;
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.s0 = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.s1 = s1.rotate_left(37);
        result
    }

    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(0x853c_49e6_748f_ea9b, 0xda3e_39cb_94b9_5bdb)
    }
}

impl RandomSource for Rng {
    fn random_range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        min + self.next_u32() % (max - min)
    }
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
