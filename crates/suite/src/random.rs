#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Seeded 48-bit linear congruential generator.
//!
//! The fixture values are defined by this generator: the seed is scrambled with
//! the multiplier, every step is `state * 0x5DEECE66D + 0xB (mod 2^48)`, and a
//! 32-bit draw is the top 32 bits of the new state.

use rand::RngCore;

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const ADDEND: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// Deterministic 48-bit LCG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    /// Create a generator from a seed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use collbench_suite::Lcg48;
    /// let mut rng = Lcg48::new(42);
    /// assert_eq!(rng.next_int(), -1_170_105_035);
    /// ```
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64 ^ MULTIPLIER) & MASK,
        }
    }

    /// Advance the state and return its top `bits` bits.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    const fn next_bits(&mut self, bits: u32) -> i32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        (self.state >> (48 - bits)) as u32 as i32
    }

    /// Next uniformly distributed 32-bit integer.
    pub const fn next_int(&mut self) -> i32 {
        self.next_bits(32)
    }

    /// Next 64-bit integer, built from two consecutive 32-bit draws.
    pub const fn next_long(&mut self) -> i64 {
        let high = (self.next_bits(32) as i64) << 32;
        high.wrapping_add(self.next_bits(32) as i64)
    }

    /// Stream of `count` 32-bit draws.
    pub fn ints(&mut self, count: usize) -> impl Iterator<Item = i32> + '_ {
        (0..count).map(move |_| self.next_int())
    }
}

#[allow(clippy::cast_sign_loss)]
impl RngCore for Lcg48 {
    fn next_u32(&mut self) -> u32 {
        self.next_int() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_long() as u64
    }

    /// Fills four bytes per draw, least significant byte first.
    #[allow(clippy::cast_possible_truncation)]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let mut draw = self.next_int();
            for byte in chunk {
                *byte = draw as u8;
                draw >>= 8;
            }
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
