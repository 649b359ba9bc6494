// crates/gs_core/src/rng.rs
//
// Seeded, integer-only RNG for allocation order and child-link targets.
// Unbiased ranges via rejection sampling; explicit seeding so a logged seed
// replays a run exactly.

use rand_chacha::ChaCha20Rng;
use rand_core::{OsRng, RngCore, SeedableRng};

use crate::errors::CoreError;

/// Deterministic RNG for allocation.
///
/// Internally uses ChaCha20 with an explicit 32-byte seed derived from the
/// 64-bit run seed (little-endian bytes in the first 8 positions; the rest 0).
/// This avoids endianness ambiguity and keeps the mapping stable across platforms.
#[derive(Debug, Clone)]
pub struct AllocRng {
    rng: ChaCha20Rng,
    seed: u64,
    words_consumed: u128,
}

impl AllocRng {
    #[inline]
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut seed32 = [0u8; 32];
        seed32[..8].copy_from_slice(&seed.to_le_bytes());
        Self {
            rng: ChaCha20Rng::from_seed(seed32),
            seed,
            words_consumed: 0,
        }
    }

    /// The seed this stream was built from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Total number of 64-bit words drawn so far (saturating).
    #[inline]
    pub fn words_consumed(&self) -> u128 {
        self.words_consumed
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.words_consumed = self.words_consumed.saturating_add(1);
        self.rng.next_u64()
    }

    /// Unbiased integer in [0, n). Returns `None` if `n == 0`.
    ///
    /// `threshold = 2^64 mod n`; accept `x >= threshold`, then `x % n` is uniform.
    #[inline]
    pub fn gen_range(&mut self, n: u64) -> Option<u64> {
        if n == 0 {
            return None;
        }
        let threshold = n.wrapping_neg() % n;
        loop {
            let x = self.next_u64();
            if x >= threshold {
                return Some(x % n);
            }
        }
    }

    /// Choose a single index in `[0, n)`; `None` if `n == 0`.
    #[inline]
    pub fn choose_index(&mut self, n: usize) -> Option<usize> {
        self.gen_range(n as u64).map(|v| v as usize)
    }

    /// In-place Fisher–Yates shuffle.
    pub fn shuffle_in_place<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = match self.gen_range((i as u64) + 1) {
                Some(v) => v as usize,
                None => unreachable!("gen_range(>0) must return Some"),
            };
            slice.swap(i, j);
        }
    }
}

/// Draw a fresh run seed from OS entropy.
pub fn seed_from_os() -> Result<u64, CoreError> {
    let mut bytes = [0u8; 8];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CoreError::Entropy(e.to_string()))?;
    Ok(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_range_zero_none() {
        let mut rng = AllocRng::from_seed_u64(0xDEAD_BEEF_CAFE_BABE);
        assert_eq!(rng.gen_range(0), None);
        assert_eq!(rng.words_consumed(), 0);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = AllocRng::from_seed_u64(123_456_789);
        let mut b = AllocRng::from_seed_u64(123_456_789);
        let seq_a: Vec<u64> = (0..16).map(|_| a.gen_range(10).unwrap()).collect();
        let seq_b: Vec<u64> = (0..16).map(|_| b.gen_range(10).unwrap()).collect();
        assert_eq!(seq_a, seq_b);
        assert!(seq_a.iter().all(|&v| v < 10));
    }

    #[test]
    fn shuffle_is_deterministic_permutation() {
        let mut a = AllocRng::from_seed_u64(42);
        let mut b = AllocRng::from_seed_u64(42);
        let mut xs: Vec<u32> = (0..16).collect();
        let mut ys: Vec<u32> = (0..16).collect();
        a.shuffle_in_place(&mut xs);
        b.shuffle_in_place(&mut ys);
        assert_eq!(xs, ys);

        let mut sorted = xs.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_handles_tiny_slices() {
        let mut rng = AllocRng::from_seed_u64(1);
        let mut empty: [u8; 0] = [];
        rng.shuffle_in_place(&mut empty);
        let mut one = [7];
        rng.shuffle_in_place(&mut one);
        assert_eq!(one, [7]);
        assert_eq!(rng.words_consumed(), 0);
    }

    #[test]
    fn choose_index_in_bounds() {
        let mut rng = AllocRng::from_seed_u64(7);
        assert!(rng.choose_index(0).is_none());
        for _ in 0..32 {
            assert!(rng.choose_index(3).unwrap() < 3);
        }
        assert_eq!(rng.seed(), 7);
    }
}
