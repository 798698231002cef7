//! Division-free rejection sampling of bounded integers
//!
//! Shared by permutation drawing, weight-t vector sampling and random
//! polynomial generation. The threshold trick mirrors uniform coefficient
//! sampling: draw a full word, reject anything at or above the largest
//! multiple of `n` below 2^32.

use rand::{CryptoRng, RngCore};

/// Returns a uniformly random integer in `[0, n)`.
///
/// `n` must be non-zero and fit in a `u32`; both hold for every caller in
/// this crate (dimensions are at most a few thousand).
pub(crate) fn next_int<R: CryptoRng + RngCore>(rng: &mut R, n: usize) -> usize {
    debug_assert!(n > 0 && n <= u32::MAX as usize);
    let n = n as u32;
    if n.is_power_of_two() {
        return (rng.next_u32() & (n - 1)) as usize;
    }
    let threshold = ((1u64 << 32) / u64::from(n)) * u64::from(n);
    loop {
        let sample = u64::from(rng.next_u32());
        if sample < threshold {
            return (sample % u64::from(n)) as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_next_int_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [1usize, 2, 3, 7, 16, 1000, 4097] {
            for _ in 0..200 {
                assert!(next_int(&mut rng, n) < n);
            }
        }
    }

    #[test]
    fn test_next_int_hits_every_value() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 5;
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[next_int(&mut rng, n)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
