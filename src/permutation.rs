//! Permutations of {0..n-1}
//!
//! The random constructor is a backward Fisher-Yates draw over a shrinking
//! candidate pool, with each slot picked by division-free rejection
//! sampling, so every permutation is equally likely.

use alloc::vec;
use alloc::vec::Vec;

use byteorder::{ByteOrder, LittleEndian};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{validate, Error, Result};
use crate::sampling::next_int;

/// A bijection on {0..n-1}, validated at construction.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct Permutation {
    perm: Vec<usize>,
}

impl Permutation {
    /// Creates the identity permutation of the given size.
    pub fn identity(n: usize) -> Result<Self> {
        validate::parameter(n > 0, "n", "permutation size must be positive")?;
        Ok(Self {
            perm: (0..n).collect(),
        })
    }

    /// Creates a permutation from an explicit index vector; every value in
    /// `0..n` must appear exactly once.
    pub fn from_vector(perm: Vec<usize>) -> Result<Self> {
        validate::parameter(!perm.is_empty(), "perm", "permutation size must be positive")?;
        let n = perm.len();
        let mut seen = vec![false; n];
        for &value in &perm {
            if value >= n || seen[value] {
                return Err(Error::param("perm", "index vector is not a bijection"));
            }
            seen[value] = true;
        }
        Ok(Self { perm })
    }

    /// Draws a permutation uniformly at random.
    pub fn random<R: CryptoRng + RngCore>(n: usize, rng: &mut R) -> Result<Self> {
        validate::parameter(n > 0, "n", "permutation size must be positive")?;
        let mut pool: Vec<usize> = (0..n).collect();
        let mut perm = vec![0usize; n];
        let mut k = n;
        for slot in perm.iter_mut() {
            let j = next_int(rng, k);
            k -= 1;
            *slot = pool[j];
            pool[j] = pool[k];
        }
        Ok(Self { perm })
    }

    /// Decodes a permutation from `[n:4 LE][entries]`, each entry occupying
    /// the minimal byte width for the largest index.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(Error::encoding("Permutation", "header shorter than 4 bytes"));
        }
        let n = LittleEndian::read_u32(&bytes[0..4]) as usize;
        if n == 0 {
            return Err(Error::encoding("Permutation", "zero size in header"));
        }
        let width = entry_width(n);
        let expected = 4 + n * width;
        if bytes.len() != expected {
            return Err(Error::Length {
                context: "Permutation encoding",
                expected,
                actual: bytes.len(),
            });
        }
        let mut perm = Vec::with_capacity(n);
        for i in 0..n {
            let mut value = 0usize;
            for k in 0..width {
                value |= usize::from(bytes[4 + i * width + k]) << (8 * k);
            }
            perm.push(value);
        }
        Self::from_vector(perm)
            .map_err(|_| Error::encoding("Permutation", "entries are not a bijection"))
    }

    /// Encodes the permutation as `[n:4 LE][entries]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let n = self.perm.len();
        let width = entry_width(n);
        let mut bytes = vec![0u8; 4 + n * width];
        LittleEndian::write_u32(&mut bytes[0..4], n as u32);
        for (i, &value) in self.perm.iter().enumerate() {
            for k in 0..width {
                bytes[4 + i * width + k] = (value >> (8 * k)) as u8;
            }
        }
        bytes
    }

    /// Returns the permutation size n.
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    /// A permutation is never empty; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// Returns the underlying index vector.
    pub fn as_slice(&self) -> &[usize] {
        &self.perm
    }

    /// Computes the inverse permutation.
    pub fn compute_inverse(&self) -> Self {
        let mut inverse = vec![0usize; self.perm.len()];
        for (i, &value) in self.perm.iter().enumerate() {
            inverse[value] = i;
        }
        Self { perm: inverse }
    }

    /// Computes the composition `self * other`, i.e. the permutation
    /// mapping `i` to `self[other[i]]`.
    pub fn right_multiply(&self, other: &Self) -> Result<Self> {
        validate::length("Permutation composition", other.len(), self.len())?;
        let perm = other.perm.iter().map(|&i| self.perm[i]).collect();
        Ok(Self { perm })
    }
}

/// Minimal number of bytes needed to store the largest index `n - 1`.
fn entry_width(n: usize) -> usize {
    let mut largest = n - 1;
    let mut width = 0;
    while largest > 0 {
        largest >>= 8;
        width += 1;
    }
    width
}
