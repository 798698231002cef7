//! Fixed-length bit vectors over GF(2)

use alloc::vec;
use alloc::vec::Vec;

use rand::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::error::{validate, Error, Result};
use crate::gf2m::Gf2mField;
use crate::permutation::Permutation;
use crate::sampling::next_int;

/// A fixed-length sequence of bits, packed into 32-bit words.
///
/// The unused high bits of the last word are always zero; every operation
/// that could disturb them re-masks the word, so equality can compare raw
/// words.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct BitVector {
    length: usize,
    words: Vec<u32>,
}

impl BitVector {
    /// Creates the all-zero vector of the given length.
    pub fn zero(length: usize) -> Self {
        Self {
            length,
            words: vec![0u32; length.div_ceil(32)],
        }
    }

    /// Creates a vector with every bit drawn uniformly at random.
    pub fn random<R: CryptoRng + RngCore>(length: usize, rng: &mut R) -> Self {
        let mut v = Self::zero(length);
        for word in v.words.iter_mut() {
            *word = rng.next_u32();
        }
        v.mask_spare_bits();
        v
    }

    /// Creates a vector of the given length with exactly `weight` set bits,
    /// chosen uniformly among all such vectors.
    pub fn random_with_weight<R: CryptoRng + RngCore>(
        length: usize,
        weight: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if weight > length {
            return Err(Error::param(
                "weight",
                "requested weight exceeds the vector length",
            ));
        }
        let mut v = Self::zero(length);
        // Draw `weight` distinct positions from a shrinking pool.
        let mut pool: Vec<usize> = (0..length).collect();
        for i in 0..weight {
            let j = next_int(rng, length - i);
            v.set_word_bit(pool[j]);
            pool[j] = pool[length - i - 1];
        }
        Ok(v)
    }

    /// Decodes a vector of the given length from its byte encoding.
    ///
    /// The encoding is `ceil(length/8)` bytes of little-endian packed bits;
    /// spare bits of the last byte must be zero.
    pub fn from_bytes(length: usize, bytes: &[u8]) -> Result<Self> {
        let expected = length.div_ceil(8);
        if bytes.len() != expected {
            return Err(Error::Length {
                context: "BitVector encoding",
                expected,
                actual: bytes.len(),
            });
        }
        for i in length..expected * 8 {
            if (bytes[i >> 3] >> (i & 7)) & 1 != 0 {
                return Err(Error::encoding(
                    "BitVector",
                    "spare bits of the last byte are not zero",
                ));
            }
        }
        let mut v = Self::zero(length);
        for i in 0..length {
            if (bytes[i >> 3] >> (i & 7)) & 1 != 0 {
                v.set_word_bit(i);
            }
        }
        Ok(v)
    }

    /// Encodes the vector as `ceil(length/8)` bytes of packed bits.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.length.div_ceil(8)];
        for i in 0..self.length {
            if self.word_bit(i) {
                bytes[i >> 3] |= 1 << (i & 7);
            }
        }
        bytes
    }

    /// Returns the number of bits in the vector.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the vector has length zero.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the bit at the given index.
    pub fn bit(&self, index: usize) -> Result<bool> {
        validate::index("BitVector", index, self.length)?;
        Ok(self.word_bit(index))
    }

    /// Sets the bit at the given index.
    pub fn set_bit(&mut self, index: usize) -> Result<()> {
        validate::index("BitVector", index, self.length)?;
        self.set_word_bit(index);
        Ok(())
    }

    /// Clears the bit at the given index.
    pub fn clear_bit(&mut self, index: usize) -> Result<()> {
        validate::index("BitVector", index, self.length)?;
        self.words[index >> 5] &= !(1u32 << (index & 0x1f));
        Ok(())
    }

    /// Returns the Hamming weight of the vector.
    pub fn weight(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if every bit is zero.
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// XOR-adds another vector of the same length, returning a new vector.
    pub fn add(&self, other: &Self) -> Result<Self> {
        let mut result = self.clone();
        result.xor_in_place(other)?;
        Ok(result)
    }

    /// XOR-adds another vector of the same length in place.
    pub fn xor_in_place(&mut self, other: &Self) -> Result<()> {
        validate::length("BitVector addition", other.length, self.length)?;
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a ^= b;
        }
        Ok(())
    }

    /// Applies a permutation: bit `i` of the result is bit `p[i]` of `self`.
    pub fn permute(&self, p: &Permutation) -> Result<Self> {
        validate::length("BitVector permutation", p.len(), self.length)?;
        let mut result = Self::zero(self.length);
        for (i, &src) in p.as_slice().iter().enumerate() {
            if self.word_bit(src) {
                result.set_word_bit(i);
            }
        }
        Ok(result)
    }

    /// Extracts the bits at the given indices into a new vector.
    pub fn extract_vector(&self, indices: &[usize]) -> Result<Self> {
        let mut result = Self::zero(indices.len());
        for (i, &src) in indices.iter().enumerate() {
            validate::index("BitVector extraction", src, self.length)?;
            if self.word_bit(src) {
                result.set_word_bit(i);
            }
        }
        Ok(result)
    }

    /// Extracts the first `k` bits into a new vector.
    pub fn extract_left(&self, k: usize) -> Result<Self> {
        if k > self.length {
            return Err(Error::Length {
                context: "BitVector left extraction",
                expected: self.length,
                actual: k,
            });
        }
        let mut result = Self::zero(k);
        for i in 0..k {
            if self.word_bit(i) {
                result.set_word_bit(i);
            }
        }
        Ok(result)
    }

    /// Extracts the last `k` bits into a new vector.
    pub fn extract_right(&self, k: usize) -> Result<Self> {
        if k > self.length {
            return Err(Error::Length {
                context: "BitVector right extraction",
                expected: self.length,
                actual: k,
            });
        }
        let offset = self.length - k;
        let mut result = Self::zero(k);
        for i in 0..k {
            if self.word_bit(offset + i) {
                result.set_word_bit(i);
            }
        }
        Ok(result)
    }

    /// Reinterprets the vector as a vector of `length / m` elements of
    /// GF(2^m).
    ///
    /// Bit 0 of this vector is the top bit (m-1) of the last element; this
    /// reversed packing is the one produced by the canonical check-matrix
    /// row layout, so syndromes convert directly into syndrome polynomials.
    pub fn to_ext_field_vector(&self, field: &Gf2mField) -> Result<Vec<u32>> {
        let m = field.degree();
        if self.length % m != 0 {
            return Err(Error::Length {
                context: "BitVector field conversion",
                expected: self.length.div_ceil(m) * m,
                actual: self.length,
            });
        }
        let t = self.length / m;
        let mut result = vec![0u32; t];
        let mut count = 0;
        for i in (0..t).rev() {
            for j in (0..m).rev() {
                if self.word_bit(count) {
                    result[i] ^= 1 << j;
                }
                count += 1;
            }
        }
        Ok(result)
    }

    /// Inverse of [`Self::to_ext_field_vector`]: packs a vector of field
    /// elements into a bit vector of length `elements.len() * m`.
    pub fn from_ext_field_vector(field: &Gf2mField, elements: &[u32]) -> Result<Self> {
        for &e in elements {
            if !field.is_element(e) {
                return Err(Error::param(
                    "elements",
                    "entry is not an element of the field",
                ));
            }
        }
        let m = field.degree();
        let mut v = Self::zero(elements.len() * m);
        let mut count = 0;
        for i in (0..elements.len()).rev() {
            for j in (0..m).rev() {
                if (elements[i] >> j) & 1 != 0 {
                    v.set_word_bit(count);
                }
                count += 1;
            }
        }
        Ok(v)
    }

    #[inline(always)]
    pub(crate) fn word_bit(&self, index: usize) -> bool {
        (self.words[index >> 5] >> (index & 0x1f)) & 1 != 0
    }

    #[inline(always)]
    pub(crate) fn set_word_bit(&mut self, index: usize) {
        self.words[index >> 5] |= 1u32 << (index & 0x1f);
    }

    #[inline(always)]
    pub(crate) fn words(&self) -> &[u32] {
        &self.words
    }

    fn mask_spare_bits(&mut self) {
        let spare = self.length & 0x1f;
        if spare != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u32 << spare) - 1;
            }
        }
    }
}

impl ConstantTimeEq for BitVector {
    fn ct_eq(&self, other: &Self) -> Choice {
        if self.length != other.length {
            return Choice::from(0);
        }
        let mut acc = Choice::from(1);
        for (a, b) in self.words.iter().zip(other.words.iter()) {
            acc &= a.ct_eq(b);
        }
        acc
    }
}
