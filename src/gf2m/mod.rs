//! The small binary extension fields GF(2^m), 1 <= m < 31
//!
//! A field is described by its degree and a fixed irreducible reduction
//! polynomial packed into a `u32` mask; elements are `u32` values below
//! 2^m. Inversion is Fermat exponentiation, the square root is the inverse
//! Frobenius map (m-1 repeated squarings).

use alloc::vec::Vec;

use byteorder::{ByteOrder, LittleEndian};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{Error, Result};

pub(crate) mod binary;
mod matrix;

pub use matrix::Gf2mMatrix;

/// Retry cap for non-zero rejection sampling.
const NONZERO_RETRY_CAP: u32 = 1 << 20;

/// A binary extension field GF(2^m) with a fixed irreducible reduction
/// polynomial.
///
/// Elements are plain `u32` values in `[0, 2^m)`; they are bound to a field
/// by convention, with membership validated at construction boundaries
/// (matrix and polynomial constructors, byte decoders).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroize)]
pub struct Gf2mField {
    degree: usize,
    polynomial: u32,
}

impl Gf2mField {
    /// Creates the field of the given degree with a fixed irreducible
    /// reduction polynomial found by search.
    pub fn new(degree: usize) -> Result<Self> {
        check_degree(degree)?;
        Ok(Self {
            degree,
            polynomial: binary::irreducible_polynomial(degree)?,
        })
    }

    /// Creates the field from an explicit reduction polynomial, verifying
    /// its degree and irreducibility.
    pub fn with_polynomial(degree: usize, polynomial: u32) -> Result<Self> {
        check_degree(degree)?;
        if polynomial == 0 || binary::degree(u64::from(polynomial)) != degree {
            return Err(Error::param(
                "polynomial",
                "reduction polynomial degree does not match the field degree",
            ));
        }
        if !binary::is_irreducible(polynomial) {
            return Err(Error::param(
                "polynomial",
                "reduction polynomial is not irreducible",
            ));
        }
        Ok(Self { degree, polynomial })
    }

    /// Decodes a field from its 4-byte encoding of the reduction
    /// polynomial; the degree is re-derived.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 4 {
            return Err(Error::Length {
                context: "Gf2mField encoding",
                expected: 4,
                actual: bytes.len(),
            });
        }
        let polynomial = LittleEndian::read_u32(bytes);
        if polynomial == 0 {
            return Err(Error::encoding("Gf2mField", "zero reduction polynomial"));
        }
        let degree = binary::degree(u64::from(polynomial));
        Self::with_polynomial(degree, polynomial)
            .map_err(|_| Error::encoding("Gf2mField", "reduction polynomial is not irreducible"))
    }

    /// Encodes the field as the 4-byte little-endian reduction polynomial.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = alloc::vec![0u8; 4];
        LittleEndian::write_u32(&mut bytes, self.polynomial);
        bytes
    }

    /// Returns the extension degree m.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the packed reduction polynomial.
    pub fn polynomial(&self) -> u32 {
        self.polynomial
    }

    /// Returns the field size 2^m.
    pub fn size(&self) -> usize {
        1 << self.degree
    }

    /// Returns true if `e` is an element of this field.
    pub fn is_element(&self, e: u32) -> bool {
        (e as usize) < self.size()
    }

    /// Field addition: XOR.
    #[inline(always)]
    pub fn add(&self, a: u32, b: u32) -> u32 {
        a ^ b
    }

    /// Field multiplication: carry-less product reduced modulo the field
    /// polynomial.
    pub fn mul(&self, a: u32, b: u32) -> u32 {
        debug_assert!(self.is_element(a) && self.is_element(b));
        let mut product = binary::mul(a, b);
        let m = self.degree;
        let poly = u64::from(self.polynomial);
        for bit in (m..2 * m).rev() {
            if (product >> bit) & 1 != 0 {
                product ^= poly << (bit - m);
            }
        }
        product as u32
    }

    /// Exponentiation via square-and-multiply; a negative exponent inverts
    /// the base first.
    pub fn exp(&self, a: u32, k: i32) -> Result<u32> {
        let (base, mut k) = if k < 0 {
            (self.inverse(a)?, -(i64::from(k)) as u64)
        } else {
            (a, k as u64)
        };
        let mut result = 1u32;
        let mut square = base;
        while k != 0 {
            if k & 1 != 0 {
                result = self.mul(result, square);
            }
            square = self.mul(square, square);
            k >>= 1;
        }
        Ok(result)
    }

    /// Multiplicative inverse, computed as `a^(2^m - 2)`.
    pub fn inverse(&self, a: u32) -> Result<u32> {
        if a == 0 {
            return Err(Error::Arithmetic {
                operation: "Gf2mField inversion",
                details: "zero has no multiplicative inverse",
            });
        }
        let exponent = (self.size() - 2) as u64;
        let mut result = 1u32;
        let mut square = a;
        let mut k = exponent;
        while k != 0 {
            if k & 1 != 0 {
                result = self.mul(result, square);
            }
            square = self.mul(square, square);
            k >>= 1;
        }
        Ok(result)
    }

    /// The unique square root of `a`, i.e. the inverse of the Frobenius
    /// map, obtained by m-1 repeated squarings.
    pub fn sqrt(&self, a: u32) -> u32 {
        let mut result = a;
        for _ in 1..self.degree {
            result = self.mul(result, result);
        }
        result
    }

    /// Draws a uniformly random field element.
    pub fn random_element<R: CryptoRng + RngCore>(&self, rng: &mut R) -> u32 {
        rng.next_u32() & ((self.size() - 1) as u32)
    }

    /// Draws a uniformly random non-zero field element by rejection
    /// sampling.
    ///
    /// The retry count is capped at 2^20 draws; on exhaustion the method
    /// degrades to returning 1 instead of failing. Callers that need
    /// guaranteed randomness quality must not rely on this fallback.
    pub fn random_nonzero_element<R: CryptoRng + RngCore>(&self, rng: &mut R) -> u32 {
        for _ in 0..NONZERO_RETRY_CAP {
            let candidate = self.random_element(rng);
            if candidate != 0 {
                return candidate;
            }
        }
        1
    }
}

fn check_degree(degree: usize) -> Result<()> {
    if degree == 0 || degree >= 31 {
        return Err(Error::param("degree", "field degree must be in [1, 30]"));
    }
    Ok(())
}
