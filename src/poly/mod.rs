//! Polynomials with coefficients in GF(2^m)
//!
//! [`Gf2mPoly`] keeps its coefficient vector normalized: trailing zero
//! coefficients are stripped, the zero polynomial is the empty vector. The
//! arithmetic core operates on bare coefficient slices so the recursive
//! Karatsuba multiplication and the Euclidean loops stay allocation-lean;
//! the public methods add field-consistency checks on top.

use alloc::vec;
use alloc::vec::Vec;

use core::mem;

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::gf2m::{Gf2mField, Gf2mMatrix};
use crate::sampling::next_int;

mod ring;
pub use ring::PolyRing;


/// A polynomial over one [`Gf2mField`], coefficients stored low-to-high.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct Gf2mPoly {
    field: Gf2mField,
    coeffs: Vec<u32>,
}

impl Gf2mPoly {
    /// Creates the zero polynomial.
    pub fn zero(field: Gf2mField) -> Self {
        Self {
            field,
            coeffs: Vec::new(),
        }
    }

    /// Creates the constant polynomial `e`.
    pub fn constant(field: Gf2mField, e: u32) -> Result<Self> {
        if !field.is_element(e) {
            return Err(Error::param(
                "e",
                "coefficient is not an element of the field",
            ));
        }
        Ok(Self::from_normalized(field, vec![e]))
    }

    /// Creates the monomial `x^degree`.
    pub fn monomial(field: Gf2mField, degree: usize) -> Self {
        let mut coeffs = vec![0u32; degree + 1];
        coeffs[degree] = 1;
        Self { field, coeffs }
    }

    /// Creates a polynomial from explicit coefficients, low-to-high;
    /// trailing zeros are stripped to compute the degree.
    pub fn from_coeffs(field: Gf2mField, coeffs: &[u32]) -> Result<Self> {
        for &c in coeffs {
            if !field.is_element(c) {
                return Err(Error::param(
                    "coeffs",
                    "coefficient is not an element of the field",
                ));
            }
        }
        Ok(Self::from_normalized(field, coeffs.to_vec()))
    }

    /// Decodes a polynomial from its byte encoding: coefficients
    /// low-to-high, each occupying `ceil(m/8)` little-endian bytes.
    ///
    /// A non-empty encoding whose leading coefficient is zero is rejected,
    /// so encodings are unique per polynomial.
    pub fn from_bytes(field: Gf2mField, bytes: &[u8]) -> Result<Self> {
        let width = field.degree().div_ceil(8);
        if bytes.len() % width != 0 {
            return Err(Error::encoding(
                "Gf2mPoly",
                "length is not a multiple of the coefficient width",
            ));
        }
        let mut coeffs = Vec::with_capacity(bytes.len() / width);
        for chunk in bytes.chunks(width) {
            let mut c = 0u32;
            for (k, &byte) in chunk.iter().enumerate() {
                c |= u32::from(byte) << (8 * k);
            }
            if !field.is_element(c) {
                return Err(Error::encoding(
                    "Gf2mPoly",
                    "coefficient is not an element of the field",
                ));
            }
            coeffs.push(c);
        }
        if let Some(&head) = coeffs.last() {
            if head == 0 {
                return Err(Error::encoding(
                    "Gf2mPoly",
                    "leading coefficient of a non-empty encoding is zero",
                ));
            }
        }
        Ok(Self { field, coeffs })
    }

    /// Encodes the polynomial; the zero polynomial encodes as the empty
    /// byte string.
    pub fn to_bytes(&self) -> Vec<u8> {
        let width = self.field.degree().div_ceil(8);
        let mut bytes = vec![0u8; self.coeffs.len() * width];
        for (i, &c) in self.coeffs.iter().enumerate() {
            for k in 0..width {
                bytes[i * width + k] = (c >> (8 * k)) as u8;
            }
        }
        bytes
    }

    /// Creates a uniformly random irreducible polynomial of the given
    /// degree by rejection: mutate one random coefficient at a time and
    /// retest.
    pub fn random_irreducible<R: CryptoRng + RngCore>(
        field: Gf2mField,
        degree: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if degree == 0 {
            return Err(Error::param(
                "degree",
                "irreducible polynomial degree must be positive",
            ));
        }
        let mut coeffs = vec![0u32; degree + 1];
        coeffs[degree] = 1;
        coeffs[0] = field.random_nonzero_element(rng);
        for c in coeffs.iter_mut().take(degree).skip(1) {
            *c = field.random_element(rng);
        }
        while !is_irreducible_slice(field, &coeffs)? {
            let n = next_int(rng, degree);
            if n == 0 {
                coeffs[0] = field.random_nonzero_element(rng);
            } else {
                coeffs[n] = field.random_element(rng);
            }
        }
        Ok(Self { field, coeffs })
    }

    /// Returns the coefficient field.
    pub fn field(&self) -> Gf2mField {
        self.field
    }

    /// Returns the degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Returns the coefficient of `x^i` (zero beyond the degree).
    pub fn coefficient(&self, i: usize) -> u32 {
        self.coeffs.get(i).copied().unwrap_or(0)
    }

    /// Returns the normalized coefficient slice, low-to-high.
    pub fn coefficients(&self) -> &[u32] {
        &self.coeffs
    }

    /// Returns the leading coefficient (zero for the zero polynomial).
    pub fn head_coefficient(&self) -> u32 {
        self.coeffs.last().copied().unwrap_or(0)
    }

    /// Returns true if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Evaluates the polynomial at `e` by Horner's rule.
    pub fn evaluate_at(&self, e: u32) -> u32 {
        debug_assert!(self.field.is_element(e));
        let mut result = 0u32;
        for &c in self.coeffs.iter().rev() {
            result = self.field.mul(result, e) ^ c;
        }
        result
    }

    /// Adds another polynomial, returning a new value.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_same_field(other)?;
        let sum = add_slices(&self.coeffs, &other.coeffs);
        Ok(Self::from_normalized(self.field, sum))
    }

    /// Adds another polynomial in place.
    pub fn add_assign(&mut self, other: &Self) -> Result<()> {
        self.check_same_field(other)?;
        if self.coeffs.len() < other.coeffs.len() {
            self.coeffs.resize(other.coeffs.len(), 0);
        }
        for (a, &b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a ^= b;
        }
        trim_in_place(&mut self.coeffs);
        Ok(())
    }

    /// Multiplies by a scalar from the field.
    pub fn mult_with_element(&self, e: u32) -> Result<Self> {
        if !self.field.is_element(e) {
            return Err(Error::param(
                "e",
                "scalar is not an element of the field",
            ));
        }
        Ok(Self::from_normalized(
            self.field,
            mul_element_slice(self.field, &self.coeffs, e),
        ))
    }

    /// Multiplies by the monomial `x^k`.
    pub fn mult_with_monomial(&self, k: usize) -> Self {
        Self {
            field: self.field,
            coeffs: shift_slice(&self.coeffs, k),
        }
    }

    /// Multiplies by another polynomial (recursive Karatsuba split over the
    /// field).
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.check_same_field(other)?;
        let product = multiply_slices(self.field, &self.coeffs, &other.coeffs);
        Ok(Self::from_normalized(self.field, product))
    }

    /// Divides by another polynomial, returning `(quotient, remainder)`.
    pub fn div(&self, divisor: &Self) -> Result<(Self, Self)> {
        self.check_same_field(divisor)?;
        let (q, r) = div_slices(self.field, &self.coeffs, &divisor.coeffs)?;
        Ok((
            Self::from_normalized(self.field, q),
            Self::from_normalized(self.field, r),
        ))
    }

    /// Reduces modulo another polynomial.
    pub fn rem(&self, modulus: &Self) -> Result<Self> {
        self.check_same_field(modulus)?;
        let (_, r) = div_slices(self.field, &self.coeffs, &modulus.coeffs)?;
        Ok(Self::from_normalized(self.field, r))
    }

    /// Computes the greatest common divisor, normalized to a unit leading
    /// coefficient.
    pub fn gcd(&self, other: &Self) -> Result<Self> {
        self.check_same_field(other)?;
        let g = gcd_slices(self.field, &self.coeffs, &other.coeffs)?;
        Ok(Self::from_normalized(self.field, g))
    }

    /// Ben-Or irreducibility test specialized to coefficients in GF(2^m):
    /// with u starting at x, raise u to the 2^m-th power modulo `self` by m
    /// modular squarings and require gcd(u + x, self) to be constant, for
    /// floor(deg/2) rounds.
    ///
    /// The zero polynomial and constants are reported reducible.
    pub fn is_irreducible(&self) -> bool {
        is_irreducible_slice(self.field, &self.coeffs).unwrap_or(false)
    }

    /// Computes the inverse of this polynomial modulo `modulus`.
    pub fn mod_inverse(&self, modulus: &Self) -> Result<Self> {
        self.check_same_field(modulus)?;
        let unit = [1u32];
        let inv = mod_div_slices(self.field, &unit, &self.coeffs, &modulus.coeffs)?;
        Ok(Self::from_normalized(self.field, inv))
    }

    /// Computes `self / divisor` modulo `modulus` by an extended-Euclid
    /// iteration.
    pub fn mod_div(&self, divisor: &Self, modulus: &Self) -> Result<Self> {
        self.check_same_field(divisor)?;
        self.check_same_field(modulus)?;
        let q = mod_div_slices(self.field, &self.coeffs, &divisor.coeffs, &modulus.coeffs)?;
        Ok(Self::from_normalized(self.field, q))
    }

    /// Partial extended-Euclid run against `modulus`: stops once the
    /// running remainder's degree drops to at most `deg(modulus)/2` and
    /// returns `(a1, b1)` with `b1 * self = a1 (mod modulus)`.
    ///
    /// This is the fraction split Patterson decoding uses to break a
    /// syndrome-derived polynomial into a low-degree numerator/denominator
    /// pair.
    pub fn mod_polynomial_to_fracton(&self, modulus: &Self) -> Result<(Self, Self)> {
        self.check_same_field(modulus)?;
        let g = &modulus.coeffs;
        if g.len() < 2 {
            return Err(Error::param(
                "modulus",
                "modulus must have positive degree",
            ));
        }
        let dg = (g.len() - 1) / 2;
        let mut a0 = g.clone();
        let (_, mut a1) = div_slices(self.field, &self.coeffs, g)?;
        let mut b0: Vec<u32> = Vec::new();
        let mut b1: Vec<u32> = vec![1];
        while a1.len() > dg + 1 {
            let (q, r) = div_slices(self.field, &a0, &a1)?;
            a0 = mem::replace(&mut a1, r);
            let product = multiply_slices(self.field, &q, &b1);
            let b2 = add_slices(&b0, &product);
            b0 = mem::replace(&mut b1, b2);
        }
        Ok((
            Self::from_normalized(self.field, a1),
            Self::from_normalized(self.field, b1),
        ))
    }

    /// Squares this polynomial in the quotient ring described by the
    /// precomputed squaring matrix: square each coefficient, then apply the
    /// linear map. O(t^2) field operations.
    pub fn mod_square_matrix(&self, matrix: &Gf2mMatrix) -> Result<Self> {
        let t = self.check_ring_matrix(matrix)?;
        let mut v = vec![0u32; t];
        for (i, &c) in self.coeffs.iter().enumerate() {
            v[i] = self.field.mul(c, c);
        }
        let w = matrix.mul_vector(&v)?;
        Ok(Self::from_normalized(self.field, w))
    }

    /// Takes the square root of this polynomial in the quotient ring
    /// described by the precomputed square-root matrix: apply the linear
    /// map, then field-sqrt each resulting coefficient.
    pub fn mod_square_root_matrix(&self, matrix: &Gf2mMatrix) -> Result<Self> {
        let t = self.check_ring_matrix(matrix)?;
        let mut v = vec![0u32; t];
        v[..self.coeffs.len()].copy_from_slice(&self.coeffs);
        let mut w = matrix.mul_vector(&v)?;
        for c in w.iter_mut() {
            *c = self.field.sqrt(*c);
        }
        Ok(Self::from_normalized(self.field, w))
    }

    pub(crate) fn from_normalized(field: Gf2mField, mut coeffs: Vec<u32>) -> Self {
        trim_in_place(&mut coeffs);
        Self { field, coeffs }
    }

    fn check_same_field(&self, other: &Self) -> Result<()> {
        if self.field != other.field {
            return Err(Error::param(
                "other",
                "polynomial belongs to a different field",
            ));
        }
        Ok(())
    }

    /// Validates a quotient-ring map against this polynomial and returns
    /// the ring dimension t.
    fn check_ring_matrix(&self, matrix: &Gf2mMatrix) -> Result<usize> {
        if matrix.field() != self.field {
            return Err(Error::param(
                "matrix",
                "quotient-ring matrix belongs to a different field",
            ));
        }
        let t = matrix.num_rows();
        if matrix.num_columns() != t {
            return Err(Error::param("matrix", "quotient-ring matrix is not square"));
        }
        if self.coeffs.len() > t {
            return Err(Error::Length {
                context: "quotient-ring operand",
                expected: t,
                actual: self.coeffs.len(),
            });
        }
        Ok(t)
    }
}

// ---------------------------------------------------------------------------
// Coefficient-slice arithmetic. Inputs may carry trailing zeros; outputs are
// trimmed where the algorithms depend on exact degrees.
// ---------------------------------------------------------------------------

fn trim(mut s: &[u32]) -> &[u32] {
    while let Some((&0, rest)) = s.split_last() {
        s = rest;
    }
    s
}

fn trim_in_place(v: &mut Vec<u32>) {
    while v.last() == Some(&0) {
        v.pop();
    }
}

/// XOR addition; the result may carry trailing zeros.
fn add_slices(a: &[u32], b: &[u32]) -> Vec<u32> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut result = long.to_vec();
    for (r, &c) in result.iter_mut().zip(short.iter()) {
        *r ^= c;
    }
    result
}

fn mul_element_slice(f: Gf2mField, a: &[u32], e: u32) -> Vec<u32> {
    if e == 0 {
        return Vec::new();
    }
    trim(a).iter().map(|&c| f.mul(c, e)).collect()
}

/// Multiplication by x^k.
fn shift_slice(a: &[u32], k: usize) -> Vec<u32> {
    let a = trim(a);
    if a.is_empty() {
        return Vec::new();
    }
    let mut result = vec![0u32; a.len() + k];
    result[k..].copy_from_slice(a);
    result
}

/// Karatsuba split-and-combine multiplication; the result is normalized.
fn multiply_slices(f: Gf2mField, a: &[u32], b: &[u32]) -> Vec<u32> {
    let a = trim(a);
    let b = trim(b);
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.len() == 1 {
        return mul_element_slice(f, long, short[0]);
    }
    if long.len() > short.len() {
        // Uneven operands: split the longer one at the shorter length.
        let low = multiply_slices(f, &long[..short.len()], short);
        let high = multiply_slices(f, &long[short.len()..], short);
        return add_slices(&low, &shift_slice(&high, short.len()));
    }
    let n = long.len();
    let half = n.div_ceil(2);
    let (a0, a1) = long.split_at(half);
    let (b0, b1) = short.split_at(half);
    let a_sum = add_slices(a0, a1);
    let b_sum = add_slices(b0, b1);
    let p0 = multiply_slices(f, a0, b0);
    let p1 = multiply_slices(f, &a_sum, &b_sum);
    let p2 = multiply_slices(f, a1, b1);
    // long * short = p0 + (p0 + p1 + p2) x^half + p2 x^(2*half)
    let mid = add_slices(&add_slices(&p1, &p0), &p2);
    let mut result = add_slices(&p0, &shift_slice(&mid, half));
    result = add_slices(&result, &shift_slice(&p2, 2 * half));
    result
}

/// Long division by repeated cancellation of the leading term; returns
/// `(quotient, remainder)`, both normalized.
fn div_slices(f: Gf2mField, a: &[u32], b: &[u32]) -> Result<(Vec<u32>, Vec<u32>)> {
    let b = trim(b);
    if b.is_empty() {
        return Err(Error::Arithmetic {
            operation: "polynomial division",
            details: "division by the zero polynomial",
        });
    }
    let head_inv = f.inverse(b[b.len() - 1])?;
    let mut remainder = trim(a).to_vec();
    let mut quotient = vec![
        0u32;
        remainder.len().saturating_sub(b.len()).saturating_add(1)
    ];
    while remainder.len() >= b.len() {
        let offset = remainder.len() - b.len();
        let factor = f.mul(remainder[remainder.len() - 1], head_inv);
        quotient[offset] = f.add(quotient[offset], factor);
        for (k, &c) in b.iter().enumerate() {
            remainder[offset + k] = f.add(remainder[offset + k], f.mul(factor, c));
        }
        trim_in_place(&mut remainder);
    }
    trim_in_place(&mut quotient);
    Ok((quotient, remainder))
}

/// Euclidean gcd, normalized to a unit leading coefficient.
fn gcd_slices(f: Gf2mField, a: &[u32], b: &[u32]) -> Result<Vec<u32>> {
    let mut a = trim(a).to_vec();
    let mut b = trim(b).to_vec();
    if a.is_empty() && b.is_empty() {
        return Err(Error::Arithmetic {
            operation: "polynomial gcd",
            details: "gcd of two zero polynomials is undefined",
        });
    }
    while !b.is_empty() {
        let (_, r) = div_slices(f, &a, &b)?;
        a = mem::replace(&mut b, r);
    }
    let head = a[a.len() - 1];
    let head_inv = f.inverse(head)?;
    Ok(mul_element_slice(f, &a, head_inv))
}

fn is_irreducible_slice(f: Gf2mField, a: &[u32]) -> Result<bool> {
    let a = trim(a);
    // Zero and constants are reducible by convention; a zero constant term
    // means x divides the polynomial.
    if a.len() < 2 || a[0] == 0 {
        return Ok(false);
    }
    let rounds = (a.len() - 1) / 2;
    let x = [0u32, 1];
    let mut u = vec![0u32, 1];
    for _ in 0..rounds {
        for _ in 0..f.degree() {
            let square = multiply_slices(f, &u, &u);
            let (_, r) = div_slices(f, &square, a)?;
            u = r;
        }
        let g = gcd_slices(f, &add_slices(&u, &x), a)?;
        if g.len() != 1 {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Extended-Euclid iteration computing `a / b (mod g)`.
///
/// Maintains `s_i * b = a * r_i (mod g)`; when the remainder chain ends the
/// surviving `r` is the (constant, for invertible b) gcd and `s / r` is the
/// quotient.
fn mod_div_slices(f: Gf2mField, a: &[u32], b: &[u32], g: &[u32]) -> Result<Vec<u32>> {
    let g = trim(g);
    if g.len() < 2 {
        return Err(Error::param("modulus", "modulus must have positive degree"));
    }
    let mut r0 = g.to_vec();
    let (_, mut r1) = div_slices(f, b, g)?;
    let mut s0: Vec<u32> = Vec::new();
    let (_, mut s1) = div_slices(f, a, g)?;
    while !r1.is_empty() {
        let (q, r) = div_slices(f, &r0, &r1)?;
        r0 = mem::replace(&mut r1, r);
        let product = multiply_slices(f, &q, &s1);
        let (_, reduced) = div_slices(f, &product, g)?;
        let s2 = add_slices(&s0, &reduced);
        s0 = mem::replace(&mut s1, s2);
        trim_in_place(&mut s1);
    }
    if r0.len() != 1 {
        return Err(Error::Arithmetic {
            operation: "polynomial modular division",
            details: "divisor is not invertible modulo the modulus",
        });
    }
    let head_inv = f.inverse(r0[0])?;
    Ok(mul_element_slice(f, &s0, head_inv))
}
