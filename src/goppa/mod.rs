//! Binary Goppa codes
//!
//! A Goppa code is fixed by a field GF(2^m) and an irreducible Goppa
//! polynomial g of degree t over it; the code corrects up to t bit errors
//! in words of length 2^m. This module builds the canonical parity-check
//! matrix, randomizes it into systematic form for public-key compression,
//! and recovers error patterns from syndromes with Patterson's algorithm.

use alloc::vec;

use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::gf2::{BitMatrix, BitVector};
use crate::gf2m::{Gf2mField, Gf2mMatrix};
use crate::permutation::Permutation;
use crate::poly::Gf2mPoly;


/// The systematic form of a parity-check matrix: `s * h * p = (I | m)`.
///
/// `s` and `p` are private-key material; the triple zeroizes on drop.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SystematicForm {
    /// Inverse of the randomly drawn left square sub-block of `h * p`.
    pub s: BitMatrix,
    /// Right sub-block of `s * h * p`.
    pub m: BitMatrix,
    /// The column permutation that produced an invertible left sub-block.
    pub p: Permutation,
    /// Number of permutation draws needed until the left sub-block was
    /// invertible.
    pub attempts: usize,
}

/// Builds the canonical `(t*m) x 2^m` parity-check matrix of the Goppa code
/// defined by `field` and the irreducible polynomial `gp` of degree t.
///
/// Deterministic given `(field, gp)`: row `(i+1)*m - u - 1` carries bit `u`
/// of the field entry `h[i][j] = sum_{k<=i} gp_{t+k-i} * j^k / gp(j)`.
pub fn canonical_check_matrix(field: &Gf2mField, gp: &Gf2mPoly) -> Result<BitMatrix> {
    if gp.field() != *field {
        return Err(Error::param(
            "gp",
            "Goppa polynomial belongs to a different field",
        ));
    }
    let t = match gp.degree() {
        Some(t) if t >= 1 => t,
        _ => {
            return Err(Error::param(
                "gp",
                "Goppa polynomial must have positive degree",
            ))
        }
    };
    let m = field.degree();
    let n = field.size();

    // y[i][j] = j^i / gp(j); gp irreducible means gp(j) is never zero.
    let mut y = vec![vec![0u32; n]; t];
    for j in 0..n {
        let value = gp.evaluate_at(j as u32);
        y[0][j] = field.inverse(value).map_err(|_| {
            Error::param("gp", "Goppa polynomial has a root in the field")
        })?;
    }
    for i in 1..t {
        for j in 0..n {
            y[i][j] = field.mul(y[i - 1][j], j as u32);
        }
    }

    // Combine with the coefficients of gp into the t x n field matrix.
    let mut h = vec![vec![0u32; n]; t];
    for i in 0..t {
        for j in 0..n {
            let mut acc = 0u32;
            for (k, y_k) in y.iter().enumerate().take(i + 1) {
                acc = field.add(acc, field.mul(y_k[j], gp.coefficient(t + k - i)));
            }
            h[i][j] = acc;
        }
    }

    // Expand every field entry into m binary rows.
    let mut result = BitMatrix::zero(t * m, n)?;
    for j in 0..n {
        for (i, h_i) in h.iter().enumerate() {
            let e = h_i[j];
            for u in 0..m {
                if (e >> u) & 1 != 0 {
                    result.set_bit((i + 1) * m - u - 1, j)?;
                }
            }
        }
    }
    Ok(result)
}

/// Randomizes a parity-check matrix into systematic form.
///
/// Retries with fresh permutations until the left sub-block of `h * p` is
/// invertible; for a full-rank `h` that happens quickly, so the loop is
/// unbounded by design. Use [`systematic_form_bounded`] when a failure
/// budget is needed.
pub fn systematic_form<R: CryptoRng + RngCore>(
    h: &BitMatrix,
    rng: &mut R,
) -> Result<SystematicForm> {
    let mut attempts = 0;
    loop {
        attempts += 1;
        if let Some(form) = systematic_form_attempt(h, rng, attempts)? {
            return Ok(form);
        }
    }
}

/// Like [`systematic_form`], but gives up after `max_attempts` permutation
/// draws.
pub fn systematic_form_bounded<R: CryptoRng + RngCore>(
    h: &BitMatrix,
    rng: &mut R,
    max_attempts: usize,
) -> Result<SystematicForm> {
    for attempts in 1..=max_attempts {
        if let Some(form) = systematic_form_attempt(h, rng, attempts)? {
            return Ok(form);
        }
    }
    Err(Error::Arithmetic {
        operation: "systematic form",
        details: "no invertible left sub-block found within the attempt limit",
    })
}

/// One permutation draw; `Ok(None)` means the left sub-block was singular.
fn systematic_form_attempt<R: CryptoRng + RngCore>(
    h: &BitMatrix,
    rng: &mut R,
    attempts: usize,
) -> Result<Option<SystematicForm>> {
    let p = Permutation::random(h.num_columns(), rng)?;
    let hp = h.mul_permutation(&p)?;
    let left = hp.left_submatrix()?;
    let s = match left.inverse() {
        Ok(s) => s,
        Err(Error::Arithmetic { .. }) => return Ok(None),
        Err(e) => return Err(e),
    };
    let shp = s.mul_matrix(&hp)?;
    let m = shp.right_submatrix()?;
    Ok(Some(SystematicForm { s, m, p, attempts }))
}

/// Decodes a syndrome of the Goppa code `(field, gp)` back to the error
/// vector that produced it, using Patterson's algorithm.
///
/// `sqrt_matrix` is the square-root map of the quotient ring modulo `gp`
/// (see [`crate::poly::PolyRing`]). The syndrome must have length
/// `deg(gp) * m`; the returned error vector has length 2^m and weight at
/// most `deg(gp)`.
pub fn syndrome_decode(
    syndrome: &BitVector,
    field: &Gf2mField,
    gp: &Gf2mPoly,
    sqrt_matrix: &Gf2mMatrix,
) -> Result<BitVector> {
    let n = field.size();
    let mut errors = BitVector::zero(n);
    if syndrome.is_zero() {
        return Ok(errors);
    }

    // Reinterpret the syndrome as a polynomial over the field.
    let elements = syndrome.to_ext_field_vector(field)?;
    let s = Gf2mPoly::from_coeffs(*field, &elements)?;

    // tau = sqrt(s^-1 + x) mod gp
    let x = Gf2mPoly::monomial(*field, 1);
    let t = s.mod_inverse(gp)?;
    let tau = t.add(&x)?.mod_square_root_matrix(sqrt_matrix)?;

    // Split tau into a low-degree fraction a/b mod gp, then form the error
    // locator sigma = a^2 + x * b^2, normalized monic.
    let (a, b) = tau.mod_polynomial_to_fracton(gp)?;
    let a_sq = a.multiply(&a)?;
    let xb_sq = b.multiply(&b)?.mult_with_monomial(1);
    let sigma = a_sq.add(&xb_sq)?;
    let head_inv = field.inverse(sigma.head_coefficient()).map_err(|_| {
        Error::Arithmetic {
            operation: "syndrome decoding",
            details: "error locator polynomial vanished",
        }
    })?;
    let locator = sigma.mult_with_element(head_inv)?;

    // Chien search: the roots of the locator are the error positions.
    for i in 0..n {
        if locator.evaluate_at(i as u32) == 0 {
            errors.set_bit(i)?;
        }
    }
    Ok(errors)
}

/// Computes the syndrome of a received word: `h * received`.
///
/// Thin convenience over [`BitMatrix::mul_vector`] named for its role in
/// decoding.
pub fn compute_syndrome(h: &BitMatrix, received: &BitVector) -> Result<BitVector> {
    h.mul_vector(received)
}

/// Checks the systematic-form invariant `s * h * p = (I | m)` bit for bit.
pub fn verify_systematic_form(form: &SystematicForm, h: &BitMatrix) -> Result<bool> {
    let hp = h.mul_permutation(&form.p)?;
    let shp = form.s.mul_matrix(&hp)?;
    let expected = form.m.extend_left_by_identity()?;
    Ok(shp == expected)
}
