//! Precomputed linear maps for the quotient ring GF(2^m)[x]/g(x)
//!
//! Squaring is GF(2)-linear, so reducing x^(2i) modulo g once per column
//! yields a t-by-t matrix that squares any ring element in O(t^2) field
//! operations; its matrix inverse square-roots them. Patterson decoding
//! leans on the square-root map for every decoded syndrome.

use alloc::vec;

use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::gf2m::{Gf2mField, Gf2mMatrix};
use crate::poly::Gf2mPoly;

/// The pair of precomputed squaring and square-root maps for one reduction
/// polynomial.
#[derive(Clone, Debug, Zeroize)]
pub struct PolyRing {
    field: Gf2mField,
    modulus: Gf2mPoly,
    square_matrix: Gf2mMatrix,
    square_root_matrix: Gf2mMatrix,
}

impl PolyRing {
    /// Precomputes both maps for the ring GF(2^m)[x]/g(x).
    ///
    /// Column i of the squaring matrix holds `x^(2i) mod g`. For an
    /// irreducible g the squaring map is an automorphism and the matrix is
    /// always invertible; an inversion failure here therefore indicates a
    /// malformed reduction polynomial and is reported as such.
    pub fn new(modulus: Gf2mPoly) -> Result<Self> {
        let field = modulus.field();
        let t = match modulus.degree() {
            Some(t) if t >= 1 => t,
            _ => {
                return Err(Error::param(
                    "modulus",
                    "reduction polynomial must have positive degree",
                ))
            }
        };
        let mut entries = vec![0u32; t * t];
        for i in 0..t {
            let reduced = Gf2mPoly::monomial(field, 2 * i).rem(&modulus)?;
            for (row, &c) in reduced.coefficients().iter().enumerate() {
                entries[row * t + i] = c;
            }
        }
        let square_matrix = Gf2mMatrix::new(field, t, t, entries)?;
        let square_root_matrix = square_matrix.inverse().map_err(|_| Error::Arithmetic {
            operation: "PolyRing construction",
            details: "squaring matrix is singular; reduction polynomial is malformed",
        })?;
        Ok(Self {
            field,
            modulus,
            square_matrix,
            square_root_matrix,
        })
    }

    /// Returns the coefficient field.
    pub fn field(&self) -> Gf2mField {
        self.field
    }

    /// Returns the reduction polynomial g.
    pub fn modulus(&self) -> &Gf2mPoly {
        &self.modulus
    }

    /// Returns the t-by-t squaring matrix.
    pub fn square_matrix(&self) -> &Gf2mMatrix {
        &self.square_matrix
    }

    /// Returns the t-by-t square-root matrix.
    pub fn square_root_matrix(&self) -> &Gf2mMatrix {
        &self.square_root_matrix
    }

    /// Squares a ring element through the precomputed map.
    pub fn square(&self, p: &Gf2mPoly) -> Result<Gf2mPoly> {
        p.mod_square_matrix(&self.square_matrix)
    }

    /// Square-roots a ring element through the precomputed map.
    pub fn square_root(&self, p: &Gf2mPoly) -> Result<Gf2mPoly> {
        p.mod_square_root_matrix(&self.square_root_matrix)
    }
}
