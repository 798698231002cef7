//! Bit-packed linear algebra over GF(2)
//!
//! Vectors are packed into `u32` words, matrices are arrays of packed rows.
//! Addition and subtraction both reduce to XOR; matrix inversion is
//! Gauss-Jordan elimination on a private scratch copy, so operands are never
//! observed in a partially eliminated state.

mod matrix;
mod vector;

pub use matrix::BitMatrix;
pub use vector::BitVector;

#[cfg(test)]
mod tests;
