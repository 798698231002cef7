//! Algebraic primitives for code-based (McEliece-style) cryptography
//!
//! This crate implements the mathematical core of a binary Goppa-code
//! cryptosystem from first principles:
//!
//! - bit-packed vectors and matrices over GF(2), including Gauss-Jordan
//!   inversion and the sub-block/compact-form transforms used for public-key
//!   compression,
//! - the small binary extension fields GF(2^m) for 1 <= m < 31, with
//!   Fermat inversion and Frobenius square roots,
//! - polynomial arithmetic over GF(2^m) (Karatsuba multiplication, extended
//!   Euclid, Ben-Or irreducibility testing) and the precomputed squaring /
//!   square-root linear maps for the quotient ring GF(2^m)[x]/g(x),
//! - uniformly sampled permutations of {0..n-1},
//! - binary Goppa codes: canonical parity-check matrix construction,
//!   randomized systematic form, and Patterson syndrome decoding.
//!
//! All randomized operations take an explicit `CryptoRng + RngCore` source;
//! there is no process-wide RNG. Types that can hold private-key material
//! implement [`zeroize::Zeroize`].
//!
//! This crate performs no I/O and no logging; every failure is reported
//! synchronously through [`Result`].

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Bit-packed linear algebra over GF(2)
pub mod gf2;
pub use gf2::{BitMatrix, BitVector};

// Small binary extension fields GF(2^m) and matrices over them
pub mod gf2m;
pub use gf2m::{Gf2mField, Gf2mMatrix};

// Polynomials over GF(2^m) and the quotient-ring linear maps
pub mod poly;
pub use poly::{Gf2mPoly, PolyRing};

// Permutations of {0..n-1}
pub mod permutation;
pub use permutation::Permutation;

// Binary Goppa codes: check matrix, systematic form, syndrome decoding
pub mod goppa;
pub use goppa::{
    canonical_check_matrix, compute_syndrome, syndrome_decode, systematic_form,
    systematic_form_bounded, verify_systematic_form, SystematicForm,
};

// Shared rejection sampling helpers
pub(crate) mod sampling;
