//! GF(2)[x] on packed `u32` masks
//!
//! Helper ring for field construction: bit i of a mask is the coefficient
//! of x^i. Only polynomials of degree below 31 appear here, so carry-less
//! products fit in a `u64`.

use crate::error::{Error, Result};

/// Degree of a non-zero packed polynomial.
pub(crate) fn degree(p: u64) -> usize {
    debug_assert!(p != 0);
    63 - p.leading_zeros() as usize
}

/// Carry-less product of two packed polynomials.
pub(crate) fn mul(a: u32, b: u32) -> u64 {
    let mut result = 0u64;
    let mut a = u64::from(a);
    let mut b = b;
    while b != 0 {
        if b & 1 != 0 {
            result ^= a;
        }
        a <<= 1;
        b >>= 1;
    }
    result
}

/// Remainder of `a` modulo the non-zero polynomial `p`.
pub(crate) fn rem(mut a: u64, p: u32) -> u32 {
    let dp = degree(u64::from(p));
    while a != 0 && degree(a) >= dp {
        a ^= u64::from(p) << (degree(a) - dp);
    }
    a as u32
}

/// Greatest common divisor of two packed polynomials, not both zero.
pub(crate) fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = if a == 0 {
            0
        } else {
            // Long division of a by b, keeping only the remainder.
            let db = degree(b);
            let mut r = a;
            while r != 0 && degree(r) >= db {
                r ^= b << (degree(r) - db);
            }
            r
        };
        a = b;
        b = r;
    }
    a
}

/// Ben-Or style irreducibility test over GF(2): p is irreducible iff
/// gcd(x^(2^i) + x, p) = 1 for i = 1..floor(deg/2).
pub(crate) fn is_irreducible(p: u32) -> bool {
    if p == 0 {
        return false;
    }
    let d = degree(u64::from(p)) / 2;
    let mut u = 2u32; // the polynomial x
    for _ in 0..d {
        u = rem(mul(u, u), p);
        if gcd(u64::from(u ^ 2), u64::from(p)) != 1 {
            return false;
        }
    }
    true
}

/// Finds the smallest irreducible polynomial of the given degree.
pub(crate) fn irreducible_polynomial(deg: usize) -> Result<u32> {
    if deg == 0 || deg >= 31 {
        return Err(Error::param(
            "degree",
            "irreducible polynomial degree must be in [1, 30]",
        ));
    }
    // Only odd masks can be irreducible (even => divisible by x).
    let base = 1u64 << deg;
    let mut candidate = base + 1;
    while candidate < base << 1 {
        if is_irreducible(candidate as u32) {
            return Ok(candidate as u32);
        }
        candidate += 2;
    }
    Err(Error::param(
        "degree",
        "no irreducible polynomial found for the requested degree",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_irreducibles() {
        // x^4 + x + 1 and the AES polynomial x^8 + x^4 + x^3 + x + 1
        assert!(is_irreducible(0b10011));
        assert!(is_irreducible(0x11B));
        // x^4 + x^3 + x^2 + x + 1 is irreducible, x^4 + x^2 + 1 is not
        assert!(is_irreducible(0b11111));
        assert!(!is_irreducible(0b10101));
    }

    #[test]
    fn test_reducible_rejected() {
        // (x + 1)^2 = x^2 + 1
        assert!(!is_irreducible(0b101));
        // x^2 * anything
        assert!(!is_irreducible(0b100));
    }

    #[test]
    fn test_search_returns_irreducible() {
        for deg in 1..=16 {
            let p = irreducible_polynomial(deg).unwrap();
            assert_eq!(degree(u64::from(p)), deg);
            assert!(is_irreducible(p));
        }
    }

    #[test]
    fn test_search_rejects_bad_degree() {
        assert!(irreducible_polynomial(0).is_err());
        assert!(irreducible_polynomial(31).is_err());
    }

    #[test]
    fn test_mul_rem() {
        // (x^2 + 1)(x + 1) = x^3 + x^2 + x + 1
        assert_eq!(mul(0b101, 0b11), 0b1111);
        // x^4 mod (x^4 + x + 1) = x + 1
        assert_eq!(rem(0b10000, 0b10011), 0b11);
    }
}
