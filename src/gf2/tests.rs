use rand::rngs::StdRng;
use rand::SeedableRng;
use subtle::ConstantTimeEq;

use super::{BitMatrix, BitVector};
use crate::error::Error;
use crate::gf2m::Gf2mField;
use crate::permutation::Permutation;

#[test]
fn vector_zero_and_bit_access() {
    let mut v = BitVector::zero(70);
    assert_eq!(v.len(), 70);
    assert!(v.is_zero());
    assert_eq!(v.weight(), 0);

    v.set_bit(0).unwrap();
    v.set_bit(31).unwrap();
    v.set_bit(32).unwrap();
    v.set_bit(69).unwrap();
    assert_eq!(v.weight(), 4);
    assert!(v.bit(31).unwrap());
    assert!(!v.bit(30).unwrap());

    v.clear_bit(31).unwrap();
    assert!(!v.bit(31).unwrap());
    assert_eq!(v.weight(), 3);

    assert!(matches!(
        v.set_bit(70),
        Err(Error::IndexOutOfBounds { .. })
    ));
    assert!(matches!(v.bit(70), Err(Error::IndexOutOfBounds { .. })));
}

#[test]
fn vector_random_masks_spare_bits() {
    let mut rng = StdRng::seed_from_u64(42);
    for length in [1, 7, 32, 33, 63, 64, 100] {
        let v = BitVector::random(length, &mut rng);
        assert_eq!(v.len(), length);
        // Equality compares raw words, so an unmasked copy must differ.
        let bytes = v.to_bytes();
        let decoded = BitVector::from_bytes(length, &bytes).unwrap();
        assert_eq!(v, decoded);
    }
}

#[test]
fn vector_random_with_weight() {
    let mut rng = StdRng::seed_from_u64(42);
    for weight in [0, 1, 5, 50, 100] {
        let v = BitVector::random_with_weight(100, weight, &mut rng).unwrap();
        assert_eq!(v.len(), 100);
        assert_eq!(v.weight(), weight);
    }
    assert!(BitVector::random_with_weight(10, 11, &mut rng).is_err());
}

#[test]
fn vector_encoding_rejects_bad_input() {
    assert!(matches!(
        BitVector::from_bytes(16, &[0u8; 3]),
        Err(Error::Length { .. })
    ));
    // Spare bit set in the last byte of a 13-bit vector.
    assert!(matches!(
        BitVector::from_bytes(13, &[0x00, 0x20]),
        Err(Error::Encoding { .. })
    ));
    // The same byte is fine once the bit falls inside the length.
    assert!(BitVector::from_bytes(14, &[0x00, 0x20]).is_ok());
}

#[test]
fn vector_addition_is_involutive() {
    let mut rng = StdRng::seed_from_u64(42);
    let a = BitVector::random(90, &mut rng);
    let b = BitVector::random(90, &mut rng);
    let sum = a.add(&b).unwrap();
    assert_eq!(sum.add(&b).unwrap(), a);
    assert!(a.add(&a).unwrap().is_zero());

    let short = BitVector::zero(89);
    assert!(a.add(&short).is_err());
}

#[test]
fn vector_permute_moves_bits() {
    let mut v = BitVector::zero(5);
    v.set_bit(0).unwrap();
    v.set_bit(3).unwrap();
    // p = [2, 0, 3, 1, 4]: out[i] = v[p[i]]
    let p = Permutation::from_vector(vec![2, 0, 3, 1, 4]).unwrap();
    let out = v.permute(&p).unwrap();
    assert!(!out.bit(0).unwrap());
    assert!(out.bit(1).unwrap());
    assert!(out.bit(2).unwrap());
    assert!(!out.bit(3).unwrap());

    // Permuting by q then its inverse is the identity.
    let mut rng = StdRng::seed_from_u64(42);
    let w = BitVector::random(40, &mut rng);
    let q = Permutation::random(40, &mut rng).unwrap();
    let back = w.permute(&q).unwrap().permute(&q.compute_inverse()).unwrap();
    assert_eq!(back, w);
}

#[test]
fn vector_extraction() {
    let mut rng = StdRng::seed_from_u64(42);
    let v = BitVector::random(50, &mut rng);
    let left = v.extract_left(20).unwrap();
    let right = v.extract_right(30).unwrap();
    for i in 0..20 {
        assert_eq!(left.bit(i).unwrap(), v.bit(i).unwrap());
    }
    for i in 0..30 {
        assert_eq!(right.bit(i).unwrap(), v.bit(20 + i).unwrap());
    }
    let picked = v.extract_vector(&[49, 0, 7]).unwrap();
    assert_eq!(picked.bit(0).unwrap(), v.bit(49).unwrap());
    assert_eq!(picked.bit(1).unwrap(), v.bit(0).unwrap());
    assert_eq!(picked.bit(2).unwrap(), v.bit(7).unwrap());

    assert!(v.extract_left(51).is_err());
    assert!(v.extract_vector(&[50]).is_err());
}

#[test]
fn vector_to_ext_field_vector_reversed_packing() {
    let field = Gf2mField::new(4).unwrap();
    // Two elements of GF(2^4): bit 0 of the vector is bit 3 of element 1.
    let mut v = BitVector::zero(8);
    v.set_bit(0).unwrap();
    v.set_bit(7).unwrap();
    let elements = v.to_ext_field_vector(&field).unwrap();
    assert_eq!(elements, vec![0b0001, 0b1000]);

    let odd = BitVector::zero(7);
    assert!(odd.to_ext_field_vector(&field).is_err());

    // The packing round-trips in both directions.
    let back = BitVector::from_ext_field_vector(&field, &elements).unwrap();
    assert_eq!(back, v);
    let mut rng = StdRng::seed_from_u64(42);
    let w = BitVector::random(24, &mut rng);
    let roundtrip =
        BitVector::from_ext_field_vector(&field, &w.to_ext_field_vector(&field).unwrap()).unwrap();
    assert_eq!(roundtrip, w);

    assert!(BitVector::from_ext_field_vector(&field, &[16]).is_err());
}

#[test]
fn vector_constant_time_eq() {
    let mut rng = StdRng::seed_from_u64(42);
    let a = BitVector::random(64, &mut rng);
    let b = a.clone();
    assert_eq!(a.ct_eq(&b).unwrap_u8(), 1);

    let mut flip = BitVector::zero(64);
    flip.set_bit(17).unwrap();
    let c = a.add(&flip).unwrap();
    assert_eq!(a.ct_eq(&c).unwrap_u8(), 0);

    let short = BitVector::zero(63);
    assert_eq!(a.ct_eq(&short).unwrap_u8(), 0);
}

#[test]
fn matrix_identity_and_access() {
    let id = BitMatrix::identity(5).unwrap();
    for i in 0..5 {
        for j in 0..5 {
            assert_eq!(id.bit(i, j).unwrap(), i == j);
        }
    }
    assert!(BitMatrix::zero(0, 3).is_err());
    assert!(BitMatrix::zero(3, 0).is_err());
}

#[test]
fn matrix_from_rows_validates_lengths() {
    let rows = vec![BitVector::zero(4), BitVector::zero(5)];
    assert!(BitMatrix::from_rows(rows).is_err());
    assert!(BitMatrix::from_rows(Vec::new()).is_err());
}

#[test]
fn matrix_mul_identity_is_neutral() {
    let mut rng = StdRng::seed_from_u64(42);
    let a = BitMatrix::random_regular(12, &mut rng).unwrap();
    let id = BitMatrix::identity(12).unwrap();
    assert_eq!(a.mul_matrix(&id).unwrap(), a);
    assert_eq!(id.mul_matrix(&a).unwrap(), a);
}

#[test]
fn matrix_random_regular_inverts() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in [1, 2, 17, 33, 64] {
        let a = BitMatrix::random_regular(n, &mut rng).unwrap();
        let inv = a.inverse().unwrap();
        assert_eq!(a.mul_matrix(&inv).unwrap(), BitMatrix::identity(n).unwrap());
        assert_eq!(inv.mul_matrix(&a).unwrap(), BitMatrix::identity(n).unwrap());
    }
}

#[test]
fn matrix_singular_inversion_fails() {
    // Two identical rows.
    let mut m = BitMatrix::zero(2, 2).unwrap();
    m.set_bit(0, 0).unwrap();
    m.set_bit(0, 1).unwrap();
    m.set_bit(1, 0).unwrap();
    m.set_bit(1, 1).unwrap();
    assert!(matches!(m.inverse(), Err(Error::Arithmetic { .. })));

    let rect = BitMatrix::zero(2, 3).unwrap();
    assert!(matches!(rect.inverse(), Err(Error::Arithmetic { .. })));
}

#[test]
fn matrix_vector_products() {
    let mut rng = StdRng::seed_from_u64(42);
    let a = BitMatrix::random_regular(20, &mut rng).unwrap();
    let v = BitVector::random(20, &mut rng);

    // Compare the word-parallel product against a per-bit computation.
    let product = a.mul_vector(&v).unwrap();
    for i in 0..20 {
        let mut parity = false;
        for j in 0..20 {
            parity ^= a.bit(i, j).unwrap() && v.bit(j).unwrap();
        }
        assert_eq!(product.bit(i).unwrap(), parity);
    }

    // v * A equals A^T * v.
    let left = a.left_mul_vector(&v).unwrap();
    let transposed = a.transpose().unwrap().mul_vector(&v).unwrap();
    assert_eq!(left, transposed);
}

#[test]
fn matrix_permutation_product() {
    let mut rng = StdRng::seed_from_u64(42);
    let a = BitMatrix::random_regular(10, &mut rng).unwrap();
    let p = Permutation::random(10, &mut rng).unwrap();
    let ap = a.mul_permutation(&p).unwrap();
    for (j, &src) in p.as_slice().iter().enumerate() {
        for i in 0..10 {
            assert_eq!(ap.bit(i, j).unwrap(), a.bit(i, src).unwrap());
        }
    }
}

#[test]
fn matrix_sub_blocks_and_extension() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut wide = BitMatrix::zero(6, 16).unwrap();
    for i in 0..6 {
        for j in 0..16 {
            if BitVector::random(1, &mut rng).bit(0).unwrap() {
                wide.set_bit(i, j).unwrap();
            }
        }
    }
    let left = wide.left_submatrix().unwrap();
    let right = wide.right_submatrix().unwrap();
    assert_eq!(left.num_columns(), 6);
    assert_eq!(right.num_columns(), 10);
    for i in 0..6 {
        for j in 0..6 {
            assert_eq!(left.bit(i, j).unwrap(), wide.bit(i, j).unwrap());
        }
        for j in 0..10 {
            assert_eq!(right.bit(i, j).unwrap(), wide.bit(i, 6 + j).unwrap());
        }
    }

    // (I | right) round-trips through the extension.
    let extended = right.extend_left_by_identity().unwrap();
    assert_eq!(extended.left_submatrix().unwrap(), BitMatrix::identity(6).unwrap());
    assert_eq!(extended.right_submatrix().unwrap(), right);

    let extended_r = left.extend_right_by_identity().unwrap();
    assert_eq!(extended_r.num_columns(), 12);
    assert_eq!(extended_r.right_submatrix().unwrap(), BitMatrix::identity(6).unwrap());

    let square = BitMatrix::identity(4).unwrap();
    assert!(square.right_submatrix().is_err());
}

#[test]
fn matrix_transpose_involution() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut a = BitMatrix::zero(5, 9).unwrap();
    for i in 0..5 {
        for j in 0..9 {
            if BitVector::random(1, &mut rng).bit(0).unwrap() {
                a.set_bit(i, j).unwrap();
            }
        }
    }
    let t = a.transpose().unwrap();
    assert_eq!(t.num_rows(), 9);
    assert_eq!(t.num_columns(), 5);
    assert_eq!(t.transpose().unwrap(), a);
}

#[test]
fn matrix_encoding_roundtrip() {
    let mut rng = StdRng::seed_from_u64(42);
    let a = BitMatrix::random_regular(13, &mut rng).unwrap();
    let bytes = a.to_bytes();
    let decoded = BitMatrix::from_bytes(&bytes).unwrap();
    assert_eq!(a, decoded);

    assert!(BitMatrix::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    assert!(BitMatrix::from_bytes(&[0u8; 4]).is_err());
    assert!(BitMatrix::from_bytes(&[0u8; 8]).is_err());
}
