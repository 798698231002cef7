//! Rectangular bit matrices over GF(2)

use alloc::vec;
use alloc::vec::Vec;

use byteorder::{ByteOrder, LittleEndian};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use super::vector::BitVector;
use crate::error::{validate, Error, Result};
use crate::permutation::Permutation;

/// A rectangular matrix over GF(2); every row is a packed [`BitVector`] of
/// identical length.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct BitMatrix {
    num_rows: usize,
    num_columns: usize,
    rows: Vec<BitVector>,
}

impl BitMatrix {
    /// Creates the all-zero matrix of the given dimensions.
    pub fn zero(num_rows: usize, num_columns: usize) -> Result<Self> {
        validate::parameter(num_rows > 0, "num_rows", "matrix must have at least one row")?;
        validate::parameter(
            num_columns > 0,
            "num_columns",
            "matrix must have at least one column",
        )?;
        Ok(Self {
            num_rows,
            num_columns,
            rows: vec![BitVector::zero(num_columns); num_rows],
        })
    }

    /// Creates the n-by-n identity matrix.
    pub fn identity(n: usize) -> Result<Self> {
        let mut result = Self::zero(n, n)?;
        for i in 0..n {
            result.rows[i].set_word_bit(i);
        }
        Ok(result)
    }

    /// Creates a matrix from explicit rows; all rows must have the same
    /// non-zero length.
    pub fn from_rows(rows: Vec<BitVector>) -> Result<Self> {
        let num_columns = match rows.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => {
                return Err(Error::param(
                    "rows",
                    "matrix must have at least one row and one column",
                ))
            }
        };
        for row in &rows {
            validate::length("BitMatrix row", row.len(), num_columns)?;
        }
        Ok(Self {
            num_rows: rows.len(),
            num_columns,
            rows,
        })
    }

    /// Creates a uniformly random invertible n-by-n matrix.
    ///
    /// Built as L * U with unit diagonals and random off-diagonal parts,
    /// then row-permuted at random; the triangular factors guarantee
    /// regularity.
    pub fn random_regular<R: CryptoRng + RngCore>(n: usize, rng: &mut R) -> Result<Self> {
        validate::parameter(n > 0, "n", "matrix dimension must be positive")?;
        let mut lower = Self::identity(n)?;
        let mut upper = Self::identity(n)?;
        for i in 0..n {
            let random_row = BitVector::random(n, rng);
            for j in 0..i {
                if random_row.word_bit(j) {
                    lower.rows[i].set_word_bit(j);
                }
            }
            for j in (i + 1)..n {
                if random_row.word_bit(j) {
                    upper.rows[i].set_word_bit(j);
                }
            }
        }
        let product = lower.mul_matrix(&upper)?;
        let p = Permutation::random(n, rng)?;
        let rows = p.as_slice().iter().map(|&i| product.rows[i].clone()).collect();
        Self::from_rows(rows)
    }

    /// Decodes a matrix from its byte encoding
    /// `[rows:4 LE][cols:4 LE][row-major packed rows]`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 8 {
            return Err(Error::encoding("BitMatrix", "header shorter than 8 bytes"));
        }
        let num_rows = LittleEndian::read_u32(&bytes[0..4]) as usize;
        let num_columns = LittleEndian::read_u32(&bytes[4..8]) as usize;
        if num_rows == 0 || num_columns == 0 {
            return Err(Error::encoding("BitMatrix", "zero dimension in header"));
        }
        let row_bytes = num_columns.div_ceil(8);
        let expected = 8 + num_rows * row_bytes;
        if bytes.len() != expected {
            return Err(Error::Length {
                context: "BitMatrix encoding",
                expected,
                actual: bytes.len(),
            });
        }
        let mut rows = Vec::with_capacity(num_rows);
        for i in 0..num_rows {
            let start = 8 + i * row_bytes;
            rows.push(BitVector::from_bytes(
                num_columns,
                &bytes[start..start + row_bytes],
            )?);
        }
        Self::from_rows(rows)
    }

    /// Encodes the matrix as `[rows:4 LE][cols:4 LE][row-major packed rows]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let row_bytes = self.num_columns.div_ceil(8);
        let mut bytes = vec![0u8; 8 + self.num_rows * row_bytes];
        LittleEndian::write_u32(&mut bytes[0..4], self.num_rows as u32);
        LittleEndian::write_u32(&mut bytes[4..8], self.num_columns as u32);
        for (i, row) in self.rows.iter().enumerate() {
            let start = 8 + i * row_bytes;
            bytes[start..start + row_bytes].copy_from_slice(&row.to_bytes());
        }
        bytes
    }

    /// Returns the number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Returns the row at the given index.
    pub fn row(&self, index: usize) -> Result<&BitVector> {
        validate::index("BitMatrix row", index, self.num_rows)?;
        Ok(&self.rows[index])
    }

    /// Returns the bit at the given position.
    pub fn bit(&self, row: usize, column: usize) -> Result<bool> {
        validate::index("BitMatrix row", row, self.num_rows)?;
        self.rows[row].bit(column)
    }

    /// Sets the bit at the given position.
    pub fn set_bit(&mut self, row: usize, column: usize) -> Result<()> {
        validate::index("BitMatrix row", row, self.num_rows)?;
        self.rows[row].set_bit(column)
    }

    /// Computes the product `self * other`.
    pub fn mul_matrix(&self, other: &Self) -> Result<Self> {
        validate::length(
            "BitMatrix multiplication",
            other.num_rows,
            self.num_columns,
        )?;
        let mut rows = Vec::with_capacity(self.num_rows);
        for row in &self.rows {
            let mut acc = BitVector::zero(other.num_columns);
            for k in 0..self.num_columns {
                if row.word_bit(k) {
                    acc.xor_in_place(&other.rows[k])?;
                }
            }
            rows.push(acc);
        }
        Self::from_rows(rows)
    }

    /// Computes the product `self * P`: column `j` of the result is column
    /// `p[j]` of `self`.
    pub fn mul_permutation(&self, p: &Permutation) -> Result<Self> {
        validate::length("BitMatrix permutation", p.len(), self.num_columns)?;
        let mut result = Self::zero(self.num_rows, self.num_columns)?;
        for (j, &src) in p.as_slice().iter().enumerate() {
            for i in 0..self.num_rows {
                if self.rows[i].word_bit(src) {
                    result.rows[i].set_word_bit(j);
                }
            }
        }
        Ok(result)
    }

    /// Computes the matrix-vector product `self * v`.
    pub fn mul_vector(&self, v: &BitVector) -> Result<BitVector> {
        validate::length(
            "BitMatrix vector multiplication",
            v.len(),
            self.num_columns,
        )?;
        let mut result = BitVector::zero(self.num_rows);
        for (i, row) in self.rows.iter().enumerate() {
            let mut parity = 0u32;
            for (a, b) in row.words().iter().zip(v.words().iter()) {
                parity ^= a & b;
            }
            if parity.count_ones() & 1 != 0 {
                result.set_word_bit(i);
            }
        }
        Ok(result)
    }

    /// Computes the vector-matrix product `v * self`.
    pub fn left_mul_vector(&self, v: &BitVector) -> Result<BitVector> {
        validate::length(
            "BitMatrix left vector multiplication",
            v.len(),
            self.num_rows,
        )?;
        let mut result = BitVector::zero(self.num_columns);
        for (i, row) in self.rows.iter().enumerate() {
            if v.word_bit(i) {
                result.xor_in_place(row)?;
            }
        }
        Ok(result)
    }

    /// Extracts the left square sub-block of width `num_rows`.
    pub fn left_submatrix(&self) -> Result<Self> {
        if self.num_columns < self.num_rows {
            return Err(Error::Length {
                context: "BitMatrix left sub-block",
                expected: self.num_rows,
                actual: self.num_columns,
            });
        }
        let rows = self
            .rows
            .iter()
            .map(|row| row.extract_left(self.num_rows))
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    /// Extracts the right sub-block of width `num_columns - num_rows`.
    pub fn right_submatrix(&self) -> Result<Self> {
        if self.num_columns <= self.num_rows {
            return Err(Error::Length {
                context: "BitMatrix right sub-block",
                expected: self.num_rows + 1,
                actual: self.num_columns,
            });
        }
        let rows = self
            .rows
            .iter()
            .map(|row| row.extract_right(self.num_columns - self.num_rows))
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    /// Extends a compact systematic form to `(I | self)`.
    pub fn extend_left_by_identity(&self) -> Result<Self> {
        let mut result = Self::zero(self.num_rows, self.num_rows + self.num_columns)?;
        for i in 0..self.num_rows {
            result.rows[i].set_word_bit(i);
            for j in 0..self.num_columns {
                if self.rows[i].word_bit(j) {
                    result.rows[i].set_word_bit(self.num_rows + j);
                }
            }
        }
        Ok(result)
    }

    /// Extends a compact systematic form to `(self | I)`.
    pub fn extend_right_by_identity(&self) -> Result<Self> {
        let mut result = Self::zero(self.num_rows, self.num_columns + self.num_rows)?;
        for i in 0..self.num_rows {
            result.rows[i].set_word_bit(self.num_columns + i);
            for j in 0..self.num_columns {
                if self.rows[i].word_bit(j) {
                    result.rows[i].set_word_bit(j);
                }
            }
        }
        Ok(result)
    }

    /// Computes the transpose.
    pub fn transpose(&self) -> Result<Self> {
        let mut result = Self::zero(self.num_columns, self.num_rows)?;
        for i in 0..self.num_rows {
            for j in 0..self.num_columns {
                if self.rows[i].word_bit(j) {
                    result.rows[j].set_word_bit(i);
                }
            }
        }
        Ok(result)
    }

    /// Computes the inverse via Gauss-Jordan elimination over GF(2).
    ///
    /// Works on a scratch copy; the operand is never mutated. Fails with an
    /// arithmetic error if the matrix is singular or not square.
    pub fn inverse(&self) -> Result<Self> {
        if self.num_rows != self.num_columns {
            return Err(Error::Arithmetic {
                operation: "BitMatrix inversion",
                details: "matrix is not square",
            });
        }
        let n = self.num_rows;
        let mut work = self.rows.clone();
        let mut inv = Self::identity(n)?;
        for j in 0..n {
            // Pivot search: scan downward for a row with a set bit in
            // column j.
            let pivot = (j..n).find(|&k| work[k].word_bit(j));
            let pivot = match pivot {
                Some(p) => p,
                None => {
                    return Err(Error::Arithmetic {
                        operation: "BitMatrix inversion",
                        details: "matrix is not invertible",
                    })
                }
            };
            work.swap(j, pivot);
            inv.rows.swap(j, pivot);
            for i in 0..n {
                if i != j && work[i].word_bit(j) {
                    let (pivot_row, other_row) = if i < j {
                        let (head, tail) = work.split_at_mut(j);
                        (&tail[0], &mut head[i])
                    } else {
                        let (head, tail) = work.split_at_mut(i);
                        (&head[j], &mut tail[0])
                    };
                    other_row.xor_in_place(pivot_row)?;
                    let pivot_inv_row = inv.rows[j].clone();
                    inv.rows[i].xor_in_place(&pivot_inv_row)?;
                }
            }
        }
        Ok(inv)
    }
}
