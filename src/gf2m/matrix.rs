//! Matrices with entries in GF(2^m)

use alloc::vec;
use alloc::vec::Vec;

use byteorder::{ByteOrder, LittleEndian};
use zeroize::Zeroize;

use super::Gf2mField;
use crate::error::{validate, Error, Result};

/// A rectangular matrix over one [`Gf2mField`], entries stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct Gf2mMatrix {
    field: Gf2mField,
    num_rows: usize,
    num_columns: usize,
    entries: Vec<u32>,
}

impl Gf2mMatrix {
    /// Creates a matrix from explicit row-major entries bound to a field.
    pub fn new(
        field: Gf2mField,
        num_rows: usize,
        num_columns: usize,
        entries: Vec<u32>,
    ) -> Result<Self> {
        validate::parameter(
            num_rows > 0 && num_columns > 0,
            "dimensions",
            "matrix must have at least one row and one column",
        )?;
        validate::length("Gf2mMatrix entries", entries.len(), num_rows * num_columns)?;
        for &e in &entries {
            if !field.is_element(e) {
                return Err(Error::param(
                    "entries",
                    "entry is not an element of the bound field",
                ));
            }
        }
        Ok(Self {
            field,
            num_rows,
            num_columns,
            entries,
        })
    }

    /// Creates the n-by-n identity matrix over the field.
    pub fn identity(field: Gf2mField, n: usize) -> Result<Self> {
        let mut entries = vec![0u32; n * n];
        for i in 0..n {
            entries[i * n + i] = 1;
        }
        Self::new(field, n, n, entries)
    }

    /// Decodes a matrix from `[rows:4 LE][entries row-major]` with each
    /// entry occupying `ceil(m/8)` bytes.
    pub fn from_bytes(field: Gf2mField, bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(Error::encoding("Gf2mMatrix", "header shorter than 4 bytes"));
        }
        let num_rows = LittleEndian::read_u32(&bytes[0..4]) as usize;
        if num_rows == 0 {
            return Err(Error::encoding("Gf2mMatrix", "zero row count in header"));
        }
        let width = field.degree().div_ceil(8);
        let body = &bytes[4..];
        if body.is_empty() || body.len() % (num_rows * width) != 0 {
            return Err(Error::encoding(
                "Gf2mMatrix",
                "body length inconsistent with the row count and field degree",
            ));
        }
        let num_columns = body.len() / (num_rows * width);
        let mut entries = Vec::with_capacity(num_rows * num_columns);
        for chunk in body.chunks(width) {
            let mut e = 0u32;
            for (k, &byte) in chunk.iter().enumerate() {
                e |= u32::from(byte) << (8 * k);
            }
            if !field.is_element(e) {
                return Err(Error::encoding(
                    "Gf2mMatrix",
                    "entry is not an element of the bound field",
                ));
            }
            entries.push(e);
        }
        Self::new(field, num_rows, num_columns, entries)
    }

    /// Encodes the matrix as `[rows:4 LE][entries row-major]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let width = self.field.degree().div_ceil(8);
        let mut bytes = vec![0u8; 4 + self.entries.len() * width];
        LittleEndian::write_u32(&mut bytes[0..4], self.num_rows as u32);
        for (i, &e) in self.entries.iter().enumerate() {
            for k in 0..width {
                bytes[4 + i * width + k] = (e >> (8 * k)) as u8;
            }
        }
        bytes
    }

    /// Returns the bound field.
    pub fn field(&self) -> Gf2mField {
        self.field
    }

    /// Returns the number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Returns the entry at the given position.
    pub fn entry(&self, row: usize, column: usize) -> Result<u32> {
        validate::index("Gf2mMatrix row", row, self.num_rows)?;
        validate::index("Gf2mMatrix column", column, self.num_columns)?;
        Ok(self.at(row, column))
    }

    /// Computes the matrix-vector product over the field.
    pub fn mul_vector(&self, v: &[u32]) -> Result<Vec<u32>> {
        validate::length("Gf2mMatrix vector multiplication", v.len(), self.num_columns)?;
        let f = &self.field;
        let mut result = vec![0u32; self.num_rows];
        for i in 0..self.num_rows {
            let mut acc = 0u32;
            for (j, &x) in v.iter().enumerate() {
                if x != 0 {
                    acc = f.add(acc, f.mul(self.at(i, j), x));
                }
            }
            result[i] = acc;
        }
        Ok(result)
    }

    /// Computes the inverse via Gauss-Jordan elimination with field
    /// arithmetic on a scratch copy.
    ///
    /// Pivot rows are normalized with the field inverse, other rows
    /// eliminated with multiply-and-add. Fails with an arithmetic error if
    /// the matrix is singular or not square.
    pub fn inverse(&self) -> Result<Self> {
        if self.num_rows != self.num_columns {
            return Err(Error::Arithmetic {
                operation: "Gf2mMatrix inversion",
                details: "matrix is not square",
            });
        }
        let n = self.num_rows;
        let f = self.field;
        let mut work = self.entries.clone();
        let mut inv = Self::identity(f, n)?;
        for j in 0..n {
            let pivot = (j..n).find(|&k| work[k * n + j] != 0);
            let pivot = match pivot {
                Some(p) => p,
                None => {
                    return Err(Error::Arithmetic {
                        operation: "Gf2mMatrix inversion",
                        details: "matrix is not invertible",
                    })
                }
            };
            if pivot != j {
                swap_rows(&mut work, n, j, pivot);
                swap_rows(&mut inv.entries, n, j, pivot);
            }
            let scale = f.inverse(work[j * n + j])?;
            scale_row(&mut work, f, n, j, scale);
            scale_row(&mut inv.entries, f, n, j, scale);
            for i in 0..n {
                let factor = work[i * n + j];
                if i != j && factor != 0 {
                    eliminate_row(&mut work, f, n, i, j, factor);
                    eliminate_row(&mut inv.entries, f, n, i, j, factor);
                }
            }
        }
        Ok(inv)
    }

    #[inline(always)]
    fn at(&self, row: usize, column: usize) -> u32 {
        self.entries[row * self.num_columns + column]
    }
}

fn swap_rows(entries: &mut [u32], n: usize, a: usize, b: usize) {
    for k in 0..n {
        entries.swap(a * n + k, b * n + k);
    }
}

fn scale_row(entries: &mut [u32], f: Gf2mField, n: usize, row: usize, scale: u32) {
    for k in 0..n {
        entries[row * n + k] = f.mul(entries[row * n + k], scale);
    }
}

/// row(i) += factor * row(j)
fn eliminate_row(entries: &mut [u32], f: Gf2mField, n: usize, i: usize, j: usize, factor: u32) {
    for k in 0..n {
        let term = f.mul(factor, entries[j * n + k]);
        entries[i * n + k] = f.add(entries[i * n + k], term);
    }
}
