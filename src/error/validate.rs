//! Validation utilities for the algebraic primitives

use super::{Error, Result};

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::param(name, reason));
    }
    Ok(())
}

/// Validate a length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::Length {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate an index against an exclusive upper bound
#[inline(always)]
pub fn index(context: &'static str, index: usize, limit: usize) -> Result<()> {
    if index >= limit {
        return Err(Error::IndexOutOfBounds {
            context,
            index,
            limit,
        });
    }
    Ok(())
}
