//! Error handling for the Goppa-code math core
//!
//! Every failure in this crate is a programming-contract violation or a
//! mathematically undefined operation, never a recoverable runtime
//! condition; all of them propagate synchronously to the caller.

use alloc::borrow::Cow;

use core::fmt;

/// The error type for the algebraic primitives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: Cow<'static, str>,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// Length mismatch between operands or against a declared dimension
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Index outside the valid range of a vector, matrix or permutation
    IndexOutOfBounds {
        /// Context where the access occurred
        context: &'static str,
        /// Offending index
        index: usize,
        /// Exclusive upper bound of the valid range
        limit: usize,
    },

    /// Mathematically undefined operation on individually valid operands,
    /// e.g. inverting a singular matrix or the zero field element
    Arithmetic {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },

    /// Byte encoding inconsistent with the declared dimensions or field
    Encoding {
        /// Codec that rejected the input
        context: &'static str,
        /// Additional details about the rejection
        details: Cow<'static, str>,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand to create an Encoding error
    pub fn encoding<D: Into<Cow<'static, str>>>(context: &'static str, details: D) -> Self {
        Error::Encoding {
            context,
            details: details.into(),
        }
    }
}

/// Result type for the algebraic primitives
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::IndexOutOfBounds {
                context,
                index,
                limit,
            } => {
                write!(
                    f,
                    "Index {} out of bounds for {} (limit {})",
                    index, context, limit
                )
            }
            Error::Arithmetic { operation, details } => {
                write!(f, "Arithmetic error in {}: {}", operation, details)
            }
            Error::Encoding { context, details } => {
                write!(f, "Malformed encoding for {}: {}", context, details)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// Include the validation submodule
pub mod validate;
