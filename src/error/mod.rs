//! Error handling for the curve arithmetic and signature layers.

use core::fmt;

/// The error type for all fallible operations in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Byte input is not the required fixed width
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Flag bits inconsistent, non-canonical coordinate, or malformed hex
    Encoding {
        /// Context where the encoding error occurred
        context: &'static str,
        /// What was wrong with the encoding
        details: &'static str,
    },

    /// Decoded point does not satisfy its curve equation
    NotOnCurve {
        /// Group the point was decoded for
        context: &'static str,
    },

    /// Decoded point is not in the order-q subgroup
    NotInSubgroup {
        /// Group the point was decoded for
        context: &'static str,
    },

    /// Inverse of zero or division by a non-invertible element
    Arithmetic {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },

    /// Aggregate verification given unequal list lengths
    CountMismatch {
        /// Number of messages supplied
        messages: usize,
        /// Number of public keys supplied
        keys: usize,
    },

    /// Aggregate verification given a repeated message
    DuplicateMessage {
        /// Index of the second occurrence
        index: usize,
    },

    /// Parameter outside its allowed range (zero secret key, empty list)
    Parameter {
        /// Name of the invalid parameter
        name: &'static str,
        /// Reason why the parameter is invalid
        reason: &'static str,
    },
}

/// Result type for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::Encoding { context, details } => {
                write!(f, "invalid encoding for {}: {}", context, details)
            }
            Error::NotOnCurve { context } => {
                write!(f, "{} point is not on the curve", context)
            }
            Error::NotInSubgroup { context } => {
                write!(f, "{} point is not in the order-q subgroup", context)
            }
            Error::Arithmetic { operation, details } => {
                write!(f, "arithmetic error in {}: {}", operation, details)
            }
            Error::CountMismatch { messages, keys } => {
                write!(
                    f,
                    "mismatched list lengths: {} messages, {} public keys",
                    messages, keys
                )
            }
            Error::DuplicateMessage { index } => {
                write!(f, "duplicate message at index {}", index)
            }
            Error::Parameter { name, reason } => {
                write!(f, "invalid parameter '{}': {}", name, reason)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub mod validate;

#[cfg(test)]
mod tests;
