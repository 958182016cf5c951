//! Validation helpers shared by the decoding and signature layers.

use super::{Error, Result};

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::Parameter { name, reason });
    }
    Ok(())
}

/// Validate an exact byte length
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

/// Validate an encoding condition
#[inline(always)]
pub fn encoding(condition: bool, context: &'static str, details: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::Encoding { context, details });
    }
    Ok(())
}
