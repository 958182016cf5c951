//! Extendable-output functions.
//!
//! The hash-to-curve expansion needs a variable-length digest; this
//! module provides the SHAKE-256 sponge it is built on.

mod shake;

pub use shake::Shake256;

/// An extendable-output function: absorb arbitrary input, then squeeze
/// arbitrarily many output bytes.
pub trait ExtendableOutput {
    /// Create a fresh instance.
    fn new() -> Self;

    /// Absorb more input. Must not be called once squeezing has begun.
    fn update(&mut self, data: &[u8]);

    /// Fill `output` with the next squeezed bytes.
    fn squeeze(&mut self, output: &mut [u8]);
}
