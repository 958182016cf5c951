//! BLS signatures over the BLS12-381 pairing-friendly curve.
//!
//! The crate carries the full arithmetic stack the scheme rests on: the
//! GF(p) -> GF(p^2) -> GF(p^6) -> GF(p^12) extension tower, the G1 and
//! G2 groups with the standard compressed encodings, hash-to-curve for
//! G2, and the optimal ate pairing. The signature layer on top is a
//! thin composition: public keys are 48-byte G1 points, signatures are
//! 96-byte G2 points, and any number of signers can be checked with a
//! single pairing product.
//!
//! **Warning:** Unaudited implementation. Use at your own risk. The
//! arithmetic keeps the structure of constant-time code but the crate
//! makes no side-channel guarantees; several exponentiations and all of
//! hash-to-curve are variable-time.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod util;

pub mod error;

mod field;
mod g1;
mod g2;
mod hash_to_curve;
mod pairings;
mod scalar;
mod xof;

#[cfg(feature = "alloc")]
pub mod sig;

pub use error::{Error, Result};
pub use g1::{G1Affine, G1Projective};
pub use g2::{G2Affine, G2Projective};
pub use hash_to_curve::hash_to_g2;
pub use pairings::{pairing, Gt, MillerLoopResult};
pub use scalar::Scalar;

#[cfg(feature = "alloc")]
pub use pairings::{multi_miller_loop, G2Prepared};

#[cfg(feature = "alloc")]
pub use sig::{
    aggregate_public_keys, aggregate_signatures, derive_public_key, sign, verify, verify_multiple,
    Message, SecretKey, PUBLIC_KEY_BYTES, SIGNATURE_BYTES,
};

/// |z|, the absolute value of the BLS parameter the curve family is
/// instantiated at; z itself is negative.
pub(crate) const BLS_X: u64 = 0xd201_0000_0001_0000;
pub(crate) const BLS_X_IS_NEGATIVE: bool = true;

/// The base field modulus p, as a big-endian hex string.
pub const FP_MODULUS_HEX: &str = "0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab";

/// The order q of the G1/G2 subgroups, as a big-endian hex string.
pub const SCALAR_MODULUS_HEX: &str =
    "0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001";

#[cfg(test)]
mod tests;
