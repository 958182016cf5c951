//! The BLS signature scheme: key derivation, signing, verification,
//! and aggregation of keys and signatures.
//!
//! Public keys live in G1 (48-byte compressed), signatures in G2
//! (96-byte compressed). A signature is sk * H(message, domain); the
//! verification equation e(-g1, sig) * e(pk, H(message, domain)) == 1
//! is evaluated with a single shared Miller loop, which is also what
//! makes aggregate verification one pairing product instead of many.

#[cfg(not(feature = "std"))]
use alloc::borrow::Cow;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::borrow::Cow;

use crate::error::{validate, Error, Result};
use crate::g1::{G1Affine, G1Projective};
use crate::g2::{G2Affine, G2Projective};
use crate::hash_to_curve::hash_to_g2;
use crate::pairings::{multi_miller_loop, G2Prepared, Gt};
use crate::scalar::Scalar;

/// Length of a compressed public key.
pub const PUBLIC_KEY_BYTES: usize = 48;

/// Length of a compressed signature.
pub const SIGNATURE_BYTES: usize = 96;

/// 2^256 mod q, the radix step of the wide-scalar reduction.
const SHIFT_256: Scalar = Scalar::from_raw([
    0x0000_0001_ffff_fffe,
    0x5884_b7fa_0003_4802,
    0x998c_4fef_ecbc_4ff5,
    0x1824_b159_acc5_056f,
]);

/// A message accepted at the API boundary: raw bytes, or a hex string
/// decoded big-endian.
#[derive(Copy, Clone, Debug)]
pub enum Message<'a> {
    /// Raw message bytes, used verbatim.
    Bytes(&'a [u8]),
    /// Hex-encoded message, with an optional `0x` prefix.
    Hex(&'a str),
}

impl<'a> Message<'a> {
    /// Normalize to message bytes.
    pub fn normalize(&self) -> Result<Cow<'a, [u8]>> {
        match *self {
            Message::Bytes(b) => Ok(Cow::Borrowed(b)),
            Message::Hex(s) => decode_hex(s, "message").map(Cow::Owned),
        }
    }
}

/// A secret scalar accepted at the API boundary: big-endian bytes of
/// any width, a hex string, or a machine integer. All are reduced
/// mod q.
#[derive(Copy, Clone, Debug)]
pub enum SecretKey<'a> {
    /// Big-endian bytes of arbitrary width.
    Bytes(&'a [u8]),
    /// Hex-encoded big-endian integer, with an optional `0x` prefix.
    Hex(&'a str),
    /// A small integer key, mostly useful in tests.
    U64(u64),
}

impl SecretKey<'_> {
    /// Normalize to a non-zero scalar mod q.
    pub fn normalize(&self) -> Result<Scalar> {
        let scalar = match *self {
            SecretKey::Bytes(b) => reduce_wide_be(b),
            SecretKey::Hex(s) => reduce_wide_be(&decode_hex(s, "secret key")?),
            SecretKey::U64(v) => Scalar::from(v),
        };

        validate::parameter(
            !bool::from(scalar.is_zero()),
            "secret key",
            "zero after reduction mod q",
        )?;
        Ok(scalar)
    }
}

fn decode_hex(s: &str, context: &'static str) -> Result<Vec<u8>> {
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    hex::decode(s).map_err(|e| Error::Encoding {
        context,
        details: match e {
            hex::FromHexError::OddLength => "odd-length hex string",
            _ => "invalid hex digit",
        },
    })
}

/// Reduce a big-endian integer of any width mod q: Horner evaluation
/// in base 2^256, each digit folded through the wide reduction.
fn reduce_wide_be(bytes: &[u8]) -> Scalar {
    let mut acc = Scalar::zero();
    let mut rest = bytes;

    while !rest.is_empty() {
        let take = match rest.len() % 32 {
            0 => 32,
            r => r,
        };
        let (chunk, tail) = rest.split_at(take);
        rest = tail;

        // The chunk is below 2^256; feed it to the 512-bit reduction
        // with the top half zeroed, little-endian.
        let mut wide = [0u8; 64];
        for (i, &b) in chunk.iter().rev().enumerate() {
            wide[i] = b;
        }

        acc = acc * SHIFT_256 + Scalar::from_bytes_wide(&wide);
    }

    acc
}

/// Derive the 48-byte compressed public key sk * g1.
pub fn derive_public_key(sk: SecretKey<'_>) -> Result<[u8; PUBLIC_KEY_BYTES]> {
    let sk = sk.normalize()?;
    Ok((G1Projective::generator() * sk).to_compressed())
}

/// Sign a message under a domain: the 96-byte compressed encoding of
/// sk * H(message, domain).
pub fn sign(message: Message<'_>, sk: SecretKey<'_>, domain: u64) -> Result<[u8; SIGNATURE_BYTES]> {
    let sk = sk.normalize()?;
    let message = message.normalize()?;
    Ok((hash_to_g2(&message, domain)? * sk).to_compressed())
}

/// Verify a signature over one message. Malformed inputs surface as
/// typed errors; a well-formed but wrong signature is a clean `false`.
pub fn verify(
    message: Message<'_>,
    public_key: &[u8],
    signature: &[u8],
    domain: u64,
) -> Result<bool> {
    let pk = G1Affine::decode_compressed(public_key)?;
    let sig = G2Affine::decode_compressed(signature)?;

    // The identity never certifies anything.
    if bool::from(pk.is_identity() | sig.is_identity()) {
        return Ok(false);
    }

    let message = message.normalize()?;
    let hash = G2Affine::from(hash_to_g2(&message, domain)?);

    let g1_neg = -G1Affine::generator();
    let sig_prepared = G2Prepared::from(sig);
    let hash_prepared = G2Prepared::from(hash);

    let acc = multi_miller_loop(&[(&g1_neg, &sig_prepared), (&pk, &hash_prepared)])
        .final_exponentiation();

    Ok(acc == Gt::identity())
}

/// Aggregate public keys by summation in G1. Every input is fully
/// validated.
pub fn aggregate_public_keys(public_keys: &[&[u8]]) -> Result<[u8; PUBLIC_KEY_BYTES]> {
    validate::parameter(
        !public_keys.is_empty(),
        "public keys",
        "aggregation over an empty list",
    )?;

    let mut acc = G1Projective::identity();
    for pk in public_keys {
        acc += G1Projective::from(G1Affine::decode_compressed(pk)?);
    }
    Ok(acc.to_compressed())
}

/// Aggregate signatures by summation in G2. Every input is fully
/// validated.
pub fn aggregate_signatures(signatures: &[&[u8]]) -> Result<[u8; SIGNATURE_BYTES]> {
    validate::parameter(
        !signatures.is_empty(),
        "signatures",
        "aggregation over an empty list",
    )?;

    let mut acc = G2Projective::identity();
    for sig in signatures {
        acc += G2Projective::from(G2Affine::decode_compressed(sig)?);
    }
    Ok(acc.to_compressed())
}

/// Verify one aggregate signature over pairwise-distinct messages,
/// one per public key, with a single shared Miller loop:
/// e(-g1, sig) * prod_i e(pk_i, H(m_i, domain)) == 1.
///
/// Repeated messages are rejected outright; they would open the door
/// to cancellation between colluding signers.
pub fn verify_multiple(
    messages: &[Message<'_>],
    public_keys: &[&[u8]],
    signature: &[u8],
    domain: u64,
) -> Result<bool> {
    if messages.len() != public_keys.len() {
        return Err(Error::CountMismatch {
            messages: messages.len(),
            keys: public_keys.len(),
        });
    }
    validate::parameter(
        !messages.is_empty(),
        "messages",
        "aggregate verification over an empty list",
    )?;

    let normalized: Vec<Cow<'_, [u8]>> = messages
        .iter()
        .map(|m| m.normalize())
        .collect::<Result<_>>()?;
    for (i, m) in normalized.iter().enumerate() {
        if normalized[..i].iter().any(|prev| prev == m) {
            return Err(Error::DuplicateMessage { index: i });
        }
    }

    let sig = G2Affine::decode_compressed(signature)?;
    if bool::from(sig.is_identity()) {
        return Ok(false);
    }

    let mut pks = Vec::with_capacity(public_keys.len());
    for pk in public_keys {
        let pk = G1Affine::decode_compressed(pk)?;
        if bool::from(pk.is_identity()) {
            return Ok(false);
        }
        pks.push(pk);
    }

    let g1_neg = -G1Affine::generator();
    let mut prepared = Vec::with_capacity(normalized.len() + 1);
    prepared.push(G2Prepared::from(sig));
    for m in &normalized {
        prepared.push(G2Prepared::from(G2Affine::from(hash_to_g2(m, domain)?)));
    }

    let mut terms = Vec::with_capacity(prepared.len());
    terms.push((&g1_neg, &prepared[0]));
    for (pk, prep) in pks.iter().zip(prepared[1..].iter()) {
        terms.push((pk, prep));
    }

    Ok(multi_miller_loop(&terms).final_exponentiation() == Gt::identity())
}
