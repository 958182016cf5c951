//! Encoding and decoding tests: round trips, flag handling, and the
//! typed rejection paths.

use crate::error::Error;
use crate::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};

#[test]
fn g1_compressed_round_trip() {
    let g = G1Projective::generator();
    for i in 1..=20u64 {
        let original = G1Affine::from(g * Scalar::from(i));
        let restored = G1Affine::from_compressed(&original.to_compressed()).unwrap();
        assert_eq!(original, restored);
    }

    for point in [
        G1Affine::identity(),
        G1Affine::generator(),
        -G1Affine::generator(),
    ] {
        let restored = G1Affine::from_compressed(&point.to_compressed()).unwrap();
        assert_eq!(point, restored);
    }
}

#[test]
fn g1_uncompressed_round_trip() {
    let g = G1Projective::generator();
    for i in 1..=20u64 {
        let original = G1Affine::from(g * Scalar::from(i));
        let restored = G1Affine::from_uncompressed(&original.to_uncompressed()).unwrap();
        assert_eq!(original, restored);
    }

    let id = G1Affine::identity();
    assert_eq!(
        G1Affine::from_uncompressed(&id.to_uncompressed()).unwrap(),
        id
    );
}

#[test]
fn g2_compressed_round_trip() {
    let g = G2Projective::generator();
    for i in 1..=20u64 {
        let original = G2Affine::from(g * Scalar::from(i));
        let restored = G2Affine::from_compressed(&original.to_compressed()).unwrap();
        assert_eq!(original, restored);
    }

    for point in [
        G2Affine::identity(),
        G2Affine::generator(),
        -G2Affine::generator(),
    ] {
        let restored = G2Affine::from_compressed(&point.to_compressed()).unwrap();
        assert_eq!(point, restored);
    }
}

#[test]
fn g2_uncompressed_round_trip() {
    let g = G2Projective::generator();
    for i in 1..=20u64 {
        let original = G2Affine::from(g * Scalar::from(i));
        let restored = G2Affine::from_uncompressed(&original.to_uncompressed()).unwrap();
        assert_eq!(original, restored);
    }

    let id = G2Affine::identity();
    assert_eq!(
        G2Affine::from_uncompressed(&id.to_uncompressed()).unwrap(),
        id
    );
}

#[test]
fn generator_encodings_match_reference() {
    assert_eq!(
        hex::encode(G1Affine::generator().to_compressed()),
        "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac58\
         6c55e83ff97a1aeffb3af00adb22c6bb"
    );
    assert_eq!(
        hex::encode(G2Affine::generator().to_compressed()),
        "93e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049\
         334cf11213945d57e5ac7d055d042b7e024aa2b2f08f0a91260805272dc51051\
         c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8"
    );
    assert_eq!(
        hex::encode(G1Affine::generator().to_uncompressed()),
        "17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac58\
         6c55e83ff97a1aeffb3af00adb22c6bb08b3f481e3aaa0f1a09e30ed741d8ae4\
         fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1"
    );
}

#[test]
fn identity_encodings() {
    // Compressed identity: C and I flags only, zero elsewhere.
    let enc = G1Affine::identity().to_compressed();
    assert_eq!(enc[0], 0b1100_0000);
    assert!(enc[1..].iter().all(|&b| b == 0));

    let enc = G2Affine::identity().to_compressed();
    assert_eq!(enc[0], 0b1100_0000);
    assert!(enc[1..].iter().all(|&b| b == 0));
}

#[test]
fn g1_compressed_flag_abuse_is_rejected() {
    // Compression flag cleared
    let mut bytes = G1Affine::generator().to_compressed();
    bytes[0] &= 0b0111_1111;
    assert!(bool::from(G1Affine::from_compressed(&bytes).is_none()));

    // Infinity flag with non-zero x
    let mut bytes = G1Affine::generator().to_compressed();
    bytes[0] |= 0b0100_0000;
    assert!(bool::from(G1Affine::from_compressed(&bytes).is_none()));

    // Coordinate >= p
    let mut bytes = [0xffu8; 48];
    bytes[0] = 0x9f;
    assert!(bool::from(G1Affine::from_compressed(&bytes).is_none()));
}

#[test]
fn g2_compressed_flag_abuse_is_rejected() {
    let mut bytes = G2Affine::generator().to_compressed();
    bytes[0] &= 0b0111_1111;
    assert!(bool::from(G2Affine::from_compressed(&bytes).is_none()));

    let mut bytes = G2Affine::generator().to_compressed();
    bytes[0] |= 0b0100_0000;
    assert!(bool::from(G2Affine::from_compressed(&bytes).is_none()));
}

#[test]
fn uncompressed_rejects_compression_flag() {
    let mut bytes = G1Affine::generator().to_uncompressed();
    bytes[0] |= 0b1000_0000;
    assert!(bool::from(G1Affine::from_uncompressed(&bytes).is_none()));

    let mut bytes = G2Affine::generator().to_uncompressed();
    bytes[0] |= 0b1000_0000;
    assert!(bool::from(G2Affine::from_uncompressed(&bytes).is_none()));
}

#[test]
fn decode_compressed_reports_length() {
    assert_eq!(
        G1Affine::decode_compressed(&[0u8; 47]),
        Err(Error::Length {
            context: "G1 compressed point",
            expected: 48,
            actual: 47,
        })
    );
    assert_eq!(
        G2Affine::decode_compressed(&[0u8; 95]),
        Err(Error::Length {
            context: "G2 compressed point",
            expected: 96,
            actual: 95,
        })
    );
}

#[test]
fn decode_compressed_reports_encoding_faults() {
    // Compression flag unset
    let bytes = [0u8; 48];
    assert!(matches!(
        G1Affine::decode_compressed(&bytes),
        Err(Error::Encoding { .. })
    ));

    // Infinity flag with stray bits
    let mut bytes = [0u8; 48];
    bytes[0] = 0b1100_0000;
    bytes[47] = 1;
    assert!(matches!(
        G1Affine::decode_compressed(&bytes),
        Err(Error::Encoding { .. })
    ));

    // Coordinate >= p
    let mut bytes = [0xffu8; 96];
    bytes[0] = 0x9f;
    assert!(matches!(
        G2Affine::decode_compressed(&bytes),
        Err(Error::Encoding { .. })
    ));
}

#[test]
fn decode_compressed_reports_curve_membership() {
    // x = 7: x^3 + 4 is a non-residue, so no point has this abscissa.
    let mut bytes = [0u8; 48];
    bytes[0] = 0x80;
    bytes[47] = 7;
    assert_eq!(
        G1Affine::decode_compressed(&bytes),
        Err(Error::NotOnCurve { context: "G1" })
    );

    // x = 2 + 2u is likewise off the twist.
    let mut bytes = [0u8; 96];
    bytes[0] = 0x80;
    bytes[47] = 2;
    bytes[95] = 2;
    assert_eq!(
        G2Affine::decode_compressed(&bytes),
        Err(Error::NotOnCurve { context: "G2" })
    );
}

#[test]
fn decode_compressed_reports_subgroup_membership() {
    // x = 4 is on the curve but generates a point outside the order-q
    // subgroup.
    let mut bytes = [0u8; 48];
    bytes[0] = 0x80;
    bytes[47] = 4;
    assert_eq!(
        G1Affine::decode_compressed(&bytes),
        Err(Error::NotInSubgroup { context: "G1" })
    );
    assert!(bool::from(G1Affine::from_compressed(
        <&[u8; 48]>::try_from(&bytes[..]).unwrap()
    )
    .is_none()));

    // x = 1 + u is on the twist but outside the subgroup.
    let mut bytes = [0u8; 96];
    bytes[0] = 0xa0;
    bytes[47] = 1;
    bytes[95] = 1;
    assert_eq!(
        G2Affine::decode_compressed(&bytes),
        Err(Error::NotInSubgroup { context: "G2" })
    );
    assert!(bool::from(G2Affine::from_compressed(
        <&[u8; 96]>::try_from(&bytes[..]).unwrap()
    )
    .is_none()));
}

#[test]
fn decode_compressed_accepts_the_identity() {
    let mut bytes = [0u8; 48];
    bytes[0] = 0b1100_0000;
    assert!(bool::from(
        G1Affine::decode_compressed(&bytes).unwrap().is_identity()
    ));

    let mut bytes = [0u8; 96];
    bytes[0] = 0b1100_0000;
    assert!(bool::from(
        G2Affine::decode_compressed(&bytes).unwrap().is_identity()
    ));
}

#[test]
fn tampered_encodings_do_not_round_trip() {
    let original = G2Affine::from(G2Projective::generator() * Scalar::from(99u64));
    let bytes = original.to_compressed();

    // Flipping the sort bit selects the other root.
    let mut flipped = bytes;
    flipped[0] ^= 0b0010_0000;
    let other = G2Affine::from_compressed(&flipped).unwrap();
    assert_eq!(other, -original);
}
