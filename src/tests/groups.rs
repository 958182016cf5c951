//! Tests for the G1 and G2 group law.

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(0x626c_7338_31)
}

#[test]
fn g1_generator_is_valid() {
    let g = G1Affine::generator();
    assert!(bool::from(g.is_on_curve()));
    assert!(bool::from(g.is_torsion_free()));
    assert!(!bool::from(g.is_identity()));
}

#[test]
fn g2_generator_is_valid() {
    let g = G2Affine::generator();
    assert!(bool::from(g.is_on_curve()));
    assert!(bool::from(g.is_torsion_free()));
    assert!(!bool::from(g.is_identity()));
}

#[test]
fn g1_identity_rules() {
    let id = G1Projective::identity();
    let g = G1Projective::generator();

    assert!(bool::from(id.is_identity()));
    assert!(bool::from(id.is_on_curve()));
    assert_eq!(id + g, g);
    assert_eq!(g + id, g);
    assert_eq!(g + G1Affine::identity(), g);
    assert_eq!(id.double(), id);
}

#[test]
fn g2_identity_rules() {
    let id = G2Projective::identity();
    let g = G2Projective::generator();

    assert!(bool::from(id.is_identity()));
    assert!(bool::from(id.is_on_curve()));
    assert_eq!(id + g, g);
    assert_eq!(g + id, g);
    assert_eq!(g + G2Affine::identity(), g);
    assert_eq!(id.double(), id);
}

#[test]
fn g1_addition_edge_cases() {
    let g = G1Projective::generator();

    // add(P, P) must agree with double
    assert_eq!(g + g, g.double());

    // add(P, -P) is the identity
    assert!(bool::from((g + (-g)).is_identity()));

    // mixed addition agrees with full addition
    let p = g * Scalar::from(17u64);
    assert_eq!(p.add_mixed(&G1Affine::from(g)), p + g);
}

#[test]
fn g2_addition_edge_cases() {
    let g = G2Projective::generator();

    assert_eq!(g + g, g.double());
    assert!(bool::from((g + (-g)).is_identity()));

    let p = g * Scalar::from(17u64);
    assert_eq!(p.add_mixed(&G2Affine::from(g)), p + g);
}

#[test]
fn g1_scalar_multiplication_is_linear() {
    let g = G1Projective::generator();
    let a = Scalar::from(2_347_814_291u64);
    let b = Scalar::from(99_213u64);

    assert_eq!(g * a + g * b, g * (a + b));
    assert_eq!((g * a) * b, g * (a * b));
    assert_eq!(g * Scalar::one(), g);
    assert!(bool::from((g * Scalar::zero()).is_identity()));
}

#[test]
fn g2_scalar_multiplication_is_linear() {
    let g = G2Projective::generator();
    let a = Scalar::from(2_347_814_291u64);
    let b = Scalar::from(99_213u64);

    assert_eq!(g * a + g * b, g * (a + b));
    assert_eq!((g * a) * b, g * (a * b));
    assert_eq!(g * Scalar::one(), g);
    assert!(bool::from((g * Scalar::zero()).is_identity()));
}

#[test]
fn scalar_multiplication_by_group_order_vanishes() {
    // q * P == (q - 1) * P + P == identity for subgroup points
    let q_minus_one = Scalar::from_raw([
        0xffff_ffff_0000_0000,
        0x53bd_a402_fffe_5bfe,
        0x3339_d808_09a1_d805,
        0x73ed_a753_299d_7d48,
    ]);

    let p1 = G1Projective::generator() * Scalar::from(123u64);
    assert!(bool::from((p1 * q_minus_one + p1).is_identity()));

    let p2 = G2Projective::generator() * Scalar::from(123u64);
    assert!(bool::from((p2 * q_minus_one + p2).is_identity()));
}

#[test]
fn g1_random_points_are_valid() {
    let mut rng = rng();
    for _ in 0..4 {
        let p = G1Projective::random(&mut rng);
        let affine = G1Affine::from(p);
        assert!(bool::from(affine.is_on_curve()));
        assert!(bool::from(affine.is_torsion_free()));
    }
}

#[test]
fn g2_random_points_are_valid() {
    let mut rng = rng();
    for _ in 0..4 {
        let p = G2Projective::random(&mut rng);
        let affine = G2Affine::from(p);
        assert!(bool::from(affine.is_on_curve()));
        assert!(bool::from(affine.is_torsion_free()));
    }
}

#[test]
fn g1_batch_normalize() {
    let g = G1Projective::generator();
    let points = [
        g * Scalar::from(2u64),
        G1Projective::identity(),
        g * Scalar::from(3u64),
    ];
    let mut affine = [G1Affine::identity(); 3];

    G1Projective::batch_normalize(&points, &mut affine);

    for (p, a) in points.iter().zip(affine.iter()) {
        assert_eq!(G1Affine::from(p), *a);
    }
}

#[test]
fn g2_batch_normalize() {
    let g = G2Projective::generator();
    let points = [
        g * Scalar::from(2u64),
        G2Projective::identity(),
        g * Scalar::from(3u64),
    ];
    let mut affine = [G2Affine::identity(); 3];

    G2Projective::batch_normalize(&points, &mut affine);

    for (p, a) in points.iter().zip(affine.iter()) {
        assert_eq!(G2Affine::from(p), *a);
    }
}

#[test]
fn projective_sums() {
    let g = G1Projective::generator();
    let total: G1Projective = [g, g.double(), g * Scalar::from(4u64)].iter().sum();
    assert_eq!(total, g * Scalar::from(7u64));

    let g = G2Projective::generator();
    let total: G2Projective = [g, g.double(), g * Scalar::from(4u64)].iter().sum();
    assert_eq!(total, g * Scalar::from(7u64));
}

#[test]
fn scalar_encoding_round_trip() {
    let a = Scalar::from(0xdead_beef_u64) * Scalar::from(0x1234_5678_9abc_def0_u64);
    assert_eq!(Scalar::from_bytes(&a.to_bytes()).unwrap(), a);

    // The modulus itself must be rejected.
    let mut q_bytes = hex::decode(&crate::SCALAR_MODULUS_HEX[2..]).unwrap();
    q_bytes.reverse();
    let mut buf = [0u8; 32];
    buf.copy_from_slice(&q_bytes);
    assert!(bool::from(Scalar::from_bytes(&buf).is_none()));

    // Wide reduction folds 512 bits mod q.
    let mut wide = [0u8; 64];
    wide[32] = 1; // 2^256, little-endian
    assert_eq!(
        Scalar::from_bytes_wide(&wide),
        Scalar::from_raw([
            0x0000_0001_ffff_fffe,
            0x5884_b7fa_0003_4802,
            0x998c_4fef_ecbc_4ff5,
            0x1824_b159_acc5_056f,
        ])
    );
}
