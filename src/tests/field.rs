//! Tests for the extension-field tower.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::field::fp::Fp;
use crate::field::fp12::Fp12;
use crate::field::fp2::Fp2;
use crate::field::fp6::Fp6;

fn fp2(c0: Fp, c1: Fp) -> Fp2 {
    Fp2 { c0, c1 }
}

#[test]
fn fp_conditional_selection() {
    let a = Fp([1, 2, 3, 4, 5, 6]);
    let b = Fp([7, 8, 9, 10, 11, 12]);

    assert_eq!(
        ConditionallySelectable::conditional_select(&a, &b, Choice::from(0u8)),
        a
    );
    assert_eq!(
        ConditionallySelectable::conditional_select(&a, &b, Choice::from(1u8)),
        b
    );
}

#[test]
fn fp_equality() {
    fn is_equal(a: &Fp, b: &Fp) -> bool {
        let eq = a == b;
        assert_eq!(eq, bool::from(a.ct_eq(b)));
        eq
    }

    assert!(is_equal(&Fp([1, 2, 3, 4, 5, 6]), &Fp([1, 2, 3, 4, 5, 6])));
    assert!(!is_equal(&Fp([7, 2, 3, 4, 5, 6]), &Fp([1, 2, 3, 4, 5, 6])));
    assert!(!is_equal(&Fp([1, 2, 3, 4, 5, 7]), &Fp([1, 2, 3, 4, 5, 6])));
}

// The reference values below were produced with an independent
// big-integer implementation of the field.

#[test]
fn fp_multiplication() {
    let a = Fp::from_raw_unchecked([
        0xdb23_09f1_e1e0_ec74,
        0xde1a_d324_e07d_5c2b,
        0xc88e_c095_cac7_c326,
        0xa675_6b72_6acc_e488,
        0xc9a6_778a_c3c4_44f4,
        0x185d_0454_9308_c6f9,
    ]);
    let b = Fp::from_raw_unchecked([
        0xe1d7_f092_ef8e_b955,
        0x4589_d617_9a60_0edc,
        0x7404_903b_f88a_d257,
        0x46ce_ee01_6dce_39a5,
        0xd8bb_accf_daff_3f7f,
        0x09b9_ee63_45d3_9e00,
    ]);
    let c = Fp::from_raw_unchecked([
        0x498b_5d69_c78b_d495,
        0x2998_0112_9d1c_264e,
        0x9db1_f79e_54e9_c3ef,
        0xc73d_924d_ca9b_39c2,
        0x570d_f529_ced1_e897,
        0x00d7_c5e1_7121_51c2,
    ]);

    assert_eq!(a * b, c);
}

#[test]
fn fp_squaring_matches_multiplication() {
    let a = Fp::from_raw_unchecked([
        0xdb23_09f1_e1e0_ec74,
        0xde1a_d324_e07d_5c2b,
        0xc88e_c095_cac7_c326,
        0xa675_6b72_6acc_e488,
        0xc9a6_778a_c3c4_44f4,
        0x185d_0454_9308_c6f9,
    ]);
    let expected = Fp::from_raw_unchecked([
        0xb925_c094_9414_d8d6,
        0x1369_3aa9_f4df_db90,
        0x53a7_b628_c445_b0f3,
        0x1b4e_04e9_08f4_648a,
        0xc692_7ea7_7b35_e1c7,
        0x0d90_8a12_8b52_7b57,
    ]);

    assert_eq!(a.square(), expected);
    assert_eq!(a * a, expected);
}

#[test]
fn fp_addition_and_negation() {
    let a = Fp::from_raw_unchecked([
        0xdb23_09f1_e1e0_ec74,
        0xde1a_d324_e07d_5c2b,
        0xc88e_c095_cac7_c326,
        0xa675_6b72_6acc_e488,
        0xc9a6_778a_c3c4_44f4,
        0x185d_0454_9308_c6f9,
    ]);
    let b = Fp::from_raw_unchecked([
        0xe1d7_f092_ef8e_b955,
        0x4589_d617_9a60_0edc,
        0x7404_903b_f88a_d257,
        0x46ce_ee01_6dce_39a5,
        0xd8bb_accf_daff_3f7f,
        0x09b9_ee63_45d3_9e00,
    ]);
    let sum = Fp::from_raw_unchecked([
        0x02fb_fa84_d16f_fb1e,
        0x04f8_a93d_c989_6b09,
        0xd562_7e30_cca1_9f5a,
        0x88cd_0dee_e516_0b6e,
        0x5746_7ca4_5b77_d79c,
        0x0815_e0cd_9f5c_7e60,
    ]);

    assert_eq!(a + b, sum);
    assert_eq!(sum - b, a);
    assert_eq!(a + (-a), Fp::zero());
    assert_eq!(-Fp::zero(), Fp::zero());
}

#[test]
fn fp_inversion() {
    let a = Fp::from_raw_unchecked([
        0xdb23_09f1_e1e0_ec74,
        0xde1a_d324_e07d_5c2b,
        0xc88e_c095_cac7_c326,
        0xa675_6b72_6acc_e488,
        0xc9a6_778a_c3c4_44f4,
        0x185d_0454_9308_c6f9,
    ]);

    assert_eq!(a * a.invert().unwrap(), Fp::one());
    assert!(bool::from(Fp::zero().invert().is_none()));
}

#[test]
fn fp_sqrt() {
    let two = Fp::one() + Fp::one();
    let four = two.square();

    // The (p+1)/4 exponentiation yields -2 for this input.
    let root = four.sqrt().unwrap();
    assert_eq!(root, -two);
    assert_eq!(root.square(), four);

    // A quadratic non-residue has no root.
    let mut nonsquare = Fp::one();
    for _ in 0..4 {
        nonsquare += Fp::one();
    }
    // 5 is a non-residue mod p
    assert!(bool::from(nonsquare.sqrt().is_none()));
}

#[test]
fn fp_bytes_round_trip() {
    let a = Fp::from_raw_unchecked([
        0xdb23_09f1_e1e0_ec74,
        0xde1a_d324_e07d_5c2b,
        0xc88e_c095_cac7_c326,
        0xa675_6b72_6acc_e488,
        0xc9a6_778a_c3c4_44f4,
        0x185d_0454_9308_c6f9,
    ]);

    assert_eq!(Fp::from_bytes(&a.to_bytes()).unwrap(), a);

    // The modulus itself must be rejected.
    let mut p_bytes = [0u8; 48];
    p_bytes.copy_from_slice(
        &hex::decode(&crate::FP_MODULUS_HEX[2..]).unwrap(),
    );
    assert!(bool::from(Fp::from_bytes(&p_bytes).is_none()));
}

#[test]
fn fp_lexicographic_ordering() {
    // 1 is small, -1 = p - 1 is large.
    assert!(!bool::from(Fp::one().lexicographically_largest()));
    assert!(bool::from((-Fp::one()).lexicographically_largest()));
    assert!(!bool::from(Fp::zero().lexicographically_largest()));
}

#[test]
fn fp2_multiplication() {
    let a = fp2(
        Fp::from_raw_unchecked([
            0x748e_3f66_4690_4dd7,
            0xff40_b112_91a0_7626,
            0x6271_48bd_9030_2184,
            0xa342_30dd_0c1a_5256,
            0x3b2a_d5e5_3c48_937b,
            0x018c_d07c_c277_5732,
        ]),
        Fp::from_raw_unchecked([
            0x1ff1_8ace_df62_8cc0,
            0x9e24_d7e5_e693_77fa,
            0x0fd9_90a2_78d1_c2fb,
            0xad82_d0e2_5558_dc13,
            0x7a00_a1ee_dab1_db49,
            0x025f_c8d9_691a_859d,
        ]),
    );
    let b = fp2(
        Fp::from_raw_unchecked([
            0x379b_f934_5e75_2ae1,
            0x6246_32f2_d559_d1d2,
            0xafac_8098_2919_bfe5,
            0xe454_7812_9967_88d6,
            0xdc52_1de3_e1ee_0777,
            0x096e_b25b_649e_bdf9,
        ]),
        Fp::from_raw_unchecked([
            0x414a_e5de_7291_5408,
            0x4335_3462_3c15_ab52,
            0x07e3_b5e7_3710_d269,
            0xa8c4_5ccf_46fa_2e84,
            0x1fad_5cd1_a763_5eb6,
            0x0d3d_7879_3c0b_7b03,
        ]),
    );
    let c = fp2(
        Fp::from_raw_unchecked([
            0xb7b2_dec5_98bc_55af,
            0x766c_58bc_a81f_a66d,
            0x8297_2b43_5317_5846,
            0xf6c7_c2b0_f34e_4046,
            0x2bde_dbc1_923e_70aa,
            0x0e78_9be1_2078_6414,
        ]),
        Fp::from_raw_unchecked([
            0xbc9c_4ab8_a053_0789,
            0x1a27_8686_8247_97ac,
            0x5b5f_5da4_47bd_6d32,
            0xb4bd_086b_762b_e7f4,
            0x93ae_dad1_167f_9df8,
            0x0b36_fb94_c652_3872,
        ]),
    );

    assert_eq!(a * b, c);
    assert_eq!(a.square(), a * a);
}

#[test]
fn fp2_inversion_and_sqrt() {
    let a = fp2(
        Fp::from_raw_unchecked([
            0x748e_3f66_4690_4dd7,
            0xff40_b112_91a0_7626,
            0x6271_48bd_9030_2184,
            0xa342_30dd_0c1a_5256,
            0x3b2a_d5e5_3c48_937b,
            0x018c_d07c_c277_5732,
        ]),
        Fp::from_raw_unchecked([
            0x1ff1_8ace_df62_8cc0,
            0x9e24_d7e5_e693_77fa,
            0x0fd9_90a2_78d1_c2fb,
            0xad82_d0e2_5558_dc13,
            0x7a00_a1ee_dab1_db49,
            0x025f_c8d9_691a_859d,
        ]),
    );

    assert_eq!(a * a.invert().unwrap(), Fp2::one());
    assert!(bool::from(Fp2::zero().invert().is_none()));

    // Round-trip a known square through sqrt.
    let sq = a.square();
    let root = sq.sqrt().unwrap();
    assert!(root == a || root == -a);
    assert_eq!(root.square(), sq);

    // u + 1 is a non-square in GF(p^2).
    let nonresidue = Fp2::one().mul_by_nonresidue();
    assert!(bool::from(nonresidue.sqrt().is_none()));
}

#[test]
fn fp2_frobenius_is_conjugation() {
    let a = fp2(
        Fp::from_raw_unchecked([
            0x748e_3f66_4690_4dd7,
            0xff40_b112_91a0_7626,
            0x6271_48bd_9030_2184,
            0xa342_30dd_0c1a_5256,
            0x3b2a_d5e5_3c48_937b,
            0x018c_d07c_c277_5732,
        ]),
        Fp::from_raw_unchecked([
            0x1ff1_8ace_df62_8cc0,
            0x9e24_d7e5_e693_77fa,
            0x0fd9_90a2_78d1_c2fb,
            0xad82_d0e2_5558_dc13,
            0x7a00_a1ee_dab1_db49,
            0x025f_c8d9_691a_859d,
        ]),
    );

    assert_eq!(a.frobenius_map(), a.conjugate());
    assert_eq!(a.frobenius_map().frobenius_map(), a);
    // Norm is fixed by conjugation: a * conj(a) lies in the base field.
    let norm = a * a.conjugate();
    assert_eq!(norm.c1, Fp::zero());
}

fn sample_fp6() -> Fp6 {
    // Deterministic nothing-up-my-sleeve values.
    let mut v = [Fp::one(); 6];
    for (i, x) in v.iter_mut().enumerate() {
        for _ in 0..=i {
            *x = x.square() + Fp::one();
        }
    }
    Fp6 {
        c0: fp2(v[0], v[1]),
        c1: fp2(v[2], v[3]),
        c2: fp2(v[4], v[5]),
    }
}

#[test]
fn fp6_ring_identities() {
    let a = sample_fp6();
    let b = Fp6 {
        c0: a.c1,
        c1: a.c2,
        c2: a.c0,
    };

    assert_eq!(a.square(), a * a);
    assert_eq!(a * b, b * a);
    assert_eq!(a * a.invert().unwrap(), Fp6::one());
    assert_eq!((a + b) * a, a * a + b * a);

    // Sparse products agree with full products.
    let c0 = a.c0;
    let c1 = a.c1;
    assert_eq!(
        a.mul_by_01(&c0, &c1),
        a * Fp6 {
            c0,
            c1,
            c2: Fp2::zero()
        }
    );
    assert_eq!(
        a.mul_by_1(&c1),
        a * Fp6 {
            c0: Fp2::zero(),
            c1,
            c2: Fp2::zero()
        }
    );
}

#[test]
fn fp6_frobenius_has_order_six() {
    let a = sample_fp6();
    let mut t = a;
    for _ in 0..6 {
        t = t.frobenius_map();
    }
    assert_eq!(t, a);

    let b = Fp6 {
        c0: a.c1,
        c1: a.c2,
        c2: a.c0,
    };
    assert_eq!((a * b).frobenius_map(), a.frobenius_map() * b.frobenius_map());
}

#[test]
fn fp12_ring_identities() {
    let a = Fp12 {
        c0: sample_fp6(),
        c1: sample_fp6().mul_by_nonresidue(),
    };
    let b = Fp12 {
        c0: a.c1,
        c1: a.c0,
    };

    assert_eq!(a.square(), a * a);
    assert_eq!(a * b, b * a);
    assert_eq!(a * a.invert().unwrap(), Fp12::one());

    let c0 = a.c0.c0;
    let c1 = a.c0.c1;
    let c4 = a.c1.c1;
    let sparse = Fp12 {
        c0: Fp6 {
            c0,
            c1,
            c2: Fp2::zero(),
        },
        c1: Fp6 {
            c0: Fp2::zero(),
            c1: c4,
            c2: Fp2::zero(),
        },
    };
    assert_eq!(a.mul_by_014(&c0, &c1, &c4), a * sparse);
}

#[test]
fn fp12_frobenius_has_order_twelve() {
    let a = Fp12 {
        c0: sample_fp6(),
        c1: sample_fp6().mul_by_nonresidue(),
    };
    let mut t = a;
    for _ in 0..12 {
        t = t.frobenius_map();
    }
    assert_eq!(t, a);

    assert_eq!((a * a.conjugate()).conjugate(), a * a.conjugate());
}
