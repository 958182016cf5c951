//! Deterministic hashing of (message, domain) pairs into G2.
//!
//! The construction: a SHAKE-256 expansion of the message and the
//! 8-byte big-endian domain into two GF(p^2) elements, a simplified
//! SWU map onto the 3-isogenous curve E'': y^2 = x^3 + A'x + B' for
//! each element, the isogeny evaluation back to the twist, the sum of
//! the two images, and cofactor clearing. Distinct domains give
//! independent hash families over the same messages.

use subtle::{ConditionallySelectable, CtOption};

use crate::error::{Error, Result};
use crate::field::fp::Fp;
use crate::field::fp2::Fp2;
use crate::g2::G2Projective;
use crate::xof::{ExtendableOutput, Shake256};

/// A' = 240u
const SSWU_A: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([0, 0, 0, 0, 0, 0]),
    c1: Fp::from_raw_unchecked([
        0xe53a_0000_0313_5242,
        0x0108_0c0f_def8_0285,
        0xe788_9edb_e340_f6bd,
        0x0b51_3751_2631_0601,
        0x02d6_9857_17c7_44ab,
        0x1220_b4e9_79ea_5467,
    ]),
};

/// B' = 1012(1 + u)
const SSWU_B: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x22ea_0000_0cf8_9db2,
        0x6ec8_32df_7138_0aa4,
        0x6e1b_9440_3db5_a66e,
        0x75bf_3c53_a794_73ba,
        0x3dd3_a569_412c_0a34,
        0x125c_db5e_74dc_4fd1,
    ]),
    c1: Fp::from_raw_unchecked([
        0x22ea_0000_0cf8_9db2,
        0x6ec8_32df_7138_0aa4,
        0x6e1b_9440_3db5_a66e,
        0x75bf_3c53_a794_73ba,
        0x3dd3_a569_412c_0a34,
        0x125c_db5e_74dc_4fd1,
    ]),
};

/// Z = -(2 + u), a non-square picked for the SWU exceptional cases
const SSWU_Z: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x87eb_ffff_fff9_555c,
        0x656f_ffe5_da8f_fffa,
        0x0fd0_7493_45d3_3ad2,
        0xd951_e663_0665_76f4,
        0xde29_1a3d_41e9_80d3,
        0x0815_664c_7dfe_040d,
    ]),
    c1: Fp::from_raw_unchecked([
        0x43f5_ffff_fffc_aaae,
        0x32b7_fff2_ed47_fffd,
        0x07e8_3a49_a2e9_9d69,
        0xeca8_f331_8332_bb7a,
        0xef14_8d1e_a0f4_c069,
        0x040a_b326_3eff_0206,
    ]),
};

/// x-numerator coefficients of the 3-isogeny E'' -> E
const ISO3_XNUM: [Fp2; 4] = [
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x47f6_71c7_1ce0_5e62,
            0x06dd_5707_1206_393e,
            0x7c80_cd2a_f3fd_71a2,
            0x0481_03ea_9e6c_d062,
            0xc545_16ac_c8d0_37f6,
            0x1380_8f55_0920_ea41,
        ]),
        c1: Fp::from_raw_unchecked([
            0x47f6_71c7_1ce0_5e62,
            0x06dd_5707_1206_393e,
            0x7c80_cd2a_f3fd_71a2,
            0x0481_03ea_9e6c_d062,
            0xc545_16ac_c8d0_37f6,
            0x1380_8f55_0920_ea41,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([0, 0, 0, 0, 0, 0]),
        c1: Fp::from_raw_unchecked([
            0x5fe5_5555_554c_71d0,
            0x873f_ffdd_236a_aaa3,
            0x6a6b_4619_b26e_f918,
            0x21c2_8884_0887_4945,
            0x2836_cda7_028c_abc5,
            0x0ac7_3310_a7fd_5abd,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x0a0c_5555_5559_71c3,
            0xdb0c_0010_1f9e_aaae,
            0xb1fb_2f94_1d79_7997,
            0xd396_0742_ef41_6e1c,
            0xb700_40e2_c205_56f4,
            0x149d_7861_e581_393b,
        ]),
        c1: Fp::from_raw_unchecked([
            0xaff2_aaaa_aaa6_38e8,
            0x439f_ffee_91b5_5551,
            0xb535_a30c_d937_7c8c,
            0x90e1_4442_0443_a4a2,
            0x941b_66d3_8146_55e2,
            0x0563_9988_53fe_ad5e,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x40aa_c71c_71c7_25ed,
            0x1909_5555_7a84_e38e,
            0xd817_050a_8f41_abc3,
            0xd864_85d4_c87f_6fb1,
            0x696e_b479_f885_d059,
            0x198e_1a74_3280_02d2,
        ]),
        c1: Fp::from_raw_unchecked([0, 0, 0, 0, 0, 0]),
    },
];

/// x-denominator coefficients of the 3-isogeny (monic of degree 2)
const ISO3_XDEN: [Fp2; 3] = [
    Fp2 {
        c0: Fp::from_raw_unchecked([0, 0, 0, 0, 0, 0]),
        c1: Fp::from_raw_unchecked([
            0x1f3a_ffff_ff13_ab97,
            0xf25b_fc61_1da3_ff3e,
            0xca37_57cb_3819_b208,
            0x3e64_2736_6f8c_ec18,
            0x0397_7bc8_6095_b089,
            0x04f6_9db1_3f39_a952,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x4476_0000_0027_552e,
            0xdcb8_009a_4348_0020,
            0x6f7e_e9ce_4a6e_8b59,
            0xb103_30b7_c0a9_5bc6,
            0x6140_b1fc_fb1e_54b7,
            0x0381_be09_7f0b_b4e1,
        ]),
        c1: Fp::from_raw_unchecked([
            0x7588_ffff_ffd8_557d,
            0x41f3_ff64_6e0b_ffdf,
            0xf7b1_e8d2_ac42_6aca,
            0xb374_1acd_32db_b6f8,
            0xe9da_f5b9_482d_581f,
            0x167f_53e0_ba74_31b8,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x7609_0000_0002_fffd,
            0xebf4_000b_c40c_0002,
            0x5f48_9857_53c7_58ba,
            0x77ce_5853_7052_5745,
            0x5c07_1a97_a256_ec6d,
            0x15f6_5ec3_fa80_e493,
        ]),
        c1: Fp::from_raw_unchecked([0, 0, 0, 0, 0, 0]),
    },
];

/// y-numerator coefficients of the 3-isogeny
const ISO3_YNUM: [Fp2; 4] = [
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x96d8_f684_bdfc_77be,
            0xb530_e4f4_3b66_d0e2,
            0x184a_88ff_3796_52fd,
            0x57cb_23ec_fae8_04e1,
            0x0fd2_e39e_ada3_eba9,
            0x08c8_055e_31c5_d5c3,
        ]),
        c1: Fp::from_raw_unchecked([
            0x96d8_f684_bdfc_77be,
            0xb530_e4f4_3b66_d0e2,
            0x184a_88ff_3796_52fd,
            0x57cb_23ec_fae8_04e1,
            0x0fd2_e39e_ada3_eba9,
            0x08c8_055e_31c5_d5c3,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([0, 0, 0, 0, 0, 0]),
        c1: Fp::from_raw_unchecked([
            0xbf0a_71c7_1c91_b406,
            0x4d6d_55d2_8b76_38fd,
            0x9d82_f98e_5f20_5aee,
            0xa27a_a27b_1d1a_18d5,
            0x02c3_b2b2_d293_8e86,
            0x0c7d_1342_0b09_807f,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0xd7f9_5555_5553_1c74,
            0x21cf_fff7_48da_aaa8,
            0x5a9a_d186_6c9b_be46,
            0x4870_a221_0221_d251,
            0x4a0d_b369_c0a3_2af1,
            0x02b1_ccc4_29ff_56af,
        ]),
        c1: Fp::from_raw_unchecked([
            0xe205_aaaa_aaac_8e37,
            0xfcdc_0007_6879_5556,
            0x0c96_011a_8a15_37dd,
            0x1c06_a963_f163_406e,
            0x010d_f44c_82a8_81e6,
            0x174f_4526_0f80_8feb,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0xa470_bda1_2f67_f35c,
            0xc0fe_38e2_3327_b425,
            0xc9d3_d0f2_c6f0_678d,
            0x1c55_c993_5b5a_982e,
            0x27f6_c0e2_f074_6764,
            0x117c_5e6e_28aa_9054,
        ]),
        c1: Fp::from_raw_unchecked([0, 0, 0, 0, 0, 0]),
    },
];

/// y-denominator coefficients of the 3-isogeny (monic of degree 3)
const ISO3_YDEN: [Fp2; 4] = [
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x0162_ffff_fa76_5adf,
            0x8f7b_ea48_0083_fb75,
            0x561b_3c22_59e9_3611,
            0x11e1_9fc1_a9c8_75d5,
            0xca71_3efc_0036_7660,
            0x03c6_a03d_41da_1151,
        ]),
        c1: Fp::from_raw_unchecked([
            0x0162_ffff_fa76_5adf,
            0x8f7b_ea48_0083_fb75,
            0x561b_3c22_59e9_3611,
            0x11e1_9fc1_a9c8_75d5,
            0xca71_3efc_0036_7660,
            0x03c6_a03d_41da_1151,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([0, 0, 0, 0, 0, 0]),
        c1: Fp::from_raw_unchecked([
            0x5db0_ffff_fd3b_02c5,
            0xd713_f523_58eb_fdba,
            0x5ea6_0761_a84d_161a,
            0xbb2c_75a3_4ea6_c44a,
            0x0ac6_7359_21c1_119b,
            0x0ee3_d913_bdac_fbf6,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x66b1_0000_003a_ffc5,
            0xcb14_00e7_64ec_0030,
            0xa73e_5eb5_6fa5_d106,
            0x8984_c913_a0fe_09a9,
            0x11e1_0afb_78ad_7f13,
            0x0542_9d0e_3e91_8f52,
        ]),
        c1: Fp::from_raw_unchecked([
            0x534d_ffff_ffc4_aae6,
            0x5397_ff17_4c67_ffcf,
            0xbff2_73eb_870b_251d,
            0xdaf2_8271_5287_0915,
            0x393a_9cba_ca9e_2dc3,
            0x14be_74db_faee_5748,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x7609_0000_0002_fffd,
            0xebf4_000b_c40c_0002,
            0x5f48_9857_53c7_58ba,
            0x77ce_5853_7052_5745,
            0x5c07_1a97_a256_ec6d,
            0x15f6_5ec3_fa80_e493,
        ]),
        c1: Fp::from_raw_unchecked([0, 0, 0, 0, 0, 0]),
    },
];

/// Hash a message and a domain tag to a point of the order-q subgroup
/// of G2.
///
/// The only failure is a non-invertible isogeny denominator, which no
/// feasible message search can reach.
pub fn hash_to_g2(message: &[u8], domain: u64) -> Result<G2Projective> {
    let (t0, t1) = hash_to_field(message, domain);

    let p0 = map_to_curve(&t0)?;
    let p1 = map_to_curve(&t1)?;

    Ok((p0 + p1).clear_cofactor())
}

/// Expand (message, domain) into two GF(p^2) elements. Each of the
/// four GF(p) coefficients is a 512-bit XOF window reduced mod p, so
/// the outputs are statistically close to uniform.
fn hash_to_field(message: &[u8], domain: u64) -> (Fp2, Fp2) {
    let mut xof = Shake256::new();
    xof.update(message);
    xof.update(&domain.to_be_bytes());

    let mut out = [0u8; 256];
    xof.squeeze(&mut out);

    let coeff = |i: usize| Fp::from_u512(<&[u8; 64]>::try_from(&out[i * 64..i * 64 + 64]).unwrap());

    (
        Fp2 {
            c0: coeff(0),
            c1: coeff(1),
        },
        Fp2 {
            c0: coeff(2),
            c1: coeff(3),
        },
    )
}

/// Map a field element onto the twist: simplified SWU onto E''
/// followed by the 3-isogeny.
fn map_to_curve(u: &Fp2) -> Result<G2Projective> {
    let (x, y) = sswu(u);
    iso3(x, y)
}

/// The simplified Shallue-van de Woestijne-Ulas map onto E''. Straight
/// variable-time rendition of the generic formulation; hash-to-curve
/// inputs are public.
fn sswu(u: &Fp2) -> (Fp2, Fp2) {
    let tv1 = SSWU_Z * u.square();
    let tv2 = tv1.square();
    let den = tv1 + tv2;

    // x1 = (-B/A)(1 + 1/(Z^2 u^4 + Z u^2)), or B/(ZA) when the
    // denominator vanishes. A and Z are fixed nonzero constants.
    let x1 = if bool::from(den.is_zero()) {
        SSWU_B * (SSWU_Z * SSWU_A).invert().unwrap()
    } else {
        -SSWU_B * SSWU_A.invert().unwrap() * (Fp2::one() + den.invert().unwrap())
    };

    let gx1 = (x1.square() + SSWU_A) * x1 + SSWU_B;
    let (x, y) = match Option::<Fp2>::from(gx1.sqrt()) {
        Some(y) => (x1, y),
        None => {
            // Z was chosen so that g(Z u^2 x1) is a square exactly when
            // g(x1) is not.
            let x2 = tv1 * x1;
            let gx2 = (x2.square() + SSWU_A) * x2 + SSWU_B;
            (x2, gx2.sqrt().unwrap())
        }
    };

    let y = Fp2::conditional_select(&y, &-y, u.sgn0() ^ y.sgn0());
    (x, y)
}

/// Evaluate the 3-isogeny at an affine point of E''.
fn iso3(x: Fp2, y: Fp2) -> Result<G2Projective> {
    let xs = [Fp2::one(), x, x.square(), x.square() * x];

    let eval = |k: &[Fp2]| {
        k.iter()
            .zip(xs.iter())
            .fold(Fp2::zero(), |acc, (k, xp)| acc + k * xp)
    };

    let x_num = eval(&ISO3_XNUM);
    let x_den = eval(&ISO3_XDEN);
    let y_num = eval(&ISO3_YNUM);
    let y_den = eval(&ISO3_YDEN);

    // A pole of the isogeny is the one place a non-invertible
    // denominator can meet caller input.
    let x_den_inv: CtOption<Fp2> = x_den.invert();
    let y_den_inv: CtOption<Fp2> = y_den.invert();
    if !bool::from(x_den_inv.is_some() & y_den_inv.is_some()) {
        return Err(Error::Arithmetic {
            operation: "isogeny evaluation",
            details: "denominator is not invertible",
        });
    }

    Ok(G2Projective {
        x: x_num * x_den_inv.unwrap(),
        y: y * y_num * y_den_inv.unwrap(),
        z: Fp2::one(),
    })
}
