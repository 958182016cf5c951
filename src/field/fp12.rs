//! Degree-12 extension GF(p^12) = GF(p^6)[w] / (w^2 - v), the pairing
//! target field.

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::Fp;
use super::fp2::Fp2;
use super::fp6::Fp6;

/// An element c0 + c1 * w of GF(p^12).
#[derive(Copy, Clone)]
pub struct Fp12 {
    pub(crate) c0: Fp6,
    pub(crate) c1: Fp6,
}

impl fmt::Debug for Fp12 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} + ({:?})*w", self.c0, self.c1)
    }
}

impl Default for Fp12 {
    fn default() -> Self {
        Fp12::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Fp12 {}

impl From<Fp6> for Fp12 {
    fn from(f: Fp6) -> Fp12 {
        Fp12 {
            c0: f,
            c1: Fp6::zero(),
        }
    }
}

impl ConstantTimeEq for Fp12 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl Eq for Fp12 {}
impl PartialEq for Fp12 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp12 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp12 {
            c0: Fp6::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp6::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl<'a> Neg for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn neg(self) -> Fp12 {
        self.neg()
    }
}

impl Neg for Fp12 {
    type Output = Fp12;

    #[inline]
    fn neg(self) -> Fp12 {
        -&self
    }
}

impl<'a, 'b> Add<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn add(self, rhs: &'b Fp12) -> Fp12 {
        self.add(rhs)
    }
}

impl<'a, 'b> Sub<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn sub(self, rhs: &'b Fp12) -> Fp12 {
        self.sub(rhs)
    }
}

impl<'a, 'b> Mul<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn mul(self, rhs: &'b Fp12) -> Fp12 {
        self.mul(rhs)
    }
}

impl_binops_additive!(Fp12, Fp12);
impl_binops_multiplicative!(Fp12, Fp12);

impl Fp12 {
    /// The additive identity.
    #[inline]
    pub const fn zero() -> Fp12 {
        Fp12 {
            c0: Fp6::zero(),
            c1: Fp6::zero(),
        }
    }

    /// The multiplicative identity.
    #[inline]
    pub const fn one() -> Fp12 {
        Fp12 {
            c0: Fp6::one(),
            c1: Fp6::zero(),
        }
    }

    /// Whether this element is zero.
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Uniformly random element.
    pub(crate) fn random(mut rng: impl RngCore) -> Fp12 {
        Fp12 {
            c0: Fp6::random(&mut rng),
            c1: Fp6::random(&mut rng),
        }
    }

    /// Sparse multiplication by an element with only the (0, 0), (0, 1)
    /// and (1, 1) tower coefficients set, the shape produced by pairing
    /// line evaluations.
    pub fn mul_by_014(&self, c0: &Fp2, c1: &Fp2, c4: &Fp2) -> Fp12 {
        let aa = self.c0.mul_by_01(c0, c1);
        let bb = self.c1.mul_by_1(c4);
        let o = c1 + c4;
        let c1 = (self.c1 + self.c0).mul_by_01(c0, &o) - aa - bb;
        let c0 = bb.mul_by_nonresidue() + aa;

        Fp12 { c0, c1 }
    }

    /// Negate the w coefficient. For unitary elements this is the
    /// inverse.
    #[inline(always)]
    pub fn conjugate(&self) -> Self {
        Fp12 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// Raise to the p-th power.
    pub fn frobenius_map(&self) -> Self {
        let c0 = self.c0.frobenius_map();
        let c1 = self.c1.frobenius_map();

        // c1 *= (u + 1)^((p - 1) / 6)
        let coeff = Fp2 {
            c0: Fp::from_raw_unchecked([
                0x0708_9552_b319_d465,
                0xc669_5f92_b50a_8313,
                0x97e8_3ccc_d117_228f,
                0xa35b_aeca_b2dc_29ee,
                0x1ce3_93ea_5daa_ce4d,
                0x08f2_220f_b0fb_66eb,
            ]),
            c1: Fp::from_raw_unchecked([
                0xb2f6_6aad_4ce5_d646,
                0x5842_a06b_fc49_7cec,
                0xcf48_95d4_2599_d394,
                0xc11b_9cba_40a8_e8d0,
                0x2e38_13cb_e5a0_de89,
                0x110e_efda_8884_7faf,
            ]),
        };
        let c1 = Fp6 {
            c0: c1.c0 * coeff,
            c1: c1.c1 * coeff,
            c2: c1.c2 * coeff,
        };

        Fp12 { c0, c1 }
    }

    /// Addition.
    #[inline]
    pub fn add(&self, rhs: &Fp12) -> Fp12 {
        Fp12 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }

    /// Subtraction.
    #[inline]
    pub fn sub(&self, rhs: &Fp12) -> Fp12 {
        Fp12 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }

    /// Negation.
    #[inline]
    pub fn neg(&self) -> Fp12 {
        Fp12 {
            c0: -self.c0,
            c1: -self.c1,
        }
    }

    /// Multiplication.
    #[inline]
    pub fn mul(&self, rhs: &Fp12) -> Fp12 {
        let aa = self.c0 * rhs.c0;
        let bb = self.c1 * rhs.c1;
        let o = rhs.c0 + rhs.c1;
        let c1 = (self.c1 + self.c0) * o - aa - bb;
        let c0 = bb.mul_by_nonresidue() + aa;

        Fp12 { c0, c1 }
    }

    /// Complex squaring.
    #[inline]
    pub fn square(&self) -> Self {
        let ab = self.c0 * self.c1;
        let c0c1 = self.c0 + self.c1;
        let c0 = (self.c1.mul_by_nonresidue() + self.c0) * c0c1 - ab - ab.mul_by_nonresidue();
        let c1 = ab + ab;

        Fp12 { c0, c1 }
    }

    /// Multiplicative inverse, if this element is non-zero.
    pub fn invert(&self) -> CtOption<Self> {
        (self.c0.square() - self.c1.square().mul_by_nonresidue())
            .invert()
            .map(|t| Fp12 {
                c0: self.c0 * t,
                c1: self.c1 * -t,
            })
    }
}
