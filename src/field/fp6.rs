//! Degree-6 extension GF(p^6) = GF(p^2)[v] / (v^3 - (u + 1)).

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::Fp;
use super::fp2::Fp2;

/// An element c0 + c1 * v + c2 * v^2 of GF(p^6).
#[derive(Copy, Clone)]
pub struct Fp6 {
    pub(crate) c0: Fp2,
    pub(crate) c1: Fp2,
    pub(crate) c2: Fp2,
}

impl fmt::Debug for Fp6 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} + ({:?})*v + ({:?})*v^2", self.c0, self.c1, self.c2)
    }
}

impl Default for Fp6 {
    fn default() -> Self {
        Fp6::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Fp6 {}

impl From<Fp2> for Fp6 {
    fn from(f: Fp2) -> Fp6 {
        Fp6 {
            c0: f,
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }
}

impl ConstantTimeEq for Fp6 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1) & self.c2.ct_eq(&other.c2)
    }
}

impl Eq for Fp6 {}
impl PartialEq for Fp6 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp6 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp6 {
            c0: Fp2::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp2::conditional_select(&a.c1, &b.c1, choice),
            c2: Fp2::conditional_select(&a.c2, &b.c2, choice),
        }
    }
}

impl<'a> Neg for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn neg(self) -> Fp6 {
        self.neg()
    }
}

impl Neg for Fp6 {
    type Output = Fp6;

    #[inline]
    fn neg(self) -> Fp6 {
        -&self
    }
}

impl<'a, 'b> Add<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn add(self, rhs: &'b Fp6) -> Fp6 {
        self.add(rhs)
    }
}

impl<'a, 'b> Sub<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn sub(self, rhs: &'b Fp6) -> Fp6 {
        self.sub(rhs)
    }
}

impl<'a, 'b> Mul<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn mul(self, rhs: &'b Fp6) -> Fp6 {
        self.mul(rhs)
    }
}

impl_binops_additive!(Fp6, Fp6);
impl_binops_multiplicative!(Fp6, Fp6);

impl Fp6 {
    /// The additive identity.
    #[inline]
    pub const fn zero() -> Fp6 {
        Fp6 {
            c0: Fp2::zero(),
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }

    /// The multiplicative identity.
    #[inline]
    pub const fn one() -> Fp6 {
        Fp6 {
            c0: Fp2::one(),
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }

    /// Whether this element is zero.
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero() & self.c2.is_zero()
    }

    /// Uniformly random element.
    pub(crate) fn random(mut rng: impl RngCore) -> Fp6 {
        Fp6 {
            c0: Fp2::random(&mut rng),
            c1: Fp2::random(&mut rng),
            c2: Fp2::random(&mut rng),
        }
    }

    /// Sparse multiplication by an element with only the v coefficient set.
    pub fn mul_by_1(&self, c1: &Fp2) -> Fp6 {
        Fp6 {
            c0: (self.c2 * c1).mul_by_nonresidue(),
            c1: self.c0 * c1,
            c2: self.c1 * c1,
        }
    }

    /// Sparse multiplication by an element with only the 1 and v
    /// coefficients set.
    pub fn mul_by_01(&self, c0: &Fp2, c1: &Fp2) -> Fp6 {
        let a_a = self.c0 * c0;
        let b_b = self.c1 * c1;

        let t1 = ((self.c1 + self.c2) * c1 - b_b).mul_by_nonresidue() + a_a;
        let t2 = (c0 + c1) * (self.c0 + self.c1) - a_a - b_b;
        let t3 = (self.c0 + self.c2) * c0 - a_a + b_b;

        Fp6 {
            c0: t1,
            c1: t2,
            c2: t3,
        }
    }

    /// Multiply by v: coefficients rotate and the wrapped one picks up
    /// the non-residue.
    pub fn mul_by_nonresidue(&self) -> Fp6 {
        Fp6 {
            c0: self.c2.mul_by_nonresidue(),
            c1: self.c0,
            c2: self.c1,
        }
    }

    /// Raise to the p-th power.
    pub fn frobenius_map(&self) -> Fp6 {
        let c0 = self.c0.frobenius_map();
        let c1 = self.c1.frobenius_map();
        let c2 = self.c2.frobenius_map();

        // c1 *= (u + 1)^((p - 1) / 3)
        let c1 = c1 * Fp2 {
            c0: Fp::zero(),
            c1: Fp::from_raw_unchecked([
                0xcd03_c9e4_8671_f071,
                0x5dab_2246_1fcd_a5d2,
                0x5870_42af_d385_1b95,
                0x8eb6_0ebe_01ba_cb9e,
                0x03f9_7d6e_83d0_50d2,
                0x18f0_2065_5463_8741,
            ]),
        };

        // c2 *= (u + 1)^((2p - 2) / 3)
        let c2 = c2 * Fp2 {
            c0: Fp::from_raw_unchecked([
                0x890d_c9e4_8675_45c3,
                0x2af3_2253_3285_a5d5,
                0x5088_0866_309b_7e2c,
                0xa20d_1b8c_7e88_1024,
                0x14e4_f04f_e2db_9068,
                0x14e5_6d3f_1564_853a,
            ]),
            c1: Fp::zero(),
        };

        Fp6 { c0, c1, c2 }
    }

    /// Addition.
    #[inline]
    pub fn add(&self, rhs: &Fp6) -> Fp6 {
        Fp6 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
            c2: self.c2 + rhs.c2,
        }
    }

    /// Subtraction.
    #[inline]
    pub fn sub(&self, rhs: &Fp6) -> Fp6 {
        Fp6 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
            c2: self.c2 - rhs.c2,
        }
    }

    /// Negation.
    #[inline]
    pub fn neg(&self) -> Fp6 {
        Fp6 {
            c0: -self.c0,
            c1: -self.c1,
            c2: -self.c2,
        }
    }

    /// Karatsuba multiplication.
    #[inline]
    pub fn mul(&self, rhs: &Fp6) -> Fp6 {
        let aa = self.c0 * rhs.c0;
        let bb = self.c1 * rhs.c1;
        let cc = self.c2 * rhs.c2;

        let t1 = ((self.c1 + self.c2) * (rhs.c1 + rhs.c2) - bb - cc).mul_by_nonresidue() + aa;
        let t2 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1) - aa - bb + cc.mul_by_nonresidue();
        let t3 = (self.c0 + self.c2) * (rhs.c0 + rhs.c2) - aa + bb - cc;

        Fp6 {
            c0: t1,
            c1: t2,
            c2: t3,
        }
    }

    /// Squaring (CH-SQR2 style).
    #[inline]
    pub fn square(&self) -> Fp6 {
        let s0 = self.c0.square();
        let ab = self.c0 * self.c1;
        let s1 = ab + ab;
        let s2 = (self.c0 - self.c1 + self.c2).square();
        let bc = self.c1 * self.c2;
        let s3 = bc + bc;
        let s4 = self.c2.square();

        Fp6 {
            c0: s3.mul_by_nonresidue() + s0,
            c1: s4.mul_by_nonresidue() + s1,
            c2: s1 + s2 + s3 - s0 - s4,
        }
    }

    /// Multiplicative inverse, if this element is non-zero.
    #[inline]
    pub fn invert(&self) -> CtOption<Self> {
        let c0 = self.c0.square() - (self.c1 * self.c2).mul_by_nonresidue();
        let c1 = self.c2.square().mul_by_nonresidue() - self.c0 * self.c1;
        let c2 = self.c1.square() - self.c0 * self.c2;

        ((self.c1 * c2 + self.c2 * c1).mul_by_nonresidue() + self.c0 * c0)
            .invert()
            .map(|t| Fp6 {
                c0: t * c0,
                c1: t * c1,
                c2: t * c2,
            })
    }
}
