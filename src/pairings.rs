//! The optimal ate pairing e: G1 x G2 -> Gt.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::field::fp2::Fp2;
use crate::field::fp6::Fp6;
use crate::field::fp12::Fp12;
use crate::g1::G1Affine;
use crate::g2::{G2Affine, G2Projective};
use crate::{Scalar, BLS_X, BLS_X_IS_NEGATIVE};

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

/// The output of a Miller loop: an unreduced pairing value. Apply
/// [`MillerLoopResult::final_exponentiation`] to obtain a canonical Gt
/// element.
#[derive(Copy, Clone, Debug)]
pub struct MillerLoopResult(pub(crate) Fp12);

impl Default for MillerLoopResult {
    fn default() -> Self {
        MillerLoopResult(Fp12::one())
    }
}

impl ConditionallySelectable for MillerLoopResult {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        MillerLoopResult(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl<'a, 'b> Add<&'b MillerLoopResult> for &'a MillerLoopResult {
    type Output = MillerLoopResult;

    #[inline]
    fn add(self, rhs: &'b MillerLoopResult) -> MillerLoopResult {
        MillerLoopResult(self.0 * rhs.0)
    }
}

impl_add_binop_specify_output!(MillerLoopResult, MillerLoopResult, MillerLoopResult);

impl AddAssign<MillerLoopResult> for MillerLoopResult {
    #[inline]
    fn add_assign(&mut self, rhs: MillerLoopResult) {
        *self = &*self + &rhs;
    }
}

impl<'b> AddAssign<&'b MillerLoopResult> for MillerLoopResult {
    #[inline]
    fn add_assign(&mut self, rhs: &'b MillerLoopResult) {
        *self = &*self + rhs;
    }
}

/// Granger-Scott squaring for elements of the cyclotomic subgroup.
fn cyclotomic_square(f: Fp12) -> Fp12 {
    fn fp4_square(a: Fp2, b: Fp2) -> (Fp2, Fp2) {
        let t0 = a.square();
        let t1 = b.square();
        let mut t2 = t1.mul_by_nonresidue();
        let c0 = t2 + t0;
        t2 = a + b;
        t2 = t2.square();
        t2 -= t0;
        let c1 = t2 - t1;

        (c0, c1)
    }

    let mut z0 = f.c0.c0;
    let mut z4 = f.c0.c1;
    let mut z3 = f.c0.c2;
    let mut z2 = f.c1.c0;
    let mut z1 = f.c1.c1;
    let mut z5 = f.c1.c2;

    let (t0, t1) = fp4_square(z0, z1);

    z0 = t0 - z0;
    z0 = z0 + z0 + t0;
    z1 = t1 + z1;
    z1 = z1 + z1 + t1;

    let (t0, t1) = fp4_square(z2, z3);
    let (t2, t3) = fp4_square(z4, z5);

    z4 = t0 - z4;
    z4 = z4 + z4 + t0;
    z5 = t1 + z5;
    z5 = z5 + z5 + t1;

    let t0 = t3.mul_by_nonresidue();
    z2 = t0 + z2;
    z2 = z2 + z2 + t0;
    z3 = t2 - z3;
    z3 = z3 + z3 + t2;

    Fp12 {
        c0: Fp6 {
            c0: z0,
            c1: z4,
            c2: z3,
        },
        c1: Fp6 {
            c0: z2,
            c1: z1,
            c2: z5,
        },
    }
}

/// Cyclotomic exponentiation by the curve parameter z.
fn cyclotomic_exp(f: Fp12) -> Fp12 {
    let x = BLS_X;
    let mut tmp = Fp12::one();
    let mut found_one = false;
    for i in (0..64).rev().map(|b| ((x >> b) & 1) == 1) {
        if found_one {
            tmp = cyclotomic_square(tmp)
        } else {
            found_one = i;
        }

        if i {
            tmp *= f;
        }
    }

    tmp.conjugate()
}

impl MillerLoopResult {
    /// Raise to ((p^12 - 1) / q) (up to a harmless constant factor in
    /// the exponent): the easy part via conjugation and inversion, the
    /// hard part via the fixed addition chain in z.
    pub fn final_exponentiation(&self) -> Gt {
        let mut f = self.0;
        let mut t0 = f
            .frobenius_map()
            .frobenius_map()
            .frobenius_map()
            .frobenius_map()
            .frobenius_map()
            .frobenius_map();

        // A Miller loop output is nonzero, so the inversion always
        // succeeds.
        Gt(f
            .invert()
            .map(|mut t1| {
                let mut t2 = t0 * t1;
                t1 = t2;
                t2 = t2.frobenius_map().frobenius_map();
                t2 *= t1;
                t1 = cyclotomic_square(t2).conjugate();
                let mut t3 = cyclotomic_exp(t2);
                let mut t4 = cyclotomic_square(t3);
                let mut t5 = t1 * t3;
                t1 = cyclotomic_exp(t5);
                t0 = cyclotomic_exp(t1);
                let mut t6 = cyclotomic_exp(t0);
                t6 *= t4;
                t4 = cyclotomic_exp(t6);
                t5 = t5.conjugate();
                t4 *= t5 * t2;
                t5 = t2.conjugate();
                t1 *= t2;
                t1 = t1.frobenius_map().frobenius_map().frobenius_map();
                t6 *= t5;
                t6 = t6.frobenius_map();
                t3 *= t0;
                t3 = t3.frobenius_map().frobenius_map();
                t3 *= t1;
                t3 *= t6;
                f = t3 * t4;

                f
            })
            .unwrap())
    }
}

/// An element of the target group Gt, written additively as the other
/// groups are.
#[derive(Copy, Clone, Debug)]
pub struct Gt(pub(crate) Fp12);

impl Default for Gt {
    fn default() -> Self {
        Gt::identity()
    }
}

impl fmt::Display for Gt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ConstantTimeEq for Gt {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for Gt {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Gt(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl Eq for Gt {}
impl PartialEq for Gt {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a> Neg for &'a Gt {
    type Output = Gt;

    #[inline]
    fn neg(self) -> Gt {
        // Unitary elements invert by conjugation.
        Gt(self.0.conjugate())
    }
}

impl Neg for Gt {
    type Output = Gt;

    #[inline]
    fn neg(self) -> Gt {
        -&self
    }
}

impl<'a, 'b> Add<&'b Gt> for &'a Gt {
    type Output = Gt;

    #[inline]
    fn add(self, rhs: &'b Gt) -> Gt {
        Gt(self.0 * rhs.0)
    }
}

impl<'a, 'b> Sub<&'b Gt> for &'a Gt {
    type Output = Gt;

    #[inline]
    fn sub(self, rhs: &'b Gt) -> Gt {
        self + &(-rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Gt {
    type Output = Gt;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        let mut acc = Gt::identity();

        // Simple double-and-add over all 256 scalar bits, skipping only
        // the unset leading bit of the top byte encoding.
        for bit in other
            .to_bytes()
            .iter()
            .rev()
            .flat_map(|byte| (0..8).rev().map(move |i| Choice::from((byte >> i) & 1u8)))
            .skip(1)
        {
            acc = acc.double();
            acc = Gt::conditional_select(&acc, &(acc + self), bit);
        }

        acc
    }
}

impl_binops_additive!(Gt, Gt);
impl_binops_multiplicative!(Gt, Scalar);

impl<T> Sum<T> for Gt
where
    T: core::borrow::Borrow<Gt>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::identity(), |acc, item| acc + item.borrow())
    }
}

impl Gt {
    /// The group identity, 1 in the multiplicative notation of Fp12.
    pub fn identity() -> Gt {
        Gt(Fp12::one())
    }

    /// The canonical generator e(g1, g2).
    pub fn generator() -> Gt {
        pairing(&G1Affine::generator(), &G2Affine::generator())
    }

    /// A random group element.
    pub fn random(mut rng: impl RngCore) -> Self {
        loop {
            let inner = Fp12::random(&mut rng);

            // Project an arbitrary nonzero field element into the
            // order-q subgroup via the final exponentiation.
            if !bool::from(inner.is_zero()) {
                return MillerLoopResult(inner).final_exponentiation();
            }
        }
    }

    /// Whether this is the group identity.
    pub fn is_identity(&self) -> Choice {
        self.ct_eq(&Self::identity())
    }

    /// Doubling, a single cyclotomic squaring.
    #[inline]
    pub fn double(&self) -> Gt {
        Gt(cyclotomic_square(self.0))
    }
}

/// Line-function coefficients for one step of a Miller loop.
type LineCoefficients = (Fp2, Fp2, Fp2);

/// A G2 point prepared for pairing: the line coefficients of the fixed
/// Miller loop walk, cached so the point can enter many pairings.
#[cfg(feature = "alloc")]
#[derive(Clone, Debug)]
pub struct G2Prepared {
    infinity: Choice,
    coeffs: Vec<LineCoefficients>,
}

#[cfg(feature = "alloc")]
impl From<G2Affine> for G2Prepared {
    fn from(q: G2Affine) -> G2Prepared {
        let is_identity = q.is_identity();
        // Replace the identity with the generator so the walk below is
        // well-defined; the flag suppresses its lines later.
        let q = G2Affine::conditional_select(&q, &G2Affine::generator(), is_identity);

        let mut coeffs = Vec::with_capacity(68);
        let mut r = G2Projective::from(q);

        for i in (0..63).rev() {
            coeffs.push(doubling_step(&mut r));
            if (BLS_X >> i) & 1 == 1 {
                coeffs.push(addition_step(&mut r, &q));
            }
        }

        G2Prepared {
            infinity: is_identity,
            coeffs,
        }
    }
}

/// One pairing computed via a one-term Miller loop.
pub fn pairing(p: &G1Affine, q: &G2Affine) -> Gt {
    let either_identity = p.is_identity() | q.is_identity();
    let p = G1Affine::conditional_select(p, &G1Affine::generator(), either_identity);
    let q = G2Affine::conditional_select(q, &G2Affine::generator(), either_identity);

    let mut f = Fp12::one();
    let mut r = G2Projective::from(q);

    for i in (0..63).rev() {
        f = f.square();
        let coeffs = doubling_step(&mut r);
        f = ell(f, &coeffs, &p);
        if (BLS_X >> i) & 1 == 1 {
            let coeffs = addition_step(&mut r, &q);
            f = ell(f, &coeffs, &p);
        }
    }

    if BLS_X_IS_NEGATIVE {
        f = f.conjugate();
    }

    let f = Fp12::conditional_select(&f, &Fp12::one(), either_identity);
    MillerLoopResult(f).final_exponentiation()
}

/// A product of pairings computed with one shared Miller loop: the
/// lines of every term multiply into a single accumulator, and one
/// final exponentiation covers them all.
#[cfg(feature = "alloc")]
pub fn multi_miller_loop(terms: &[(&G1Affine, &G2Prepared)]) -> MillerLoopResult {
    let mut f = Fp12::one();
    let mut idx = 0;

    for i in (0..63).rev() {
        f = f.square();

        for &(p, q) in terms {
            let skip = p.is_identity() | q.infinity;
            let new_f = ell(f, &q.coeffs[idx], p);
            f = Fp12::conditional_select(&new_f, &f, skip);
        }
        idx += 1;

        if (BLS_X >> i) & 1 == 1 {
            for &(p, q) in terms {
                let skip = p.is_identity() | q.infinity;
                let new_f = ell(f, &q.coeffs[idx], p);
                f = Fp12::conditional_select(&new_f, &f, skip);
            }
            idx += 1;
        }
    }

    if BLS_X_IS_NEGATIVE {
        f = f.conjugate();
    }

    MillerLoopResult(f)
}

/// Evaluate the cached line at an affine G1 point and fold it into the
/// accumulator.
fn ell(f: Fp12, coeffs: &LineCoefficients, p: &G1Affine) -> Fp12 {
    let mut c0 = coeffs.0;
    let mut c1 = coeffs.1;

    c0.c0 *= p.y;
    c0.c1 *= p.y;

    c1.c0 *= p.x;
    c1.c1 *= p.x;

    f.mul_by_014(&coeffs.2, &c1, &c0)
}

/// Double the running point and return the tangent-line coefficients.
/// Adaptation of algorithm 26 of eprint 2010/354; the running point
/// uses Jacobian coordinates internal to the loop.
fn doubling_step(r: &mut G2Projective) -> LineCoefficients {
    let tmp0 = r.x.square();
    let tmp1 = r.y.square();
    let tmp2 = tmp1.square();
    let tmp3 = (tmp1 + r.x).square() - tmp0 - tmp2;
    let tmp3 = tmp3 + tmp3;
    let tmp4 = tmp0 + tmp0 + tmp0;
    let tmp6 = r.x + tmp4;
    let tmp5 = tmp4.square();
    let zsquared = r.z.square();
    r.x = tmp5 - tmp3 - tmp3;
    r.z = (r.z + r.y).square() - tmp1 - zsquared;
    r.y = (tmp3 - r.x) * tmp4;
    let tmp2 = tmp2 + tmp2;
    let tmp2 = tmp2 + tmp2;
    let tmp2 = tmp2 + tmp2;
    r.y -= tmp2;
    let tmp3 = tmp4 * zsquared;
    let tmp3 = tmp3 + tmp3;
    let tmp3 = -tmp3;
    let tmp6 = tmp6.square() - tmp0 - tmp5;
    let tmp1 = tmp1 + tmp1;
    let tmp1 = tmp1 + tmp1;
    let tmp6 = tmp6 - tmp1;
    let tmp0 = r.z * zsquared;
    let tmp0 = tmp0 + tmp0;

    (tmp0, tmp3, tmp6)
}

/// Add the base point into the running point and return the
/// secant-line coefficients. Adaptation of algorithm 27 of eprint
/// 2010/354.
fn addition_step(r: &mut G2Projective, q: &G2Affine) -> LineCoefficients {
    let zsquared = r.z.square();
    let ysquared = q.y.square();
    let t0 = zsquared * q.x;
    let t1 = ((q.y + r.z).square() - ysquared - zsquared) * zsquared;
    let t2 = t0 - r.x;
    let t3 = t2.square();
    let t4 = t3 + t3;
    let t4 = t4 + t4;
    let t5 = t4 * t2;
    let t6 = t1 - r.y - r.y;
    let t9 = t6 * q.x;
    let t7 = t4 * r.x;
    r.x = t6.square() - t5 - t7 - t7;
    r.z = (r.z + t2).square() - zsquared - t3;
    let t10 = q.y + r.z;
    let t8 = (t7 - r.x) * t6;
    let t0 = r.y * t5;
    let t0 = t0 + t0;
    r.y = t8 - t0;
    let t10 = t10.square() - ysquared;
    let ztsquared = r.z.square();
    let t10 = t10 - ztsquared;
    let t9 = t9 + t9 - t10;
    let t10 = r.z + r.z;
    let t6 = -t6;
    let t1 = t6 + t6;

    (t10, t1, t9)
}
