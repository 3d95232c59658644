use crate::inverse::inverse_u64;
use crate::util::split;
use core::fmt::Debug;
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use ff::Field;
use rand_core::RngCore;
use std::fmt::{Display, Formatter};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeLess, CtOption};

/// Goldilocks field with modulus 2^64 - 2^32 + 1.
///
/// The word is always kept in canonical form `[0, MODULUS)`; the only way to
/// break that is [`Goldilocks::from_canonical_u64_unchecked`] with an
/// out-of-range argument, which is a caller bug.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Goldilocks(u64);

/// 2^64 - 2^32 + 1
pub const MODULUS: u64 = 0xffffffff00000001;
/// 2^32 - 1, which is 2^64 mod MODULUS
pub const EPSILON: u64 = 0xffffffff;
/// (2^32 - 1) << 32, i.e. MODULUS - 1
pub const EPSILON_HI: u64 = 0xffffffff00000000;
pub const TWO_ADICITY: usize = 32;
/// (MODULUS - 1) >> TWO_ADICITY
const T: u64 = 0xffffffff;

/// Generator of the full multiplicative group, a quadratic non-residue.
pub const MULTIPLICATIVE_GENERATOR: Goldilocks = Goldilocks(7);
/// MULTIPLICATIVE_GENERATOR^T, a primitive 2^32-th root of unity.
pub const ROOT_OF_UNITY: Goldilocks = Goldilocks(1753635133440165772);
pub const ROOT_OF_UNITY_INV: Goldilocks = Goldilocks(8554224884056360729);
/// 2^-1
pub const TWO_INV: Goldilocks = Goldilocks(9223372034707292161);

impl Display for Goldilocks {
    fn fmt(&self, w: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(w, "{}", self.0)
    }
}

impl Debug for Goldilocks {
    fn fmt(&self, w: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(w, "{:#x}", self.0)
    }
}

impl Goldilocks {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    /// Builds an element from any `u64`, reducing it into `[0, MODULUS)`.
    #[inline]
    pub const fn from_u64(v: u64) -> Self {
        // 2 * MODULUS > 2^64, so a single subtraction is enough.
        if Self(v).smaller_than_modulus() {
            Self(v)
        } else {
            Self(v - MODULUS)
        }
    }

    /// Stores `v` as is. The caller guarantees `v < MODULUS`; arithmetic on
    /// a larger word gives unspecified (but memory safe) results.
    #[inline(always)]
    pub const fn from_canonical_u64_unchecked(v: u64) -> Self {
        debug_assert!(v < MODULUS);
        Self(v)
    }

    /// Builds an element from `v` only if `v < MODULUS`. The range check
    /// runs in constant time.
    pub fn try_from_u64(v: u64) -> CtOption<Self> {
        CtOption::new(Self(v), v.ct_lt(&MODULUS))
    }

    /// Builds an element from a signed integer: negative values map to
    /// `MODULUS - |v|`.
    pub fn from_i64(v: i64) -> Self {
        // all ones if v is negative, all zeros otherwise
        let mask = v >> 63;
        let abs = ((v ^ mask).wrapping_sub(mask)) as u64;
        let res = Self::from_u64(abs);
        if mask != 0 {
            -res
        } else {
            res
        }
    }

    pub fn set_zero(&mut self) -> &mut Self {
        self.0 = 0;
        self
    }

    pub fn set_one(&mut self) -> &mut Self {
        self.0 = 1;
        self
    }

    #[inline(always)]
    pub const fn to_canonical_u64(&self) -> u64 {
        self.0
    }

    /// Returns `self^-1`, or zero when `self` is zero.
    ///
    /// Inverting zero is not signalled: callers that care should test
    /// [`Field::is_zero_vartime`] first, or use [`Field::invert`] which
    /// returns `None` for zero.
    pub fn inverse(&self) -> Self {
        Self(inverse_u64(self.0))
    }

    /// Square and multiply, not constant time in `power`.
    pub fn exp_u64(&self, power: u64) -> Self {
        let mut base = *self;
        let mut acc = Self::ONE;
        let mut e = power;
        while e != 0 {
            if e & 1 == 1 {
                acc *= base;
            }
            base = base.square();
            e >>= 1;
        }
        acc
    }

    /// Whether the raw word is below the modulus.
    ///
    /// This branches on the value and must not be used on secrets; see
    /// [`Goldilocks::try_from_u64`] for the constant-time check.
    #[inline(always)]
    const fn smaller_than_modulus(&self) -> bool {
        self.0 < MODULUS
    }
}

impl Field for Goldilocks {
    /// Returns an element chosen uniformly at random using a user-provided RNG.
    /// Note: this sampler is not constant time!
    fn random(mut rng: impl RngCore) -> Self {
        let mut res = rng.next_u64();
        while res >= MODULUS {
            res = rng.next_u64();
        }
        Self(res)
    }

    fn zero() -> Self {
        Self::ZERO
    }

    fn one() -> Self {
        Self::ONE
    }

    fn is_zero_vartime(&self) -> bool {
        self.0 == 0
    }

    fn square(&self) -> Self {
        *self * *self
    }

    /// Doubles with a shift. If the top bit is set the shift drops 2^64,
    /// and subtracting MODULUS with wrap-around puts back 2^64 - MODULUS.
    fn double(&self) -> Self {
        let x = self.0;
        if x & (1 << 63) != 0 {
            Self((x << 1).wrapping_sub(MODULUS))
        } else {
            let d = x << 1;
            if d >= MODULUS {
                Self(d - MODULUS)
            } else {
                Self(d)
            }
        }
    }

    /// Computes the multiplicative inverse of this element,
    /// failing if the element is zero.
    fn invert(&self) -> CtOption<Self> {
        CtOption::new(self.inverse(), !self.is_zero())
    }

    /// Tonelli-Shanks over the 2^32 subgroup. Returns `None` for
    /// quadratic non-residues. Not constant time.
    fn sqrt(&self) -> CtOption<Self> {
        if self.is_zero_vartime() {
            return CtOption::new(Self::ZERO, Choice::from(1));
        }

        let mut m = TWO_ADICITY;
        let mut c = ROOT_OF_UNITY;
        let mut t = self.exp_u64(T);
        let mut r = self.exp_u64((T + 1) >> 1);

        while t != Self::ONE {
            // least i with t^(2^i) == 1; it must stay below m
            let mut i = 0;
            let mut t_pow = t;
            while t_pow != Self::ONE {
                t_pow = t_pow.square();
                i += 1;
                if i == m {
                    return CtOption::new(Self::ZERO, Choice::from(0));
                }
            }

            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = b.square();
            }
            m = i;
            c = b.square();
            t *= c;
            r *= b;
        }
        CtOption::new(r, Choice::from(1))
    }
}

impl From<u64> for Goldilocks {
    fn from(input: u64) -> Self {
        Self::from_u64(input)
    }
}

impl From<i64> for Goldilocks {
    fn from(input: i64) -> Self {
        Self::from_i64(input)
    }
}

impl From<bool> for Goldilocks {
    fn from(bit: bool) -> Self {
        if bit {
            Self::ONE
        } else {
            Self::ZERO
        }
    }
}

impl From<Goldilocks> for u64 {
    fn from(input: Goldilocks) -> Self {
        input.0
    }
}

impl ConditionallySelectable for Goldilocks {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(u64::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for Goldilocks {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Neg for Goldilocks {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        if self.0 == 0 {
            self
        } else {
            Self(MODULUS - self.0)
        }
    }
}

impl Add for Goldilocks {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        // x, y < MODULUS so x + y < 2 * MODULUS: one correction suffices
        let (sum, carry) = self.0.overflowing_add(rhs.0);
        if carry || sum >= MODULUS {
            Self(sum.wrapping_sub(MODULUS))
        } else {
            Self(sum)
        }
    }
}

impl<'a> Add<&'a Goldilocks> for Goldilocks {
    type Output = Self;

    #[inline]
    fn add(self, rhs: &'a Goldilocks) -> Self::Output {
        self + *rhs
    }
}

impl AddAssign for Goldilocks {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<'a> AddAssign<&'a Goldilocks> for Goldilocks {
    #[inline]
    fn add_assign(&mut self, rhs: &'a Goldilocks) {
        *self = *self + *rhs;
    }
}

impl Sub for Goldilocks {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let (diff, borrow) = self.0.overflowing_sub(rhs.0);
        if borrow {
            Self(diff.wrapping_add(MODULUS))
        } else {
            Self(diff)
        }
    }
}

impl<'a> Sub<&'a Goldilocks> for Goldilocks {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: &'a Goldilocks) -> Self::Output {
        self - *rhs
    }
}

impl SubAssign for Goldilocks {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<'a> SubAssign<&'a Goldilocks> for Goldilocks {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a Goldilocks) {
        *self = *self - *rhs;
    }
}

impl Mul for Goldilocks {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        reduce128((self.0 as u128) * (rhs.0 as u128))
    }
}

impl<'a> Mul<&'a Goldilocks> for Goldilocks {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: &'a Goldilocks) -> Self::Output {
        self * *rhs
    }
}

impl MulAssign for Goldilocks {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<'a> MulAssign<&'a Goldilocks> for Goldilocks {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a Goldilocks) {
        *self = *self * *rhs;
    }
}

impl Sum for Goldilocks {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Goldilocks> for Goldilocks {
    fn sum<I: Iterator<Item = &'a Goldilocks>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Product for Goldilocks {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl<'a> Product<&'a Goldilocks> for Goldilocks {
    fn product<I: Iterator<Item = &'a Goldilocks>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

/// Reduces a 128-bit product to a canonical element.
///
/// Writing `x = x_lo + 2^64 x_hi_lo + 2^96 x_hi_hi`, the identities
/// `2^64 = EPSILON` and `2^96 = -1` give
/// `x = x_lo - x_hi_hi + EPSILON * x_hi_lo`.
#[inline]
pub fn reduce128(x: u128) -> Goldilocks {
    let (x_lo, x_hi) = split(x);
    let x_hi_hi = x_hi >> 32;
    let x_hi_lo = x_hi & EPSILON;

    let (mut t0, borrow) = x_lo.overflowing_sub(x_hi_hi);
    if borrow {
        t0 -= EPSILON; // cannot underflow
    }
    let t1 = x_hi_lo * EPSILON;
    // t0 < 2^64 and t1 <= (2^32 - 1)^2, so folding the carry of t0 + t1
    // back in as EPSILON cannot overflow again
    let (t2, carry) = t0.overflowing_add(t1);
    Goldilocks::from_u64(t2 + EPSILON * (carry as u64))
}
