//! `num-traits` integration.
//!
//! The trait methods cannot report allocation failure, so like the operators
//! they panic where the corresponding `try_` method would fail.

use super::{unwrap_or_panic, BigInt};
use crate::error::Error;
use num_traits::{FromPrimitive, Num, One, Pow, Signed, ToPrimitive, Zero};

impl Zero for BigInt {
    #[inline]
    fn zero() -> BigInt {
        BigInt::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        BigInt::is_zero(self)
    }
}

impl One for BigInt {
    #[inline]
    #[track_caller]
    fn one() -> BigInt {
        BigInt::from(1u8)
    }

    #[inline]
    fn is_one(&self) -> bool {
        !self.negative && *self.mag == [1]
    }
}

impl Num for BigInt {
    type FromStrRadixErr = Error;

    #[inline]
    fn from_str_radix(text: &str, radix: u32) -> Result<BigInt, Error> {
        BigInt::from_str_radix(text, radix)
    }
}

impl Signed for BigInt {
    #[track_caller]
    fn abs(&self) -> BigInt {
        unwrap_or_panic(self.try_abs())
    }

    #[track_caller]
    fn abs_sub(&self, other: &BigInt) -> BigInt {
        if self <= other {
            BigInt::ZERO
        } else {
            unwrap_or_panic(self.try_sub(other))
        }
    }

    #[track_caller]
    fn signum(&self) -> BigInt {
        match self.sign() {
            super::Sign::Minus => BigInt::from(-1i8),
            super::Sign::Zero => BigInt::ZERO,
            super::Sign::Plus => BigInt::from(1u8),
        }
    }

    #[inline]
    fn is_positive(&self) -> bool {
        BigInt::is_positive(self)
    }

    #[inline]
    fn is_negative(&self) -> bool {
        BigInt::is_negative(self)
    }
}

impl ToPrimitive for BigInt {
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        BigInt::to_i64(self).ok()
    }

    #[inline]
    fn to_u64(&self) -> Option<u64> {
        BigInt::to_u64(self).ok()
    }

    #[inline]
    fn to_i128(&self) -> Option<i128> {
        self.as_i128()
    }

    #[inline]
    fn to_u128(&self) -> Option<u128> {
        self.as_u128()
    }

    #[inline]
    fn to_f64(&self) -> Option<f64> {
        BigInt::to_f64(self).ok()
    }
}

impl FromPrimitive for BigInt {
    #[inline]
    fn from_i64(n: i64) -> Option<BigInt> {
        BigInt::try_from_i128(n as i128).ok()
    }

    #[inline]
    fn from_u64(n: u64) -> Option<BigInt> {
        BigInt::try_from_u128(n as u128).ok()
    }

    #[inline]
    fn from_i128(n: i128) -> Option<BigInt> {
        BigInt::try_from_i128(n).ok()
    }

    #[inline]
    fn from_u128(n: u128) -> Option<BigInt> {
        BigInt::try_from_u128(n).ok()
    }

    #[inline]
    fn from_f64(n: f64) -> Option<BigInt> {
        BigInt::try_from(n).ok()
    }
}

impl Pow<u64> for BigInt {
    type Output = BigInt;

    #[inline]
    #[track_caller]
    fn pow(self, exp: u64) -> BigInt {
        unwrap_or_panic(self.try_pow(exp))
    }
}

impl Pow<u64> for &BigInt {
    type Output = BigInt;

    #[inline]
    #[track_caller]
    fn pow(self, exp: u64) -> BigInt {
        unwrap_or_panic(self.try_pow(exp))
    }
}
