//! The arbitrary-precision signed integer.

use crate::digits::{Backend, DigitArith, DigitBuf, Limb};
use crate::error::Result;
use std::fmt::{self, Debug};

mod arith;
mod bits;
mod cmp;
mod convert;
mod de;
mod hash;
mod ser;
pub(crate) mod text;
mod traits;

pub use self::convert::ByteOrder;
pub use self::hash::HASH_MODULUS;

/// Unwrap the result of a fallible operation behind an operator trait.
#[track_caller]
pub(crate) fn unwrap_or_panic<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}

/// Sign of a [`BigInt`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Minus,
    Zero,
    Plus,
}

/// An immutable arbitrary-precision signed integer.
///
/// Stored as a sign and a little-endian magnitude of [`Limb`]s with no
/// most-significant zero limbs; zero has an empty magnitude and is never
/// negative. Every operation produces a new value.
///
/// Operations that allocate come in two flavors: the `try_` methods, which
/// report allocation failure and size ceilings as an [`Error`](crate::Error),
/// and the `std::ops` operators, which panic on the same conditions.
pub struct BigInt {
    negative: bool,
    mag: DigitBuf,
}

impl BigInt {
    /// The integer `0`.
    pub const ZERO: BigInt = BigInt {
        negative: false,
        mag: DigitBuf::new(),
    };

    /// Build a value from a sign and a magnitude, restoring the canonical
    /// form.
    pub(crate) fn from_parts(negative: bool, mut mag: DigitBuf) -> BigInt {
        mag.normalize();
        let negative = negative && !mag.is_empty();
        BigInt { negative, mag }
    }

    pub(crate) fn into_parts(self) -> (bool, DigitBuf) {
        let BigInt { negative, mag } = self;
        (negative, mag)
    }

    /// The little-endian limbs of the magnitude.
    #[inline]
    pub fn limbs(&self) -> &[Limb] {
        &self.mag
    }

    /// Copy the value into freshly acquired digits.
    pub fn try_clone(&self) -> Result<BigInt> {
        Ok(BigInt {
            negative: self.negative,
            mag: self.mag.try_clone()?,
        })
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        if self.negative {
            Sign::Minus
        } else if self.mag.is_empty() {
            Sign::Zero
        } else {
            Sign::Plus
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mag.is_empty()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.mag.is_empty()
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        self.mag.first().map_or(false, |&low| low & 1 == 1)
    }

    #[inline]
    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Number of bits in the magnitude, excluding sign and leading zeros.
    ///
    /// `0` has a bit length of 0.
    #[inline]
    pub fn bit_length(&self) -> u64 {
        Backend::bit_length(&self.mag)
    }

    /// Number of trailing zero bits, or `None` for `0`.
    #[inline]
    pub fn trailing_zeros(&self) -> Option<u64> {
        if self.is_zero() {
            None
        } else {
            Some(crate::digits::math::small::trailing_zeros(&self.mag))
        }
    }

    /// `-self`.
    pub fn try_neg(&self) -> Result<BigInt> {
        Ok(BigInt::from_parts(!self.negative, self.mag.try_clone()?))
    }

    /// `|self|`.
    pub fn try_abs(&self) -> Result<BigInt> {
        Ok(BigInt::from_parts(false, self.mag.try_clone()?))
    }

    pub(crate) fn into_neg(self) -> BigInt {
        let (negative, mag) = self.into_parts();
        BigInt::from_parts(!negative, mag)
    }
}

/// # Panics
///
/// Panics if the digits cannot be allocated; see [`BigInt::try_clone`].
impl Clone for BigInt {
    #[track_caller]
    fn clone(&self) -> Self {
        unwrap_or_panic(self.try_clone())
    }
}

impl Default for BigInt {
    fn default() -> Self {
        BigInt::ZERO
    }
}

impl Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
