use super::{unwrap_or_panic, BigInt};
use crate::digits::math::{self, small};
use crate::digits::{DigitBuf, Limb};
use crate::error::{Error, ErrorCode, Result};
use std::mem;

const LIMB_BYTES: usize = mem::size_of::<Limb>();

/// Byte order of a fixed-width integer encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

impl BigInt {
    /// Build a non-negative value from a `u128`.
    pub fn try_from_u128(value: u128) -> Result<BigInt> {
        Ok(BigInt::from_parts(false, math::from_u128(value)?))
    }

    /// Build a value from an `i128`.
    pub fn try_from_i128(value: i128) -> Result<BigInt> {
        Ok(BigInt::from_parts(
            value < 0,
            math::from_u128(value.unsigned_abs())?,
        ))
    }

    fn low_u128(&self) -> Option<u128> {
        if self.bit_length() > 128 {
            None
        } else {
            Some(math::low_u128(&self.mag))
        }
    }

    /// The value as an `i128`, or `None` if it does not fit.
    pub(crate) fn as_i128(&self) -> Option<i128> {
        let mag = self.low_u128()?;
        if self.negative {
            if mag <= i128::MIN.unsigned_abs() {
                Some((mag as i128).wrapping_neg())
            } else {
                None
            }
        } else {
            i128::try_from(mag).ok()
        }
    }

    /// The value as a `u128`, or `None` if it is negative or does not fit.
    pub(crate) fn as_u128(&self) -> Option<u128> {
        if self.negative {
            None
        } else {
            self.low_u128()
        }
    }

    /// Convert to `i64`; an overflow error if the value does not fit.
    pub fn to_i64(&self) -> Result<i64> {
        self.as_i128()
            .and_then(|v| i64::try_from(v).ok())
            .ok_or_else(|| Error::new(ErrorCode::DoesNotFit("i64")))
    }

    /// Convert to `u64`; an overflow error if the value does not fit.
    pub fn to_u64(&self) -> Result<u64> {
        self.as_u128()
            .and_then(|v| u64::try_from(v).ok())
            .ok_or_else(|| Error::new(ErrorCode::DoesNotFit("u64")))
    }

    /// Convert to `i128`; an overflow error if the value does not fit.
    pub fn to_i128(&self) -> Result<i128> {
        self.as_i128()
            .ok_or_else(|| Error::new(ErrorCode::DoesNotFit("i128")))
    }

    /// Convert to `u128`; an overflow error if the value does not fit.
    pub fn to_u128(&self) -> Result<u128> {
        self.as_u128()
            .ok_or_else(|| Error::new(ErrorCode::DoesNotFit("u128")))
    }

    /// Convert to the nearest `f64`, ties to even.
    ///
    /// Values whose magnitude rounds beyond `f64::MAX` are an overflow error.
    pub fn to_f64(&self) -> Result<f64> {
        let bits = self.bit_length();
        let magnitude = if bits <= 64 {
            // The hardware conversion rounds to nearest, ties to even.
            math::low_u128(&self.mag) as u64 as f64
        } else if bits > f64::MAX_EXP as u64 {
            return Err(Error::new(ErrorCode::DoesNotFit("f64")));
        } else {
            // Keep 53 significant bits and round on the 11 dropped ones,
            // with every lower limb acting as a sticky bit.
            const DROPPED: u32 = 64 - f64::MANTISSA_DIGITS;
            const HALFWAY: u64 = 1 << (DROPPED - 1);
            let (hi, rest) = math::hi64(&self.mag);
            let mut mant = hi >> DROPPED;
            let truncated = hi & ((1 << DROPPED) - 1);
            if truncated > HALFWAY || (truncated == HALFWAY && (rest || mant & 1 == 1)) {
                mant += 1;
            }
            let exp = (bits - f64::MANTISSA_DIGITS as u64) as i32;
            mant as f64 * 2f64.powi(exp)
        };
        if magnitude.is_infinite() {
            return Err(Error::new(ErrorCode::DoesNotFit("f64")));
        }
        Ok(if self.negative { -magnitude } else { magnitude })
    }

    /// Encode the value in exactly `length` bytes.
    ///
    /// With `signed`, the encoding is two's complement. A value that does not
    /// fit, or a negative value without `signed`, is an overflow error.
    pub fn to_bytes(&self, length: usize, order: ByteOrder, signed: bool) -> Result<Vec<u8>> {
        if self.negative && !signed {
            return Err(Error::new(ErrorCode::NegativeUnsigned));
        }
        let bits = self.bit_length();
        let room = (length as u64).saturating_mul(8);
        let fits = if !signed {
            bits <= room
        } else if !self.negative {
            bits == 0 || bits < room
        } else {
            // -m fits when m - 1 has fewer than `room` bits.
            let is_pow2 = self.trailing_zeros() == Some(bits - 1);
            let dec_bits = if is_pow2 { bits - 1 } else { bits };
            dec_bits < room
        };
        if !fits {
            return Err(Error::new(ErrorCode::DoesNotFit("bytes")));
        }

        let mut out = Vec::new();
        out.try_reserve_exact(length)?;
        let byte = |i: usize| -> u8 {
            self.mag
                .get(i / LIMB_BYTES)
                .map_or(0, |&limb| (limb >> (8 * (i % LIMB_BYTES))) as u8)
        };
        if self.negative {
            // !(m - 1), one byte at a time.
            let mut borrow = true;
            for i in 0..length {
                let (b, under) = byte(i).overflowing_sub(borrow as u8);
                borrow = under;
                out.push(!b);
            }
        } else {
            out.extend((0..length).map(byte));
        }
        if order == ByteOrder::Big {
            out.reverse();
        }
        Ok(out)
    }

    /// Decode a fixed-width encoding produced by [`to_bytes`](BigInt::to_bytes).
    pub fn from_bytes(bytes: &[u8], order: ByteOrder, signed: bool) -> Result<BigInt> {
        let len = bytes.len();
        let le = |i: usize| match order {
            ByteOrder::Little => bytes[i],
            ByteOrder::Big => bytes[len - 1 - i],
        };
        let negative = signed && len != 0 && le(len - 1) & 0x80 != 0;

        let nlimbs = (len + LIMB_BYTES - 1) / LIMB_BYTES;
        let mut mag = DigitBuf::with_capacity(nlimbs + 1)?;
        for chunk in 0..nlimbs {
            let mut limb: Limb = 0;
            for k in 0..LIMB_BYTES {
                let i = chunk * LIMB_BYTES + k;
                if i < len {
                    let b = if negative { !le(i) } else { le(i) };
                    limb |= (b as Limb) << (8 * k);
                }
            }
            mag.push(limb);
        }
        mag.normalize();
        if negative {
            small::iadd(&mut mag, 1);
        }
        Ok(BigInt::from_parts(negative, mag))
    }
}

macro_rules! from_native {
    ($via:ident: $($ty:ty)*) => {
        $(
            /// # Panics
            ///
            /// Panics if the digits cannot be allocated.
            impl From<$ty> for BigInt {
                #[inline]
                #[track_caller]
                fn from(value: $ty) -> BigInt {
                    unwrap_or_panic(BigInt::$via(value as _))
                }
            }
        )*
    };
}

from_native!(try_from_i128: i8 i16 i32 i64 i128 isize);
from_native!(try_from_u128: u8 u16 u32 u64 u128 usize);

impl From<bool> for BigInt {
    #[inline]
    fn from(value: bool) -> BigInt {
        BigInt::from(value as u8)
    }
}

/// Exact conversion from a float.
///
/// A value with a fractional part is a type error; an infinity or NaN is a
/// value error.
impl TryFrom<f64> for BigInt {
    type Error = Error;

    fn try_from(value: f64) -> Result<BigInt> {
        if !value.is_finite() {
            return Err(Error::new(ErrorCode::NotFinite));
        }
        if value.fract() != 0.0 {
            return Err(Error::new(ErrorCode::NotIntegral));
        }
        if value == 0.0 {
            return Ok(BigInt::ZERO);
        }
        let bits = value.to_bits();
        let biased = ((bits >> 52) & 0x7FF) as i64;
        let fraction = bits & ((1 << 52) - 1);
        let (mant, exp) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1 << 52), biased - 1075)
        };
        let mag = math::from_u128(mant as u128)?;
        let mag = if exp >= 0 {
            small::shl(&mag, exp as u64)?
        } else {
            // Integral, so the shifted-out bits are zero.
            small::shr(&mag, exp.unsigned_abs())?
        };
        Ok(BigInt::from_parts(value < 0.0, mag))
    }
}

macro_rules! try_into_native {
    ($($ty:ident => $conv:ident)*) => {
        $(
            impl TryFrom<&BigInt> for $ty {
                type Error = Error;

                #[inline]
                fn try_from(value: &BigInt) -> Result<$ty> {
                    value.$conv()
                }
            }

            impl TryFrom<BigInt> for $ty {
                type Error = Error;

                #[inline]
                fn try_from(value: BigInt) -> Result<$ty> {
                    value.$conv()
                }
            }
        )*
    };
}

try_into_native! {
    i64 => to_i64
    u64 => to_u64
    i128 => to_i128
    u128 => to_u128
    f64 => to_f64
}
