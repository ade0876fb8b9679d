use super::arith::forward_binop;
use super::{unwrap_or_panic, BigInt};
use crate::digits::{Backend, BitOp, DigitArith, BITCNT_MAX};
use crate::error::{Error, ErrorCode, Result};
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

impl BigInt {
    fn bitwise(&self, op: BitOp, other: &BigInt) -> Result<BigInt> {
        let (mag, negative) =
            Backend::bitwise(op, &self.mag, self.negative, &other.mag, other.negative)?;
        Ok(BigInt::from_parts(negative, mag))
    }

    /// `self & other`, with negative values in two's complement.
    pub fn try_bitand(&self, other: &BigInt) -> Result<BigInt> {
        self.bitwise(BitOp::And, other)
    }

    /// `self | other`, with negative values in two's complement.
    pub fn try_bitor(&self, other: &BigInt) -> Result<BigInt> {
        self.bitwise(BitOp::Or, other)
    }

    /// `self ^ other`, with negative values in two's complement.
    pub fn try_bitxor(&self, other: &BigInt) -> Result<BigInt> {
        self.bitwise(BitOp::Xor, other)
    }

    /// `!self`, which is `-self - 1`.
    pub fn try_not(&self) -> Result<BigInt> {
        if self.negative {
            Ok(BigInt::from_parts(false, Backend::sub(&self.mag, &[1])?))
        } else {
            Ok(BigInt::from_parts(true, Backend::add(&self.mag, &[1])?))
        }
    }

    /// `self * 2**bits`.
    ///
    /// Fails with an overflow error when the result would exceed the maximal
    /// bit count.
    pub fn try_shl(&self, bits: u64) -> Result<BigInt> {
        if self.is_zero() {
            return Ok(BigInt::ZERO);
        }
        match self.bit_length().checked_add(bits) {
            Some(total) if total <= BITCNT_MAX => {}
            _ => return Err(Error::too_many_bits()),
        }
        Ok(BigInt::from_parts(self.negative, Backend::shl(&self.mag, bits)?))
    }

    /// `floor(self / 2**bits)`.
    ///
    /// Shifting a negative value right rounds toward negative infinity, so
    /// any shift past the bit length yields `-1`.
    pub fn try_shr(&self, bits: u64) -> Result<BigInt> {
        if !self.negative {
            return Ok(BigInt::from_parts(false, Backend::shr(&self.mag, bits)?));
        }
        // -(((m - 1) >> bits) + 1)
        let dec = Backend::sub(&self.mag, &[1])?;
        let shifted = Backend::shr(&dec, bits)?;
        drop(dec);
        Ok(BigInt::from_parts(true, Backend::add(&shifted, &[1])?))
    }

    /// Shift left by a signed, arbitrary-precision count.
    ///
    /// A negative count is a value error.
    pub fn try_shl_by(&self, bits: &BigInt) -> Result<BigInt> {
        if bits.is_negative() {
            return Err(Error::new(ErrorCode::NegativeShift));
        }
        if self.is_zero() {
            return Ok(BigInt::ZERO);
        }
        match bits.to_u64() {
            Ok(bits) => self.try_shl(bits),
            Err(_) => Err(Error::too_many_bits()),
        }
    }

    /// Shift right by a signed, arbitrary-precision count.
    ///
    /// A negative count is a value error.
    pub fn try_shr_by(&self, bits: &BigInt) -> Result<BigInt> {
        if bits.is_negative() {
            return Err(Error::new(ErrorCode::NegativeShift));
        }
        self.try_shr(bits.to_u64().unwrap_or(u64::MAX))
    }
}

// # Panics
//
// The operators panic where the corresponding `try_` method fails.
forward_binop!(impl BitAnd, bitand => try_bitand);
forward_binop!(impl BitOr, bitor => try_bitor);
forward_binop!(impl BitXor, bitxor => try_bitxor);

impl Not for BigInt {
    type Output = BigInt;

    #[inline]
    #[track_caller]
    fn not(self) -> BigInt {
        unwrap_or_panic(self.try_not())
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    #[inline]
    #[track_caller]
    fn not(self) -> BigInt {
        unwrap_or_panic(self.try_not())
    }
}

macro_rules! impl_shift {
    ($($ty:ty)*) => {
        $(
            impl Shl<$ty> for &BigInt {
                type Output = BigInt;

                #[inline]
                #[track_caller]
                fn shl(self, bits: $ty) -> BigInt {
                    unwrap_or_panic(self.try_shl(bits as u64))
                }
            }

            impl Shl<$ty> for BigInt {
                type Output = BigInt;

                #[inline]
                #[track_caller]
                fn shl(self, bits: $ty) -> BigInt {
                    unwrap_or_panic(self.try_shl(bits as u64))
                }
            }

            impl Shr<$ty> for &BigInt {
                type Output = BigInt;

                #[inline]
                #[track_caller]
                fn shr(self, bits: $ty) -> BigInt {
                    unwrap_or_panic(self.try_shr(bits as u64))
                }
            }

            impl Shr<$ty> for BigInt {
                type Output = BigInt;

                #[inline]
                #[track_caller]
                fn shr(self, bits: $ty) -> BigInt {
                    unwrap_or_panic(self.try_shr(bits as u64))
                }
            }
        )*
    };
}

impl_shift! { u8 u16 u32 u64 usize }
