use super::{unwrap_or_panic, BigInt};
use crate::digits::math::low_u128;
use crate::digits::{Backend, DigitArith, Limb, BITCNT_MAX};
use crate::error::{Error, ErrorCode, Result};
use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

fn add_signed(xneg: bool, x: &[Limb], yneg: bool, y: &[Limb]) -> Result<BigInt> {
    if xneg == yneg {
        return Ok(BigInt::from_parts(xneg, Backend::add(x, y)?));
    }
    match Backend::compare(x, y) {
        Ordering::Equal => Ok(BigInt::ZERO),
        Ordering::Greater => Ok(BigInt::from_parts(xneg, Backend::sub(x, y)?)),
        Ordering::Less => Ok(BigInt::from_parts(yneg, Backend::sub(y, x)?)),
    }
}

/// `2**exp` for `-1074 <= exp <= 1023`.
fn pow2(exp: i64) -> f64 {
    if exp >= f64::MIN_EXP as i64 - 1 {
        f64::from_bits(((exp + 1023) as u64) << 52)
    } else {
        f64::from_bits(1 << (exp + 1074))
    }
}

impl BigInt {
    /// `self + other`.
    pub fn try_add(&self, other: &BigInt) -> Result<BigInt> {
        add_signed(self.negative, &self.mag, other.negative, &other.mag)
    }

    /// `self - other`.
    pub fn try_sub(&self, other: &BigInt) -> Result<BigInt> {
        add_signed(self.negative, &self.mag, !other.negative, &other.mag)
    }

    /// `self * other`.
    pub fn try_mul(&self, other: &BigInt) -> Result<BigInt> {
        let mag = Backend::mul(&self.mag, &other.mag)?;
        Ok(BigInt::from_parts(self.negative != other.negative, mag))
    }

    /// Floor division and modulo.
    ///
    /// The quotient is rounded toward negative infinity and the remainder
    /// takes the sign of the divisor, so `self == q * other + r` with
    /// `|r| < |other|`.
    pub fn try_divmod(&self, other: &BigInt) -> Result<(BigInt, BigInt)> {
        if other.is_zero() {
            return Err(Error::new(ErrorCode::DivisionByZero));
        }
        let (q, r) = Backend::divrem(&self.mag, &other.mag)?;
        let negative = self.negative != other.negative;
        if negative && !r.is_empty() {
            let q = Backend::add(&q, &[1])?;
            let r = Backend::sub(&other.mag, &r)?;
            Ok((
                BigInt::from_parts(true, q),
                BigInt::from_parts(other.negative, r),
            ))
        } else {
            Ok((
                BigInt::from_parts(negative, q),
                BigInt::from_parts(other.negative, r),
            ))
        }
    }

    /// `floor(self / other)`.
    pub fn try_div_floor(&self, other: &BigInt) -> Result<BigInt> {
        self.try_divmod(other).map(|(q, _)| q)
    }

    /// `self - other * floor(self / other)`.
    pub fn try_mod_floor(&self, other: &BigInt) -> Result<BigInt> {
        self.try_divmod(other).map(|(_, r)| r)
    }

    /// Division rounding the quotient to the nearest integer, ties to even.
    ///
    /// The remainder is `self - q * other` and satisfies
    /// `|r| <= |other| / 2`.
    pub fn try_divmod_near(&self, other: &BigInt) -> Result<(BigInt, BigInt)> {
        let (q, r) = self.try_divmod(other)?;
        // r / other > 1/2, or exactly 1/2 with q odd, rounds away.
        let away = if other.is_negative() {
            Ordering::Less
        } else {
            Ordering::Greater
        };
        let ord = r.try_shl(1)?.cmp(other);
        if !(ord == away || (ord == Ordering::Equal && q.is_odd())) {
            return Ok((q, r));
        }
        let q = q.try_add(&BigInt::try_from_u128(1)?)?;
        let r = r.try_sub(other)?;
        Ok((q, r))
    }

    /// True division, correctly rounded to the nearest `f64` with ties to
    /// even.
    ///
    /// A quotient too large for a float is an overflow error; one too small
    /// rounds to a zero carrying the quotient's sign, and `0 / -n` is `-0.0`.
    pub fn try_truediv(&self, other: &BigInt) -> Result<f64> {
        if other.is_zero() {
            return Err(Error::new(ErrorCode::DivisionByZero));
        }
        let negative = self.negative != other.negative;
        let signed = |x: f64| if negative { -x } else { x };
        let too_large = || Error::new(ErrorCode::DoesNotFit("f64"));
        if self.is_zero() {
            return Ok(signed(0.0));
        }

        // 2**(e - 1) < |self / other| < 2**(e + 1)
        let e = self.bit_length() as i64 - other.bit_length() as i64;
        if e > f64::MAX_EXP as i64 {
            return Err(too_large());
        }
        if e < f64::MIN_EXP as i64 - 54 {
            return Ok(signed(0.0));
        }

        // Scale so the integer quotient has 55 or 56 bits.
        let shift = 55 - e;
        let (q, r) = if shift >= 0 {
            let num = Backend::shl(&self.mag, shift as u64)?;
            Backend::divrem(&num, &other.mag)?
        } else {
            let den = Backend::shl(&other.mag, shift.unsigned_abs())?;
            Backend::divrem(&self.mag, &den)?
        };
        let sticky = !r.is_empty();
        let q = low_u128(&q) as u64;
        let bits = (u64::BITS - q.leading_zeros()) as i64;

        let top = bits - 1 - shift;
        if top >= f64::MAX_EXP as i64 {
            return Err(too_large());
        }
        // Subnormal results hold fewer significant bits.
        let keep = if top < f64::MIN_EXP as i64 - 1 {
            top + 1075
        } else {
            f64::MANTISSA_DIGITS as i64
        };
        let dropped = (bits - keep) as u32;
        let half = 1u64 << (dropped - 1);
        let rest = q & ((1u64 << dropped) - 1);
        let mut mant = q >> dropped;
        if rest > half || (rest == half && (sticky || mant & 1 == 1)) {
            mant += 1;
        }

        let value = mant as f64 * pow2(dropped as i64 - shift);
        if value.is_infinite() {
            return Err(too_large());
        }
        Ok(signed(value))
    }

    /// `self ** exp`.
    ///
    /// Fails with an overflow error when the result would exceed the maximal
    /// bit count.
    pub fn try_pow(&self, exp: u64) -> Result<BigInt> {
        if exp == 0 {
            return BigInt::try_from_u128(1);
        }
        if self.is_zero() {
            return Ok(BigInt::ZERO);
        }
        let negative = self.negative && exp & 1 == 1;
        if *self.mag == [1] {
            return BigInt::try_from_i128(if negative { -1 } else { 1 });
        }

        let bits = self.bit_length();
        match (bits - 1).checked_mul(exp) {
            Some(lower) if lower < BITCNT_MAX => {}
            _ => return Err(Error::too_many_bits()),
        }

        // Left-to-right binary exponentiation.
        let mut acc = self.mag.try_clone()?;
        let top = 63 - exp.leading_zeros();
        for i in (0..top).rev() {
            acc = Backend::mul(&acc, &acc)?;
            if exp >> i & 1 == 1 {
                acc = Backend::mul(&acc, &self.mag)?;
            }
        }
        Ok(BigInt::from_parts(negative, acc))
    }

    /// `self ** exp % modulus`.
    ///
    /// The result lies in `[0, m)` for a positive modulus and in `(m, 0]`
    /// for a negative one. A negative exponent raises the modular inverse of
    /// `self`, which fails with a value error when it does not exist. A zero
    /// modulus is a value error.
    pub fn try_powm(&self, exp: &BigInt, modulus: &BigInt) -> Result<BigInt> {
        if modulus.is_zero() {
            return Err(Error::new(ErrorCode::ZeroModulus));
        }
        let m = modulus.try_abs()?;
        let base = if exp.is_negative() {
            self.inverse_abs(&m)?
        } else {
            self.try_mod_floor(&m)?
        };

        let mut acc = if *m.mag == [1] || (base.is_zero() && !exp.is_zero()) {
            BigInt::ZERO
        } else {
            BigInt::try_from_u128(1)?
        };
        if !acc.is_zero() {
            for i in (0..exp.bit_length()).rev() {
                acc = acc.try_mul(&acc)?.try_mod_floor(&m)?;
                if crate::digits::math::bit(&exp.mag, i) {
                    acc = acc.try_mul(&base)?.try_mod_floor(&m)?;
                }
            }
        }

        if modulus.is_negative() && !acc.is_zero() {
            acc = acc.try_sub(&m)?;
        }
        Ok(acc)
    }

    /// The inverse of `self` modulo `modulus`.
    ///
    /// Follows the sign convention of [`try_powm`](BigInt::try_powm).
    pub fn try_inverse(&self, modulus: &BigInt) -> Result<BigInt> {
        if modulus.is_zero() {
            return Err(Error::new(ErrorCode::ZeroModulus));
        }
        let m = modulus.try_abs()?;
        let inv = self.inverse_abs(&m)?;
        if modulus.is_negative() && !inv.is_zero() {
            inv.try_sub(&m)
        } else {
            Ok(inv)
        }
    }

    /// Inverse in `[0, m)` for a positive `m`.
    fn inverse_abs(&self, m: &BigInt) -> Result<BigInt> {
        let (g, x, _) = crate::ntheory::extended_gcd(self, m)?;
        if *g.mag != [1] {
            return Err(Error::new(ErrorCode::NotInvertible));
        }
        x.try_mod_floor(m)
    }
}

macro_rules! forward_binop {
    (impl $imp:ident, $method:ident => $try:ident) => {
        impl $imp<&BigInt> for &BigInt {
            type Output = BigInt;

            #[inline]
            #[track_caller]
            fn $method(self, other: &BigInt) -> BigInt {
                unwrap_or_panic(self.$try(other))
            }
        }

        impl $imp<BigInt> for &BigInt {
            type Output = BigInt;

            #[inline]
            #[track_caller]
            fn $method(self, other: BigInt) -> BigInt {
                unwrap_or_panic(self.$try(&other))
            }
        }

        impl $imp<&BigInt> for BigInt {
            type Output = BigInt;

            #[inline]
            #[track_caller]
            fn $method(self, other: &BigInt) -> BigInt {
                unwrap_or_panic(self.$try(other))
            }
        }

        impl $imp<BigInt> for BigInt {
            type Output = BigInt;

            #[inline]
            #[track_caller]
            fn $method(self, other: BigInt) -> BigInt {
                unwrap_or_panic(self.$try(&other))
            }
        }
    };
}

pub(super) use forward_binop;

// # Panics
//
// The operators panic where the corresponding `try_` method fails: on
// allocation failure, and for `/` and `%` on a zero divisor. `/` and `%`
// follow floor semantics, unlike the primitive integers which truncate.
forward_binop!(impl Add, add => try_add);
forward_binop!(impl Sub, sub => try_sub);
forward_binop!(impl Mul, mul => try_mul);
forward_binop!(impl Div, div => try_div_floor);
forward_binop!(impl Rem, rem => try_mod_floor);

impl Neg for BigInt {
    type Output = BigInt;

    #[inline]
    fn neg(self) -> BigInt {
        self.into_neg()
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    #[inline]
    #[track_caller]
    fn neg(self) -> BigInt {
        unwrap_or_panic(self.try_neg())
    }
}
