//! Mantissa/exponent normalization for a multi-precision float library.
//!
//! A float is the tuple `(sign, man, exp, bc)` standing for
//! `(-1)**sign * man * 2**exp`, where `man >= 0` has `bc` significant bits.
//! Normalized tuples have an odd mantissa, or are the zero tuple.

use crate::bigint::BigInt;
use crate::digits::math;
use crate::error::{Error, ErrorCode, Result};
use std::fmt::{self, Display};
use std::str::FromStr;

/// How excess mantissa bits are discarded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// `n`: to nearest, ties to even.
    Nearest,
    /// `f`: toward negative infinity.
    Floor,
    /// `c`: toward positive infinity.
    Ceiling,
    /// `d`: toward zero.
    Down,
    /// `u`: away from zero.
    Up,
}

impl RoundingMode {
    /// The single-character code of the mode.
    pub fn code(self) -> char {
        match self {
            RoundingMode::Nearest => 'n',
            RoundingMode::Floor => 'f',
            RoundingMode::Ceiling => 'c',
            RoundingMode::Down => 'd',
            RoundingMode::Up => 'u',
        }
    }

    /// Whether a magnitude with this sign is truncated rather than rounded
    /// up. Not meaningful for [`Nearest`](RoundingMode::Nearest).
    fn truncates(self, negative: bool) -> bool {
        match self {
            RoundingMode::Floor => !negative,
            RoundingMode::Ceiling => negative,
            RoundingMode::Down => true,
            RoundingMode::Up | RoundingMode::Nearest => false,
        }
    }
}

impl TryFrom<char> for RoundingMode {
    type Error = Error;

    fn try_from(code: char) -> Result<RoundingMode> {
        match code {
            'n' => Ok(RoundingMode::Nearest),
            'f' => Ok(RoundingMode::Floor),
            'c' => Ok(RoundingMode::Ceiling),
            'd' => Ok(RoundingMode::Down),
            'u' => Ok(RoundingMode::Up),
            _ => Err(Error::new(ErrorCode::InvalidRoundingMode)),
        }
    }
}

impl FromStr for RoundingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<RoundingMode> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => RoundingMode::try_from(code),
            _ => Err(Error::new(ErrorCode::InvalidRoundingMode)),
        }
    }
}

impl Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A `(sign, man, exp, bc)` float tuple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NormalizedFloat {
    pub negative: bool,
    pub man: BigInt,
    pub exp: BigInt,
    pub bc: u64,
}

impl NormalizedFloat {
    /// The zero tuple `(0, 0, 0, 0)`.
    pub const ZERO: NormalizedFloat = NormalizedFloat {
        negative: false,
        man: BigInt::ZERO,
        exp: BigInt::ZERO,
        bc: 0,
    };

    pub fn into_tuple(self) -> (bool, BigInt, BigInt, u64) {
        (self.negative, self.man, self.exp, self.bc)
    }
}

fn add_u64(exp: &BigInt, n: u64) -> Result<BigInt> {
    exp.try_add(&BigInt::try_from_u128(n as u128)?)
}

/// Move the trailing zero bits of `man` into the exponent.
fn strip_trailing(negative: bool, man: BigInt, exp: BigInt, bc: u64) -> Result<NormalizedFloat> {
    let zeros = match man.trailing_zeros() {
        Some(0) | None => {
            return Ok(NormalizedFloat {
                negative,
                man,
                exp,
                bc,
            })
        }
        Some(zeros) => zeros,
    };
    Ok(NormalizedFloat {
        negative,
        man: man.try_shr(zeros)?,
        exp: add_u64(&exp, zeros)?,
        bc: bc.saturating_sub(zeros),
    })
}

/// Round `man` to at most `prec` bits and strip trailing zero bits.
///
/// `bc` must be the bit length of `man`. A zero mantissa yields the zero
/// tuple; a negative mantissa is a value error.
///
/// ```
/// use zzint::mpmath::{normalize, RoundingMode};
/// use zzint::BigInt;
///
/// // 0b111 rounded to two bits is 0b1000.
/// let f = normalize(false, &BigInt::from(7), &BigInt::ZERO, 3, 2, RoundingMode::Nearest).unwrap();
/// assert_eq!(f.into_tuple(), (false, BigInt::from(1), BigInt::from(3), 1));
/// ```
pub fn normalize(
    negative: bool,
    man: &BigInt,
    exp: &BigInt,
    bc: u64,
    prec: u64,
    rnd: RoundingMode,
) -> Result<NormalizedFloat> {
    if man.is_negative() {
        return Err(Error::new(ErrorCode::NegativeArgument("normalize")));
    }
    if man.is_zero() {
        return Ok(NormalizedFloat::ZERO);
    }
    if bc <= prec {
        if man.is_odd() {
            return Ok(NormalizedFloat {
                negative,
                man: man.try_clone()?,
                exp: exp.try_clone()?,
                bc,
            });
        }
        return strip_trailing(negative, man.try_clone()?, exp.try_clone()?, bc);
    }

    let n = bc - prec;
    let digits = man.limbs();
    let round_up = match rnd {
        RoundingMode::Nearest => {
            math::bit(digits, n - 1)
                && (math::bit(digits, n) || math::nonzero_below(digits, n - 1))
        }
        _ if rnd.truncates(negative) => false,
        _ => math::nonzero_below(digits, n),
    };
    let mut rounded = man.try_shr(n)?;
    if round_up {
        rounded = rounded.try_add(&BigInt::try_from_u128(1)?)?;
    }
    let exp = add_u64(exp, n)?;

    if rounded.is_zero() {
        return Ok(NormalizedFloat {
            negative,
            man: BigInt::ZERO,
            exp,
            bc: 0,
        });
    }
    let mut out = strip_trailing(negative, rounded, exp, prec)?;
    // Rounding an all-ones mantissa up carries into a new bit.
    if *out.man.limbs() == [1] {
        out.bc = 1;
    }
    Ok(out)
}

/// Build a float tuple from a signed mantissa and an exponent.
///
/// With `prec == 0` the mantissa is kept exact and only its trailing zero
/// bits move into the exponent; otherwise it is rounded as by
/// [`normalize`].
pub fn create(man: &BigInt, exp: &BigInt, prec: u64, rnd: RoundingMode) -> Result<NormalizedFloat> {
    let negative = man.is_negative();
    let abs = man.try_abs()?;
    let bc = abs.bit_length();
    if prec == 0 {
        if abs.is_zero() {
            return Ok(NormalizedFloat::ZERO);
        }
        return strip_trailing(negative, abs, exp.try_clone()?, bc);
    }
    normalize(negative, &abs, exp, bc, prec, rnd)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(negative: bool, man: u64, exp: i64, prec: u64, rnd: char) -> (bool, u64, i64, u64) {
        let man = BigInt::from(man);
        let bc = man.bit_length();
        let rnd = RoundingMode::try_from(rnd).unwrap();
        let f = normalize(negative, &man, &BigInt::from(exp), bc, prec, rnd).unwrap();
        (f.negative, f.man.to_u64().unwrap(), f.exp.to_i64().unwrap(), f.bc)
    }

    #[test]
    fn rounding_codes() {
        for code in "nfcdu".chars() {
            assert_eq!(RoundingMode::try_from(code).unwrap().code(), code);
        }
        assert!("q".parse::<RoundingMode>().unwrap_err().is_value());
        assert!("nn".parse::<RoundingMode>().is_err());
        assert!("".parse::<RoundingMode>().is_err());
    }

    #[test]
    fn exact_half() {
        // 0b1011 to three bits: the discarded bit is exactly half.
        assert_eq!(norm(false, 0b1011, 0, 3, 'n'), (false, 3, 2, 2));
        // 0b1001 to three bits: kept part 0b100 is even, stays.
        assert_eq!(norm(false, 0b1001, 0, 3, 'n'), (false, 1, 3, 1));
        assert_eq!(norm(false, 0b1011, 0, 3, 'f'), (false, 5, 1, 3));
        assert_eq!(norm(true, 0b1011, 0, 3, 'f'), (true, 3, 2, 2));
        assert_eq!(norm(false, 0b1011, 0, 3, 'c'), (false, 3, 2, 2));
        assert_eq!(norm(true, 0b1011, 0, 3, 'c'), (true, 5, 1, 3));
        assert_eq!(norm(true, 0b1011, 0, 3, 'd'), (true, 5, 1, 3));
        assert_eq!(norm(true, 0b1011, 0, 3, 'u'), (true, 3, 2, 2));
    }

    #[test]
    fn carry_into_new_bit() {
        assert_eq!(norm(false, 0b1111, 5, 3, 'n'), (false, 1, 9, 1));
        assert_eq!(norm(false, 0b1111, 5, 3, 'u'), (false, 1, 9, 1));
    }

    #[test]
    fn already_normal() {
        assert_eq!(norm(false, 0b101, -4, 53, 'n'), (false, 5, -4, 3));
        assert_eq!(norm(true, 232, -4, 4, 'n'), (true, 7, 1, 3));
        assert_eq!(norm(false, 0, 17, 3, 'n'), (false, 0, 0, 0));
    }

    #[test]
    fn zero_precision_rounds_to_zero() {
        let man = BigInt::from(0b100u8);
        let f = normalize(false, &man, &BigInt::ZERO, 3, 0, RoundingMode::Nearest).unwrap();
        assert_eq!(f.into_tuple(), (false, BigInt::ZERO, BigInt::from(3), 0));
    }
}
