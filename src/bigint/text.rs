//! Text conversions.
//!
//! Parsing accepts the literal syntax of the host language's `int()`:
//! surrounding whitespace, an optional sign, an optional base prefix and
//! single underscores between digits.

use super::BigInt;
use crate::digits::math::small;
use crate::digits::{DigitBuf, Limb, LIMB_BITS};
use crate::error::{Error, ErrorCode, Result};
use std::fmt::{self, Binary, Display, LowerHex, Octal, UpperHex};
use std::str::{self, FromStr};

const LOWER: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn check_base(base: u32) -> Result<()> {
    if (2..=36).contains(&base) {
        Ok(())
    } else {
        Err(Error::new(ErrorCode::InvalidBase(base)))
    }
}

/// Largest power of `base` that fits a limb, and its exponent.
fn chunk(base: u32) -> (Limb, usize) {
    let base = base as Limb;
    let mut pow = base;
    let mut digits = 1;
    while let Some(next) = pow.checked_mul(base) {
        pow = next;
        digits += 1;
    }
    (pow, digits)
}

/// Upper bound on the number of digits of a magnitude of `bits` bits.
fn digits_for(bits: u64, base: u32) -> usize {
    (bits as f64 / (base as f64).log2()) as usize + 2
}

fn digit_value(c: u8) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some((c - b'0') as u32),
        b'a'..=b'z' => Some((c - b'a') as u32 + 10),
        b'A'..=b'Z' => Some((c - b'A') as u32 + 10),
        _ => None,
    }
}

/// Detect the base from a prefix, or strip a prefix that matches `base`.
fn strip_prefix(digits: &[u8], base: u32) -> (&[u8], u32, bool) {
    if digits.len() >= 2 && digits[0] == b'0' {
        let prefixed = match digits[1] {
            b'b' | b'B' => 2,
            b'o' | b'O' => 8,
            b'x' | b'X' => 16,
            _ => 0,
        };
        if prefixed != 0 && (base == 0 || base == prefixed) {
            return (&digits[2..], prefixed, true);
        }
    }
    (digits, if base == 0 { 10 } else { base }, false)
}

/// Validate underscore placement and digit values, returning the digit
/// values most significant first.
fn digit_values(body: &[u8], base: u32, prefixed: bool) -> Option<Vec<u8>> {
    // A single underscore may separate the prefix from the first digit.
    let body = match body {
        [b'_', rest @ ..] if prefixed => rest,
        _ => body,
    };
    if body.is_empty() || body[0] == b'_' || body[body.len() - 1] == b'_' {
        return None;
    }
    let mut prev = usize::MAX - 1;
    for pos in memchr::memchr_iter(b'_', body) {
        if pos == prev + 1 {
            return None;
        }
        prev = pos;
    }

    let mut values = Vec::new();
    values.try_reserve_exact(body.len()).ok()?;
    for &c in body {
        if c == b'_' {
            continue;
        }
        match digit_value(c) {
            Some(v) if v < base => values.push(v as u8),
            _ => return None,
        }
    }
    Some(values)
}

fn pack_pow2(values: &[u8], shift: u32) -> Result<DigitBuf> {
    let bits = values.len() as u64 * shift as u64;
    let nlimbs = usize::try_from((bits + LIMB_BITS as u64 - 1) / LIMB_BITS as u64)
        .map_err(|_| Error::too_many_bits())?;
    let mut mag = DigitBuf::zeroed(nlimbs)?;
    for (i, &v) in values.iter().rev().enumerate() {
        let pos = i as u64 * shift as u64;
        let limb = (pos / LIMB_BITS as u64) as usize;
        let offset = (pos % LIMB_BITS as u64) as u32;
        mag[limb] |= (v as Limb) << offset;
        if offset + shift > LIMB_BITS {
            mag[limb + 1] |= (v as Limb) >> (LIMB_BITS - offset);
        }
    }
    mag.normalize();
    Ok(mag)
}

fn pack_chunked(values: &[u8], base: u32) -> Result<DigitBuf> {
    let bits = (values.len() as f64 * (base as f64).log2()).ceil() as u64;
    let nlimbs = usize::try_from(bits / LIMB_BITS as u64 + 2).map_err(|_| Error::too_many_bits())?;
    let mut mag = DigitBuf::with_capacity(nlimbs)?;
    let (_, per) = chunk(base);
    for group in values.chunks(per) {
        let mut scale: Limb = 1;
        let mut value: Limb = 0;
        for &v in group {
            scale *= base as Limb;
            value = value * base as Limb + v as Limb;
        }
        small::imul(&mut mag, scale);
        small::iadd(&mut mag, value);
    }
    Ok(mag)
}

impl BigInt {
    /// Parse an integer literal in the given base.
    ///
    /// `base` is 2 to 36, or 0 to detect the base from a `0b`, `0o` or `0x`
    /// prefix. With base 0, a decimal literal may not have leading zeros
    /// unless it is zero.
    ///
    /// ```
    /// use zzint::BigInt;
    ///
    /// let n = BigInt::from_str_radix(" -0x_dead_beef\n", 0).unwrap();
    /// assert_eq!(n, -0xdead_beef_i64);
    /// ```
    pub fn from_str_radix(text: &str, base: u32) -> Result<BigInt> {
        if base != 0 {
            check_base(base)?;
        }
        let invalid = || Error::literal(text, base);

        let trimmed = text.trim().as_bytes();
        let (negative, unsigned) = match trimmed {
            [b'-', rest @ ..] => (true, rest),
            [b'+', rest @ ..] => (false, rest),
            _ => (false, trimmed),
        };
        let (body, radix, prefixed) = strip_prefix(unsigned, base);
        let values = digit_values(body, radix, prefixed).ok_or_else(invalid)?;
        if base == 0 && !prefixed && values[0] == 0 && values.iter().any(|&v| v != 0) {
            return Err(invalid());
        }

        let values = match values.iter().position(|&v| v != 0) {
            Some(first) => &values[first..],
            None => return Ok(BigInt::ZERO),
        };
        let mag = if radix.is_power_of_two() {
            pack_pow2(values, radix.trailing_zeros())?
        } else {
            pack_chunked(values, radix)?
        };
        Ok(BigInt::from_parts(negative, mag))
    }

    /// Render the value in the given base, 2 to 36, with lowercase digits.
    pub fn to_str_radix(&self, base: u32) -> Result<String> {
        check_base(base)?;
        let digits = magnitude_digits(&self.mag, base, false)?;
        let mut out = String::new();
        out.try_reserve_exact(digits.len() + 1)?;
        if self.negative {
            out.push('-');
        }
        // Digits are ASCII.
        out.extend(digits.iter().map(|&c| c as char));
        Ok(out)
    }
}

/// The ASCII digits of a magnitude, most significant first.
pub(crate) fn magnitude_digits(mag: &[Limb], base: u32, upper: bool) -> Result<Vec<u8>> {
    let glyphs = if upper { UPPER } else { LOWER };
    let bits = small::bit_length(mag);
    let mut out = Vec::new();
    if bits == 0 {
        out.try_reserve_exact(1)?;
        out.push(b'0');
        return Ok(out);
    }
    out.try_reserve_exact(digits_for(bits, base))?;

    if base.is_power_of_two() {
        let shift = base.trailing_zeros();
        let ndigits = (bits + shift as u64 - 1) / shift as u64;
        for i in (0..ndigits).rev() {
            out.push(glyphs[bits_at(mag, i * shift as u64, shift) as usize]);
        }
        return Ok(out);
    }

    let (pow, per) = chunk(base);
    let mut rest = DigitBuf::from_slice(mag, 0)?;
    while !rest.is_empty() {
        let mut rem = small::idiv(&mut rest, pow);
        let last = rest.is_empty();
        let start = out.len();
        if base == 10 {
            let mut buf = itoa::Buffer::new();
            out.extend(buf.format(rem).bytes().rev());
        } else {
            while rem != 0 {
                out.push(glyphs[(rem % base as Limb) as usize]);
                rem /= base as Limb;
            }
        }
        if !last {
            out.resize(start + per, b'0');
        }
    }
    out.reverse();
    Ok(out)
}

/// `width` bits starting at bit `pos`.
fn bits_at(x: &[Limb], pos: u64, width: u32) -> u32 {
    let limb = (pos / LIMB_BITS as u64) as usize;
    let offset = (pos % LIMB_BITS as u64) as u32;
    let mut v = x[limb] >> offset;
    if offset + width > LIMB_BITS {
        if let Some(&next) = x.get(limb + 1) {
            v |= next << (LIMB_BITS - offset);
        }
    }
    (v as u32) & ((1 << width) - 1)
}

impl FromStr for BigInt {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<BigInt> {
        BigInt::from_str_radix(s, 10)
    }
}

macro_rules! impl_fmt {
    ($($imp:ident => ($base:expr, $upper:expr, $prefix:expr))*) => {
        $(
            impl $imp for BigInt {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    let digits =
                        magnitude_digits(&self.mag, $base, $upper).map_err(|_| fmt::Error)?;
                    let digits = str::from_utf8(&digits).map_err(|_| fmt::Error)?;
                    f.pad_integral(!self.negative, $prefix, digits)
                }
            }
        )*
    };
}

impl_fmt! {
    Display => (10, false, "")
    Binary => (2, false, "0b")
    Octal => (8, false, "0o")
    LowerHex => (16, false, "0x")
    UpperHex => (16, true, "0x")
}
