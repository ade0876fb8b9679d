//! Number-theoretic functions.
//!
//! Every argument is an [`IntegerArg`]: a native integer, a `BigInt` or an
//! integer-valued [`Value`](crate::Value). Arguments are converted before
//! any computation, so a non-integer argument is always a type error.

use crate::bigint::BigInt;
use crate::digits::BITCNT_MAX;
use crate::error::{Error, ErrorCode, Result};
use crate::value::IntegerArg;

/// Products of at most this many factors are accumulated left to right.
const PRODUCT_CUTOFF: u64 = 16;

fn one() -> Result<BigInt> {
    BigInt::try_from_u128(1)
}

/// Validate the argument of a function defined on `0..=u64::MAX`.
fn ulong_arg<T: IntegerArg>(n: &T, name: &'static str) -> Result<u64> {
    let n = n.to_integer()?;
    if n.is_negative() {
        return Err(Error::new(ErrorCode::NegativeArgument(name)));
    }
    n.to_u64()
        .map_err(|_| Error::new(ErrorCode::ArgumentTooLarge(name)))
}

/// Greatest common divisor of all arguments; `0` for no arguments.
///
/// ```
/// assert_eq!(zzint::gcd(&[12, 18]).unwrap(), 6);
/// assert_eq!(zzint::gcd::<i32>(&[]).unwrap(), 0);
/// ```
pub fn gcd<T: IntegerArg>(args: &[T]) -> Result<BigInt> {
    let mut values = Vec::new();
    values.try_reserve_exact(args.len())?;
    for arg in args {
        values.push(arg.to_integer()?);
    }

    let mut acc = BigInt::ZERO;
    for value in &values {
        acc = gcd2(&acc, value)?;
        if *acc.limbs() == [1] {
            break;
        }
    }
    Ok(acc)
}

/// Euclid's algorithm on the magnitudes.
fn gcd2(a: &BigInt, b: &BigInt) -> Result<BigInt> {
    let mut a = a.try_abs()?;
    let mut b = b.try_abs()?;
    while !b.is_zero() {
        let r = a.try_mod_floor(&b)?;
        a = b;
        b = r;
    }
    Ok(a)
}

/// Extended gcd: `(g, x, y)` with `a*x + b*y == g` and `g >= 0`.
///
/// When one operand is zero, its coefficient is zero and the other
/// coefficient is the sign of the other operand.
///
/// ```
/// use zzint::BigInt;
///
/// let (g, x, y) = zzint::gcdext(12, 18).unwrap();
/// assert_eq!(g, 6);
/// assert_eq!(x * BigInt::from(12) + y * BigInt::from(18), 6);
/// ```
pub fn gcdext<A: IntegerArg, B: IntegerArg>(a: A, b: B) -> Result<(BigInt, BigInt, BigInt)> {
    let a = a.to_integer()?;
    let b = b.to_integer()?;
    extended_gcd(&a, &b)
}

pub(crate) fn extended_gcd(a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt, BigInt)> {
    let signum = |n: &BigInt| BigInt::try_from_i128(if n.is_negative() { -1 } else { 1 });
    match (a.is_zero(), b.is_zero()) {
        (true, true) => return Ok((BigInt::ZERO, BigInt::ZERO, BigInt::ZERO)),
        (true, false) => return Ok((b.try_abs()?, BigInt::ZERO, signum(b)?)),
        (false, true) => return Ok((a.try_abs()?, signum(a)?, BigInt::ZERO)),
        (false, false) => {}
    }

    let mut u = a.try_abs()?;
    let mut v = b.try_abs()?;
    let (mut x, mut y) = (one()?, BigInt::ZERO);
    let (mut r, mut s) = (BigInt::ZERO, one()?);
    while !v.is_zero() {
        let (q, c) = u.try_divmod(&v)?;
        let next_r = x.try_sub(&q.try_mul(&r)?)?;
        let next_s = y.try_sub(&q.try_mul(&s)?)?;
        u = v;
        v = c;
        x = r;
        y = s;
        r = next_r;
        s = next_s;
    }

    if a.is_negative() {
        x = x.into_neg();
    }
    if b.is_negative() {
        y = y.into_neg();
    }
    Ok((u, x, y))
}

/// Floor of the square root of a non-negative integer.
pub fn isqrt<T: IntegerArg>(n: T) -> Result<BigInt> {
    let n = n.to_integer()?;
    if n.is_negative() {
        return Err(Error::new(ErrorCode::NegativeArgument("isqrt")));
    }
    isqrt_floor(&n)
}

/// `(s, r)` with `s = isqrt(n)` and `r = n - s*s`, so `0 <= r <= 2*s`.
pub fn isqrt_rem<T: IntegerArg>(n: T) -> Result<(BigInt, BigInt)> {
    let n = n.to_integer()?;
    if n.is_negative() {
        return Err(Error::new(ErrorCode::NegativeArgument("isqrt_rem")));
    }
    let s = isqrt_floor(&n)?;
    let r = n.try_sub(&s.try_mul(&s)?)?;
    Ok((s, r))
}

/// Newton's iteration from an initial guess above the root.
fn isqrt_floor(n: &BigInt) -> Result<BigInt> {
    if n.is_zero() {
        return Ok(BigInt::ZERO);
    }
    if let Ok(small) = n.to_u64() {
        return BigInt::try_from_u128(isqrt_u64(small) as u128);
    }

    let mut x = one()?.try_shl((n.bit_length() + 1) / 2)?;
    loop {
        let y = x.try_add(&n.try_div_floor(&x)?)?.try_shr(1)?;
        if y >= x {
            return Ok(x);
        }
        x = y;
    }
}

fn isqrt_u64(n: u64) -> u64 {
    let mut s = (n as f64).sqrt() as u64;
    // The float estimate may be off by one either way.
    while s.checked_mul(s).map_or(true, |sq| sq > n) {
        s -= 1;
    }
    while (s + 1).checked_mul(s + 1).map_or(false, |sq| sq <= n) {
        s += 1;
    }
    s
}

/// Product of `count` terms `start, start + step, ...` by binary splitting.
fn range_product(start: u64, count: u64, step: u64) -> Result<BigInt> {
    if count <= PRODUCT_CUTOFF {
        let mut acc = one()?;
        for i in 0..count {
            let term = BigInt::try_from_u128(start as u128 + (i * step) as u128)?;
            acc = acc.try_mul(&term)?;
        }
        return Ok(acc);
    }
    let half = count / 2;
    let low = range_product(start, half, step)?;
    let high = range_product(start + half * step, count - half, step)?;
    low.try_mul(&high)
}

/// Upper estimate of `log2(n!)`.
fn factorial_bits(n: u64) -> f64 {
    if n < 2 {
        return 1.0;
    }
    let n = n as f64;
    n * (n.log2() - std::f64::consts::LOG2_E)
        + 0.5 * (2.0 * std::f64::consts::PI * n).log2()
        + 2.0
}

fn check_bits(bits: f64) -> Result<()> {
    if bits > BITCNT_MAX as f64 {
        Err(Error::too_many_bits())
    } else {
        Ok(())
    }
}

/// `n!`.
///
/// A negative argument is a value error; an argument beyond `u64::MAX`, or
/// one whose factorial would exceed the maximal bit count, is an overflow
/// error.
///
/// ```
/// assert_eq!(zzint::factorial(20).unwrap(), 2_432_902_008_176_640_000u64);
/// assert!(zzint::factorial(-1).unwrap_err().is_value());
/// ```
pub fn factorial<T: IntegerArg>(n: T) -> Result<BigInt> {
    let n = ulong_arg(&n, "factorial")?;
    check_bits(factorial_bits(n))?;
    if n < 2 {
        return one();
    }
    range_product(2, n - 1, 1)
}

/// Alias of [`factorial`].
#[inline]
pub fn fac<T: IntegerArg>(n: T) -> Result<BigInt> {
    factorial(n)
}

/// `n!!`, the product of every second integer from `n` down to 1 or 2.
pub fn double_fac<T: IntegerArg>(n: T) -> Result<BigInt> {
    let n = ulong_arg(&n, "double_fac")?;
    check_bits(factorial_bits(n) / 2.0 + (n.max(2) as f64).log2())?;
    if n < 2 {
        return one();
    }
    if n % 2 == 0 {
        range_product(2, n / 2, 2)
    } else {
        range_product(1, n / 2 + 1, 2)
    }
}

/// The `n`-th Fibonacci number, with `fib(0) == 0` and `fib(1) == 1`.
pub fn fib<T: IntegerArg>(n: T) -> Result<BigInt> {
    let n = ulong_arg(&n, "fib")?;
    // log2 of the golden ratio
    check_bits(n as f64 * 0.694_241_913_863_068_6)?;

    // Fast doubling over (F(k), F(k+1)):
    //   F(2k)   = F(k) * (2*F(k+1) - F(k))
    //   F(2k+1) = F(k)^2 + F(k+1)^2
    let mut a = BigInt::ZERO;
    let mut b = one()?;
    for i in (0..64 - n.leading_zeros()).rev() {
        let twice = b.try_shl(1)?.try_sub(&a)?;
        let even = a.try_mul(&twice)?;
        let odd = a.try_mul(&a)?.try_add(&b.try_mul(&b)?)?;
        if n >> i & 1 == 1 {
            b = even.try_add(&odd)?;
            a = odd;
        } else {
            a = even;
            b = odd;
        }
    }
    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isqrt_u64_edges() {
        assert_eq!(isqrt_u64(0), 0);
        assert_eq!(isqrt_u64(15), 3);
        assert_eq!(isqrt_u64(16), 4);
        assert_eq!(isqrt_u64(u64::MAX), u32::MAX as u64);
        assert_eq!(isqrt_u64((1 << 52) + 1), 1 << 26);
    }

    #[test]
    fn range_product_splits() {
        let direct = (1..=40u64).fold(BigInt::from(1), |acc, k| acc * BigInt::from(k));
        assert_eq!(range_product(1, 40, 1).unwrap(), direct);
        assert_eq!(range_product(7, 0, 3).unwrap(), 1);
    }

    #[test]
    fn factorial_estimate_is_an_upper_bound() {
        for n in [2u64, 10, 100, 1000] {
            let bits = factorial(n).unwrap().bit_length() as f64;
            assert!(factorial_bits(n) >= bits, "n = {}", n);
        }
    }
}
