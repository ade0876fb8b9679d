//! Building-blocks for arbitrary-precision math.
//!
//! These algorithms assume little-endian order for the large integer
//! buffers, so for a `[0, 1, 2, 3]`, `3` is the most significant limb,
//! and `0` is the least significant limb. Inputs are not required to be
//! normalized unless stated; every returned buffer is normalized.
//!
//! Every function that produces a new buffer sizes it for the largest
//! possible result before writing to it, so no buffer ever grows after
//! acquisition and every allocation is checked by the digit pool.

use super::num::*;
use super::pool::DigitBuf;
use super::{Limb, Wide, LIMB_BITS};
use crate::error::{Error, Result};
use std::cmp;

/// Cast to limb type.
#[inline(always)]
pub(crate) fn as_limb<T: AsPrimitive>(t: T) -> Limb {
    Limb::as_cast(t)
}

/// Cast to wide type.
#[inline(always)]
fn as_wide<T: AsPrimitive>(t: T) -> Wide {
    Wide::as_cast(t)
}

/// Build a normalized buffer from a u128.
pub(crate) fn from_u128(x: u128) -> Result<DigitBuf> {
    let mut buf = DigitBuf::with_capacity(128 / LIMB_BITS as usize)?;
    let mut x = x;
    while x != 0 {
        buf.push(as_limb(x));
        x >>= LIMB_BITS;
    }
    Ok(buf)
}

/// Collect the low 128 bits of the buffer.
pub(crate) fn low_u128(x: &[Limb]) -> u128 {
    x.iter()
        .take(128 / LIMB_BITS as usize)
        .rev()
        .fold(0u128, |acc, &limb| (acc << LIMB_BITS) | limb.as_u128())
}

// HI64
// ----

/// Get the high 64 bits of a normalized buffer, and whether any of the
/// remaining lower bits are non-zero.
///
/// The most significant set bit is moved to bit 63 of the result.
pub(crate) fn hi64(x: &[Limb]) -> (u64, bool) {
    let n = x.len();
    if n == 0 {
        return (0, false);
    }
    debug_assert!(x[n - 1] != 0);

    let take = cmp::min(n, 128 / LIMB_BITS as usize);
    let mut acc = x[n - take..]
        .iter()
        .rev()
        .fold(0u128, |acc, &limb| (acc << LIMB_BITS) | limb.as_u128());
    let used = take as u32 * LIMB_BITS;
    acc <<= 128 - used + x[n - 1].leading_zeros();

    let hi = (acc >> 64) as u64;
    let rest = acc as u64 != 0 || nonzero(&x[..n - take]);
    (hi, rest)
}

// NONZERO

/// Check if any of the limbs are non-zero.
#[inline]
pub(crate) fn nonzero(x: &[Limb]) -> bool {
    x.iter().any(|&xi| xi != 0)
}

// MASKS
// -----

/// Generate a bitwise mask for the lower `n` bits of a limb.
#[inline]
fn lower_n_mask(n: u32) -> Limb {
    debug_assert!(n <= LIMB_BITS, "lower_n_mask() overflow in shl.");

    match n == LIMB_BITS {
        true => Limb::MAX,
        false => (1 << n) - 1,
    }
}

/// Check if any of the lowest `n` bits are set.
pub(crate) fn nonzero_below(x: &[Limb], n: u64) -> bool {
    let limbs = n / LIMB_BITS as u64;
    let bits = (n % LIMB_BITS as u64) as u32;
    if limbs >= x.len() as u64 {
        return nonzero(x);
    }
    let limbs = limbs as usize;
    nonzero(&x[..limbs]) || x[limbs] & lower_n_mask(bits) != 0
}

/// Test bit `i` of the magnitude.
#[inline]
pub(crate) fn bit(x: &[Limb], i: u64) -> bool {
    let limb = i / LIMB_BITS as u64;
    if limb >= x.len() as u64 {
        return false;
    }
    x[limb as usize] >> (i % LIMB_BITS as u64) & 1 == 1
}

// SCALAR
// ------

// Scalar-to-scalar operations, for building-blocks for arbitrary-precision
// operations.

pub(crate) mod scalar {
    use super::*;

    // ADDITION

    /// Add two small integers and return the resulting value and if overflow happens.
    #[inline]
    pub fn add(x: Limb, y: Limb) -> (Limb, bool) {
        x.overflowing_add(y)
    }

    /// AddAssign two small integers and return if overflow happens.
    #[inline]
    pub fn iadd(x: &mut Limb, y: Limb) -> bool {
        let t = add(*x, y);
        *x = t.0;
        t.1
    }

    // SUBTRACTION

    /// Subtract two small integers and return the resulting value and if overflow happens.
    #[inline]
    pub fn sub(x: Limb, y: Limb) -> (Limb, bool) {
        x.overflowing_sub(y)
    }

    /// SubAssign two small integers and return if overflow happens.
    #[inline]
    pub fn isub(x: &mut Limb, y: Limb) -> bool {
        let t = sub(*x, y);
        *x = t.0;
        t.1
    }

    // MULTIPLICATION

    /// Multiply two small integers (with carry) (and return the overflow contribution).
    ///
    /// Returns the (low, high) components.
    #[inline]
    pub fn mul(x: Limb, y: Limb, carry: Limb) -> (Limb, Limb) {
        // Cannot overflow, as long as wide is 2x as wide. This is because
        // the following is always true:
        // `Wide::MAX - (Narrow::MAX * Narrow::MAX) >= Narrow::MAX`
        let z: Wide = as_wide(x) * as_wide(y) + as_wide(carry);
        (as_limb(z), as_limb(z >> LIMB_BITS))
    }

    /// Multiply two small integers (with carry) (and return if overflow happens).
    #[inline]
    pub fn imul(x: &mut Limb, y: Limb, carry: Limb) -> Limb {
        let t = mul(*x, y, carry);
        *x = t.0;
        t.1
    }

    /// Multiply-accumulate: `acc + x * y + carry`, returning (low, high).
    #[inline]
    pub fn mul_add(acc: Limb, x: Limb, y: Limb, carry: Limb) -> (Limb, Limb) {
        // `(B-1)^2 + 2(B-1) == B^2 - 1`, so this fits in a wide.
        let z: Wide = as_wide(x) * as_wide(y) + as_wide(acc) + as_wide(carry);
        (as_limb(z), as_limb(z >> LIMB_BITS))
    }

    // DIVISION

    /// Divide a two-limb numerator by a limb, with `hi < y`.
    ///
    /// Returns the (quotient, remainder).
    #[inline]
    pub fn div(hi: Limb, lo: Limb, y: Limb) -> (Limb, Limb) {
        debug_assert!(hi < y);
        let x = (as_wide(hi) << LIMB_BITS) | as_wide(lo);
        let y = as_wide(y);
        (as_limb(x / y), as_limb(x % y))
    }
}

// SMALL
// -----

// Large-to-small operations, to modify a big integer from a native scalar.

pub(crate) mod small {
    use super::*;

    // ADDITION

    /// Implied AddAssign implementation for adding a small integer to bigint.
    ///
    /// Allows us to choose a start-index in x to store, to allow incrementing
    /// from a non-zero start. The buffer must have room for a carry limb.
    #[inline]
    pub fn iadd_impl(x: &mut DigitBuf, y: Limb, xstart: usize) {
        if x.len() <= xstart {
            if y != 0 {
                x.resize(xstart, 0);
                x.push(y);
            }
        } else {
            // Initial add
            let mut carry = scalar::iadd(&mut x[xstart], y);

            // Increment until overflow stops occurring.
            let mut size = xstart + 1;
            while carry && size < x.len() {
                carry = scalar::iadd(&mut x[size], 1);
                size += 1;
            }

            // If we overflowed the buffer entirely, need to add 1 to the end
            // of the buffer.
            if carry {
                x.push(1);
            }
        }
    }

    /// AddAssign small integer to bigint.
    #[inline]
    pub fn iadd(x: &mut DigitBuf, y: Limb) {
        iadd_impl(x, y, 0);
    }

    // SUBTRACTION

    /// SubAssign small integer to bigint.
    /// Does not do overflowing subtraction.
    #[inline]
    pub fn isub(x: &mut DigitBuf, y: Limb) {
        debug_assert!(!x.is_empty() && (x[0] >= y || x.len() > 1));

        // Initial subtraction
        let mut carry = scalar::isub(&mut x[0], y);

        // Decrement until overflow stops occurring.
        let mut size = 1;
        while carry && size < x.len() {
            carry = scalar::isub(&mut x[size], 1);
            size += 1;
        }
        x.normalize();
    }

    // MULTIPLICATION

    /// MulAssign small integer to bigint.
    ///
    /// The buffer must have room for a carry limb.
    #[inline]
    pub fn imul(x: &mut DigitBuf, y: Limb) {
        // Multiply iteratively over all elements, adding the carry each time.
        let mut carry: Limb = 0;
        for xi in x.iter_mut() {
            carry = scalar::imul(xi, y, carry);
        }

        // Overflow of value, add to end.
        if carry != 0 {
            x.push(carry);
        }
        x.normalize();
    }

    /// Mul small integer to bigint.
    #[inline]
    pub fn mul(x: &[Limb], y: Limb) -> Result<DigitBuf> {
        let mut z = DigitBuf::from_slice(x, 1)?;
        imul(&mut z, y);
        Ok(z)
    }

    // DIVISION

    /// DivAssign small integer, returning the remainder.
    #[inline]
    pub fn idiv(x: &mut DigitBuf, y: Limb) -> Limb {
        debug_assert!(y != 0);
        let mut rem: Limb = 0;
        for xi in x.iter_mut().rev() {
            let (q, r) = scalar::div(rem, *xi, y);
            *xi = q;
            rem = r;
        }
        x.normalize();
        rem
    }

    /// Div small integer to bigint, returning the quotient and remainder.
    #[inline]
    pub fn divrem(x: &[Limb], y: Limb) -> Result<(DigitBuf, Limb)> {
        let mut q = DigitBuf::from_slice(x, 0)?;
        let r = idiv(&mut q, y);
        Ok((q, r))
    }

    // BIT LENGTH

    /// Get number of leading zero bits in the storage.
    #[inline]
    pub fn leading_zeros(x: &[Limb]) -> u32 {
        match x.last() {
            None => 0,
            Some(&top) => top.leading_zeros(),
        }
    }

    /// Calculate the bit-length of the big-integer.
    #[inline]
    pub fn bit_length(x: &[Limb]) -> u64 {
        // Avoid overflowing, calculate via total number of bits
        // minus leading zero bits.
        let nlz = leading_zeros(x) as u64;
        x.len() as u64 * LIMB_BITS as u64 - nlz
    }

    /// Number of trailing zero bits of a non-zero buffer.
    #[inline]
    pub fn trailing_zeros(x: &[Limb]) -> u64 {
        let mut count = 0u64;
        for &xi in x {
            if xi != 0 {
                return count + xi.trailing_zeros() as u64;
            }
            count += LIMB_BITS as u64;
        }
        count
    }

    // SHL

    /// Shift-left bits into `z`, returning the carry out of the top limb.
    ///
    /// Assumes `n < Limb::BITS`, IE, internally shifting bits.
    #[inline]
    pub fn shl_bits_into(z: &mut DigitBuf, x: &[Limb], n: u32) -> Limb {
        debug_assert!(n < LIMB_BITS);
        if n == 0 {
            z.extend_from_slice(x);
            return 0;
        }

        // Internally, for each item, we shift left by n, and add the previous
        // right shifted limb-bits.
        // For example, we transform (for u8) shifted left 2, to:
        //      b10100100 b01000010
        //      b10 b10010001 b00001000
        let rshift = LIMB_BITS - n;
        let lshift = n;
        let mut prev: Limb = 0;
        for &xi in x {
            z.push((xi << lshift) | (prev >> rshift));
            prev = xi;
        }
        prev >> rshift
    }

    /// Shift-left buffer by n bits.
    pub fn shl(x: &[Limb], n: u64) -> Result<DigitBuf> {
        if x.is_empty() {
            return Ok(DigitBuf::new());
        }
        let div = usize::try_from(n / LIMB_BITS as u64).map_err(|_| Error::too_many_bits())?;
        let rem = (n % LIMB_BITS as u64) as u32;
        let len = x
            .len()
            .checked_add(div)
            .and_then(|len| len.checked_add(1))
            .ok_or_else(Error::too_many_bits)?;

        // Need to pad with zeros for the number of `bits / Limb::BITS`,
        // and shift-left with carry for `bits % Limb::BITS`.
        let mut z = DigitBuf::with_capacity(len)?;
        z.resize(div, 0);
        let carry = shl_bits_into(&mut z, x, rem);
        z.push(carry);
        z.normalize();
        Ok(z)
    }

    // SHR

    /// Shift-right buffer by n bits, discarding the low bits.
    pub fn shr(x: &[Limb], n: u64) -> Result<DigitBuf> {
        let div = n / LIMB_BITS as u64;
        if div >= x.len() as u64 {
            return Ok(DigitBuf::new());
        }
        let div = div as usize;
        let rem = (n % LIMB_BITS as u64) as u32;
        let x = &x[div..];

        let mut z = DigitBuf::with_capacity(x.len())?;
        if rem == 0 {
            z.extend_from_slice(x);
        } else {
            let lshift = LIMB_BITS - rem;
            for (i, &xi) in x.iter().enumerate() {
                let next = x.get(i + 1).map_or(0, |&hi| hi << lshift);
                z.push((xi >> rem) | next);
            }
        }
        z.normalize();
        Ok(z)
    }
}

// LARGE
// -----

// Large-to-large operations, to modify a big integer from a native scalar.

pub(crate) mod large {
    use super::*;

    // RELATIVE OPERATORS

    /// Compare `x` to `y`, in little-endian order.
    ///
    /// Both buffers must be normalized.
    #[inline]
    pub fn compare(x: &[Limb], y: &[Limb]) -> cmp::Ordering {
        if x.len() > y.len() {
            cmp::Ordering::Greater
        } else if x.len() < y.len() {
            cmp::Ordering::Less
        } else {
            let iter = x.iter().rev().zip(y.iter().rev());
            for (&xi, &yi) in iter {
                if xi > yi {
                    return cmp::Ordering::Greater;
                } else if xi < yi {
                    return cmp::Ordering::Less;
                }
            }
            // Equal case.
            cmp::Ordering::Equal
        }
    }

    /// Check if x is less than y.
    #[inline]
    pub fn less(x: &[Limb], y: &[Limb]) -> bool {
        compare(x, y) == cmp::Ordering::Less
    }

    // ADDITION

    /// AddAssign into a fixed-size window of limbs.
    ///
    /// Assumes `x.len() >= y.len()`. Returns the carry out of the window.
    pub fn iadd_slice(x: &mut [Limb], y: &[Limb]) -> bool {
        debug_assert!(x.len() >= y.len());

        // Iteratively add elements from y to x.
        let mut carry = false;
        for (xi, yi) in x.iter_mut().zip(y.iter()) {
            // Only one op of the two can overflow, since we added at max
            // Limb::MAX + Limb::MAX. Add the previous carry,
            // and store the current carry for the next.
            let mut tmp = scalar::iadd(xi, *yi);
            if carry {
                tmp |= scalar::iadd(xi, 1);
            }
            carry = tmp;
        }

        // Overflow from the previous limb.
        for xi in x[y.len()..].iter_mut() {
            if !carry {
                break;
            }
            carry = scalar::iadd(xi, 1);
        }
        carry
    }

    /// Add bigint to bigint.
    pub fn add(x: &[Limb], y: &[Limb]) -> Result<DigitBuf> {
        let (x, y) = if x.len() >= y.len() { (x, y) } else { (y, x) };
        let mut z = DigitBuf::from_slice(x, 1)?;
        if iadd_slice(&mut z, y) {
            z.push(1);
        }
        z.normalize();
        Ok(z)
    }

    // SUBTRACTION

    /// SubAssign within a fixed-size window of limbs.
    ///
    /// Assumes `x.len() >= y.len()`. Returns the borrow out of the window.
    pub fn isub_slice(x: &mut [Limb], y: &[Limb]) -> bool {
        debug_assert!(x.len() >= y.len());

        let mut borrow = false;
        for (xi, yi) in x.iter_mut().zip(y.iter()) {
            let mut tmp = scalar::isub(xi, *yi);
            if borrow {
                tmp |= scalar::isub(xi, 1);
            }
            borrow = tmp;
        }

        for xi in x[y.len()..].iter_mut() {
            if !borrow {
                break;
            }
            borrow = scalar::isub(xi, 1);
        }
        borrow
    }

    /// Sub bigint from bigint.
    ///
    /// Assumes `x >= y`.
    pub fn sub(x: &[Limb], y: &[Limb]) -> Result<DigitBuf> {
        let mut z = DigitBuf::from_slice(x, 0)?;
        let borrow = isub_slice(&mut z, normalized(y));
        debug_assert!(!borrow);
        z.normalize();
        Ok(z)
    }

    /// Strip most-significant zero limbs from a view.
    #[inline]
    pub fn normalized(mut x: &[Limb]) -> &[Limb] {
        while let Some((&0, rest)) = x.split_last() {
            x = rest;
        }
        x
    }

    // MULTIPLICATION

    /// Number of limbs to bottom-out to asymptotically slow algorithms.
    ///
    /// Karatsuba tends to out-perform long-multiplication at ~320-640 bits,
    /// so we go halfway.
    pub const KARATSUBA_CUTOFF: usize = 32;

    /// Grade-school multiplication algorithm.
    ///
    /// Each of the `y.len()` rows multiplies `x` by one limb of `y` and
    /// accumulates it at the row's offset, so a single buffer of
    /// `x.len() + y.len()` limbs holds every partial sum.
    pub(super) fn long_mul(x: &[Limb], y: &[Limb]) -> Result<DigitBuf> {
        let mut z = DigitBuf::zeroed(x.len() + y.len())?;
        for (i, &yi) in y.iter().enumerate() {
            if yi == 0 {
                continue;
            }
            let mut carry: Limb = 0;
            for (j, &xj) in x.iter().enumerate() {
                let (lo, hi) = scalar::mul_add(z[i + j], xj, yi, carry);
                z[i + j] = lo;
                carry = hi;
            }
            z[i + x.len()] = carry;
        }
        z.normalize();
        Ok(z)
    }

    /// Split a buffer into halfway, into (lo, hi).
    #[inline]
    pub fn karatsuba_split(z: &[Limb], m: usize) -> (&[Limb], &[Limb]) {
        if z.len() <= m {
            (z, &[])
        } else {
            (&z[..m], &z[m..])
        }
    }

    /// Karatsuba multiplication algorithm with roughly equal input sizes.
    ///
    /// Assumes `y.len() >= x.len()`.
    fn karatsuba_mul(x: &[Limb], y: &[Limb]) -> Result<DigitBuf> {
        if x.len() <= KARATSUBA_CUTOFF {
            // Bottom-out to long multiplication for small cases.
            long_mul(x, y)
        } else if x.len() < y.len() / 2 {
            karatsuba_uneven_mul(x, y)
        } else {
            // Do our 3 multiplications.
            let m = y.len() / 2;
            let (xl, xh) = karatsuba_split(x, m);
            let (yl, yh) = karatsuba_split(y, m);
            let z0 = mul(xl, yl)?;
            let z2 = mul(xh, yh)?;
            let mut z1 = {
                let sumx = add(xl, xh)?;
                let sumy = add(yl, yh)?;
                mul(&sumx, &sumy)?
            };
            // Properly scale z1, which is `z1 - z2 - zo`.
            isub_slice(&mut z1, &z2);
            isub_slice(&mut z1, &z0);
            z1.normalize();

            // Create our result, which is equal to, in little-endian order:
            // [z0, z1 - z2 - z0, z2]
            //  z1 must be shifted m digits (2^(32m)) over.
            //  z2 must be shifted 2*m digits (2^(64m)) over.
            let mut result = DigitBuf::zeroed(x.len() + y.len())?;
            result[..z0.len()].copy_from_slice(&z0);
            iadd_slice(&mut result[m..], &z1);
            iadd_slice(&mut result[2 * m..], &z2);
            result.normalize();

            Ok(result)
        }
    }

    /// Karatsuba multiplication algorithm where y is substantially larger than x.
    ///
    /// Assumes `y.len() >= x.len()`.
    fn karatsuba_uneven_mul(x: &[Limb], mut y: &[Limb]) -> Result<DigitBuf> {
        let mut result = DigitBuf::zeroed(x.len() + y.len())?;

        // This effectively is like grade-school multiplication between
        // two numbers, except we're using splits on `y`, and the intermediate
        // step is a Karatsuba multiplication.
        let mut start = 0;
        while !y.is_empty() {
            let m = x.len().min(y.len());
            let (yl, yh) = karatsuba_split(y, m);
            let prod = mul(x, yl)?;
            iadd_slice(&mut result[start..], &prod);
            y = yh;
            start += m;
        }
        result.normalize();

        Ok(result)
    }

    /// Mul bigint to bigint.
    pub fn mul(x: &[Limb], y: &[Limb]) -> Result<DigitBuf> {
        let x = normalized(x);
        let y = normalized(y);
        let (x, y) = if x.len() <= y.len() { (x, y) } else { (y, x) };
        match x.len() {
            0 => Ok(DigitBuf::new()),
            1 => small::mul(y, x[0]),
            _ => karatsuba_mul(x, y),
        }
    }

    // DIVISION

    /// Divide bigint by bigint, returning the quotient and remainder.
    ///
    /// Both buffers must be normalized, and `y` must be non-zero.
    pub fn divrem(x: &[Limb], y: &[Limb]) -> Result<(DigitBuf, DigitBuf)> {
        debug_assert!(!y.is_empty());
        if less(x, y) {
            return Ok((DigitBuf::new(), DigitBuf::from_slice(x, 0)?));
        }
        if y.len() == 1 {
            let (q, r) = small::divrem(x, y[0])?;
            let mut rem = DigitBuf::with_capacity(1)?;
            if r != 0 {
                rem.push(r);
            }
            return Ok((q, rem));
        }
        long_div(x, y)
    }

    /// Knuth's Algorithm D, for `y.len() >= 2` and `x >= y`.
    ///
    /// Both operands are shifted so the top limb of the divisor has its high
    /// bit set, which bounds each estimated quotient limb to at most two
    /// corrections.
    fn long_div(x: &[Limb], y: &[Limb]) -> Result<(DigitBuf, DigitBuf)> {
        let n = y.len();
        let m = x.len() - n;
        let s = y[n - 1].leading_zeros();

        let mut vn = DigitBuf::with_capacity(n)?;
        let carry = small::shl_bits_into(&mut vn, y, s);
        debug_assert!(carry == 0);

        let mut un = DigitBuf::with_capacity(x.len() + 1)?;
        let carry = small::shl_bits_into(&mut un, x, s);
        un.push(carry);

        let mut q = DigitBuf::zeroed(m + 1)?;
        let base: Wide = 1 << LIMB_BITS;
        let vtop = as_wide(vn[n - 1]);
        let vnext = as_wide(vn[n - 2]);

        for j in (0..=m).rev() {
            // Estimate the quotient limb from the top two limbs.
            let num = (as_wide(un[j + n]) << LIMB_BITS) | as_wide(un[j + n - 1]);
            let mut qhat = num / vtop;
            let mut rhat = num % vtop;
            while qhat >= base || qhat * vnext > ((rhat << LIMB_BITS) | as_wide(un[j + n - 2])) {
                qhat -= 1;
                rhat += vtop;
                if rhat >= base {
                    break;
                }
            }

            // Multiply and subtract.
            let qlimb = as_limb(qhat);
            let mut carry: Limb = 0;
            let mut borrow = false;
            for i in 0..n {
                let (lo, hi) = scalar::mul(vn[i], qlimb, carry);
                carry = hi;
                let mut tmp = scalar::isub(&mut un[i + j], lo);
                if borrow {
                    tmp |= scalar::isub(&mut un[i + j], 1);
                }
                borrow = tmp;
            }
            let mut negative = scalar::isub(&mut un[j + n], carry);
            if borrow {
                negative |= scalar::isub(&mut un[j + n], 1);
            }

            // Add back if we subtracted one time too many.
            let mut qlimb = qlimb;
            if negative {
                qlimb -= 1;
                let carry = iadd_slice(&mut un[j..j + n], &vn);
                if carry {
                    un[j + n] = un[j + n].wrapping_add(1);
                }
            }
            q[j] = qlimb;
        }
        q.normalize();

        // Unnormalize the remainder.
        un.normalize();
        let r = small::shr(&un, s as u64)?;
        Ok((q, r))
    }

    // BITWISE

    /// Bitwise operations on the infinite two's-complement view.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum BitOp {
        And,
        Or,
        Xor,
    }

    impl BitOp {
        #[inline]
        fn apply(self, x: Limb, y: Limb) -> Limb {
            match self {
                BitOp::And => x & y,
                BitOp::Or => x | y,
                BitOp::Xor => x ^ y,
            }
        }
    }

    /// Combine two signed magnitudes limb-wise in two's complement.
    ///
    /// A negative operand `-m` is viewed as `!(m - 1)` extended with ones.
    /// Returns the magnitude of the result and whether it is negative.
    pub fn bitwise(
        op: BitOp,
        x: &[Limb],
        xneg: bool,
        y: &[Limb],
        yneg: bool,
    ) -> Result<(DigitBuf, bool)> {
        let xdec = decrement_if(x, xneg)?;
        let ydec = decrement_if(y, yneg)?;
        let x = xdec.as_deref().unwrap_or(x);
        let y = ydec.as_deref().unwrap_or(y);

        let xfill = if xneg { Limb::MAX } else { 0 };
        let yfill = if yneg { Limb::MAX } else { 0 };
        let negative = op.apply(xfill, yfill) != 0;

        let len = cmp::max(x.len(), y.len());
        let mut z = DigitBuf::with_capacity(len + 1)?;
        for i in 0..len {
            let xi = x.get(i).map_or(xfill, |&xi| xi ^ xfill);
            let yi = y.get(i).map_or(yfill, |&yi| yi ^ yfill);
            z.push(op.apply(xi, yi));
        }
        if negative {
            // Back to sign-magnitude: `-(!z + 1)`.
            for zi in z.iter_mut() {
                *zi = !*zi;
            }
            small::iadd(&mut z, 1);
        }
        z.normalize();
        Ok((z, negative))
    }

    fn decrement_if(x: &[Limb], cond: bool) -> Result<Option<DigitBuf>> {
        if !cond {
            return Ok(None);
        }
        let mut dec = DigitBuf::from_slice(x, 0)?;
        small::isub(&mut dec, 1);
        Ok(Some(dec))
    }
}

// TESTS
// -----

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[cfg(limb_width_32)]
    pub(crate) fn from_u32(x: &[u32]) -> DigitBuf {
        DigitBuf::from_slice(x, 0).unwrap()
    }

    #[cfg(limb_width_64)]
    pub(crate) fn from_u32(x: &[u32]) -> DigitBuf {
        let mut v = DigitBuf::with_capacity((x.len() + 1) / 2).unwrap();
        for xi in x.chunks(2) {
            match xi.len() {
                1 => v.push(xi[0] as u64),
                2 => v.push(((xi[1] as u64) << 32) | (xi[0] as u64)),
                _ => unreachable!(),
            }
        }
        v
    }

    /// Split u64 into limbs, in little-endian order.
    #[cfg(limb_width_32)]
    fn split_u64(x: u64) -> [Limb; 2] {
        [x as Limb, (x >> 32) as Limb]
    }

    #[cfg(limb_width_64)]
    fn split_u64(x: u64) -> [Limb; 1] {
        [x as Limb]
    }

    fn from_u64(x: u64) -> DigitBuf {
        let mut v = DigitBuf::from_slice(&split_u64(x), 0).unwrap();
        v.normalize();
        v
    }

    fn value(x: &[Limb]) -> u128 {
        assert!(small::bit_length(x) <= 128);
        low_u128(x)
    }

    #[test]
    fn compare_test() {
        // Simple
        let x = from_u32(&[1]);
        let y = from_u32(&[2]);
        assert_eq!(large::compare(&x, &y), Ordering::Less);
        assert_eq!(large::compare(&x, &x), Ordering::Equal);
        assert_eq!(large::compare(&y, &x), Ordering::Greater);

        // Check asymmetric
        let x = from_u32(&[5, 1]);
        let y = from_u32(&[2]);
        assert_eq!(large::compare(&x, &y), Ordering::Greater);
        assert_eq!(large::compare(&x, &x), Ordering::Equal);
        assert_eq!(large::compare(&y, &x), Ordering::Less);

        // Check when we use reverse ordering properly.
        let x = from_u32(&[5, 1, 9]);
        let y = from_u32(&[6, 2, 8]);
        assert_eq!(large::compare(&x, &y), Ordering::Greater);
        assert_eq!(large::compare(&x, &x), Ordering::Equal);
        assert_eq!(large::compare(&y, &x), Ordering::Less);

        // Complex scenario, check it properly uses reverse ordering.
        let x = from_u32(&[0, 1, 9]);
        let y = from_u32(&[4294967295, 0, 9]);
        assert_eq!(large::compare(&x, &y), Ordering::Greater);
        assert_eq!(large::compare(&x, &x), Ordering::Equal);
        assert_eq!(large::compare(&y, &x), Ordering::Less);
    }

    #[test]
    fn hi64_test() {
        assert_eq!(hi64(&from_u64(0xA)), (0xA000000000000000, false));
        assert_eq!(hi64(&from_u64(0xAB)), (0xAB00000000000000, false));
        assert_eq!(hi64(&from_u64(0xAB00000000)), (0xAB00000000000000, false));
        assert_eq!(hi64(&from_u64(0xA23456789A)), (0xA23456789A000000, false));

        let x = from_u32(&[1, 0, 0, 0x80000000]);
        assert_eq!(hi64(&x), (0x8000000000000000, true));
        let x = from_u32(&[0, 1, 0, 1]);
        assert_eq!(hi64(&x), (0x8000000000000000, true));
        let x = from_u32(&[0, 0, 0x80000000, 1]);
        assert_eq!(hi64(&x), (0xC000000000000000, false));
    }

    #[test]
    fn bit_length_test() {
        let x = from_u32(&[0, 0, 0, 1]);
        assert_eq!(small::bit_length(&x), 97);

        let x = from_u32(&[0, 0, 0, 3]);
        assert_eq!(small::bit_length(&x), 98);

        let x = from_u32(&[1 << 31]);
        assert_eq!(small::bit_length(&x), 32);

        assert_eq!(small::bit_length(&[]), 0);
    }

    #[test]
    fn trailing_zeros_test() {
        assert_eq!(small::trailing_zeros(&from_u32(&[1])), 0);
        assert_eq!(small::trailing_zeros(&from_u32(&[0, 0, 4])), 66);
        assert_eq!(small::trailing_zeros(&from_u32(&[0x80000000])), 31);
    }

    #[test]
    fn bit_test() {
        let x = from_u32(&[0b1010, 0, 1]);
        assert!(!bit(&x, 0));
        assert!(bit(&x, 1));
        assert!(bit(&x, 3));
        assert!(bit(&x, 64));
        assert!(!bit(&x, 65));
        assert!(!bit(&x, 1000));

        assert!(!nonzero_below(&x, 1));
        assert!(nonzero_below(&x, 2));
        assert!(nonzero_below(&x, 1000));
        let y = from_u32(&[0, 0, 1]);
        assert!(!nonzero_below(&y, 64));
        assert!(nonzero_below(&y, 65));
    }

    #[test]
    fn iadd_small_test() {
        // Overflow check (single)
        let mut x = DigitBuf::from_slice(&from_u32(&[4294967295]), 1).unwrap();
        small::iadd(&mut x, 5);
        assert_eq!(value(&x), 0x1_0000_0004);

        // No overflow, single value
        let mut x = DigitBuf::from_slice(&from_u32(&[5]), 1).unwrap();
        small::iadd(&mut x, 7);
        assert_eq!(value(&x), 12);

        // Double carry, overflow
        let mut x = DigitBuf::from_slice(&from_u64(0xFFFFFFFFFFFFFFFF), 1).unwrap();
        small::iadd(&mut x, 7);
        assert_eq!(value(&x), 0x1_0000_0000_0000_0006);
    }

    #[test]
    fn imul_small_test() {
        // No overflow check, 1-int.
        let x = small::mul(&from_u32(&[5]), 7).unwrap();
        assert_eq!(value(&x), 35);

        // No overflow check, 2-ints.
        let x = small::mul(&from_u64(0x4000000040000), 5).unwrap();
        assert_eq!(value(&x), 0x14000000140000);

        // Overflow, 2 carries.
        let x = small::mul(&from_u64(0x3333333333333334), 5).unwrap();
        assert_eq!(value(&x), 0x1_0000_0000_0000_0004);

        // Multiply by zero normalizes.
        let x = small::mul(&from_u64(12345), 0).unwrap();
        assert!(x.is_empty());
    }

    #[test]
    fn small_div_test() {
        let (q, r) = small::divrem(&from_u64(1_000_000_007), 10).unwrap();
        assert_eq!(value(&q), 100_000_000);
        assert_eq!(r, 7);
        let (_, r) = small::divrem(&from_u64(u64::MAX), 7).unwrap();
        assert_eq!(r, (u64::MAX % 7) as Limb);
    }

    #[test]
    fn shl_test() {
        // Pattern generated via `''.join(["1" +"0"*i for i in range(20)])`
        let big = from_u32(&[0xD2210408]);
        let big = small::shl(&big, 5).unwrap();
        assert_eq!(big, from_u32(&[0x44208100, 0x1A]));
        let big = small::shl(&big, 32).unwrap();
        assert_eq!(big, from_u32(&[0, 0x44208100, 0x1A]));
        let big = small::shl(&big, 27).unwrap();
        assert_eq!(big, from_u32(&[0, 0, 0xD2210408]));

        // 96-bits of previous pattern
        let big = from_u32(&[0x20020010, 0x8040100, 0xD2210408]);
        let big = small::shl(&big, 5).unwrap();
        assert_eq!(big, from_u32(&[0x400200, 0x802004, 0x44208101, 0x1A]));
        let big = small::shl(&big, 32).unwrap();
        assert_eq!(big, from_u32(&[0, 0x400200, 0x802004, 0x44208101, 0x1A]));
        let big = small::shl(&big, 27).unwrap();
        assert_eq!(big, from_u32(&[0, 0, 0x20020010, 0x8040100, 0xD2210408]));
    }

    #[test]
    fn shr_test() {
        let big = from_u32(&[0, 0, 0x20020010, 0x8040100, 0xD2210408]);
        let big = small::shr(&big, 27).unwrap();
        assert_eq!(big, from_u32(&[0, 0x400200, 0x802004, 0x44208101, 0x1A]));
        let big = small::shr(&big, 37).unwrap();
        assert_eq!(big, from_u32(&[0x20020010, 0x8040100, 0xD2210408]));
        assert!(small::shr(&big, 96).unwrap().is_empty());
        assert!(small::shr(&big, u64::MAX).unwrap().is_empty());
    }

    #[test]
    fn add_sub_test() {
        let x = from_u32(&[0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF]);
        let y = from_u32(&[1]);
        let z = large::add(&x, &y).unwrap();
        assert_eq!(z, from_u32(&[0, 0, 0, 1]));
        let w = large::sub(&z, &y).unwrap();
        assert_eq!(w, x);
        assert!(large::sub(&x, &x).unwrap().is_empty());
    }

    #[test]
    fn mul_test() {
        let x = from_u64(0xFFFFFFFFFFFFFFFF);
        let z = large::mul(&x, &x).unwrap();
        assert_eq!(value(&z), 0xFFFFFFFFFFFFFFFFu128 * 0xFFFFFFFFFFFFFFFFu128);
        assert!(large::mul(&x, &[]).unwrap().is_empty());
    }

    #[test]
    fn karatsuba_matches_long_mul() {
        // Sizes straddling the cutoff, including uneven splits.
        let gen = |len: usize, seed: u64| -> DigitBuf {
            let mut state = seed;
            let mut buf = DigitBuf::with_capacity(len).unwrap();
            for _ in 0..len {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                buf.push(as_limb(state >> 11) | 1);
            }
            buf
        };
        for &(xl, yl) in &[(33, 33), (40, 70), (33, 100), (65, 64), (20, 200)] {
            let x = gen(xl, xl as u64);
            let y = gen(yl, yl as u64 * 31);
            let fast = large::mul(&x, &y).unwrap();
            let slow = large::long_mul(&x, &y).unwrap();
            assert_eq!(fast, slow, "{}x{}", xl, yl);
        }
    }

    #[test]
    fn divrem_test() {
        let x = from_u32(&[0x12345678, 0x9ABCDEF0, 0x0FEDCBA9, 0x87654321]);
        let y = from_u32(&[0xFFFFFFFF, 0x00000001]);
        let (q, r) = large::divrem(&x, &y).unwrap();
        let back = large::add(&large::mul(&q, &y).unwrap(), &r).unwrap();
        assert_eq!(back, x);
        assert!(large::less(&r, &y));

        // Quotient limb that needs the add-back step.
        let x = from_u32(&[0, 0, 0x80000000, 0x7FFFFFFF]);
        let y = from_u32(&[1, 0, 0x80000000]);
        let (q, r) = large::divrem(&x, &y).unwrap();
        let back = large::add(&large::mul(&q, &y).unwrap(), &r).unwrap();
        assert_eq!(back, x);
        assert!(large::less(&r, &y));

        // Divisor larger than the dividend.
        let (q, r) = large::divrem(&y, &x).unwrap();
        assert!(q.is_empty());
        assert_eq!(r, y);
    }

    #[test]
    fn bitwise_test() {
        use large::BitOp;

        // -6 & 3 == 2
        let (z, neg) = large::bitwise(BitOp::And, &from_u32(&[6]), true, &from_u32(&[3]), false).unwrap();
        assert_eq!((value(&z), neg), (2, false));

        // -6 | 3 == -5
        let (z, neg) = large::bitwise(BitOp::Or, &from_u32(&[6]), true, &from_u32(&[3]), false).unwrap();
        assert_eq!((value(&z), neg), (5, true));

        // -6 ^ -3 == 7
        let (z, neg) = large::bitwise(BitOp::Xor, &from_u32(&[6]), true, &from_u32(&[3]), true).unwrap();
        assert_eq!((value(&z), neg), (7, false));

        // -(2^64) | 0 keeps the full width.
        let x = from_u32(&[0, 0, 1]);
        let (z, neg) = large::bitwise(BitOp::Or, &x, true, &[], false).unwrap();
        assert_eq!(z, x);
        assert!(neg);
    }
}
