//! The digit store: fixed-width limbs and the arithmetic over them.
//!
//! Magnitudes are little-endian sequences of [`Limb`]s. The width of a limb
//! is fixed at build time (see `build.rs`): 64 bits on targets with native
//! 128-bit products, 32 bits otherwise or when the `limb32` feature is on.
//!
//! [`BigInt`](crate::BigInt) consumes the digit-level operations through the
//! [`DigitArith`] capability, implemented here by the [`Native`] backend.

use crate::error::Result;
use std::cmp::Ordering;
use std::mem;

pub(crate) mod math;
mod num;
pub(crate) mod pool;

pub use self::math::large::BitOp;
pub use self::pool::{
    free_cache, memory_in_use, set_memory_limit, DigitBuf, CACHE_SIZE, MAX_CACHE_LIMBS,
};

//  Type for a single limb of the big integer.
//
//  A limb is analogous to a digit in base10, except, it stores 32-bit
//  or 64-bit numbers instead.
//
//  Platforms where native 128-bit multiplication is explicitly supported:
//      - x86_64 (Supported via `MUL`).
//      - mips64 (Supported via `DMULTU`, which `HI` and `LO` can be read-from).
//
//  Platforms where native 64-bit multiplication is supported and
//  you can extract hi-lo for 64-bit multiplications.
//      aarch64 (Requires `UMULH` and `MUL` to capture high and low bits).
//      powerpc64 (Requires `MULHDU` and `MULLD` to capture high and low bits).

// 32-BIT LIMB
#[cfg(limb_width_32)]
pub type Limb = u32;

#[cfg(limb_width_32)]
pub(crate) type Wide = u64;

// 64-BIT LIMB
#[cfg(limb_width_64)]
pub type Limb = u64;

#[cfg(limb_width_64)]
pub(crate) type Wide = u128;

/// Number of bits in a limb.
pub const LIMB_BITS: u32 = Limb::BITS;

/// Largest magnitude, in bits, any integer may have.
pub const BITCNT_MAX: u64 = pool::MAX_LIMBS as u64 * LIMB_BITS as u64;

/// Build-time layout of the digit store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Info {
    /// Width of one digit, in bits.
    pub bits_per_digit: u32,
    /// Storage size of one digit, in bytes.
    pub sizeof_digit: usize,
    /// Largest representable magnitude, in bits.
    pub bitcnt_max: u64,
}

impl Info {
    pub(crate) const fn current() -> Self {
        Info {
            bits_per_digit: LIMB_BITS,
            sizeof_digit: mem::size_of::<Limb>(),
            bitcnt_max: BITCNT_MAX,
        }
    }
}

/// Digit-level arithmetic a backend provides to the integer type.
///
/// Operands are normalized little-endian limb slices (no most-significant
/// zero limbs). Every returned buffer is normalized and was acquired from the
/// digit pool, so allocation failure surfaces as an out-of-memory error.
pub trait DigitArith {
    /// Version string of the backend.
    const VERSION: &'static str;

    /// Compare two magnitudes.
    fn compare(x: &[Limb], y: &[Limb]) -> Ordering;

    /// Number of significant bits.
    fn bit_length(x: &[Limb]) -> u64;

    /// `x + y`.
    fn add(x: &[Limb], y: &[Limb]) -> Result<DigitBuf>;

    /// `x - y`, for `x >= y`.
    fn sub(x: &[Limb], y: &[Limb]) -> Result<DigitBuf>;

    /// `x * y`.
    fn mul(x: &[Limb], y: &[Limb]) -> Result<DigitBuf>;

    /// `(x / y, x % y)`, for non-zero `y`.
    fn divrem(x: &[Limb], y: &[Limb]) -> Result<(DigitBuf, DigitBuf)>;

    /// `x << n`.
    fn shl(x: &[Limb], n: u64) -> Result<DigitBuf>;

    /// `x >> n`, discarding the shifted-out bits.
    fn shr(x: &[Limb], n: u64) -> Result<DigitBuf>;

    /// Combine two signed magnitudes in infinite two's complement, returning
    /// the magnitude of the result and whether it is negative.
    fn bitwise(
        op: BitOp,
        x: &[Limb],
        xneg: bool,
        y: &[Limb],
        yneg: bool,
    ) -> Result<(DigitBuf, bool)>;
}

/// The portable backend built from the primitives in this module.
#[derive(Copy, Clone, Debug, Default)]
pub struct Native;

impl DigitArith for Native {
    const VERSION: &'static str = concat!("zzint-native ", env!("CARGO_PKG_VERSION"));

    #[inline]
    fn compare(x: &[Limb], y: &[Limb]) -> Ordering {
        math::large::compare(x, y)
    }

    #[inline]
    fn bit_length(x: &[Limb]) -> u64 {
        math::small::bit_length(x)
    }

    #[inline]
    fn add(x: &[Limb], y: &[Limb]) -> Result<DigitBuf> {
        math::large::add(x, y)
    }

    #[inline]
    fn sub(x: &[Limb], y: &[Limb]) -> Result<DigitBuf> {
        math::large::sub(x, y)
    }

    #[inline]
    fn mul(x: &[Limb], y: &[Limb]) -> Result<DigitBuf> {
        math::large::mul(x, y)
    }

    #[inline]
    fn divrem(x: &[Limb], y: &[Limb]) -> Result<(DigitBuf, DigitBuf)> {
        math::large::divrem(x, y)
    }

    #[inline]
    fn shl(x: &[Limb], n: u64) -> Result<DigitBuf> {
        math::small::shl(x, n)
    }

    #[inline]
    fn shr(x: &[Limb], n: u64) -> Result<DigitBuf> {
        math::small::shr(x, n)
    }

    #[inline]
    fn bitwise(
        op: BitOp,
        x: &[Limb],
        xneg: bool,
        y: &[Limb],
        yneg: bool,
    ) -> Result<(DigitBuf, bool)> {
        math::large::bitwise(op, x, xneg, y, yneg)
    }
}

/// The backend every integer in this crate is built on.
pub(crate) type Backend = Native;
