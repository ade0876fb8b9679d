//! # zzint
//!
//! Arbitrary-precision signed integers with the exact semantics of a
//! dynamic language's native integer type: floor division, infinite
//! two's-complement bitwise operations, and a numeric hash that agrees with
//! the native one.
//!
//! ```
//! use zzint::BigInt;
//!
//! let x: BigInt = "-1_000_000_000_000_000_000_000".parse().unwrap();
//! let y = BigInt::from(7);
//!
//! // Division rounds toward negative infinity, the remainder takes the
//! // sign of the divisor.
//! let (q, r) = x.try_divmod(&y).unwrap();
//! assert_eq!(&q * &y + &r, x);
//! assert!(r >= 0);
//!
//! assert_eq!(BigInt::from(255).format("#x").unwrap(), "0xff");
//! ```
//!
//! # Fallible operations
//!
//! Every operation that allocates has a `try_` form returning
//! [`Result`]. Errors are categorized like the host language's exceptions
//! (see [`Category`]): type errors, value errors, overflow past a fixed
//! ceiling, and out-of-memory. Out-of-memory is transient: all intermediate
//! digit buffers are released before the error is returned, so a smaller
//! operation afterwards succeeds.
//!
//! The `std::ops` operators and the `num-traits` impls are provided on top
//! of the `try_` forms and panic where they would fail.
//!
//! # Number theory, formatting and float interop
//!
//! - [`gcd`], [`gcdext`], [`isqrt`], [`isqrt_rem`], [`factorial`] (also
//!   [`fac`]), [`double_fac`] and [`fib`] accept any [`IntegerArg`].
//! - [`BigInt::format`] implements the format-spec mini-language described
//!   in the [`format`] module.
//! - The [`mpmath`] module rounds mantissa/exponent pairs for a
//!   multi-precision float library under five [`RoundingMode`]s.
//! - The [`value`] module takes untyped [`Value`] arguments and reports a
//!   type error for anything that is not an integer.
//!
//! # Digit storage
//!
//! Magnitudes are stored as limbs of [`Info::bits_per_digit`] bits acquired
//! from a process-wide pool, see [`free_cache`] and [`set_memory_limit`].

#![doc(html_root_url = "https://docs.rs/zzint/0.3.0")]
// Ignored clippy lints
#![allow(
    clippy::comparison_chain,
    clippy::manual_range_contains,
    clippy::match_like_matches_macro,
)]
// Ignored clippy_pedantic lints
#![allow(
    // limb and digit arithmetic requires these sorts of casts
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    // things are often more readable this way
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::unreadable_literal,
    // noisy
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::return_self_not_must_use,
)]

mod bigint;
mod digits;
mod error;
pub mod format;
pub mod mpmath;
mod ntheory;
pub mod value;

pub use crate::bigint::{BigInt, ByteOrder, Sign, HASH_MODULUS};
pub use crate::digits::{
    free_cache, memory_in_use, set_memory_limit, BitOp, DigitArith, DigitBuf, Info, Limb,
    Native, BITCNT_MAX, CACHE_SIZE, LIMB_BITS, MAX_CACHE_LIMBS,
};
pub use crate::error::{Category, Error, ErrorCode, Result};
pub use crate::format::FormatSpec;
pub use crate::mpmath::{NormalizedFloat, RoundingMode};
pub use crate::ntheory::{double_fac, fac, factorial, fib, gcd, gcdext, isqrt, isqrt_rem};
pub use crate::value::{IntegerArg, Value};

/// Layout of the digit store this build uses.
///
/// ```
/// let info = zzint::info();
/// assert_eq!(info.sizeof_digit * 8, info.bits_per_digit as usize);
/// ```
#[inline]
pub const fn info() -> Info {
    Info::current()
}

/// Version string of the digit arithmetic backend.
#[inline]
pub fn version() -> &'static str {
    <digits::Backend as DigitArith>::VERSION
}
