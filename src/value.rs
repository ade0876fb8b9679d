//! Dynamically typed arguments.
//!
//! A [`Value`] stands in for an untyped host value. Functions that accept
//! integers take any [`IntegerArg`], so a non-integer `Value` fails with a
//! type error before any computation starts.

use crate::bigint::BigInt;
use crate::error::{Error, ErrorCode, Result};
use crate::mpmath::{self, NormalizedFloat, RoundingMode};
use crate::ntheory;
use std::borrow::Cow;
use std::fmt;

/// An untyped argument.
#[derive(Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Big(BigInt),
    Float(f64),
    Complex { re: f64, im: f64 },
    Str(String),
}

impl Value {
    /// Name of the kind of value, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Big(_) => "BigInt",
            Value::Float(_) => "float",
            Value::Complex { .. } => "complex",
            Value::Str(_) => "str",
        }
    }

    /// Whether the value is integer-like: a boolean, a native or a big
    /// integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Int(_) | Value::Big(_))
    }

    fn as_native(&self) -> Result<i64> {
        match *self {
            Value::Int(n) => Ok(n),
            Value::Bool(b) => Ok(b as i64),
            _ => Err(Error::new(ErrorCode::ExpectedNativeInt(self.kind()))),
        }
    }

    fn as_big(&self) -> Result<&BigInt> {
        match self {
            Value::Big(n) => Ok(n),
            _ => Err(Error::new(ErrorCode::ExpectedBigInt(self.kind()))),
        }
    }

    fn as_rounding(&self) -> Result<RoundingMode> {
        match self {
            Value::Str(s) => s.parse(),
            _ => Err(Error::new(ErrorCode::InvalidRoundingMode)),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(n) => write!(f, "Int({})", n),
            Value::Big(n) => write!(f, "Big({})", n),
            Value::Float(x) => write!(f, "Float({:?})", x),
            Value::Complex { re, im } => write!(f, "Complex({:?}, {:?})", re, im),
            Value::Str(s) => write!(f, "Str({:?})", s),
        }
    }
}

macro_rules! from_value {
    ($($ty:ty => |$v:ident| $expr:expr;)*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from($v: $ty) -> Value {
                    $expr
                }
            }
        )*
    };
}

from_value! {
    bool => |b| Value::Bool(b);
    i64 => |n| Value::Int(n);
    i32 => |n| Value::Int(n as i64);
    BigInt => |n| Value::Big(n);
    f64 => |x| Value::Float(x);
    String => |s| Value::Str(s);
    &str => |s| Value::Str(s.to_owned());
}

/// An argument that can be read as an integer.
pub trait IntegerArg {
    /// The argument as a `BigInt`, borrowed when it already is one.
    fn to_integer(&self) -> Result<Cow<'_, BigInt>>;
}

impl IntegerArg for BigInt {
    #[inline]
    fn to_integer(&self) -> Result<Cow<'_, BigInt>> {
        Ok(Cow::Borrowed(self))
    }
}

impl IntegerArg for Value {
    fn to_integer(&self) -> Result<Cow<'_, BigInt>> {
        match self {
            Value::Big(n) => Ok(Cow::Borrowed(n)),
            Value::Int(n) => Ok(Cow::Owned(BigInt::try_from_i128(*n as i128)?)),
            Value::Bool(b) => Ok(Cow::Owned(BigInt::try_from_u128(*b as u128)?)),
            _ => Err(Error::new(ErrorCode::NotAnInteger(self.kind()))),
        }
    }
}

impl<T: IntegerArg + ?Sized> IntegerArg for &T {
    #[inline]
    fn to_integer(&self) -> Result<Cow<'_, BigInt>> {
        (**self).to_integer()
    }
}

macro_rules! integer_arg_native {
    ($via:ident: $($ty:ty)*) => {
        $(
            impl IntegerArg for $ty {
                #[inline]
                fn to_integer(&self) -> Result<Cow<'_, BigInt>> {
                    Ok(Cow::Owned(BigInt::$via(*self as _)?))
                }
            }
        )*
    };
}

integer_arg_native!(try_from_i128: i8 i16 i32 i64 i128 isize);
integer_arg_native!(try_from_u128: u8 u16 u32 u64 u128 usize);

fn check_arity(name: &'static str, args: &[Value], min: usize, max: usize) -> Result<()> {
    if args.len() < min || args.len() > max {
        Err(Error::arity(name, min, max, args.len()))
    } else {
        Ok(())
    }
}

fn non_negative(value: &BigInt, name: &'static str) -> Result<u64> {
    if value.is_negative() {
        return Err(Error::new(ErrorCode::NegativeArgument(name)));
    }
    value
        .to_u64()
        .map_err(|_| Error::new(ErrorCode::ArgumentTooLarge(name)))
}

/// `_mpmath_normalize(sign, man, exp, bc, prec, rnd)`.
///
/// The mantissa must be a [`Value::Big`]; the other numeric arguments may be
/// any integer, and `rnd` must be a string naming a [`RoundingMode`].
pub fn mpmath_normalize(args: &[Value]) -> Result<NormalizedFloat> {
    check_arity("_mpmath_normalize", args, 6, 6)?;
    let negative = !args[0].to_integer()?.is_zero();
    let man = args[1].as_big()?;
    let exp = args[2].to_integer()?;
    let bc = non_negative(&*args[3].to_integer()?, "_mpmath_normalize")?;
    let prec = non_negative(&*args[4].to_integer()?, "_mpmath_normalize")?;
    let rnd = args[5].as_rounding()?;
    mpmath::normalize(negative, man, &*exp, bc, prec, rnd)
}

/// `_mpmath_create(man, exp[, prec[, rnd]])`.
///
/// The precision must be a native integer and defaults to 0, which only
/// strips trailing zero bits; the rounding mode defaults to nearest.
pub fn mpmath_create(args: &[Value]) -> Result<NormalizedFloat> {
    check_arity("_mpmath_create", args, 2, 4)?;
    let man = match &args[0] {
        Value::Big(n) => Cow::Borrowed(n),
        Value::Int(n) => Cow::Owned(BigInt::try_from_i128(*n as i128)?),
        other => return Err(Error::new(ErrorCode::NotAnInteger(other.kind()))),
    };
    let exp = args[1].to_integer()?;
    let prec = match args.get(2) {
        Some(prec) => {
            let prec = prec.as_native()?;
            u64::try_from(prec)
                .map_err(|_| Error::new(ErrorCode::NegativeArgument("_mpmath_create")))?
        }
        None => 0,
    };
    let rnd = match args.get(3) {
        Some(rnd) => rnd.as_rounding()?,
        None => RoundingMode::Nearest,
    };
    mpmath::create(&man, &exp, prec, rnd)
}

/// `gcd(*args)` over untyped arguments.
pub fn gcd(args: &[Value]) -> Result<BigInt> {
    ntheory::gcd(args)
}

/// `gcdext(a, b)` over untyped arguments.
pub fn gcdext(args: &[Value]) -> Result<(BigInt, BigInt, BigInt)> {
    check_arity("gcdext", args, 2, 2)?;
    ntheory::gcdext(&args[0], &args[1])
}

macro_rules! unary {
    ($($(#[$doc:meta])* $name:ident -> $out:ty;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(args: &[Value]) -> Result<$out> {
                check_arity(stringify!($name), args, 1, 1)?;
                ntheory::$name(&args[0])
            }
        )*
    };
}

unary! {
    /// `isqrt(n)` over untyped arguments.
    isqrt -> BigInt;
    /// `isqrt_rem(n)` over untyped arguments.
    isqrt_rem -> (BigInt, BigInt);
    /// `factorial(n)` over untyped arguments.
    factorial -> BigInt;
    /// `fac(n)` over untyped arguments.
    fac -> BigInt;
    /// `double_fac(n)` over untyped arguments.
    double_fac -> BigInt;
    /// `fib(n)` over untyped arguments.
    fib -> BigInt;
}
