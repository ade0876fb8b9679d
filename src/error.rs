//! When an integer operation goes wrong.

use std::collections::TryReserveError;
use std::error;
use std::fmt::{self, Debug, Display};
use std::result;

/// This type represents all possible errors that can occur when constructing,
/// combining or rendering integers.
pub struct Error {
    /// This `Box` allows us to keep the size of `Error` as small as possible. A
    /// larger `Error` type was substantially slower due to all the functions
    /// that pass around `Result<T, Error>`.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `zzint::Error`.
pub type Result<T> = result::Result<T, Error>;

impl Error {
    /// Specifies the cause of this error.
    pub fn code(&self) -> &ErrorCode {
        &self.err.code
    }

    /// Categorizes the cause of this error.
    ///
    /// - `Category::Type` - an argument is not an integer-like value
    /// - `Category::Value` - an integer argument is outside the domain
    /// - `Category::Overflow` - the result would exceed a fixed ceiling
    /// - `Category::Memory` - an allocation could not be satisfied
    pub fn classify(&self) -> Category {
        match self.err.code {
            ErrorCode::NotAnInteger(_)
            | ErrorCode::ExpectedBigInt(_)
            | ErrorCode::ExpectedNativeInt(_)
            | ErrorCode::NotIntegral
            | ErrorCode::WrongArity { .. } => Category::Type,
            ErrorCode::InvalidBase(_)
            | ErrorCode::InvalidLiteral { .. }
            | ErrorCode::NotFinite
            | ErrorCode::DivisionByZero
            | ErrorCode::NegativeShift
            | ErrorCode::NegativeArgument(_)
            | ErrorCode::InvalidRoundingMode
            | ErrorCode::InvalidFormatSpec
            | ErrorCode::UnknownFormatCode(_)
            | ErrorCode::GroupingNotAllowed { .. }
            | ErrorCode::ConflictingGrouping
            | ErrorCode::ZeroModulus
            | ErrorCode::NotInvertible => Category::Value,
            ErrorCode::TooManyBits
            | ErrorCode::ArgumentTooLarge(_)
            | ErrorCode::DoesNotFit(_)
            | ErrorCode::NegativeUnsigned => Category::Overflow,
            ErrorCode::OutOfMemory => Category::Memory,
        }
    }

    /// Returns true if this error was caused by an argument that is not an
    /// integer-like value.
    pub fn is_type(&self) -> bool {
        self.classify() == Category::Type
    }

    /// Returns true if this error was caused by an integer argument outside
    /// the function's domain.
    pub fn is_value(&self) -> bool {
        self.classify() == Category::Value
    }

    /// Returns true if this error was caused by a result that would exceed a
    /// fixed size ceiling.
    pub fn is_overflow(&self) -> bool {
        self.classify() == Category::Overflow
    }

    /// Returns true if an allocation needed to complete the operation could
    /// not be satisfied.
    ///
    /// This condition is transient: retrying after memory pressure is
    /// relieved, or performing a smaller operation, is expected to succeed.
    pub fn is_out_of_memory(&self) -> bool {
        self.classify() == Category::Memory
    }
}

/// Categorizes the cause of a `zzint::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// An operand or argument is not an integer-like value where one is
    /// required, or the number of arguments is wrong.
    Type,

    /// An argument is integer-typed but outside the function's domain.
    Value,

    /// The result would exceed a protective ceiling that is independent of
    /// the available memory.
    Overflow,

    /// An allocation could not be satisfied under the current resource limits.
    Memory,
}

struct ErrorImpl {
    code: ErrorCode,
}

/// This type describes all possible errors that can occur in this crate.
#[derive(Clone, PartialEq, Eq)]
pub enum ErrorCode {
    /// A value of this kind was given where an integer is required.
    NotAnInteger(&'static str),

    /// A native integer was given where a `BigInt` is required.
    ExpectedBigInt(&'static str),

    /// A `BigInt` or non-integer was given where a native integer is required.
    ExpectedNativeInt(&'static str),

    /// Function called with the wrong number of arguments.
    WrongArity {
        name: &'static str,
        min: usize,
        max: usize,
        given: usize,
    },

    /// Text base outside of 2..=36 (or 0 for auto-detection).
    InvalidBase(u32),

    /// Text that is not a valid integer literal in the given base.
    InvalidLiteral { text: Box<str>, base: u32 },

    /// A float with a fractional part.
    NotIntegral,

    /// An infinite or NaN float.
    NotFinite,

    /// Division or modulo by zero.
    DivisionByZero,

    /// Shift by a negative number of bits.
    NegativeShift,

    /// A function defined only for non-negative integers received a
    /// negative one.
    NegativeArgument(&'static str),

    /// Rounding mode that is not one of `n`, `f`, `c`, `d`, `u`.
    InvalidRoundingMode,

    /// Format specifier that does not match the mini-language grammar.
    InvalidFormatSpec,

    /// Format type character that is not one of `b`, `d`, `o`, `x`, `X`, `n`.
    UnknownFormatCode(char),

    /// Grouping character not allowed with this format type.
    GroupingNotAllowed { grouping: char, kind: char },

    /// Both `,` and `_` grouping requested.
    ConflictingGrouping,

    /// Modular operation with a zero modulus.
    ZeroModulus,

    /// The base has no inverse for the given modulus.
    NotInvertible,

    /// The magnitude would exceed the maximal representable bit count.
    TooManyBits,

    /// Argument of a function is beyond its protective ceiling.
    ArgumentTooLarge(&'static str),

    /// Value does not fit into the requested native type.
    DoesNotFit(&'static str),

    /// A negative value was given where an unsigned encoding is required.
    NegativeUnsigned,

    /// An allocation could not be satisfied.
    OutOfMemory,
}

impl Error {
    #[cold]
    pub(crate) fn new(code: ErrorCode) -> Self {
        Error {
            err: Box::new(ErrorImpl { code }),
        }
    }

    #[cold]
    pub(crate) fn out_of_memory() -> Self {
        Error::new(ErrorCode::OutOfMemory)
    }

    #[cold]
    pub(crate) fn too_many_bits() -> Self {
        Error::new(ErrorCode::TooManyBits)
    }

    #[cold]
    pub(crate) fn literal(text: &str, base: u32) -> Self {
        Error::new(ErrorCode::InvalidLiteral {
            text: text.into(),
            base,
        })
    }

    #[cold]
    pub(crate) fn arity(name: &'static str, min: usize, max: usize, given: usize) -> Self {
        Error::new(ErrorCode::WrongArity {
            name,
            min,
            max,
            given,
        })
    }
}

impl From<TryReserveError> for Error {
    #[cold]
    fn from(_: TryReserveError) -> Self {
        Error::out_of_memory()
    }
}

impl Debug for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorCode::NotAnInteger(kind) => {
                write!(f, "an integer is required, got {}", kind)
            }
            ErrorCode::ExpectedBigInt(kind) => write!(f, "expected a BigInt, got {}", kind),
            ErrorCode::ExpectedNativeInt(kind) => {
                write!(f, "expected a native integer, got {}", kind)
            }
            ErrorCode::WrongArity {
                name,
                min,
                max,
                given,
            } => {
                if min == max {
                    write!(f, "{}() takes exactly {} arguments ({} given)", name, min, given)
                } else {
                    write!(
                        f,
                        "{}() takes from {} to {} arguments ({} given)",
                        name, min, max, given
                    )
                }
            }
            ErrorCode::InvalidBase(_) => f.write_str("base must be >= 2 and <= 36, or 0"),
            ErrorCode::InvalidLiteral { text, base } => {
                write!(f, "invalid literal for base {}: {:?}", base, text)
            }
            ErrorCode::NotIntegral => f.write_str("value is not an integral number"),
            ErrorCode::NotFinite => f.write_str("cannot convert infinity or NaN to integer"),
            ErrorCode::DivisionByZero => f.write_str("division by zero"),
            ErrorCode::NegativeShift => f.write_str("negative shift count"),
            ErrorCode::NegativeArgument(name) => {
                write!(f, "{}() not defined for negative values", name)
            }
            ErrorCode::InvalidRoundingMode => f.write_str("invalid rounding mode specified"),
            ErrorCode::InvalidFormatSpec => f.write_str("invalid format specifier"),
            ErrorCode::UnknownFormatCode(code) => {
                write!(f, "unknown format code '{}' for integer", code)
            }
            ErrorCode::GroupingNotAllowed { grouping, kind } => {
                write!(f, "cannot specify '{}' with '{}'", grouping, kind)
            }
            ErrorCode::ConflictingGrouping => f.write_str("cannot specify both ',' and '_'"),
            ErrorCode::ZeroModulus => f.write_str("pow() 3rd argument cannot be 0"),
            ErrorCode::NotInvertible => {
                f.write_str("base is not invertible for the given modulus")
            }
            ErrorCode::TooManyBits => f.write_str("too many digits in integer"),
            ErrorCode::ArgumentTooLarge(name) => write!(f, "{}() argument is too large", name),
            ErrorCode::DoesNotFit(ty) => write!(f, "integer too large to convert to {}", ty),
            ErrorCode::NegativeUnsigned => {
                f.write_str("can't convert negative integer to unsigned")
            }
            ErrorCode::OutOfMemory => f.write_str("out of memory"),
        }
    }
}

impl error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.err.code, f)
    }
}

// Remove a layer of verbosity from the debug representation. Humans often
// end up seeing this representation because it is what unwrap() shows.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Error({:?}, {:?})", self.err.code.to_string(), self.classify())
    }
}

impl Clone for Error {
    fn clone(&self) -> Self {
        Error::new(self.err.code.clone())
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.err.code == other.err.code
    }
}
