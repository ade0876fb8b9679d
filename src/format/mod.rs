//! The format-spec mini-language.
//!
//! ```text
//! format_spec ::= [[fill]align][sign]["#"]["0"][width][grouping][type]
//! fill        ::= <any character except "{" or "}">
//! align       ::= "<" | ">" | "^" | "="
//! sign        ::= "+" | "-" | " "
//! width       ::= digit+
//! grouping    ::= "," | "_"
//! type        ::= "b" | "d" | "o" | "x" | "X" | "n"
//! ```
//!
//! A [`FormatSpec`] is parsed with [`str::parse`] and applied with
//! [`BigInt::format`](crate::BigInt::format).

use crate::error::{Error, ErrorCode, Result};
use std::str::{Chars, FromStr};

mod render;

/// Where padding goes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    /// `<`
    Left,
    /// `>`
    Right,
    /// `^`, with any odd padding character on the right.
    Center,
    /// `=`, padding between the sign and prefix and the digits.
    AfterSign,
}

impl Align {
    fn from_char(c: char) -> Option<Align> {
        match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            '=' => Some(Align::AfterSign),
            _ => None,
        }
    }
}

/// Which signs are shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Sign {
    /// `-`: only for negative values.
    #[default]
    Negative,
    /// `+`: for all values.
    Always,
    /// ` `: a space for non-negative values.
    Space,
}

/// Digit group separator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Grouping {
    Comma,
    Underscore,
}

impl Grouping {
    pub fn as_char(self) -> char {
        match self {
            Grouping::Comma => ',',
            Grouping::Underscore => '_',
        }
    }
}

/// Presentation type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// `b`
    Binary,
    /// `d`, also the empty type.
    #[default]
    Decimal,
    /// `o`
    Octal,
    /// `x`
    LowerHex,
    /// `X`
    UpperHex,
    /// `n`, decimal under the default locale.
    Number,
}

impl Kind {
    fn from_char(c: char) -> Option<Kind> {
        match c {
            'b' => Some(Kind::Binary),
            'd' => Some(Kind::Decimal),
            'o' => Some(Kind::Octal),
            'x' => Some(Kind::LowerHex),
            'X' => Some(Kind::UpperHex),
            'n' => Some(Kind::Number),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Kind::Binary => 'b',
            Kind::Decimal => 'd',
            Kind::Octal => 'o',
            Kind::LowerHex => 'x',
            Kind::UpperHex => 'X',
            Kind::Number => 'n',
        }
    }

    pub fn radix(self) -> u32 {
        match self {
            Kind::Binary => 2,
            Kind::Octal => 8,
            Kind::Decimal | Kind::Number => 10,
            Kind::LowerHex | Kind::UpperHex => 16,
        }
    }

    /// The alternate-form prefix, empty for decimal kinds.
    pub fn prefix(self) -> &'static str {
        match self {
            Kind::Binary => "0b",
            Kind::Octal => "0o",
            Kind::LowerHex => "0x",
            Kind::UpperHex => "0X",
            Kind::Decimal | Kind::Number => "",
        }
    }
}

/// A parsed format specifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct FormatSpec {
    /// Explicit fill character.
    pub fill: Option<char>,
    /// Explicit alignment.
    pub align: Option<Align>,
    pub sign: Sign,
    /// `#`: emit the base prefix.
    pub alternate: bool,
    /// `0`: pad with zeros after the sign.
    pub zero: bool,
    /// Minimum field width, in characters.
    pub width: usize,
    pub grouping: Option<Grouping>,
    pub kind: Kind,
}

impl FormatSpec {
    /// The fill character in effect.
    pub fn effective_fill(&self) -> char {
        match self.fill {
            Some(fill) => fill,
            None if self.zero => '0',
            None => ' ',
        }
    }

    /// The alignment in effect; numbers align right by default.
    pub fn effective_align(&self) -> Align {
        match self.align {
            Some(align) => align,
            None if self.zero => Align::AfterSign,
            None => Align::Right,
        }
    }
}

struct Scanner<'a> {
    chars: Chars<'a>,
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn peek2(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next()
    }

    fn eat(&mut self) {
        self.chars.next();
    }

    fn eat_if(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.eat();
            true
        } else {
            false
        }
    }
}

fn invalid() -> Error {
    Error::new(ErrorCode::InvalidFormatSpec)
}

impl FromStr for FormatSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<FormatSpec> {
        let mut spec = FormatSpec::default();
        let mut scan = Scanner { chars: s.chars() };

        if let Some(align) = scan.peek2().and_then(Align::from_char) {
            let fill = scan.peek().ok_or_else(invalid)?;
            if fill == '{' || fill == '}' {
                return Err(invalid());
            }
            spec.fill = Some(fill);
            spec.align = Some(align);
            scan.eat();
            scan.eat();
        } else if let Some(align) = scan.peek().and_then(Align::from_char) {
            spec.align = Some(align);
            scan.eat();
        }

        match scan.peek() {
            Some('+') => spec.sign = Sign::Always,
            Some('-') => spec.sign = Sign::Negative,
            Some(' ') => spec.sign = Sign::Space,
            _ => {}
        }
        if matches!(scan.peek(), Some('+' | '-' | ' ')) {
            scan.eat();
        }

        spec.alternate = scan.eat_if('#');
        spec.zero = scan.eat_if('0');

        while let Some(digit) = scan.peek().and_then(|c| c.to_digit(10)) {
            spec.width = spec
                .width
                .checked_mul(10)
                .and_then(|w| w.checked_add(digit as usize))
                .ok_or_else(invalid)?;
            scan.eat();
        }

        spec.grouping = match scan.peek() {
            Some(',') => Some(Grouping::Comma),
            Some('_') => Some(Grouping::Underscore),
            _ => None,
        };
        if let Some(grouping) = spec.grouping {
            scan.eat();
            match (grouping, scan.peek()) {
                (Grouping::Comma, Some('_')) | (Grouping::Underscore, Some(',')) => {
                    return Err(Error::new(ErrorCode::ConflictingGrouping));
                }
                _ => {}
            }
        }

        if let Some(c) = scan.peek() {
            spec.kind = Kind::from_char(c).ok_or_else(|| {
                if c == '.' || c.is_ascii_digit() || c == ',' || c == '_' {
                    invalid()
                } else {
                    Error::new(ErrorCode::UnknownFormatCode(c))
                }
            })?;
            scan.eat();
        }
        if scan.peek().is_some() {
            return Err(invalid());
        }

        if let Some(grouping) = spec.grouping {
            let allowed = match spec.kind {
                Kind::Decimal => true,
                Kind::Number => false,
                Kind::Binary | Kind::Octal | Kind::LowerHex | Kind::UpperHex => {
                    grouping == Grouping::Underscore
                }
            };
            if !allowed {
                return Err(Error::new(ErrorCode::GroupingNotAllowed {
                    grouping: grouping.as_char(),
                    kind: spec.kind.as_char(),
                }));
            }
        }
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> FormatSpec {
        s.parse().unwrap()
    }

    #[test]
    fn empty() {
        assert_eq!(parse(""), FormatSpec::default());
    }

    #[test]
    fn full() {
        let spec = parse("*^+#012_x");
        assert_eq!(spec.fill, Some('*'));
        assert_eq!(spec.align, Some(Align::Center));
        assert_eq!(spec.sign, Sign::Always);
        assert!(spec.alternate);
        assert!(spec.zero);
        assert_eq!(spec.width, 12);
        assert_eq!(spec.grouping, Some(Grouping::Underscore));
        assert_eq!(spec.kind, Kind::LowerHex);
    }

    #[test]
    fn align_without_fill() {
        let spec = parse("<10");
        assert_eq!(spec.fill, None);
        assert_eq!(spec.align, Some(Align::Left));
        assert_eq!(spec.width, 10);
    }

    #[test]
    fn fill_may_be_an_align_char() {
        let spec = parse("<<");
        assert_eq!(spec.fill, Some('<'));
        assert_eq!(spec.align, Some(Align::Left));
    }

    #[test]
    fn zero_flag_defaults() {
        let spec = parse("08d");
        assert_eq!(spec.effective_fill(), '0');
        assert_eq!(spec.effective_align(), Align::AfterSign);
        let spec = parse("x<08d");
        assert_eq!(spec.effective_fill(), 'x');
        assert_eq!(spec.effective_align(), Align::Left);
    }

    #[test]
    fn errors() {
        let code = |s: &str| s.parse::<FormatSpec>().unwrap_err().code().clone();
        assert_eq!(code("q"), ErrorCode::UnknownFormatCode('q'));
        assert_eq!(code(",n"), ErrorCode::GroupingNotAllowed { grouping: ',', kind: 'n' });
        assert_eq!(code("_n"), ErrorCode::GroupingNotAllowed { grouping: '_', kind: 'n' });
        assert_eq!(code(",x"), ErrorCode::GroupingNotAllowed { grouping: ',', kind: 'x' });
        assert_eq!(code(",_d"), ErrorCode::ConflictingGrouping);
        assert_eq!(code("_,d"), ErrorCode::ConflictingGrouping);
        assert_eq!(code(".2d"), ErrorCode::InvalidFormatSpec);
        assert_eq!(code("dd"), ErrorCode::InvalidFormatSpec);
        assert_eq!(code("{<5"), ErrorCode::InvalidFormatSpec);
        assert!(",_d".parse::<FormatSpec>().unwrap_err().is_value());
    }
}
