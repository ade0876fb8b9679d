use super::{Align, FormatSpec, Grouping, Kind, Sign};
use crate::bigint::text::magnitude_digits;
use crate::bigint::BigInt;
use crate::error::{Error, Result};

/// Fewest digits whose grouped rendering is at least `min_len` characters.
/// A separator never leads, so the result may overshoot by one.
fn padded_digits(min_len: usize, interval: usize) -> usize {
    if min_len == 0 {
        return 0;
    }
    let q = (min_len - 1) / (interval + 1);
    let r = (min_len - 1) % (interval + 1);
    if r < interval {
        q * interval + r + 1
    } else {
        (q + 1) * interval + 1
    }
}

/// Insert `sep` every `interval` digits, counting from the right, after
/// padding with leading zeros to at least `min_len` characters.
fn group(digits: &[u8], sep: char, interval: usize, min_len: usize) -> Result<String> {
    let count = digits.len().max(padded_digits(min_len, interval));
    let zeros = count - digits.len();
    let len = count
        .checked_add(count.saturating_sub(1) / interval)
        .ok_or_else(Error::out_of_memory)?;
    let mut out = String::new();
    out.try_reserve_exact(len)?;
    let padded = std::iter::repeat(b'0').take(zeros).chain(digits.iter().copied());
    for (i, d) in padded.enumerate() {
        if i != 0 && (count - i) % interval == 0 {
            out.push(sep);
        }
        out.push(d as char);
    }
    Ok(out)
}

impl BigInt {
    /// Render the value according to a format specifier.
    ///
    /// ```
    /// use zzint::BigInt;
    ///
    /// assert_eq!(BigInt::from(255).format("#x").unwrap(), "0xff");
    /// assert_eq!(BigInt::from(255).format("08d").unwrap(), "00000255");
    /// assert_eq!(BigInt::from(1234567).format(",d").unwrap(), "1,234,567");
    /// assert_eq!(BigInt::from(-42).format("*^9").unwrap(), "***-42***");
    /// ```
    pub fn format(&self, spec: &str) -> Result<String> {
        let spec: FormatSpec = spec.parse()?;
        self.format_with(&spec)
    }

    /// Render the value according to an already parsed specifier.
    pub fn format_with(&self, spec: &FormatSpec) -> Result<String> {
        let kind = spec.kind;
        let upper = kind == Kind::UpperHex;
        let digits = magnitude_digits(self.limbs(), kind.radix(), upper)?;

        let sign = if self.is_negative() {
            "-"
        } else {
            match spec.sign {
                Sign::Negative => "",
                Sign::Always => "+",
                Sign::Space => " ",
            }
        };
        let prefix = if spec.alternate { kind.prefix() } else { "" };
        let fill = spec.effective_fill();
        let align = spec.effective_align();

        let body: String = match spec.grouping {
            None => digits.iter().map(|&d| d as char).collect(),
            Some(sep) => {
                let interval = match (sep, kind.radix()) {
                    (Grouping::Underscore, 2 | 8 | 16) => 4,
                    _ => 3,
                };
                // Zeros between the sign and the digits are grouped too.
                let min_len = if fill == '0' && align == Align::AfterSign {
                    spec.width.saturating_sub(sign.len() + prefix.len())
                } else {
                    0
                };
                group(&digits, sep.as_char(), interval, min_len)?
            }
        };

        let len = sign.len() + prefix.len() + body.len();
        let padding = spec.width.saturating_sub(len);
        let (before, inside, after) = match align {
            Align::Left => (0, 0, padding),
            Align::Right => (padding, 0, 0),
            Align::Center => (padding / 2, 0, padding - padding / 2),
            Align::AfterSign => (0, padding, 0),
        };

        let mut out = String::new();
        let capacity = padding
            .checked_mul(fill.len_utf8())
            .and_then(|bytes| bytes.checked_add(len))
            .ok_or_else(Error::out_of_memory)?;
        out.try_reserve(capacity)?;
        out.extend(std::iter::repeat(fill).take(before));
        out.push_str(sign);
        out.push_str(prefix);
        out.extend(std::iter::repeat(fill).take(inside));
        out.push_str(&body);
        out.extend(std::iter::repeat(fill).take(after));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_test() {
        assert_eq!(group(b"1234567", ',', 3, 0).unwrap(), "1,234,567");
        assert_eq!(group(b"123456", ',', 3, 0).unwrap(), "123,456");
        assert_eq!(group(b"12", ',', 3, 0).unwrap(), "12");
        assert_eq!(group(b"11111111", '_', 4, 0).unwrap(), "1111_1111");
        assert_eq!(group(b"0", '_', 4, 0).unwrap(), "0");
        assert_eq!(group(b"1234", ',', 3, 7).unwrap(), "001,234");
        assert_eq!(group(b"1234", ',', 3, 8).unwrap(), "0,001,234");
        assert_eq!(group(b"1234567", ',', 3, 4).unwrap(), "1,234,567");
    }

    #[test]
    fn padded_digits_test() {
        assert_eq!(padded_digits(0, 3), 0);
        assert_eq!(padded_digits(3, 3), 3);
        assert_eq!(padded_digits(4, 3), 4);
        assert_eq!(padded_digits(5, 3), 4);
        assert_eq!(padded_digits(9, 4), 8);
        assert_eq!(padded_digits(10, 4), 9);
    }
}
