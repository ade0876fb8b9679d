use super::BigInt;
use crate::digits::{Backend, DigitArith};
use std::cmp::Ordering;

impl BigInt {
    /// Compare against an `i128` without allocating.
    fn cmp_i128(&self, other: i128) -> Ordering {
        match self.as_i128() {
            Some(value) => value.cmp(&other),
            None if self.negative => Ordering::Less,
            None => Ordering::Greater,
        }
    }

    /// Compare against a `u128` without allocating.
    fn cmp_u128(&self, other: u128) -> Ordering {
        if self.negative {
            return Ordering::Less;
        }
        match self.as_u128() {
            Some(value) => value.cmp(&other),
            None => Ordering::Greater,
        }
    }
}

impl PartialEq for BigInt {
    #[inline]
    fn eq(&self, other: &BigInt) -> bool {
        self.negative == other.negative && self.mag == other.mag
    }
}

impl Eq for BigInt {}

impl PartialOrd for BigInt {
    #[inline]
    fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &BigInt) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => Backend::compare(&self.mag, &other.mag),
            (true, true) => Backend::compare(&other.mag, &self.mag),
        }
    }
}

macro_rules! partialeq_numeric {
    ($($via:ident => $($ty:ty)*;)*) => {
        $($(
            impl PartialEq<$ty> for BigInt {
                #[inline]
                fn eq(&self, other: &$ty) -> bool {
                    self.$via(*other as _) == Ordering::Equal
                }
            }

            impl PartialEq<BigInt> for $ty {
                #[inline]
                fn eq(&self, other: &BigInt) -> bool {
                    other.$via(*self as _) == Ordering::Equal
                }
            }

            impl PartialOrd<$ty> for BigInt {
                #[inline]
                fn partial_cmp(&self, other: &$ty) -> Option<Ordering> {
                    Some(self.$via(*other as _))
                }
            }

            impl PartialOrd<BigInt> for $ty {
                #[inline]
                fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
                    Some(other.$via(*self as _).reverse())
                }
            }
        )*)*
    }
}

partialeq_numeric! {
    cmp_i128 => i8 i16 i32 i64 i128 isize;
    cmp_u128 => u8 u16 u32 u64 u128 usize;
}
