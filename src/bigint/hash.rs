use super::BigInt;
use crate::digits::LIMB_BITS;
use std::hash::{Hash, Hasher};

/// Modulus of the numeric hash, the Mersenne prime `2**61 - 1`.
pub const HASH_MODULUS: u64 = (1 << 61) - 1;

impl BigInt {
    /// The modular numeric hash used by the host language.
    ///
    /// The magnitude is reduced modulo [`HASH_MODULUS`] and the sign
    /// reapplied; `-1` is reserved, so a result of `-1` becomes `-2`.
    ///
    /// ```
    /// use zzint::BigInt;
    ///
    /// assert_eq!(BigInt::from(-1).numeric_hash(), -2);
    /// assert_eq!(BigInt::from(1u64 << 61).numeric_hash(), 1);
    /// ```
    pub fn numeric_hash(&self) -> i64 {
        let modulus = HASH_MODULUS as u128;
        let reduced = self.mag.iter().rev().fold(0u128, |acc, &limb| {
            ((acc << LIMB_BITS) | limb as u128) % modulus
        }) as i64;
        let hash = if self.negative { -reduced } else { reduced };
        if hash == -1 {
            -2
        } else {
            hash
        }
    }
}

impl Hash for BigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Ok(value) = self.to_i64() {
            value.hash(state);
        } else if let Ok(value) = self.to_u64() {
            value.hash(state);
        } else {
            self.negative.hash(state);
            self.mag.len().hash(state);
            for &limb in self.mag.iter() {
                limb.hash(state);
            }
        }
    }
}
