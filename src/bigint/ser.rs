use super::BigInt;
use serde_core::ser::{Error, Serialize, Serializer};

/// Values representable as `i64` or `u64` serialize as integers, the rest as
/// decimal strings.
impl Serialize for BigInt {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Ok(value) = self.to_i64() {
            return serializer.serialize_i64(value);
        }
        if let Ok(value) = self.to_u64() {
            return serializer.serialize_u64(value);
        }
        let text = self.to_str_radix(10).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }
}
