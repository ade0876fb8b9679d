use super::BigInt;
use serde_core::de::{self, Deserialize, Deserializer, Unexpected, Visitor};
use std::fmt;

impl<'de> Deserialize<'de> for BigInt {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<BigInt, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BigIntVisitor;

        impl<'de> Visitor<'de> for BigIntVisitor {
            type Value = BigInt;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer or a decimal integer string")
            }

            #[inline]
            fn visit_i64<E>(self, value: i64) -> Result<BigInt, E>
            where
                E: de::Error,
            {
                BigInt::try_from_i128(value as i128).map_err(E::custom)
            }

            #[inline]
            fn visit_u64<E>(self, value: u64) -> Result<BigInt, E>
            where
                E: de::Error,
            {
                BigInt::try_from_u128(value as u128).map_err(E::custom)
            }

            #[inline]
            fn visit_i128<E>(self, value: i128) -> Result<BigInt, E>
            where
                E: de::Error,
            {
                BigInt::try_from_i128(value).map_err(E::custom)
            }

            #[inline]
            fn visit_u128<E>(self, value: u128) -> Result<BigInt, E>
            where
                E: de::Error,
            {
                BigInt::try_from_u128(value).map_err(E::custom)
            }

            fn visit_f64<E>(self, value: f64) -> Result<BigInt, E>
            where
                E: de::Error,
            {
                BigInt::try_from(value)
                    .map_err(|_| E::invalid_value(Unexpected::Float(value), &self))
            }

            fn visit_str<E>(self, value: &str) -> Result<BigInt, E>
            where
                E: de::Error,
            {
                BigInt::from_str_radix(value, 10)
                    .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_any(BigIntVisitor)
    }
}
