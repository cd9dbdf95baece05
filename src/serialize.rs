use crate::error::FractionError;
use crate::fraction::Fraction;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Serialized as the mixed-number string, e.g. `"3 1/2"`.
impl Serialize for Fraction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Accepts any string `Fraction::parse` accepts, plus bare integers and floats.
impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FractionVisitor)
    }
}

struct FractionVisitor;

impl<'de> Visitor<'de> for FractionVisitor {
    type Value = Fraction;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a fraction such as 3, 0.75, \"1/4\" or \"3 1/2\"")
    }

    fn visit_i64<E>(self, v: i64) -> Result<Fraction, E>
    where
        E: de::Error,
    {
        Ok(Fraction::from_integer(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Fraction, E>
    where
        E: de::Error,
    {
        i64::try_from(v)
            .map(Fraction::from_integer)
            .map_err(|_| E::custom(FractionError::Overflow))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Fraction, E>
    where
        E: de::Error,
    {
        Fraction::from_f64(v).map_err(E::custom)
    }

    fn visit_str<E>(self, v: &str) -> Result<Fraction, E>
    where
        E: de::Error,
    {
        Fraction::parse(v).map_err(E::custom)
    }
}
