//! Lenient numeric deserialization for stat fields.
//!
//! Persisted stat maps are loosely typed. A value that is not a finite
//! number (string, bool, null, nested map or list, NaN) deserializes as `0`
//! instead of failing the whole record.

use core::fmt;

use serde::Deserializer;
use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};

struct StatValueVisitor;

impl<'de> Visitor<'de> for StatValueVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a stat value")
    }

    fn visit_i64<E>(self, value: i64) -> Result<i64, E> {
        Ok(value)
    }

    fn visit_u64<E>(self, value: u64) -> Result<i64, E> {
        Ok(i64::try_from(value).unwrap_or(i64::MAX))
    }

    fn visit_f64<E>(self, value: f64) -> Result<i64, E> {
        if value.is_finite() {
            Ok(value.round() as i64)
        } else {
            Ok(0)
        }
    }

    fn visit_bool<E>(self, _value: bool) -> Result<i64, E> {
        Ok(0)
    }

    fn visit_str<E>(self, _value: &str) -> Result<i64, E> {
        Ok(0)
    }

    fn visit_char<E>(self, _value: char) -> Result<i64, E> {
        Ok(0)
    }

    fn visit_bytes<E>(self, _value: &[u8]) -> Result<i64, E> {
        Ok(0)
    }

    fn visit_unit<E>(self) -> Result<i64, E> {
        Ok(0)
    }

    fn visit_none<E>(self) -> Result<i64, E> {
        Ok(0)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<i64, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(0)
    }

    fn visit_map<A>(self, mut map: A) -> Result<i64, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(0)
    }
}

pub(crate) fn signed<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(StatValueVisitor)
}

pub(crate) fn unsigned<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = signed(deserializer)?;
    Ok(value.clamp(0, i64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use crate::stats::{StatBlock, StatDelta};

    #[test]
    fn garbage_fields_count_as_zero() {
        let json = r#"{
            "health": 50,
            "attack": "lots",
            "defense": null,
            "speed": 3.6,
            "magic": {"fire": 2},
            "luck": 7
        }"#;
        let delta: StatDelta = serde_json::from_str(json).expect("lenient parse");
        assert_eq!(
            delta,
            StatDelta {
                health: 50,
                speed: 4,
                ..StatDelta::ZERO
            }
        );
    }

    #[test]
    fn unsigned_fields_clamp_negatives() {
        let block: StatBlock =
            serde_json::from_str(r#"{"health": -5, "attack": 12}"#).expect("lenient parse");
        assert_eq!(block, StatBlock::new(0, 12, 0, 0, 0));
    }
}
