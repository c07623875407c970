//! Explicit-case JSON mapping for [`Row`] and [`RowValue`].
//!
//! Writing goes through [`Mapped`], which pairs a value with the
//! [`MapperConfig`] that decides how nulls and temporal values are written.
//! The plain `Serialize` impls on `Row`/`RowValue` use the default config.
//!
//! Reading is config-independent: every JSON document maps to exactly one
//! value tree. Objects become rows (first occurrence fixes a key's position,
//! the last occurrence wins the value), integers become [`Number::Int`] when
//! they fit in `i64`, and anything with a fraction or exponent becomes
//! [`Number::Float`].

use super::{Number, Row, RowValue};
use crate::config::{MapperConfig, TemporalFormat};
use chrono::SecondsFormat;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

const DEFAULT_CONFIG: MapperConfig = MapperConfig {
    write_nulls: true,
    temporal_format: TemporalFormat::Iso8601,
};

/// Deepest nesting of rows and arrays that `serde_json` will parse back.
///
/// Writing refuses anything deeper, so every encoded row can be decoded.
pub const MAX_NESTING_DEPTH: usize = 127;

/// A value borrowed together with the config used to write it.
pub struct Mapped<'a, T: ?Sized> {
    value: &'a T,
    config: &'a MapperConfig,
    /// Rows and arrays enclosing `value`.
    depth: usize,
}

impl<'a, T: ?Sized> Mapped<'a, T> {
    pub fn new(value: &'a T, config: &'a MapperConfig) -> Self {
        Self::at_depth(value, config, 0)
    }

    fn at_depth(value: &'a T, config: &'a MapperConfig, depth: usize) -> Self {
        Self {
            value,
            config,
            depth,
        }
    }
}

fn enter<E: ser::Error>(depth: usize) -> Result<usize, E> {
    let level = depth + 1;
    if level > MAX_NESTING_DEPTH {
        return Err(E::custom(format_args!(
            "row nests deeper than {MAX_NESTING_DEPTH} levels"
        )));
    }
    Ok(level)
}

impl Serialize for Mapped<'_, Row> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let level = enter(self.depth)?;
        let skip_nulls = !self.config.write_nulls;
        let len = if skip_nulls {
            self.value.iter().filter(|(_, v)| !v.is_null()).count()
        } else {
            self.value.len()
        };
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in self.value.iter() {
            if skip_nulls && value.is_null() {
                continue;
            }
            map.serialize_entry(key, &Mapped::at_depth(value, self.config, level))?;
        }
        map.end()
    }
}

impl Serialize for Mapped<'_, RowValue> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let epoch = self.config.temporal_format == TemporalFormat::EpochMillis;
        match self.value {
            RowValue::Null => serializer.serialize_unit(),
            RowValue::Bool(b) => serializer.serialize_bool(*b),
            RowValue::Number(n) => serialize_number(n, serializer),
            RowValue::String(s) => serializer.serialize_str(s),
            RowValue::Row(row) => {
                Mapped::at_depth(row, self.config, self.depth).serialize(serializer)
            }
            RowValue::Array(items) => {
                let level = enter(self.depth)?;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Mapped::at_depth(item, self.config, level))?;
                }
                seq.end()
            }
            RowValue::Timestamp(ts) if epoch => serializer.serialize_i64(ts.timestamp_millis()),
            RowValue::Timestamp(ts) => {
                serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            RowValue::DateTime(dt) if epoch => {
                serializer.serialize_i64(dt.and_utc().timestamp_millis())
            }
            RowValue::DateTime(dt) => serializer.collect_str(&dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            RowValue::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            RowValue::Time(t) => serializer.collect_str(&t.format("%H:%M:%S%.f")),
        }
    }
}

fn serialize_number<S: Serializer>(n: &Number, serializer: S) -> Result<S::Ok, S::Error> {
    match *n {
        Number::Int(v) => serializer.serialize_i64(v),
        Number::UInt(v) => serializer.serialize_u64(v),
        // serde_json would quietly write `null` here.
        Number::Float(v) if !v.is_finite() => Err(ser::Error::custom(format_args!(
            "float {v} has no JSON representation"
        ))),
        Number::Float(v) => serializer.serialize_f64(v),
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Mapped::new(self, &DEFAULT_CONFIG).serialize(serializer)
    }
}

impl Serialize for RowValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Mapped::new(self, &DEFAULT_CONFIG).serialize(serializer)
    }
}

struct RowValueVisitor;

impl<'de> Visitor<'de> for RowValueVisitor {
    type Value = RowValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<RowValue, E> {
        Ok(RowValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<RowValue, E> {
        Ok(RowValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<RowValue, D::Error> {
        RowValue::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<RowValue, E> {
        Ok(RowValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RowValue, E> {
        Ok(RowValue::Number(Number::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RowValue, E> {
        Ok(RowValue::Number(Number::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RowValue, E> {
        Ok(RowValue::Number(Number::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RowValue, E> {
        Ok(RowValue::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RowValue, E> {
        Ok(RowValue::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RowValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<RowValue>()? {
            items.push(item);
        }
        Ok(RowValue::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<RowValue, A::Error> {
        RowVisitor.visit_map(map).map(RowValue::Row)
    }
}

impl<'de> Deserialize<'de> for RowValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RowValueVisitor)
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Row, A::Error> {
        let mut row = Row::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, RowValue>()? {
            row.insert(key, value);
        }
        Ok(row)
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RowVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn to_json(row: &Row, config: &MapperConfig) -> String {
        serde_json::to_string(&Mapped::new(row, config)).unwrap()
    }

    #[test]
    fn writes_keys_in_insertion_order() {
        let row = Row::new().with("zeta", 1).with("alpha", 2).with("mid", 3);
        assert_eq!(
            to_json(&row, &MapperConfig::default()),
            r#"{"zeta":1,"alpha":2,"mid":3}"#
        );
    }

    #[test]
    fn nulls_are_written_by_default() {
        let row = Row::new().with("a", RowValue::Null).with("b", "x");
        assert_eq!(
            to_json(&row, &MapperConfig::default()),
            r#"{"a":null,"b":"x"}"#
        );
    }

    #[test]
    fn nulls_can_be_skipped_in_rows_but_not_arrays() {
        let config = MapperConfig {
            write_nulls: false,
            ..MapperConfig::default()
        };
        let row = Row::new()
            .with("a", RowValue::Null)
            .with("list", vec![RowValue::Null, RowValue::from(1)])
            .with("inner", Row::new().with("gone", RowValue::Null).with("kept", true));
        assert_eq!(
            to_json(&row, &config),
            r#"{"list":[null,1],"inner":{"kept":true}}"#
        );
    }

    #[test]
    fn temporal_values_are_iso_text() {
        let ts = Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap();
        let date = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        let civil = date.and_hms_milli_opt(12, 30, 0, 250).unwrap();
        let time = chrono::NaiveTime::from_hms_opt(8, 15, 0).unwrap();
        let row = Row::new()
            .with("ts", ts)
            .with("date", date)
            .with("civil", civil)
            .with("time", time);
        assert_eq!(
            to_json(&row, &MapperConfig::default()),
            r#"{"ts":"2023-05-01T00:00:00Z","date":"2023-05-01","civil":"2023-05-01T12:30:00.250","time":"08:15:00"}"#
        );
    }

    #[test]
    fn epoch_millis_applies_to_instants_only() {
        let config = MapperConfig {
            temporal_format: TemporalFormat::EpochMillis,
            ..MapperConfig::default()
        };
        let ts = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap();
        let date = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        let row = Row::new().with("ts", ts).with("date", date);
        assert_eq!(to_json(&row, &config), r#"{"ts":1000,"date":"1970-01-02"}"#);
    }

    #[test]
    fn non_finite_float_is_an_error() {
        let row = Row::new().with("bad", f64::NAN);
        let err = serde_json::to_string(&row).unwrap_err();
        assert!(!err.is_io());
        assert!(err.to_string().contains("no JSON representation"));
    }

    /// A chain of `depth` rows, the outermost included.
    fn deep_rows(depth: usize) -> Row {
        let mut row = Row::new().with("leaf", 1);
        for _ in 1..depth {
            row = Row::new().with("n", row);
        }
        row
    }

    #[test]
    fn nesting_up_to_the_parser_limit_round_trips() {
        let row = deep_rows(MAX_NESTING_DEPTH);
        let text = serde_json::to_string(&row).unwrap();
        let back: Row = serde_json::from_str(&text).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn nesting_past_the_parser_limit_fails_to_write() {
        for depth in [MAX_NESTING_DEPTH + 1, 200] {
            let err = serde_json::to_string(&deep_rows(depth)).unwrap_err();
            assert!(!err.is_io());
            assert!(err.to_string().contains("nests deeper"), "{err}");
        }
    }

    #[test]
    fn arrays_count_toward_nesting() {
        let mut value = RowValue::from(1);
        for _ in 0..MAX_NESTING_DEPTH - 1 {
            value = RowValue::Array(vec![value]);
        }
        let ok = Row::new().with("a", value.clone());
        let text = serde_json::to_string(&ok).unwrap();
        assert_eq!(serde_json::from_str::<Row>(&text).unwrap(), ok);

        let too_deep = Row::new().with("a", RowValue::Array(vec![value]));
        assert!(serde_json::to_string(&too_deep).is_err());
    }

    #[test]
    fn numbers_decode_to_the_narrowest_variant() {
        let row: Row =
            serde_json::from_str(r#"{"i":-3,"u":18446744073709551615,"f":1.5,"e":1e3}"#).unwrap();
        assert_eq!(row.get("i"), Some(&RowValue::Number(Number::Int(-3))));
        assert_eq!(row.get("u"), Some(&RowValue::Number(Number::UInt(u64::MAX))));
        assert_eq!(row.get("f"), Some(&RowValue::Number(Number::Float(1.5))));
        assert_eq!(row.get("e"), Some(&RowValue::Number(Number::Float(1000.0))));
    }

    #[test]
    fn duplicate_keys_keep_first_position_and_last_value() {
        let row: Row = serde_json::from_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        assert_eq!(row.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(row.get("a").and_then(RowValue::as_i64), Some(3));
    }

    #[test]
    fn top_level_must_be_an_object() {
        assert!(serde_json::from_str::<Row>("[1,2]").is_err());
        assert!(serde_json::from_str::<Row>("42").is_err());
        assert!(serde_json::from_str::<Row>("null").is_err());
    }
}
