//! Pre-built rows for common testing scenarios.

use crate::row::{Number, Row, RowValue};
use chrono::{NaiveDate, NaiveTime};

/// A flat row with one field per scalar variant, including a null.
///
/// # Example
///
/// ```
/// use rowcoder::testing::sample_flat_row;
///
/// let row = sample_flat_row();
/// assert!(row.get("deleted_at").is_some_and(|v| v.is_null()));
/// ```
#[must_use]
pub fn sample_flat_row() -> Row {
    Row::new()
        .with("id", 1_042)
        .with("name", "Ada Lovelace")
        .with("active", true)
        .with("score", 98.5)
        .with("balance", -12)
        .with("deleted_at", RowValue::Null)
}

/// A row with nested rows, arrays of rows, and nulls at every depth.
#[must_use]
pub fn sample_nested_row() -> Row {
    let address = Row::new()
        .with("street", "12 Analytical Way")
        .with("city", "London")
        .with("postcode", RowValue::Null);
    let orders = vec![
        RowValue::from(Row::new().with("sku", "A-1").with("qty", 2)),
        RowValue::from(Row::new().with("sku", "B-7").with("qty", RowValue::Null)),
    ];
    Row::new()
        .with("customer", "c-9")
        .with("address", address)
        .with("orders", orders)
        .with(
            "matrix",
            vec![
                RowValue::from(vec![RowValue::from(1), RowValue::from(2)]),
                RowValue::Array(vec![]),
            ],
        )
        .with("meta", Row::new())
}

/// A row whose numbers sit at the edges of each numeric variant.
#[must_use]
pub fn sample_numeric_edge_row() -> Row {
    Row::new()
        .with("zero", 0)
        .with("i64_min", i64::MIN)
        .with("i64_max", i64::MAX)
        .with("u64_max", RowValue::Number(Number::UInt(u64::MAX)))
        .with("tiny", 5e-324)
        .with("huge", f64::MAX)
        .with("whole_float", 3.0)
}

/// A row with text that needs JSON escaping.
#[must_use]
pub fn sample_escaping_row() -> Row {
    Row::new()
        .with("quote", "she said \"hi\"")
        .with("backslash", r"C:\temp\new")
        .with("control", "line1\nline2\ttab\u{0001}")
        .with("unicode", "日本語 😀")
        .with("", "empty key")
}

/// A row holding each temporal variant.
///
/// Temporal values encode to text, so this row decodes to string fields
/// rather than comparing equal to itself.
///
/// # Panics
///
/// Never in practice; the literals are valid calendar values.
#[must_use]
pub fn sample_temporal_row() -> Row {
    let date = NaiveDate::from_ymd_opt(2023, 5, 1).expect("2023-05-01 is a valid date");
    let time = NaiveTime::from_hms_opt(9, 30, 0).expect("09:30:00 is a valid time");
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc();
    Row::new()
        .with("created", midnight)
        .with("day", date)
        .with("local", date.and_time(time))
        .with("at", time)
}

/// Every fixture that round-trips to an equal row.
#[must_use]
pub fn sample_rows() -> Vec<Row> {
    vec![
        Row::new(),
        sample_flat_row(),
        sample_nested_row(),
        sample_numeric_edge_row(),
        sample_escaping_row(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temporal_fixture_holds_the_literal_values() {
        let row = sample_temporal_row();
        assert_eq!(
            row.get("day"),
            Some(&RowValue::Date(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()))
        );
        assert_eq!(
            row.get("at"),
            Some(&RowValue::Time(NaiveTime::from_hms_opt(9, 30, 0).unwrap()))
        );
        match row.get("created") {
            Some(RowValue::Timestamp(ts)) => assert_eq!(ts.timestamp(), 1_682_899_200),
            other => panic!("expected a timestamp, got {other:?}"),
        }
    }
}
