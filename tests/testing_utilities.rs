//! The property assertions and fixtures, exercised against the built-in coders
//! and a few configurations.

use anyhow::Result;
use rowcoder::testing::*;
use rowcoder::{
    Coder, Context, MapperConfig, Number, Row, RowJsonCoder, RowValue, StringUtf8Coder,
    TemporalFormat,
};
use std::io::Cursor;

#[test]
fn every_fixture_passes_every_property() {
    let coder = RowJsonCoder::default();
    for row in sample_rows() {
        assert_round_trip(&coder, &row);
        assert_encoded_size_matches(&coder, &row);
        assert_deterministic(&coder, &row);
    }
}

#[test]
fn numeric_edges_keep_their_variants() -> Result<()> {
    let coder = RowJsonCoder::default();
    let back = round_trip(&coder, &sample_numeric_edge_row(), Context::Nested)?;
    assert_eq!(back.get("i64_min").and_then(RowValue::as_i64), Some(i64::MIN));
    assert_eq!(
        back.get("u64_max"),
        Some(&RowValue::Number(Number::UInt(u64::MAX)))
    );
    assert_eq!(
        back.get("whole_float"),
        Some(&RowValue::Number(Number::Float(3.0)))
    );
    assert_eq!(back.get("tiny").and_then(RowValue::as_f64), Some(5e-324));
    assert_eq!(back.get("huge").and_then(RowValue::as_f64), Some(f64::MAX));
    Ok(())
}

#[test]
fn escaped_text_is_preserved_exactly() -> Result<()> {
    let coder = RowJsonCoder::default();
    let row = sample_escaping_row();
    let back = round_trip(&coder, &row, Context::Outer)?;
    assert_eq!(back.get("control").and_then(RowValue::as_str), Some("line1\nline2\ttab\u{0001}"));
    assert_eq!(back.get("").and_then(RowValue::as_str), Some("empty key"));
    assert_eq!(back, row);
    Ok(())
}

#[test]
fn skipping_nulls_drops_fields_but_still_decodes() -> Result<()> {
    let coder = RowJsonCoder::with_config(MapperConfig {
        write_nulls: false,
        ..MapperConfig::default()
    });
    let row = sample_flat_row();
    let back = round_trip(&coder, &row, Context::Nested)?;
    assert!(!back.contains_key("deleted_at"));
    assert_eq!(back.len(), row.len() - 1);
    assert_encoded_size_matches(&coder, &row);
    Ok(())
}

#[test]
fn epoch_millis_config_writes_numbers() -> Result<()> {
    let coder = RowJsonCoder::with_config(MapperConfig {
        temporal_format: TemporalFormat::EpochMillis,
        ..MapperConfig::default()
    });
    let json = coder.to_json_string(&sample_temporal_row())?;
    assert_eq!(
        json,
        r#"{"created":1682899200000,"day":"2023-05-01","local":1682933400000,"at":"09:30:00"}"#
    );
    Ok(())
}

#[test]
fn json_text_helpers_match_the_coder() -> Result<()> {
    let coder = RowJsonCoder::default();
    let row = sample_nested_row();
    let text = coder.to_json_string(&row)?;

    let mut framed = Vec::new();
    StringUtf8Coder.encode(&text, &mut framed)?;
    let mut direct = Vec::new();
    coder.encode(&row, &mut direct)?;
    assert_eq!(framed, direct);

    assert_eq!(coder.from_json_str(&text)?, row);
    assert_eq!(coder.decode(&mut Cursor::new(direct))?, row);
    Ok(())
}

#[test]
fn type_tags_identify_encoded_types() {
    let rows = RowJsonCoder::default();
    assert!(rows.encoded_type().is::<Row>());
    assert!(StringUtf8Coder.encoded_type().is::<String>());
    assert_ne!(rows.encoded_type(), StringUtf8Coder.encoded_type());
}

#[test]
#[should_panic(expected = "Round trip failed")]
fn round_trip_assertion_reports_encoding_failures() {
    let coder = RowJsonCoder::default();
    assert_round_trip(&coder, &Row::new().with("nan", f64::NAN));
}
