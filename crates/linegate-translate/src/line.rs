// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Line-protocol record encoding.
//!
//! Converts one (column list, value row) pair from a legacy message into
//! a single `name field1=value1,field2=value2` record. No timestamp is
//! written; the downstream server assigns ingestion time.
//!
//! Two columns carry hardcoded coercions inherited from the fleet's
//! history: `uptime` arrived sometimes as float and sometimes as int, so
//! it is renamed to `alive` and forced to an integer field; `relay` keeps
//! its name but is forced to an integer as well.

use serde_json::Value;
use thiserror::Error;

/// Coercion applied to a column listed in the override table.
#[derive(Debug, Clone, Copy)]
enum Coercion {
    /// Truncate the numeric value toward zero and write `<name>=<n>i`.
    IntegerTruncate,
}

/// Columns with special handling, consulted in order before the generic
/// type-driven rule: `(incoming column, outgoing field name, rule)`.
const OVERRIDES: &[(&str, &str, Coercion)] = &[
    ("uptime", "alive", Coercion::IntegerTruncate),
    ("relay", "relay", Coercion::IntegerTruncate),
];

/// Record encoding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The row does not match the column list in length. The caller skips
    /// the row; sibling rows are unaffected.
    #[error("columns and values are different lengths ({columns} vs {values})")]
    LengthMismatch { columns: usize, values: usize },
    /// A value kind with no line-protocol mapping, under
    /// [`UnsupportedFieldPolicy::FailRecord`].
    #[error("column '{column}' holds a value kind with no line-protocol mapping")]
    UnsupportedValue { column: String },
}

/// What to do with a field whose value kind has no mapping (booleans,
/// nulls, nested structures, or a non-numeric value in an overridden
/// column).
///
/// The original translator dropped such fields silently. That stays the
/// default; `FailRecord` is available where silent loss is unacceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedFieldPolicy {
    /// Omit the field and keep the rest of the record.
    #[default]
    Drop,
    /// Fail the whole record with [`EncodeError::UnsupportedValue`].
    FailRecord,
}

/// Outcome of encoding a single column/value pair.
enum FieldOutcome {
    /// A ready `key=value` pair.
    Pair(String),
    /// No mapping for this value kind.
    Unsupported,
}

/// Encodes legacy rows as line-protocol records.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordEncoder {
    policy: UnsupportedFieldPolicy,
}

impl RecordEncoder {
    /// Create an encoder with the given unsupported-field policy.
    pub fn new(policy: UnsupportedFieldPolicy) -> Self {
        Self { policy }
    }

    /// Encode one row as a full record: `<measurement> <fields>`.
    ///
    /// A row that resolves to zero fields still produces `"<measurement> "`
    /// with an empty field section; whether to accept that is left to the
    /// downstream server.
    pub fn encode(
        &self,
        measurement: &str,
        columns: &[String],
        values: &[Value],
    ) -> Result<String, EncodeError> {
        Ok(format!(
            "{} {}",
            measurement,
            self.key_value_string(columns, values)?
        ))
    }

    /// Encode the comma-joined field section of a record, in column order.
    pub fn key_value_string(
        &self,
        columns: &[String],
        values: &[Value],
    ) -> Result<String, EncodeError> {
        if columns.len() != values.len() {
            return Err(EncodeError::LengthMismatch {
                columns: columns.len(),
                values: values.len(),
            });
        }

        let mut pairs = Vec::with_capacity(columns.len());
        for (column, value) in columns.iter().zip(values) {
            match encode_field(column, value) {
                FieldOutcome::Pair(pair) => pairs.push(pair),
                FieldOutcome::Unsupported => match self.policy {
                    UnsupportedFieldPolicy::Drop => {}
                    UnsupportedFieldPolicy::FailRecord => {
                        return Err(EncodeError::UnsupportedValue {
                            column: column.clone(),
                        });
                    }
                },
            }
        }
        Ok(pairs.join(","))
    }
}

/// Encode one column/value pair: override table first, then the generic
/// type-driven rule.
///
/// Strings pass through unquoted and unescaped, so names and values must
/// not contain delimiter characters. Numbers are written with fixed
/// six-decimal precision, integers included, to match the historical
/// output byte for byte.
fn encode_field(column: &str, value: &Value) -> FieldOutcome {
    for &(incoming, outgoing, rule) in OVERRIDES {
        if column == incoming {
            return apply_coercion(outgoing, rule, value);
        }
    }

    match value {
        Value::String(s) => FieldOutcome::Pair(format!("{}={}", column, s)),
        Value::Number(n) => match n.as_f64() {
            Some(v) => FieldOutcome::Pair(format!("{}={:.6}", column, v)),
            None => FieldOutcome::Unsupported,
        },
        _ => FieldOutcome::Unsupported,
    }
}

fn apply_coercion(name: &str, rule: Coercion, value: &Value) -> FieldOutcome {
    match rule {
        Coercion::IntegerTruncate => match value.as_f64() {
            // `as` truncates toward zero, matching the historical cast.
            Some(v) => FieldOutcome::Pair(format!("{}={}i", name, v as i64)),
            None => FieldOutcome::Unsupported,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_uptime_is_renamed_and_truncated() {
        let encoder = RecordEncoder::default();
        let kv = encoder
            .key_value_string(&cols(&["uptime"]), &[json!(3.9)])
            .expect("encode");
        assert_eq!(kv, "alive=3i");
    }

    #[test]
    fn test_relay_truncates_toward_zero() {
        let encoder = RecordEncoder::default();
        let kv = encoder
            .key_value_string(&cols(&["relay"]), &[json!(-2.9)])
            .expect("encode");
        assert_eq!(kv, "relay=-2i");
    }

    #[test]
    fn test_string_and_float_fields() {
        let encoder = RecordEncoder::default();
        let kv = encoder
            .key_value_string(&cols(&["host", "temp"]), &[json!("srv1"), json!(21.5)])
            .expect("encode");
        assert_eq!(kv, "host=srv1,temp=21.500000");
    }

    #[test]
    fn test_integer_json_uses_float_formatting() {
        // The legacy decoder treated every number as a float; whole
        // numbers still get six decimals.
        let encoder = RecordEncoder::default();
        let kv = encoder
            .key_value_string(&cols(&["count"]), &[json!(42)])
            .expect("encode");
        assert_eq!(kv, "count=42.000000");
    }

    #[test]
    fn test_uptime_accepts_integer_json() {
        let encoder = RecordEncoder::default();
        let kv = encoder
            .key_value_string(&cols(&["uptime"]), &[json!(120)])
            .expect("encode");
        assert_eq!(kv, "alive=120i");
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let encoder = RecordEncoder::default();
        let result = encoder.key_value_string(&cols(&["a", "b"]), &[json!(1.0)]);
        assert_eq!(
            result.unwrap_err(),
            EncodeError::LengthMismatch {
                columns: 2,
                values: 1
            }
        );
    }

    #[test]
    fn test_unsupported_kinds_are_dropped_by_default() {
        let encoder = RecordEncoder::default();
        let kv = encoder
            .key_value_string(
                &cols(&["ok", "note", "temp"]),
                &[json!(true), json!(null), json!(1.5)],
            )
            .expect("encode");
        assert_eq!(kv, "temp=1.500000");
    }

    #[test]
    fn test_non_numeric_override_value_is_dropped() {
        let encoder = RecordEncoder::default();
        let kv = encoder
            .key_value_string(&cols(&["uptime"]), &[json!("up")])
            .expect("encode");
        assert_eq!(kv, "");
    }

    #[test]
    fn test_fail_record_policy_rejects_unsupported() {
        let encoder = RecordEncoder::new(UnsupportedFieldPolicy::FailRecord);
        let result = encoder.key_value_string(&cols(&["ok"]), &[json!(true)]);
        assert_eq!(
            result.unwrap_err(),
            EncodeError::UnsupportedValue {
                column: "ok".to_string()
            }
        );
    }

    #[test]
    fn test_encode_prefixes_measurement() {
        let encoder = RecordEncoder::default();
        let record = encoder
            .encode("cpu", &cols(&["host"]), &[json!("srv1")])
            .expect("encode");
        assert_eq!(record, "cpu host=srv1");
    }

    #[test]
    fn test_encode_empty_field_section_keeps_separator() {
        let encoder = RecordEncoder::default();
        let record = encoder
            .encode("cpu", &cols(&["ok"]), &[json!(true)])
            .expect("encode");
        assert_eq!(record, "cpu ");
    }

    #[test]
    fn test_fields_follow_column_order() {
        let encoder = RecordEncoder::default();
        let kv = encoder
            .key_value_string(&cols(&["b", "a"]), &[json!(1.0), json!(2.0)])
            .expect("encode");
        assert_eq!(kv, "b=1.000000,a=2.000000");
    }
}
