// Data structures for warehouse result rows and the export envelope.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::ExportError;

/// A single scalar value returned by the warehouse.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Decimal(Decimal),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(DateTime<Utc>),
}

impl CellValue {
    /// Convert into a JSON value: decimals become floating-point numbers,
    /// temporal values become ISO-8601 strings, everything else passes
    /// through unchanged. Non-finite numbers have no JSON representation
    /// and fail the export.
    pub fn into_json(self, column: &str) -> Result<Value, ExportError> {
        let value = match self {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(b),
            CellValue::Int(i) => Value::Number(Number::from(i)),
            CellValue::Float(f) => Value::Number(finite_number(f, column)?),
            CellValue::Text(s) => Value::String(s),
            CellValue::Decimal(d) => {
                let f = d.to_f64().ok_or_else(|| ExportError::Serialization {
                    column: column.to_string(),
                    reason: format!("decimal {d} does not fit in an f64"),
                })?;
                Value::Number(finite_number(f, column)?)
            }
            CellValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            CellValue::Time(t) => Value::String(t.format("%H:%M:%S%.f").to_string()),
            CellValue::DateTime(dt) => {
                Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
        };
        Ok(value)
    }
}

fn finite_number(f: f64, column: &str) -> Result<Number, ExportError> {
    Number::from_f64(f).ok_or_else(|| ExportError::Serialization {
        column: column.to_string(),
        reason: format!("non-finite number {f}"),
    })
}

/// One result row. Column order follows the query's select list and is
/// preserved through to the written document.
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.push((column.into(), value));
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert into an ordered JSON object.
    pub fn into_json(self) -> Result<Map<String, Value>, ExportError> {
        let mut object = Map::with_capacity(self.cells.len());
        for (column, value) in self.cells {
            let json = value.into_json(&column)?;
            object.insert(column, json);
        }
        Ok(object)
    }
}

/// The wrapper object persisted to disk for each dataset.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ExportEnvelope {
    pub last_updated: String,
    pub record_count: usize,
    pub data: Vec<Map<String, Value>>,
}

impl ExportEnvelope {
    /// `record_count` always mirrors `data.len()`.
    pub fn new(last_updated: impl Into<String>, data: Vec<Map<String, Value>>) -> Self {
        Self {
            last_updated: last_updated.into(),
            record_count: data.len(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn decimal_becomes_float_without_truncation() {
        let value = CellValue::Decimal(Decimal::new(1250, 2))
            .into_json("raw_price")
            .unwrap();
        assert_eq!(value, json!(12.5));

        // A whole-valued decimal must stay a float in the output text.
        let value = CellValue::Decimal(Decimal::new(1000, 2))
            .into_json("raw_price")
            .unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), "10.0");
    }

    #[test]
    fn integers_pass_through_unchanged() {
        let value = CellValue::Int(42).into_json("count").unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), "42");
    }

    #[test]
    fn temporal_values_become_iso_8601_strings() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(
            CellValue::Date(date).into_json("month").unwrap(),
            json!("2024-01-15")
        );

        let time = NaiveTime::from_hms_opt(9, 30, 5).unwrap();
        assert_eq!(
            CellValue::Time(time).into_json("at").unwrap(),
            json!("09:30:05")
        );

        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 5).unwrap();
        assert_eq!(
            CellValue::DateTime(ts).into_json("observed").unwrap(),
            json!("2024-01-15T09:30:05+00:00")
        );
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        let err = CellValue::Float(f64::NAN).into_json("ratio").unwrap_err();
        match err {
            ExportError::Serialization { column, .. } => assert_eq!(column, "ratio"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn row_preserves_column_order() {
        let mut row = Row::new();
        row.push("set_id", CellValue::Text("SV1".into()));
        row.push("month", CellValue::Text("2024-01".into()));
        row.push("card_number", CellValue::Text("001".into()));
        row.push("raw_price", CellValue::Decimal(Decimal::new(1250, 2)));

        let object = row.into_json().unwrap();
        let keys: Vec<_> = object.keys().cloned().collect();
        assert_eq!(keys, ["set_id", "month", "card_number", "raw_price"]);
        assert_eq!(object["raw_price"], json!(12.5));
    }

    #[test]
    fn envelope_counts_its_records() {
        let rows = vec![Map::new(), Map::new(), Map::new()];
        let envelope = ExportEnvelope::new("2024-01-01T00:00:00+00:00", rows);
        assert_eq!(envelope.record_count, 3);
        assert_eq!(envelope.record_count, envelope.data.len());
    }
}
