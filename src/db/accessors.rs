// db/accessors.rs
// Warehouse access: the query client trait and its SQL implementation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Column, Row as _, TypeInfo};

use crate::db::models::{CellValue, Row};
use crate::error::ExportError;
use crate::queries::ExportJob;

/// Read-only client for the analytical warehouse.
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Execute the job's query and materialise every result row, in the
    /// order the warehouse returns them.
    async fn fetch_rows(&self, job: &ExportJob) -> Result<Vec<Row>, ExportError>;
}

/// Warehouse reached over its Postgres-protocol SQL endpoint.
pub struct PostgresWarehouse {
    pool: sqlx::Pool<sqlx::Postgres>,
}

impl PostgresWarehouse {
    pub async fn connect(dsn: &str) -> Result<Self, ExportError> {
        let pool = PgPoolOptions::new()
            .connect(dsn)
            .await
            .map_err(ExportError::Connect)?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl Warehouse for PostgresWarehouse {
    async fn fetch_rows(&self, job: &ExportJob) -> Result<Vec<Row>, ExportError> {
        let rows = sqlx::query(&job.sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| ExportError::Query {
                name: job.name.to_string(),
                source,
            })?;
        rows.iter().map(decode_row).collect()
    }
}

fn decode_row(row: &PgRow) -> Result<Row, ExportError> {
    let mut out = Row::new();
    for column in row.columns() {
        let name = column.name();
        let value = decode_cell(row, column.ordinal(), name, column.type_info().name())?;
        out.push(name, value);
    }
    Ok(out)
}

/// Decode one cell into the controlled value variant. SQL NULL maps to
/// `CellValue::Null` regardless of column type; a column type outside the
/// supported set fails the export rather than being silently dropped.
fn decode_cell(
    row: &PgRow,
    index: usize,
    column: &str,
    type_name: &str,
) -> Result<CellValue, ExportError> {
    let decode_err = |source| ExportError::Decode {
        column: column.to_string(),
        source,
    };
    let value = match type_name {
        "BOOL" => row
            .try_get::<Option<bool>, _>(index)
            .map_err(decode_err)?
            .map_or(CellValue::Null, CellValue::Bool),
        "INT2" => row
            .try_get::<Option<i16>, _>(index)
            .map_err(decode_err)?
            .map_or(CellValue::Null, |v| CellValue::Int(v.into())),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)
            .map_err(decode_err)?
            .map_or(CellValue::Null, |v| CellValue::Int(v.into())),
        "INT8" => row
            .try_get::<Option<i64>, _>(index)
            .map_err(decode_err)?
            .map_or(CellValue::Null, CellValue::Int),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)
            .map_err(decode_err)?
            .map_or(CellValue::Null, |v| CellValue::Float(v.into())),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(index)
            .map_err(decode_err)?
            .map_or(CellValue::Null, CellValue::Float),
        "NUMERIC" => row
            .try_get::<Option<Decimal>, _>(index)
            .map_err(decode_err)?
            .map_or(CellValue::Null, CellValue::Decimal),
        "TEXT" | "VARCHAR" | "CHAR" | "NAME" => row
            .try_get::<Option<String>, _>(index)
            .map_err(decode_err)?
            .map_or(CellValue::Null, CellValue::Text),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)
            .map_err(decode_err)?
            .map_or(CellValue::Null, CellValue::Date),
        "TIME" => row
            .try_get::<Option<NaiveTime>, _>(index)
            .map_err(decode_err)?
            .map_or(CellValue::Null, CellValue::Time),
        // Timestamps without a zone are interpreted as UTC.
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)
            .map_err(decode_err)?
            .map_or(CellValue::Null, |v| CellValue::DateTime(v.and_utc())),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)
            .map_err(decode_err)?
            .map_or(CellValue::Null, CellValue::DateTime),
        other => {
            return Err(ExportError::UnsupportedType {
                column: column.to_string(),
                type_name: other.to_string(),
            })
        }
    };
    Ok(value)
}
