//! Centralised error type for the exporter.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("missing required environment variable {name}")]
    MissingEnv { name: &'static str },

    #[error("failed to connect to warehouse: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("query '{name}' failed: {source}")]
    Query {
        name: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to decode column '{column}': {source}")]
    Decode {
        column: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("column '{column}' has unsupported warehouse type {type_name}")]
    UnsupportedType { column: String, type_name: String },

    #[error("value in column '{column}' is not representable in JSON: {reason}")]
    Serialization { column: String, reason: String },

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
