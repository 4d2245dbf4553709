//! Environment-driven configuration for the exporter.
//!
//! - `WAREHOUSE_PROJECT_ID` – required; project/catalog holding the dataset.
//! - `WAREHOUSE_DATASET`    – optional; defaults to `tcg_price_oracle`.
//! - `WAREHOUSE_DSN`        – required; connection string for the warehouse
//!   SQL endpoint. Credentials stay in the calling environment; the exporter
//!   never manages them itself.

use std::env;

use crate::error::ExportError;

pub const PROJECT_ID_VAR: &str = "WAREHOUSE_PROJECT_ID";
pub const DATASET_VAR: &str = "WAREHOUSE_DATASET";
pub const DSN_VAR: &str = "WAREHOUSE_DSN";

pub const DEFAULT_DATASET: &str = "tcg_price_oracle";

#[derive(Debug, Clone)]
pub struct Config {
    pub project_id: String,
    pub dataset: String,
    pub dsn: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ExportError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup. Tests use
    /// this to avoid touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ExportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_id = require(&lookup, PROJECT_ID_VAR)?;
        let dsn = require(&lookup, DSN_VAR)?;
        let dataset = lookup(DATASET_VAR)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DATASET.to_string());
        Ok(Self {
            project_id,
            dataset,
            dsn,
        })
    }
}

fn require<F>(lookup: &F, name: &'static str) -> Result<String, ExportError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or(ExportError::MissingEnv { name })
}
