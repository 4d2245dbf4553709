// export/exporter.rs
// Serialises export envelopes and writes the static JSON documents.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tracing::info;

use crate::db::accessors::Warehouse;
use crate::db::models::ExportEnvelope;
use crate::error::ExportError;
use crate::queries::ExportJob;

pub struct DatasetExporter {
    output_dir: PathBuf,
}

impl DatasetExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write the envelope as indented JSON. The document is staged next to
    /// the target and renamed into place, so a concurrent reader only ever
    /// observes a complete file. The output directory must already exist.
    pub fn write_envelope(
        &self,
        envelope: &ExportEnvelope,
        filename: &str,
    ) -> Result<PathBuf, ExportError> {
        let serialized = serde_json::to_string_pretty(envelope)?;
        let path = self.output_dir.join(filename);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, serialized)?;
        fs::rename(&staging, &path)?;
        Ok(path)
    }
}

/// Run every export job in sequence against the given warehouse.
///
/// The `last_updated` stamp is captured once, before the first query, so
/// every document written by one run carries the same value. The first
/// failure aborts the run; later jobs are not attempted and their files are
/// left untouched.
pub async fn run_export(
    warehouse: &dyn Warehouse,
    jobs: &[ExportJob],
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    let last_updated = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false);
    let exporter = DatasetExporter::new(output_dir);
    let mut written = Vec::with_capacity(jobs.len());

    for job in jobs {
        info!(query = job.name, "running query");
        let rows = warehouse.fetch_rows(job).await?;

        let mut data = Vec::with_capacity(rows.len());
        for row in rows {
            data.push(row.into_json()?);
        }

        let envelope = ExportEnvelope::new(last_updated.clone(), data);
        let path = exporter.write_envelope(&envelope, job.output_filename)?;
        info!(
            records = envelope.record_count,
            path = %path.display(),
            "written dataset"
        );
        written.push(path);
    }

    Ok(written)
}
