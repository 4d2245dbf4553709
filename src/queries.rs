//! Static query definitions for the two exported datasets.
//!
//! Both queries are read-only and fully sorted; the exporter writes rows in
//! exactly the order the warehouse returns them. Project and dataset are
//! trusted configuration values substituted into the table reference –
//! identifiers cannot be bound as query parameters, and the queries carry
//! no other dynamic input.

/// One export: a named query paired with its destination file.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub name: &'static str,
    pub sql: String,
    pub output_filename: &'static str,
}

/// Per-card, per-month price metrics, newest month first.
pub fn card_metrics_job(project_id: &str, dataset: &str) -> ExportJob {
    ExportJob {
        name: "card_metrics",
        sql: format!(
            "SELECT
  set_id,
  month,
  card_number,
  card_name,
  rarity,
  raw_price,
  psa_10_price,
  psa_9_price,
  tag_10_price,
  ace_10_price,
  cgc_10_price,
  bgs_10_price,
  bgs_10_black_label_price,
  cgc_10_pristine_price
FROM
  {project_id}.{dataset}.card_metrics
ORDER BY
  month DESC,
  set_id,
  card_number"
        ),
        output_filename: "card_metrics.json",
    }
}

/// Per-set, per-month aggregates (expected value, totals, concentration).
pub fn set_metrics_job(project_id: &str, dataset: &str) -> ExportJob {
    ExportJob {
        name: "set_metrics",
        sql: format!(
            "SELECT
  set_id,
  month,
  ev,
  set_value,
  top_5_value,
  top_5_ratio
FROM
  {project_id}.{dataset}.set_metrics
ORDER BY
  month DESC,
  set_id"
        ),
        output_filename: "set_metrics.json",
    }
}

/// The jobs one run performs, in execution order.
pub fn export_jobs(project_id: &str, dataset: &str) -> Vec<ExportJob> {
    vec![
        card_metrics_job(project_id, dataset),
        set_metrics_job(project_id, dataset),
    ]
}
