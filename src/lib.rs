//! Exports per-card and per-set price metrics from the analytical warehouse
//! as static JSON documents for the site generator.
//!
//! Each exported dataset is wrapped in an envelope carrying the run
//! timestamp and the record count:
//!
//! ```text
//! {
//!   "last_updated": "<ISO-8601 timestamp>",
//!   "record_count": <integer>,
//!   "data": [ { "<column>": <value>, ... }, ... ]
//! }
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod queries;
