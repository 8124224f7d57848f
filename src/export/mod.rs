//! Export module
//!
//! - CSV: the favor history, one row per favor (spreadsheet-compatible)
//! - JSON: members and favors with schema versioning

pub mod csv;
pub mod json;

pub use self::csv::export_favors_csv;
pub use self::json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};

use serde::{Deserialize, Serialize};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}
