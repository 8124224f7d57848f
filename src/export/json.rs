//! JSON export of the whole ledger
//!
//! Exports members and favors together with schema versioning.

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{VillageError, VillageResult};
use crate::models::{Favor, Member};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Version of the tool that wrote the export
    pub app_version: String,
    pub members: Vec<Member>,
    pub favors: Vec<Favor>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub member_count: usize,
    pub favor_count: usize,
    /// Sum of all recorded favor minutes
    pub total_minutes: i64,
    pub earliest_favor: Option<NaiveDate>,
    pub latest_favor: Option<NaiveDate>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> VillageResult<Self> {
        let members = storage.members.get_all()?;
        let favors = storage.favors.get_all()?;

        let metadata = ExportMetadata {
            member_count: members.len(),
            favor_count: favors.len(),
            total_minutes: favors.iter().map(|f| f.minutes.get()).sum(),
            earliest_favor: favors.iter().map(|f| f.date).min(),
            latest_favor: favors.iter().map(|f| f.date).max(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            members,
            favors,
            metadata,
        })
    }
}

/// Write the full ledger as pretty-printed JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W) -> VillageResult<()> {
    let export = FullExport::from_storage(storage)?;
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| VillageError::Export(format!("Failed to write JSON export: {}", e)))?;
    writeln!(writer).map_err(|e| VillageError::Export(e.to_string()))?;
    Ok(())
}
