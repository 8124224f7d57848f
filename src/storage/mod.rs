//! Storage layer
//!
//! JSON file storage with atomic writes for members and favors, the audit
//! trail, and the mapping of hosted-backend payloads into ledger records.

pub mod favors;
pub mod file_io;
pub mod members;
pub mod rows;

pub use favors::FavorRepository;
pub use file_io::{read_json, write_json_atomic};
pub use members::MemberRepository;
pub use rows::{decode_rows, decode_rows_str, ExportSource};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::VillagePaths;
use crate::error::VillageError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: VillagePaths,
    pub members: MemberRepository,
    pub favors: FavorRepository,
    audit: AuditLogger,
}

impl Storage {
    pub fn new(paths: VillagePaths) -> Result<Self, VillageError> {
        paths.ensure_directories()?;

        Ok(Self {
            members: MemberRepository::new(paths.members_file()),
            favors: FavorRepository::new(paths.favors_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &VillagePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), VillageError> {
        self.members.load()?;
        self.favors.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), VillageError> {
        self.members.save()?;
        self.favors.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        summary: Option<String>,
        entity: &T,
    ) -> Result<(), VillageError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, summary, entity))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        summary: Option<String>,
        entity: &T,
    ) -> Result<(), VillageError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, summary, entity))
    }
}
