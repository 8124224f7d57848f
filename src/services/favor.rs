//! Favor service
//!
//! Recording who helped whom. This is the write path into the ledger, so it
//! is where favors are validated: both members must exist, they must differ,
//! and the duration must be positive.

use chrono::NaiveDate;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{VillageError, VillageResult};
use crate::models::{Favor, FavorId, MemberId, Minutes};
use crate::storage::Storage;

/// Service for recording and querying favors
pub struct FavorService<'a> {
    storage: &'a Storage,
}

/// Input for recording a favor
#[derive(Debug, Clone)]
pub struct RecordFavorInput {
    pub from_member: MemberId,
    pub to_member: MemberId,
    pub minutes: Minutes,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// Filter options for listing favors
#[derive(Debug, Clone, Default)]
pub struct FavorFilter {
    /// Only favors this member gave or received
    pub member: Option<MemberId>,
    /// Together with `member`: only favors between the two
    pub counterpart: Option<MemberId>,
    pub limit: Option<usize>,
}

impl FavorFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member(mut self, member: MemberId) -> Self {
        self.member = Some(member);
        self
    }

    pub fn between(mut self, a: MemberId, b: MemberId) -> Self {
        self.member = Some(a);
        self.counterpart = Some(b);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl<'a> FavorService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a favor and persist it
    pub fn record(&self, input: RecordFavorInput) -> VillageResult<Favor> {
        let giver = self
            .storage
            .members
            .get(&input.from_member)?
            .ok_or_else(|| VillageError::member_not_found(input.from_member.to_string()))?;
        let receiver = self
            .storage
            .members
            .get(&input.to_member)?
            .ok_or_else(|| VillageError::member_not_found(input.to_member.to_string()))?;

        let mut favor = Favor::new(input.from_member, input.to_member, input.minutes, input.date);
        if let Some(description) = input.description {
            favor.description = description.trim().to_string();
        }

        favor
            .validate()
            .map_err(|e| VillageError::Validation(e.to_string()))?;

        self.storage.favors.upsert(favor.clone())?;
        self.storage.favors.save()?;

        self.storage.log_create(
            EntityType::Favor,
            favor.id.to_string(),
            Some(format!(
                "{} -> {} {}",
                giver.display_name, receiver.display_name, favor.minutes
            )),
            &favor,
        )?;
        info!(favor = %favor.id, minutes = favor.minutes.get(), "favor recorded");

        Ok(favor)
    }

    pub fn get(&self, id: FavorId) -> VillageResult<Option<Favor>> {
        self.storage.favors.get(id)
    }

    /// Find a favor by full id or by the short form shown in listings
    pub fn find(&self, identifier: &str) -> VillageResult<Option<Favor>> {
        let identifier = identifier.trim();
        if let Ok(id) = identifier.parse::<FavorId>() {
            return self.storage.favors.get(id);
        }

        let prefix = identifier.to_lowercase();
        if !prefix.starts_with("fav-") || prefix.len() < 8 {
            return Ok(None);
        }

        let mut matches = self
            .storage
            .favors
            .get_all()?
            .into_iter()
            .filter(|f| f.id.to_string().starts_with(&prefix));

        match (matches.next(), matches.next()) {
            (Some(favor), None) => Ok(Some(favor)),
            (Some(_), Some(_)) => Err(VillageError::Validation(format!(
                "Favor id '{}' is ambiguous",
                identifier
            ))),
            _ => Ok(None),
        }
    }

    /// List favors, newest first
    pub fn list(&self, filter: FavorFilter) -> VillageResult<Vec<Favor>> {
        let mut favors = match (&filter.member, &filter.counterpart) {
            (Some(a), Some(b)) => self.storage.favors.between(a, b)?,
            (Some(member), None) => self.storage.favors.involving(member)?,
            _ => self.storage.favors.get_all()?,
        };

        if let Some(limit) = filter.limit {
            favors.truncate(limit);
        }
        Ok(favors)
    }

    /// Delete a favor by id (full or short form)
    pub fn delete(&self, identifier: &str) -> VillageResult<Favor> {
        let favor = self
            .find(identifier)?
            .ok_or_else(|| VillageError::favor_not_found(identifier.trim()))?;

        self.storage.favors.delete(favor.id)?;
        self.storage.favors.save()?;

        self.storage
            .log_delete(EntityType::Favor, favor.id.to_string(), None, &favor)?;
        info!(favor = %favor.id, "favor deleted");

        Ok(favor)
    }
}
