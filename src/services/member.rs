//! Member service
//!
//! Adding, finding and removing members of the circle.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{VillageError, VillageResult};
use crate::models::{Member, MemberId};
use crate::storage::Storage;

/// Service for member management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a member
    ///
    /// `id` is the auth provider's identifier when known; otherwise one is
    /// generated. Display names are unique, ignoring case.
    pub fn add(
        &self,
        display_name: &str,
        id: Option<MemberId>,
        phone: Option<String>,
    ) -> VillageResult<Member> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(VillageError::Validation(
                "Member name cannot be empty".into(),
            ));
        }

        if self.storage.members.name_exists(display_name, None)? {
            return Err(VillageError::Duplicate {
                entity_type: "Member",
                identifier: display_name.to_string(),
            });
        }

        let mut member = match id {
            Some(id) => {
                if self.storage.members.get(&id)?.is_some() {
                    return Err(VillageError::Duplicate {
                        entity_type: "Member",
                        identifier: id.to_string(),
                    });
                }
                Member::with_id(id, display_name)
            }
            None => Member::new(display_name),
        };
        member.phone = phone.map(|p| p.trim().to_string());

        member
            .validate()
            .map_err(|e| VillageError::Validation(e.to_string()))?;

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;

        self.storage.log_create(
            EntityType::Member,
            member.id.to_string(),
            Some(member.display_name.clone()),
            &member,
        )?;
        info!(member = %member.id, name = %member.display_name, "member added");

        Ok(member)
    }

    pub fn get(&self, id: &MemberId) -> VillageResult<Option<Member>> {
        self.storage.members.get(id)
    }

    /// Find a member by display name or id
    pub fn find(&self, identifier: &str) -> VillageResult<Option<Member>> {
        if let Some(member) = self.storage.members.get_by_name(identifier)? {
            return Ok(Some(member));
        }
        self.storage.members.get(&MemberId::new(identifier))
    }

    /// Like [`find`](Self::find), but a missing member is an error
    pub fn resolve(&self, identifier: &str) -> VillageResult<Member> {
        self.find(identifier)?
            .ok_or_else(|| VillageError::member_not_found(identifier.trim()))
    }

    /// All members, sorted by name
    pub fn list(&self) -> VillageResult<Vec<Member>> {
        self.storage.members.get_all()
    }

    /// Name to show for a member id; falls back to the id for unknown members
    pub fn display_name(&self, id: &MemberId) -> VillageResult<String> {
        Ok(self
            .storage
            .members
            .get(id)?
            .map(|m| m.display_name)
            .unwrap_or_else(|| id.to_string()))
    }

    /// Remove a member who has no recorded favors
    pub fn remove(&self, identifier: &str) -> VillageResult<Member> {
        let member = self.resolve(identifier)?;

        let favor_count = self.storage.favors.count_involving(&member.id)?;
        if favor_count > 0 {
            return Err(VillageError::MemberInUse {
                member: member.display_name,
                favor_count,
            });
        }

        self.storage.members.delete(&member.id)?;
        self.storage.members.save()?;

        self.storage.log_delete(
            EntityType::Member,
            member.id.to_string(),
            Some(member.display_name.clone()),
            &member,
        )?;
        info!(member = %member.id, "member removed");

        Ok(member)
    }
}
