//! Member repository for JSON storage
//!
//! Manages loading and saving members to members.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::VillageError;
use crate::models::{Member, MemberId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MemberData {
    members: Vec<Member>,
}

/// Repository for member persistence
pub struct MemberRepository {
    path: PathBuf,
    data: RwLock<HashMap<MemberId, Member>>,
}

impl MemberRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), VillageError> {
        let file_data: MemberData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for member in file_data.members {
            data.insert(member.id.clone(), member);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), VillageError> {
        let data = self.data.read().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut members: Vec<_> = data.values().cloned().collect();
        members.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        write_json_atomic(&self.path, &MemberData { members })
    }

    pub fn get(&self, id: &MemberId) -> Result<Option<Member>, VillageError> {
        let data = self.data.read().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(id).cloned())
    }

    /// Find a member by display name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Member>, VillageError> {
        let data = self.data.read().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name = name.trim();
        Ok(data
            .values()
            .find(|m| m.display_name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// All members, sorted by display name
    pub fn get_all(&self) -> Result<Vec<Member>, VillageError> {
        let data = self.data.read().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut members: Vec<_> = data.values().cloned().collect();
        members.sort_by(|a, b| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
        });
        Ok(members)
    }

    /// Check whether a display name is taken, ignoring one member id
    pub fn name_exists(&self, name: &str, exclude: Option<&MemberId>) -> Result<bool, VillageError> {
        Ok(self
            .get_by_name(name)?
            .is_some_and(|m| Some(&m.id) != exclude))
    }

    pub fn upsert(&self, member: Member) -> Result<(), VillageError> {
        let mut data = self.data.write().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(member.id.clone(), member);
        Ok(())
    }

    pub fn delete(&self, id: &MemberId) -> Result<Option<Member>, VillageError> {
        let mut data = self.data.write().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(id))
    }

    pub fn count(&self) -> Result<usize, VillageError> {
        let data = self.data.read().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, MemberRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = MemberRepository::new(temp_dir.path().join("members.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_lookup() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Member::with_id("u1".into(), "Alice")).unwrap();

        assert_eq!(
            repo.get(&"u1".into()).unwrap().unwrap().display_name,
            "Alice"
        );
        assert!(repo.get_by_name("alice").unwrap().is_some());
        assert!(repo.get_by_name("  ALICE ").unwrap().is_some());
        assert!(repo.get_by_name("bob").unwrap().is_none());
    }

    #[test]
    fn test_name_exists_excluding_self() {
        let (_temp_dir, repo) = create_test_repo();
        let alice = Member::with_id("u1".into(), "Alice");
        repo.upsert(alice.clone()).unwrap();

        assert!(repo.name_exists("Alice", None).unwrap());
        assert!(!repo.name_exists("Alice", Some(&alice.id)).unwrap());
    }

    #[test]
    fn test_get_all_sorted_by_name() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Member::with_id("u1".into(), "carol")).unwrap();
        repo.upsert(Member::with_id("u2".into(), "Alice")).unwrap();
        repo.upsert(Member::with_id("u3".into(), "bob")).unwrap();

        let names: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|m| m.display_name)
            .collect();
        assert_eq!(names, vec!["Alice", "bob", "carol"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.upsert(Member::with_id("u1".into(), "Alice")).unwrap();
        repo.save().unwrap();

        let repo2 = MemberRepository::new(temp_dir.path().join("members.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.count().unwrap(), 1);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Member::with_id("u1".into(), "Alice")).unwrap();

        assert!(repo.delete(&"u1".into()).unwrap().is_some());
        assert!(repo.delete(&"u1".into()).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
