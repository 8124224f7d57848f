//! Favor repository for JSON storage
//!
//! Manages loading and saving favors to favors.json, with an index from each
//! member to the favors they took part in.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard};

use tracing::debug;

use crate::error::VillageError;
use crate::ledger::{FetchError, TransactionRecord, TransactionSource};
use crate::models::{Favor, FavorId, MemberId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct FavorData {
    favors: Vec<Favor>,
}

/// Repository for favor persistence with a per-member index
pub struct FavorRepository {
    path: PathBuf,
    data: RwLock<HashMap<FavorId, Favor>>,
    /// Index: member_id -> favor ids (as giver or receiver)
    by_member: RwLock<HashMap<MemberId, Vec<FavorId>>>,
}

/// Newest first: by date, then by creation time
fn sort_newest_first(favors: &mut [Favor]) {
    favors.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

fn index_favor(by_member: &mut HashMap<MemberId, Vec<FavorId>>, favor: &Favor) {
    by_member
        .entry(favor.from_member.clone())
        .or_default()
        .push(favor.id);
    by_member
        .entry(favor.to_member.clone())
        .or_default()
        .push(favor.id);
}

fn unindex_favor(by_member: &mut HashMap<MemberId, Vec<FavorId>>, favor: &Favor) {
    for member in [&favor.from_member, &favor.to_member] {
        if let Some(ids) = by_member.get_mut(member) {
            ids.retain(|&id| id != favor.id);
            if ids.is_empty() {
                by_member.remove(member);
            }
        }
    }
}

impl FavorRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_member: RwLock::new(HashMap::new()),
        }
    }

    fn read_data(&self) -> Result<RwLockReadGuard<'_, HashMap<FavorId, Favor>>, VillageError> {
        self.data
            .read()
            .map_err(|e| VillageError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    /// Load favors from disk and rebuild the index
    pub fn load(&self) -> Result<(), VillageError> {
        let file_data: FavorData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_member = self.by_member.write().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_member.clear();

        for favor in file_data.favors {
            index_favor(&mut by_member, &favor);
            data.insert(favor.id, favor);
        }

        debug!(path = %self.path.display(), favors = data.len(), "loaded favors");
        Ok(())
    }

    pub fn save(&self) -> Result<(), VillageError> {
        let mut favors: Vec<_> = self.read_data()?.values().cloned().collect();
        sort_newest_first(&mut favors);

        write_json_atomic(&self.path, &FavorData { favors })
    }

    pub fn get(&self, id: FavorId) -> Result<Option<Favor>, VillageError> {
        Ok(self.read_data()?.get(&id).cloned())
    }

    /// All favors, newest first
    pub fn get_all(&self) -> Result<Vec<Favor>, VillageError> {
        let mut favors: Vec<_> = self.read_data()?.values().cloned().collect();
        sort_newest_first(&mut favors);
        Ok(favors)
    }

    /// Favors a member gave or received, newest first
    pub fn involving(&self, member: &MemberId) -> Result<Vec<Favor>, VillageError> {
        let data = self.read_data()?;
        let by_member = self.by_member.read().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let ids = by_member.get(member).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut favors: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_newest_first(&mut favors);
        Ok(favors)
    }

    /// Favors exchanged between `a` and `b` in either direction, newest first
    pub fn between(&self, a: &MemberId, b: &MemberId) -> Result<Vec<Favor>, VillageError> {
        Ok(self
            .involving(a)?
            .into_iter()
            .filter(|f| f.is_between(a, b))
            .collect())
    }

    pub fn upsert(&self, favor: Favor) -> Result<(), VillageError> {
        let mut data = self.data.write().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_member = self.by_member.write().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(old) = data.get(&favor.id) {
            unindex_favor(&mut by_member, old);
        }
        index_favor(&mut by_member, &favor);

        data.insert(favor.id, favor);
        Ok(())
    }

    pub fn delete(&self, id: FavorId) -> Result<Option<Favor>, VillageError> {
        let mut data = self.data.write().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_member = self.by_member.write().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let removed = data.remove(&id);
        if let Some(favor) = &removed {
            unindex_favor(&mut by_member, favor);
        }
        Ok(removed)
    }

    /// Number of favors a member took part in
    pub fn count_involving(&self, member: &MemberId) -> Result<usize, VillageError> {
        let by_member = self.by_member.read().map_err(|e| {
            VillageError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(by_member.get(member).map_or(0, Vec::len))
    }

    pub fn count(&self) -> Result<usize, VillageError> {
        Ok(self.read_data()?.len())
    }
}

impl TransactionSource for FavorRepository {
    fn fetch_transactions(
        &self,
        a: &MemberId,
        b: &MemberId,
    ) -> Result<Vec<TransactionRecord>, FetchError> {
        let favors = self
            .between(a, b)
            .map_err(|e| FetchError::Unavailable(e.to_string()))?;

        Ok(favors.iter().map(Favor::to_record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::compute_pair_balance;
    use crate::models::Minutes;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, FavorRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = FavorRepository::new(temp_dir.path().join("favors.json"));
        (temp_dir, repo)
    }

    fn favor(from: &str, to: &str, minutes: i64, day: u32) -> Favor {
        Favor::new(
            from.into(),
            to.into(),
            Minutes::new(minutes),
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let f = favor("u1", "u2", 30, 5);
        let id = f.id;
        repo.upsert(f).unwrap();

        assert_eq!(repo.get(id).unwrap().unwrap().minutes, Minutes::new(30));
    }

    #[test]
    fn test_involving_and_between() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(favor("u1", "u2", 30, 1)).unwrap();
        repo.upsert(favor("u2", "u1", 10, 2)).unwrap();
        repo.upsert(favor("u1", "u3", 60, 3)).unwrap();
        repo.upsert(favor("u3", "u2", 15, 4)).unwrap();

        assert_eq!(repo.involving(&"u1".into()).unwrap().len(), 3);
        assert_eq!(repo.count_involving(&"u3".into()).unwrap(), 2);

        let between = repo.between(&"u1".into(), &"u2".into()).unwrap();
        assert_eq!(between.len(), 2);
        // Newest first
        assert_eq!(between[0].minutes, Minutes::new(10));
    }

    #[test]
    fn test_reindex_on_update() {
        let (_temp_dir, repo) = create_test_repo();
        let mut f = favor("u1", "u2", 30, 1);
        repo.upsert(f.clone()).unwrap();

        f.to_member = "u3".into();
        repo.upsert(f).unwrap();

        assert_eq!(repo.count_involving(&"u2".into()).unwrap(), 0);
        assert_eq!(repo.count_involving(&"u3".into()).unwrap(), 1);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let f = favor("u1", "u2", 30, 1);
        let id = f.id;
        repo.upsert(f).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());
        assert_eq!(repo.count_involving(&"u1".into()).unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.upsert(favor("u1", "u2", 30, 1)).unwrap();
        repo.upsert(favor("u2", "u1", 10, 2)).unwrap();
        repo.save().unwrap();

        let repo2 = FavorRepository::new(temp_dir.path().join("favors.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.count().unwrap(), 2);
        assert_eq!(repo2.between(&"u1".into(), &"u2".into()).unwrap().len(), 2);
    }

    #[test]
    fn test_repository_as_transaction_source() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(favor("u1", "u2", 30, 1)).unwrap();
        repo.upsert(favor("u2", "u1", 10, 2)).unwrap();
        repo.upsert(favor("u1", "u3", 99, 3)).unwrap();

        let records = repo.fetch_transactions(&"u1".into(), &"u2".into()).unwrap();
        assert_eq!(records.len(), 2);

        let balance = compute_pair_balance(&repo, &"u1".into(), &"u2".into()).unwrap();
        assert_eq!(balance.minutes, -20);
    }
}
