//! Balance service
//!
//! Answers "who owes whom" on top of the ledger calculator. Balances are
//! never stored; each call recomputes them from the favor history.

use std::collections::BTreeSet;

use crate::error::{VillageError, VillageResult};
use crate::ledger::{BalanceCalculator, PairBalance, TransactionSource};
use crate::models::{Member, MemberId, Minutes};
use crate::storage::Storage;

/// Service for computing balances between members
pub struct BalanceService<'a> {
    storage: &'a Storage,
}

/// One line of a member's balance summary
#[derive(Debug, Clone)]
pub struct CounterpartBalance {
    pub counterpart: Member,
    /// Balance with the summarized member as `member_a`
    pub balance: PairBalance,
}

impl<'a> BalanceService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Balance between two known members, from the local favor store
    ///
    /// Positive: `a` owes `b`. Negative: `b` owes `a`.
    pub fn between(&self, a: &MemberId, b: &MemberId) -> VillageResult<PairBalance> {
        self.require_pair(a, b)?;
        self.between_with(&self.storage.favors, a, b)
    }

    /// Balance between two members using any transaction source
    pub fn between_with<S>(&self, source: &S, a: &MemberId, b: &MemberId) -> VillageResult<PairBalance>
    where
        S: TransactionSource + ?Sized,
    {
        Ok(BalanceCalculator::new(source).balance(a, b)?)
    }

    /// Balance with every member `member` has exchanged favors with,
    /// sorted by counterpart name
    pub fn summary_for(&self, member: &MemberId) -> VillageResult<Vec<CounterpartBalance>> {
        if self.storage.members.get(member)?.is_none() {
            return Err(VillageError::member_not_found(member.to_string()));
        }

        let counterparts: BTreeSet<MemberId> = self
            .storage
            .favors
            .involving(member)?
            .iter()
            .filter_map(|f| f.counterpart(member).cloned())
            .filter(|c| c != member)
            .collect();

        let mut lines = Vec::with_capacity(counterparts.len());
        for other in counterparts {
            let balance = self.between_with(&self.storage.favors, member, &other)?;
            let counterpart = self
                .storage
                .members
                .get(&other)?
                .unwrap_or_else(|| Member::with_id(other.clone(), other.to_string()));
            lines.push(CounterpartBalance {
                counterpart,
                balance,
            });
        }

        lines.sort_by(|x, y| {
            x.counterpart
                .display_name
                .to_lowercase()
                .cmp(&y.counterpart.display_name.to_lowercase())
        });
        Ok(lines)
    }

    /// Net position of a member across everyone
    ///
    /// Same sign convention as a pair balance: positive means the member owes
    /// the circle time overall.
    pub fn net_for(&self, member: &MemberId) -> VillageResult<Minutes> {
        Ok(self
            .summary_for(member)?
            .iter()
            .map(|line| line.balance.as_minutes())
            .sum())
    }

    fn require_pair(&self, a: &MemberId, b: &MemberId) -> VillageResult<()> {
        if a == b {
            return Err(VillageError::Validation(
                "A balance needs two different members".into(),
            ));
        }
        for id in [a, b] {
            if self.storage.members.get(id)?.is_none() {
                return Err(VillageError::member_not_found(id.to_string()));
            }
        }
        Ok(())
    }
}
