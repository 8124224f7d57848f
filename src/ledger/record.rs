//! Transaction record: the input shape of the balance calculator

use serde::{Deserialize, Serialize};

use crate::models::MemberId;

/// A directed transfer of help-time
///
/// `from_member` spent `minutes` on behalf of `to_member`. Records are taken
/// as given: negative minutes or a member transferring to themselves are not
/// rejected here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub from_member: MemberId,
    pub to_member: MemberId,
    pub minutes: i64,
}

impl TransactionRecord {
    pub fn new(from: impl Into<MemberId>, to: impl Into<MemberId>, minutes: i64) -> Self {
        Self {
            from_member: from.into(),
            to_member: to.into(),
            minutes,
        }
    }

    /// True if this record moves time between `a` and `b`, in either direction
    pub fn is_between(&self, a: &MemberId, b: &MemberId) -> bool {
        (self.from_member == *a && self.to_member == *b)
            || (self.from_member == *b && self.to_member == *a)
    }

    /// True if `member` is on either side of the record
    pub fn involves(&self, member: &MemberId) -> bool {
        self.from_member == *member || self.to_member == *member
    }
}
