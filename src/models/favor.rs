//! Favor model
//!
//! A favor is one recorded instance of help: who helped whom, for how long,
//! and when. It is the stored form of a ledger transaction.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{FavorId, MemberId};
use super::minutes::Minutes;
use crate::ledger::TransactionRecord;

/// Longest description accepted for a favor
pub const MAX_DESCRIPTION_LEN: usize = 280;

/// Largest duration a single favor may carry
///
/// Keeps any realistic history of favors summable in an i64.
pub const MAX_FAVOR_MINUTES: i64 = u32::MAX as i64;

/// A recorded favor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favor {
    pub id: FavorId,

    /// Member who gave their time
    pub from_member: MemberId,

    /// Member who received the help
    pub to_member: MemberId,

    pub minutes: Minutes,

    /// Day the favor happened
    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,

    pub created_at: DateTime<Utc>,
}

impl Favor {
    pub fn new(from_member: MemberId, to_member: MemberId, minutes: Minutes, date: NaiveDate) -> Self {
        Self {
            id: FavorId::new(),
            from_member,
            to_member,
            minutes,
            date,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// True if the favor moves time between `a` and `b`, in either direction
    pub fn is_between(&self, a: &MemberId, b: &MemberId) -> bool {
        (self.from_member == *a && self.to_member == *b)
            || (self.from_member == *b && self.to_member == *a)
    }

    pub fn involves(&self, member: &MemberId) -> bool {
        self.from_member == *member || self.to_member == *member
    }

    /// The other side of the favor as seen by `member`
    pub fn counterpart(&self, member: &MemberId) -> Option<&MemberId> {
        if self.from_member == *member {
            Some(&self.to_member)
        } else if self.to_member == *member {
            Some(&self.from_member)
        } else {
            None
        }
    }

    /// The ledger's view of this favor
    pub fn to_record(&self) -> TransactionRecord {
        TransactionRecord {
            from_member: self.from_member.clone(),
            to_member: self.to_member.clone(),
            minutes: self.minutes.get(),
        }
    }

    /// Validate before storing
    pub fn validate(&self) -> Result<(), FavorValidationError> {
        if self.from_member.is_blank() || self.to_member.is_blank() {
            return Err(FavorValidationError::MissingMember);
        }
        if self.from_member == self.to_member {
            return Err(FavorValidationError::SelfFavor);
        }
        if !self.minutes.is_positive() {
            return Err(FavorValidationError::NonPositiveMinutes(self.minutes));
        }
        if self.minutes.get() > MAX_FAVOR_MINUTES {
            return Err(FavorValidationError::MinutesTooLarge(self.minutes));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(FavorValidationError::DescriptionTooLong(
                self.description.chars().count(),
            ));
        }
        Ok(())
    }
}

/// Validation errors for favors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavorValidationError {
    MissingMember,
    SelfFavor,
    NonPositiveMinutes(Minutes),
    MinutesTooLarge(Minutes),
    DescriptionTooLong(usize),
}

impl fmt::Display for FavorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMember => write!(f, "A favor needs both a giver and a receiver"),
            Self::SelfFavor => write!(f, "A member cannot do a favor for themselves"),
            Self::NonPositiveMinutes(m) => {
                write!(f, "Favor duration must be positive, got {}", m)
            }
            Self::MinutesTooLarge(m) => write!(
                f,
                "Favor duration of {} minutes is too large (max {})",
                m.get(),
                MAX_FAVOR_MINUTES
            ),
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description too long ({} characters, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for FavorValidationError {}
