//! Member model
//!
//! A participant in the circle. The id comes from the auth provider; the
//! display name is what people type on the command line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MemberId;

/// A member of the circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Identifier issued by the auth provider
    pub id: MemberId,

    /// Name shown to other members
    pub display_name: String,

    /// Phone number as entered, used for invites
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// When the member joined the local ledger
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Create a member with a freshly generated id
    pub fn new(display_name: impl Into<String>) -> Self {
        Self::with_id(MemberId::generate(), display_name)
    }

    /// Create a member with a known id
    pub fn with_id(id: MemberId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            phone: None,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.id.is_blank() {
            return Err(MemberValidationError::EmptyId);
        }

        let name = self.display_name.trim();
        if name.is_empty() {
            return Err(MemberValidationError::EmptyName);
        }
        if name.chars().count() > 60 {
            return Err(MemberValidationError::NameTooLong(name.chars().count()));
        }

        if let Some(phone) = &self.phone {
            if phone.trim().is_empty() {
                return Err(MemberValidationError::EmptyPhone);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Validation errors for members
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    EmptyId,
    EmptyName,
    NameTooLong(usize),
    EmptyPhone,
}

impl fmt::Display for MemberValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Member id cannot be empty"),
            Self::EmptyName => write!(f, "Member name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Member name too long ({} characters, max 60)", len)
            }
            Self::EmptyPhone => write!(f, "Phone number cannot be blank"),
        }
    }
}

impl std::error::Error for MemberValidationError {}
