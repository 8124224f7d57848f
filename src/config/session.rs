//! Session provider
//!
//! Who is signed in is handed to the code that needs it instead of being read
//! from a global. The CLI gets it from [`Settings`](super::Settings); tests use
//! [`FixedSession`].

use crate::error::{VillageError, VillageResult};
use crate::models::MemberId;

/// Source of the signed-in member's identity
pub trait SessionProvider {
    fn current_member(&self) -> Option<MemberId>;

    /// The signed-in member, or [`VillageError::NoSession`]
    fn require_member(&self) -> VillageResult<MemberId> {
        self.current_member().ok_or(VillageError::NoSession)
    }
}

/// A session whose member never changes
#[derive(Debug, Clone, Default)]
pub struct FixedSession(pub Option<MemberId>);

impl FixedSession {
    pub fn signed_in(member: impl Into<MemberId>) -> Self {
        Self(Some(member.into()))
    }
}

impl SessionProvider for FixedSession {
    fn current_member(&self) -> Option<MemberId> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_member() {
        assert_eq!(
            FixedSession::signed_in("u1").require_member().unwrap(),
            MemberId::from("u1")
        );
        assert!(matches!(
            FixedSession::default().require_member(),
            Err(VillageError::NoSession)
        ));
    }
}
