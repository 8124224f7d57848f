//! Core data models
//!
//! Members, the favors they do for each other, and the `Minutes` unit the
//! whole ledger is denominated in.

pub mod favor;
pub mod ids;
pub mod member;
pub mod minutes;

pub use favor::{Favor, FavorValidationError, MAX_FAVOR_MINUTES};
pub use ids::{FavorId, MemberId};
pub use member::{Member, MemberValidationError};
pub use minutes::{Minutes, MinutesParseError};
