//! Service layer
//!
//! Business logic on top of the storage layer: validation on the write path,
//! audit logging, and balances computed through the ledger.

pub mod balance;
pub mod favor;
pub mod member;

pub use balance::{BalanceService, CounterpartBalance};
pub use favor::{FavorFilter, FavorService, RecordFavorInput};
pub use member::MemberService;
