//! Display formatting for terminal output
//!
//! Turns members, favors and balances into the text printed by the CLI.

pub mod balance;
pub mod favor;
pub mod member;

pub use balance::{format_pair_balance, format_summary};
pub use favor::{format_favor_list, format_favor_recorded};
pub use member::format_member_list;
