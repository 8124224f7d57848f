//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod balance;
pub mod favor;
pub mod member;
pub mod session;

pub use audit::handle_audit_command;
pub use balance::{handle_balance_command, BalanceCommands};
pub use favor::{handle_favor_command, FavorCommands};
pub use member::{handle_member_command, MemberCommands};
pub use session::{handle_login, handle_logout};
