//! Pairwise time-balance ledger
//!
//! The one piece of real accounting in the application: given the favors two
//! members have done for each other, how many minutes does one owe the other.
//!
//! - [`TransactionRecord`]: a directed transfer of minutes
//! - [`TransactionSource`]: where records come from, may fail with [`FetchError`]
//! - [`pair_balance`] / [`compute_pair_balance`]: the accumulation itself
//! - [`PairBalance`]: the result, with the sign convention documented on it
//!
//! # Example
//!
//! ```
//! use village::ledger::{compute_pair_balance, StaticSource, TransactionRecord};
//!
//! let source = StaticSource::new(vec![
//!     TransactionRecord::new("u1", "u2", 30),
//!     TransactionRecord::new("u2", "u1", 10),
//! ]);
//! let balance = compute_pair_balance(&source, &"u1".into(), &"u2".into()).unwrap();
//! assert_eq!(balance.minutes, -20); // u2 owes u1 twenty minutes
//! ```

mod balance;
mod calculator;
mod record;
mod source;

pub use balance::PairBalance;
pub use calculator::{compute_pair_balance, pair_balance, BalanceCalculator};
pub use record::TransactionRecord;
pub use source::{FetchError, StaticSource, TransactionSource};
