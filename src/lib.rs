//! village - a time-favor ledger for small circles
//!
//! Members of a circle trade favors measured in minutes. This library keeps
//! the favor history and answers the one question that matters between any
//! two members: who owes whom, and how much.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `ledger`: Pair balance calculation over a pluggable transaction source
//! - `models`: Members, favors and durations
//! - `storage`: JSON file storage and hosted-backend row decoding
//! - `services`: Business logic layer
//! - `config`: Paths, settings and the signed-in session
//! - `audit`: Audit logging
//! - `export`: CSV and JSON export
//! - `display` and `cli`: terminal front end
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use village::config::{Settings, VillagePaths};
//! use village::services::BalanceService;
//! use village::storage::Storage;
//!
//! let paths = VillagePaths::new()?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let balance = BalanceService::new(&storage).between(&"u1".into(), &"u2".into())?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{VillageError, VillageResult};
