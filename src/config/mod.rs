//! Configuration module
//!
//! This module provides configuration management including:
//! - Platform path resolution with an environment override
//! - User settings persistence
//! - The session provider (who is signed in)

pub mod paths;
pub mod session;
pub mod settings;

pub use paths::VillagePaths;
pub use session::{FixedSession, SessionProvider};
pub use settings::{DurationStyle, Settings};
