//! Transaction sources
//!
//! The calculator does not know where records come from. Anything that can
//! answer "give me the favors exchanged between these two members" implements
//! [`TransactionSource`]: the local JSON store, an export of the hosted table,
//! or a fixture in a test.

use std::sync::Arc;

use thiserror::Error;

use super::record::TransactionRecord;
use crate::models::MemberId;

/// Why a source could not deliver records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The source could not be reached (I/O, network, poisoned lock)
    #[error("transaction source unavailable: {0}")]
    Unavailable(String),

    /// The source answered, but with something that is not a list of records
    #[error("malformed transaction payload: {0}")]
    Malformed(String),

    /// The source answered with an explicit error
    #[error("transaction source rejected the query: {0}")]
    Rejected(String),
}

/// A provider of transaction records for a member pair
///
/// Implementations should return the records between `a` and `b`, but may
/// return extra records; callers filter. A failed lookup must be reported as
/// an error and never as an empty list.
pub trait TransactionSource: Send + Sync {
    fn fetch_transactions(
        &self,
        a: &MemberId,
        b: &MemberId,
    ) -> Result<Vec<TransactionRecord>, FetchError>;
}

impl<S: TransactionSource + ?Sized> TransactionSource for &S {
    fn fetch_transactions(
        &self,
        a: &MemberId,
        b: &MemberId,
    ) -> Result<Vec<TransactionRecord>, FetchError> {
        (**self).fetch_transactions(a, b)
    }
}

impl<S: TransactionSource + ?Sized> TransactionSource for Arc<S> {
    fn fetch_transactions(
        &self,
        a: &MemberId,
        b: &MemberId,
    ) -> Result<Vec<TransactionRecord>, FetchError> {
        (**self).fetch_transactions(a, b)
    }
}

impl<S: TransactionSource + ?Sized> TransactionSource for Box<S> {
    fn fetch_transactions(
        &self,
        a: &MemberId,
        b: &MemberId,
    ) -> Result<Vec<TransactionRecord>, FetchError> {
        (**self).fetch_transactions(a, b)
    }
}

/// An in-memory, already-fetched set of records
///
/// Returns everything it holds regardless of the pair asked for.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<TransactionRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }
}

impl FromIterator<TransactionRecord> for StaticSource {
    fn from_iter<I: IntoIterator<Item = TransactionRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl TransactionSource for StaticSource {
    fn fetch_transactions(
        &self,
        _a: &MemberId,
        _b: &MemberId,
    ) -> Result<Vec<TransactionRecord>, FetchError> {
        Ok(self.records.clone())
    }
}
