//! Pair balance: the calculator's output

use serde::Serialize;
use std::fmt;

use crate::models::{MemberId, Minutes};

/// Net minutes between an ordered pair of members
///
/// Sign convention, used everywhere in this crate:
///
/// - `minutes > 0`: `member_a` owes `member_b` (B gave A more time than A gave B)
/// - `minutes < 0`: `member_b` owes `member_a`
/// - `minutes == 0`: the pair is settled
///
/// Equivalently, `minutes = (time B gave A) - (time A gave B)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairBalance {
    pub member_a: MemberId,
    pub member_b: MemberId,
    pub minutes: i64,
}

impl PairBalance {
    pub fn new(member_a: MemberId, member_b: MemberId, minutes: i64) -> Self {
        Self {
            member_a,
            member_b,
            minutes,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.minutes == 0
    }

    /// The member who owes time, if anyone does
    pub fn debtor(&self) -> Option<&MemberId> {
        match self.minutes.signum() {
            1 => Some(&self.member_a),
            -1 => Some(&self.member_b),
            _ => None,
        }
    }

    /// The member who is owed time, if anyone is
    pub fn creditor(&self) -> Option<&MemberId> {
        match self.minutes.signum() {
            1 => Some(&self.member_b),
            -1 => Some(&self.member_a),
            _ => None,
        }
    }

    /// Magnitude of what is owed, regardless of direction
    pub fn owed(&self) -> Minutes {
        Minutes::new(self.minutes.abs())
    }

    pub fn as_minutes(&self) -> Minutes {
        Minutes::new(self.minutes)
    }

    /// The same balance seen from the other side of the pair
    pub fn reversed(&self) -> Self {
        Self {
            member_a: self.member_b.clone(),
            member_b: self.member_a.clone(),
            minutes: -self.minutes,
        }
    }

    /// "X owes Y <amount>" or "X and Y are settled"
    ///
    /// `name_a` and `name_b` label `member_a` and `member_b`.
    pub fn describe(&self, name_a: &str, name_b: &str, amount: &str) -> String {
        let name = |id: &MemberId| if *id == self.member_a { name_a } else { name_b };
        match (self.debtor(), self.creditor()) {
            (Some(debtor), Some(creditor)) => {
                format!("{} owes {} {}", name(debtor), name(creditor), amount)
            }
            _ => format!("{} and {} are settled", name_a, name_b),
        }
    }
}

impl fmt::Display for PairBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(
            self.member_a.as_str(),
            self.member_b.as_str(),
            &self.owed().to_string(),
        ))
    }
}
