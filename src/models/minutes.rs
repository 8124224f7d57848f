//! Minutes type for favor durations and balances
//!
//! Time is the currency of the ledger. Amounts are whole minutes stored as
//! i64 so the running total of a pair's whole history cannot wrap.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A signed number of whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(i64);

impl Minutes {
    pub const fn new(minutes: i64) -> Self {
        Self(minutes)
    }

    pub const fn from_hours_minutes(hours: i64, minutes: i64) -> Self {
        Self(hours * 60 + minutes)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the raw number of minutes
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Whole hours (truncated toward zero)
    pub const fn hours(&self) -> i64 {
        self.0 / 60
    }

    /// Minutes past the hour (0-59)
    pub const fn minutes_part(&self) -> i64 {
        (self.0 % 60).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a duration
    ///
    /// Accepts plain minutes (`"90"`), unit notation (`"1h30m"`, `"1h 30m"`,
    /// `"2h"`, `"45m"`) and clock notation (`"1:30"`). A leading `-` negates.
    pub fn parse(s: &str) -> Result<Self, MinutesParseError> {
        let original = s;
        let s = s.trim();
        let invalid = || MinutesParseError::InvalidFormat(original.to_string());

        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, s),
        };

        if s.is_empty() {
            return Err(invalid());
        }

        let total = if let Some((h, m)) = s.split_once(':') {
            let hours: i64 = h.trim().parse().map_err(|_| invalid())?;
            let mins: i64 = m.trim().parse().map_err(|_| invalid())?;
            if hours < 0 || !(0..60).contains(&mins) {
                return Err(invalid());
            }
            hours
                .checked_mul(60)
                .and_then(|h| h.checked_add(mins))
                .ok_or_else(invalid)?
        } else if s.chars().all(|c| c.is_ascii_digit()) {
            s.parse::<i64>().map_err(|_| invalid())?
        } else {
            parse_units(s).ok_or_else(invalid)?
        };

        Ok(Self(if negative { -total } else { total }))
    }

    /// Clock-style formatting (`1:30`, `-0:45`)
    pub fn format_clock(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}:{:02}", sign, self.hours().abs(), self.minutes_part())
    }
}

/// Parse `"<n>h<n>m"` style input, whitespace between parts allowed
fn parse_units(s: &str) -> Option<i64> {
    let mut total: i64 = 0;
    let mut digits = String::new();
    let mut seen_hours = false;
    let mut seen_minutes = false;

    for c in s.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'h' | 'H' if !digits.is_empty() && !seen_hours && !seen_minutes => {
                total = total.checked_add(digits.parse::<i64>().ok()?.checked_mul(60)?)?;
                digits.clear();
                seen_hours = true;
            }
            'm' | 'M' if !digits.is_empty() && !seen_minutes => {
                total = total.checked_add(digits.parse::<i64>().ok()?)?;
                digits.clear();
                seen_minutes = true;
            }
            c if c.is_whitespace() && digits.is_empty() => {}
            _ => return None,
        }
    }

    // Trailing bare digits ("1h30") count as minutes
    if !digits.is_empty() {
        if seen_minutes || !seen_hours {
            return None;
        }
        total = total.checked_add(digits.parse::<i64>().ok()?)?;
    }

    Some(total)
}

impl Default for Minutes {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let hours = self.hours().abs();
        let mins = self.minutes_part();
        match (hours, mins) {
            (0, m) => write!(f, "{}{}m", sign, m),
            (h, 0) => write!(f, "{}{}h", sign, h),
            (h, m) => write!(f, "{}{}h {}m", sign, h, m),
        }
    }
}

impl From<i64> for Minutes {
    fn from(minutes: i64) -> Self {
        Self(minutes)
    }
}

impl Add for Minutes {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Minutes {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Minutes {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Minutes {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Minutes {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Minutes {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Minutes::zero(), |acc, m| acc + m)
    }
}

/// Error type for duration parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinutesParseError {
    InvalidFormat(String),
}

impl fmt::Display for MinutesParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinutesParseError::InvalidFormat(s) => write!(f, "Invalid duration: {}", s),
        }
    }
}

impl std::error::Error for MinutesParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts() {
        let m = Minutes::new(135);
        assert_eq!(m.hours(), 2);
        assert_eq!(m.minutes_part(), 15);
        assert_eq!(Minutes::from_hours_minutes(2, 15), m);
    }

    #[test]
    fn test_display() {
        assert_eq!(Minutes::new(0).to_string(), "0m");
        assert_eq!(Minutes::new(45).to_string(), "45m");
        assert_eq!(Minutes::new(120).to_string(), "2h");
        assert_eq!(Minutes::new(90).to_string(), "1h 30m");
        assert_eq!(Minutes::new(-90).to_string(), "-1h 30m");
        assert_eq!(Minutes::new(-20).to_string(), "-20m");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(Minutes::new(90).format_clock(), "1:30");
        assert_eq!(Minutes::new(5).format_clock(), "0:05");
        assert_eq!(Minutes::new(-45).format_clock(), "-0:45");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Minutes::parse("90").unwrap().get(), 90);
        assert_eq!(Minutes::parse("1h30m").unwrap().get(), 90);
        assert_eq!(Minutes::parse("1h 30m").unwrap().get(), 90);
        assert_eq!(Minutes::parse("1h30").unwrap().get(), 90);
        assert_eq!(Minutes::parse("2h").unwrap().get(), 120);
        assert_eq!(Minutes::parse("45m").unwrap().get(), 45);
        assert_eq!(Minutes::parse("1:30").unwrap().get(), 90);
        assert_eq!(Minutes::parse(" -15 ").unwrap().get(), -15);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in [
            "",
            "-",
            "abc",
            "1x",
            "30m1h",
            "1:75",
            "h",
            "1h2h",
            "30m5",
            "999999999999999999:00",
            "1h9223372036854775807m",
            "153722867280912931h",
        ] {
            assert!(Minutes::parse(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Minutes::new(60);
        let b = Minutes::new(15);
        assert_eq!((a + b).get(), 75);
        assert_eq!((a - b).get(), 45);
        assert_eq!((-a).get(), -60);

        let total: Minutes = vec![a, b, -b].into_iter().sum();
        assert_eq!(total, a);
    }

    #[test]
    fn test_serialization() {
        let m = Minutes::new(90);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "90");
        let back: Minutes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
