//! Enumeration policies
//!
//! A policy is fixed when the controller is built and selects one of three
//! behaviors for every request:
//! - Normal: always clone
//! - Safe: optimistic root reuse, clone on any deviation
//! - Strict: root reuse only, fail fast on any deviation

mod decision;

pub use decision::{decide, Decision};

use crate::EnumerationError;
use std::fmt;
use std::str::FromStr;

/// Sharing and thread-affinity policy of an enumeration controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EnumerationPolicy {
    /// Every request yields an independent clone
    #[default]
    Normal,

    /// Reuse the root on its origin thread while idle, otherwise clone
    Safe,

    /// Reuse the root on its origin thread while idle, otherwise fail
    Strict,
}

impl EnumerationPolicy {
    /// All policies in legacy code order
    pub const ALL: [EnumerationPolicy; 3] = [Self::Normal, Self::Safe, Self::Strict];

    /// Lowercase name used for parsing and display
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Safe => "safe",
            Self::Strict => "strict",
        }
    }

    /// Whether this policy ever hands out the root instance
    pub fn shares_root(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}

impl fmt::Display for EnumerationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnumerationPolicy {
    type Err = EnumerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EnumerationError::InvalidPolicy(trimmed.to_string()))
    }
}

/// Legacy integer encoding: 0 = Normal, 1 = Safe, 2 = Strict
impl TryFrom<i32> for EnumerationPolicy {
    type Error = EnumerationError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or_else(|| EnumerationError::InvalidPolicy(code.to_string()))
    }
}

impl From<EnumerationPolicy> for i32 {
    fn from(policy: EnumerationPolicy) -> Self {
        match policy {
            EnumerationPolicy::Normal => 0,
            EnumerationPolicy::Safe => 1,
            EnumerationPolicy::Strict => 2,
        }
    }
}
