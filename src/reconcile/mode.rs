//! Reconciliation modes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How a desired configuration is combined with the platform's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Append new items to an existing bundle.
    Add,
    /// Overwrite whatever is configured.
    Replace,
    /// Only write when no bundle is configured yet.
    IfNotPresent,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Add, Mode::Replace, Mode::IfNotPresent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Add => "add",
            Mode::Replace => "replace",
            Mode::IfNotPresent => "if_not_present",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid mode '{given}', available options are: add, replace, if_not_present")]
pub struct UnknownMode {
    pub given: String,
}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownMode { given: s.to_string() })
    }
}
