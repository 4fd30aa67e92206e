//! Origin tag value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a served product list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Read from the relational store after a cache miss.
    Database,
    /// Decoded from the cached payload.
    Cache,
}

impl Origin {
    /// Returns the wire representation of the tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Cache => "cache",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
