//! Block reason tokens
//!
//! A `BlockReason` identifies one caller's demand that playback stay paused.
//! Two callers holding equal reasons share a single block: a release from
//! either clears it for both. Subsystems should namespace their reasons
//! (`BlockReason::scoped`) or mint unique ones (`BlockReason::unique`).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Comparable token naming one reason playback is blocked
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockReason(String);

impl BlockReason {
    /// Reason with the given identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Reason `"namespace:name"`
    pub fn scoped(namespace: &str, name: &str) -> Self {
        Self(format!("{}:{}", namespace, name))
    }

    /// Reason `"namespace:<uuid>"`, distinct from every other reason
    pub fn unique(namespace: &str) -> Self {
        Self(format!("{}:{}", namespace, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockReason {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BlockReason {
    fn from(id: String) -> Self {
        Self(id)
    }
}
