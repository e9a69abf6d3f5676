//! Type-safe name wrappers for groups and people

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe wrapper for group names
///
/// Group names are unique in the directory and identify graph nodes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupName(String);

impl GroupName {
    /// Create a new GroupName from a string
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GroupName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for GroupName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Type-safe wrapper for person handles (`uid`)
///
/// Prevents mixing up people with groups at compile time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonUid(String);

impl PersonUid {
    /// Create a new PersonUid from a string
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    /// Get the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PersonUid {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for PersonUid {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
