//! Opaque record identifier.
//!
//! [`RecordId`] is a newtype over `String`. Freshly created records get a
//! UUID v4 token, but any stored token is accepted on decode, so records
//! written with time-based ids keep their identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a route, booking, feedback entry or user.
///
/// Generated once at creation time and immutable thereafter. Equality is
/// plain string equality; no format is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new random `RecordId` (UUID v4, hyphenated).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the token is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for RecordId {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}
