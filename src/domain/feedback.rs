//! Free-text feedback, unrelated to routes and bookings.

use serde::{Deserialize, Serialize};

use super::RecordId;
use super::booking::display_timestamp;
use crate::error::LedgerError;

/// A feedback entry as persisted in the `feedbacks` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Unique feedback identifier.
    pub id: RecordId,
    /// Submitter name, may be empty.
    #[serde(default)]
    pub name: String,
    /// Submitter email, may be empty.
    #[serde(default)]
    pub email: String,
    /// Feedback text, never empty.
    pub feedback: String,
    /// Human-readable creation timestamp.
    pub date: String,
}

impl Feedback {
    /// Creates a feedback entry stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MissingField`] if `text` is blank.
    pub fn new(name: &str, email: &str, text: &str) -> Result<Self, LedgerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LedgerError::MissingField("feedback"));
        }
        Ok(Self {
            id: RecordId::generate(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            feedback: text.to_string(),
            date: display_timestamp(),
        })
    }
}
