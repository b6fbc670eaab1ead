//! Feedback DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Feedback;

/// Request body for `POST /feedback`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitFeedbackRequest {
    /// Submitter name, optional.
    #[serde(default)]
    pub name: String,
    /// Submitter email, optional.
    #[serde(default)]
    pub email: String,
    /// Feedback text.
    #[serde(default)]
    pub feedback: String,
}

/// Feedback representation returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackResponse {
    /// Feedback identifier.
    pub id: String,
    /// Submitter name.
    pub name: String,
    /// Submitter email.
    pub email: String,
    /// Feedback text.
    pub feedback: String,
    /// Human-readable submission date.
    pub date: String,
}

impl From<&Feedback> for FeedbackResponse {
    fn from(feedback: &Feedback) -> Self {
        Self {
            id: feedback.id.to_string(),
            name: feedback.name.clone(),
            email: feedback.email.clone(),
            feedback: feedback.feedback.clone(),
            date: feedback.date.clone(),
        }
    }
}
