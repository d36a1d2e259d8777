use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::MessageStatus;

/// A contact form submission as received from a caller.
///
/// All four fields are required but otherwise opaque; this layer stores
/// them as-is and leaves validation to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// A stored contact message: the submitted fields plus backend-assigned
/// identifier, creation timestamp, and mutable status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
}
