//! Backend capability interface for contact message storage.
//!
//! The store layer talks to whatever implements [`ContactBackend`]; the
//! default implementation is SQLite, but tests inject their own doubles.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ContactMessage, ContactSubmission, MessageStatus};

/// Errors surfaced by a storage backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<sqlx::Error> for BackendError {
    fn from(e: sqlx::Error) -> Self {
        BackendError::Database(e.to_string())
    }
}

/// Storage backend for contact messages.
///
/// The backend owns identifier and timestamp assignment: callers hand in a
/// bare submission and get back the stored record. Ordering of `list_desc`
/// is newest first, and `set_status` touches only the status field.
#[async_trait]
pub trait ContactBackend: Send + Sync {
    /// Inserts a new message with a fresh identifier, a creation timestamp,
    /// and an initial status of `new`.
    async fn insert(&self, submission: &ContactSubmission)
        -> Result<ContactMessage, BackendError>;

    /// Returns every stored message ordered by creation time descending.
    async fn list_desc(&self) -> Result<Vec<ContactMessage>, BackendError>;

    /// Overwrites the status of the addressed message, leaving all other
    /// fields untouched. Unknown identifiers yield [`BackendError::NotFound`].
    async fn set_status(&self, id: &str, status: MessageStatus) -> Result<(), BackendError>;
}
