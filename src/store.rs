//! Contact message store: the caller-facing operations over a storage
//! backend.
//!
//! Backend failures are logged for diagnostics and re-signaled as one
//! generic, user-presentable error per operation; callers never see the
//! underlying cause. The single exception is [`ContactStore::unread_count`],
//! which reports `0` when the backend is unreachable instead of failing.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::db::ContactBackend;
use crate::models::{ContactMessage, ContactSubmission, MessageStatus};

/// User-presentable store errors, one per operation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Failed to save contact message. Please try again.")]
    Save,
    #[error("Failed to fetch contact messages.")]
    Fetch,
    #[error("Failed to update message status.")]
    Update,
}

/// Stateless store over an injected [`ContactBackend`].
#[derive(Clone)]
pub struct ContactStore {
    backend: Arc<dyn ContactBackend>,
}

impl ContactStore {
    pub fn new(backend: Arc<dyn ContactBackend>) -> Self {
        Self { backend }
    }

    /// Persists a submission and returns the backend-assigned identifier.
    /// The stored record starts with status `new` and a backend-assigned
    /// creation timestamp. No retry on failure.
    pub async fn create(&self, submission: &ContactSubmission) -> Result<String, StoreError> {
        match self.backend.insert(submission).await {
            Ok(record) => {
                info!("Contact message saved with id {}", record.id);
                Ok(record.id)
            }
            Err(e) => {
                error!("Error saving contact message: {}", e);
                Err(StoreError::Save)
            }
        }
    }

    /// Returns every stored message, newest first. All-or-nothing: a
    /// backend failure yields no partial results.
    pub async fn list_all(&self) -> Result<Vec<ContactMessage>, StoreError> {
        match self.backend.list_desc().await {
            Ok(messages) => {
                info!("Retrieved {} contact messages", messages.len());
                Ok(messages)
            }
            Err(e) => {
                error!("Error fetching contact messages: {}", e);
                Err(StoreError::Fetch)
            }
        }
    }

    /// Overwrites the status of the addressed message. Any status may be
    /// written over any other; all remaining fields are untouched.
    pub async fn update_status(
        &self,
        id: &str,
        status: MessageStatus,
    ) -> Result<(), StoreError> {
        match self.backend.set_status(id, status).await {
            Ok(()) => {
                info!("Message status updated: {} {}", id, status);
                Ok(())
            }
            Err(e) => {
                error!("Error updating message status: {}", e);
                Err(StoreError::Update)
            }
        }
    }

    /// Number of messages still marked `new`. Reports `0` when the list
    /// cannot be fetched rather than surfacing the failure.
    pub async fn unread_count(&self) -> usize {
        match self.list_all().await {
            Ok(messages) => messages
                .iter()
                .filter(|m| m.status == MessageStatus::New)
                .count(),
            Err(_) => {
                warn!("Could not determine unread count, reporting 0");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_db, BackendError, ContactRepository};
    use async_trait::async_trait;
    use tempfile::TempDir;

    /// Backend double whose every call fails, standing in for an
    /// unreachable database.
    struct FailingBackend;

    #[async_trait]
    impl ContactBackend for FailingBackend {
        async fn insert(
            &self,
            _submission: &ContactSubmission,
        ) -> Result<ContactMessage, BackendError> {
            Err(BackendError::Database("connection refused".to_string()))
        }

        async fn list_desc(&self) -> Result<Vec<ContactMessage>, BackendError> {
            Err(BackendError::Database("connection refused".to_string()))
        }

        async fn set_status(
            &self,
            _id: &str,
            _status: MessageStatus,
        ) -> Result<(), BackendError> {
            Err(BackendError::Database("connection refused".to_string()))
        }
    }

    struct TestContext {
        store: ContactStore,
        _temp_dir: TempDir,
    }

    async fn setup_store() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let pool = init_db(Some(db_path)).await.unwrap();
        TestContext {
            store: ContactStore::new(Arc::new(ContactRepository::new(pool))),
            _temp_dir: temp_dir,
        }
    }

    fn failing_store() -> ContactStore {
        ContactStore::new(Arc::new(FailingBackend))
    }

    fn sample_submission() -> ContactSubmission {
        ContactSubmission::new("Alice", "a@x.com", "Hi", "Hello")
    }

    #[tokio::test]
    async fn test_create_then_list_roundtrip() {
        let ctx = setup_store().await;

        let id = ctx.store.create(&sample_submission()).await.unwrap();
        assert!(!id.is_empty());

        let messages = ctx.store.list_all().await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, id);
        assert_eq!(messages[0].status, MessageStatus::New);
        assert_eq!(messages[0].name, "Alice");
        assert_eq!(messages[0].email, "a@x.com");
        assert_eq!(messages[0].subject, "Hi");
        assert_eq!(messages[0].message, "Hello");
    }

    #[tokio::test]
    async fn test_update_status_visible_in_list() {
        let ctx = setup_store().await;

        let id = ctx.store.create(&sample_submission()).await.unwrap();
        ctx.store
            .update_status(&id, MessageStatus::Read)
            .await
            .unwrap();

        let messages = ctx.store.list_all().await.unwrap();
        assert_eq!(messages[0].status, MessageStatus::Read);
        assert_eq!(messages[0].name, "Alice");
    }

    #[tokio::test]
    async fn test_update_status_unknown_id_fails() {
        let ctx = setup_store().await;

        let result = ctx.store.update_status("missing", MessageStatus::Read).await;
        assert_eq!(result.unwrap_err(), StoreError::Update);
    }

    #[tokio::test]
    async fn test_unread_count_matches_new_messages() {
        let ctx = setup_store().await;
        assert_eq!(ctx.store.unread_count().await, 0);

        let first = ctx.store.create(&sample_submission()).await.unwrap();
        ctx.store.create(&sample_submission()).await.unwrap();
        assert_eq!(ctx.store.unread_count().await, 2);

        ctx.store
            .update_status(&first, MessageStatus::Replied)
            .await
            .unwrap();
        assert_eq!(ctx.store.unread_count().await, 1);
    }

    #[tokio::test]
    async fn test_create_failure_uses_generic_message() {
        let store = failing_store();

        let err = store.create(&sample_submission()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to save contact message. Please try again."
        );
    }

    #[tokio::test]
    async fn test_list_failure_uses_generic_message() {
        let store = failing_store();

        let err = store.list_all().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch contact messages.");
    }

    #[tokio::test]
    async fn test_update_failure_uses_generic_message() {
        let store = failing_store();

        let err = store
            .update_status("doc123", MessageStatus::Read)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to update message status.");
    }

    #[tokio::test]
    async fn test_unread_count_swallows_backend_failure() {
        let store = failing_store();
        assert_eq!(store.unread_count().await, 0);
    }
}
