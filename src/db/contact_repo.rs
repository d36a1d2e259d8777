use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::db::{BackendError, ContactBackend};
use crate::models::{ContactMessage, ContactSubmission, MessageStatus};

/// SQLite-backed contact message storage.
#[derive(Clone)]
pub struct ContactRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: String,
    name: String,
    email: String,
    subject: String,
    message: String,
    status: String,
    created_at: String,
}

impl ContactRow {
    fn into_message(self) -> Result<ContactMessage, BackendError> {
        let status: MessageStatus = self.status.parse().map_err(BackendError::Database)?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| BackendError::Database(e.to_string()))?;

        Ok(ContactMessage {
            id: self.id,
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            status,
            created_at,
        })
    }
}

impl ContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactBackend for ContactRepository {
    async fn insert(
        &self,
        submission: &ContactSubmission,
    ) -> Result<ContactMessage, BackendError> {
        let record = ContactMessage {
            id: Uuid::new_v4().to_string(),
            name: submission.name.clone(),
            email: submission.email.clone(),
            subject: submission.subject.clone(),
            message: submission.message.clone(),
            status: MessageStatus::New,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO contacts (id, name, email, subject, message, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.subject)
        .bind(&record.message)
        .bind(record.status.to_string())
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        info!("Stored contact message {}", record.id);
        Ok(record)
    }

    async fn list_desc(&self) -> Result<Vec<ContactMessage>, BackendError> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            "SELECT id, name, email, subject, message, status, created_at \
             FROM contacts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ContactRow::into_message).collect()
    }

    async fn set_status(&self, id: &str, status: MessageStatus) -> Result<(), BackendError> {
        let result = sqlx::query("UPDATE contacts SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BackendError::NotFound(id.to_string()));
        }

        info!("Message {} status set to {}", id, status);
        Ok(())
    }
}
