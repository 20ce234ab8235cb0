//! Repository for chat transcript data access operations.

use crate::entities::{ChatMessage, MessageSender};
use crate::types::{ChatError, ChatResult};
use sqlx::SqlitePool;
use tracing::info;

/// Repository for the append-only chat transcript
pub struct ChatMessageRepository {
    pool: SqlitePool,
}

impl ChatMessageRepository {
    /// Create a new chat message repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append one message to the transcript
    pub async fn append(&self, sender: MessageSender, body: &str) -> ChatResult<ChatMessage> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO chat_messages (sender, body, created_at) VALUES (?, ?, ?)",
        )
        .bind(sender)
        .bind(body)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ChatError::DatabaseError(e.to_string()))?;

        let message_id = result.last_insert_rowid();

        info!(
            message_id = message_id,
            sender = %sender,
            "appended chat message"
        );

        Ok(ChatMessage {
            id: message_id,
            sender,
            body: body.to_string(),
            created_at: now,
        })
    }

    /// Fetch the most recent transcript entries, newest first
    pub async fn list_recent(&self, limit: i64) -> ChatResult<Vec<ChatMessage>> {
        sqlx::query_as::<_, ChatMessage>(
            "SELECT id, sender, body, created_at FROM chat_messages \
             ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ChatError::DatabaseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialize_database;
    use estately_config::DatabaseConfig;
    use tempfile::TempDir;

    async fn create_test_repo() -> (ChatMessageRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_chat.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let config = DatabaseConfig {
            url: db_url,
            max_connections: 1,
        };

        let pool = initialize_database(&config).await.unwrap();
        (ChatMessageRepository::new(pool), temp_dir)
    }

    #[tokio::test]
    async fn test_append_message() {
        let (repo, _temp_dir) = create_test_repo().await;

        let message = repo
            .append(MessageSender::User, "villas in Goa")
            .await
            .unwrap();

        assert!(message.id > 0);
        assert_eq!(message.sender, MessageSender::User);
        assert_eq!(message.body, "villas in Goa");
    }

    #[tokio::test]
    async fn test_list_recent_returns_newest_first() {
        let (repo, _temp_dir) = create_test_repo().await;

        repo.append(MessageSender::User, "first").await.unwrap();
        repo.append(MessageSender::Bot, "second").await.unwrap();

        let messages = repo.list_recent(10).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].body, "second");
        assert_eq!(messages[0].sender, MessageSender::Bot);
        assert_eq!(messages[1].body, "first");
    }
}
