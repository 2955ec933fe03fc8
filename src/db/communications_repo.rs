// src/db/communications_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::communications::{Conversation, ConversationDetail, Message},
};

// Conversas, participantes e mensagens. Tudo é escopado pela
// participação: quem não está na conversa não a enxerga.
#[derive(Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn is_participant(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let member = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM conversation_participants
                WHERE conversation_id = $1 AND user_id = $2 AND left_at IS NULL
            )
            "#,
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(member)
    }

    pub async fn list_conversations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationDetail>, AppError> {
        let conversations = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT c.* FROM conversations c
            JOIN conversation_participants cp ON cp.conversation_id = c.id
            WHERE cp.user_id = $1 AND cp.left_at IS NULL
            ORDER BY c.updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut details = Vec::with_capacity(conversations.len());
        for conversation in conversations {
            let participants = self.participant_ids(conversation.id).await?;
            details.push(ConversationDetail {
                conversation,
                participants,
            });
        }
        Ok(details)
    }

    pub async fn get_conversation(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ConversationDetail>, AppError> {
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT c.* FROM conversations c
            JOIN conversation_participants cp ON cp.conversation_id = c.id
            WHERE c.id = $1 AND cp.user_id = $2 AND cp.left_at IS NULL
            "#,
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match conversation {
            Some(conversation) => {
                let participants = self.participant_ids(conversation.id).await?;
                Ok(Some(ConversationDetail {
                    conversation,
                    participants,
                }))
            }
            None => Ok(None),
        }
    }

    async fn participant_ids(&self, conversation_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT user_id FROM conversation_participants
            WHERE conversation_id = $1 AND left_at IS NULL
            ORDER BY joined_at ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    pub async fn insert_conversation<'e, E>(
        &self,
        executor: E,
        title: &str,
        product_id: Option<Uuid>,
    ) -> Result<Conversation, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            INSERT INTO conversations (title, product_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(product_id)
        .fetch_one(executor)
        .await?;
        Ok(conversation)
    }

    pub async fn add_participant<'e, E>(
        &self,
        executor: E,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO conversation_participants (conversation_id, user_id) VALUES ($1, $2)",
        )
        .bind(conversation_id)
        .bind(user_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Reaproveita a conversa produto <-> comprador se já existir uma
    // em que os dois participam.
    pub async fn find_product_conversation(
        &self,
        product_id: Uuid,
        buyer_id: Uuid,
        seller_id: Uuid,
    ) -> Result<Option<Conversation>, AppError> {
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT c.* FROM conversations c
            JOIN conversation_participants b ON b.conversation_id = c.id AND b.user_id = $2
            JOIN conversation_participants s ON s.conversation_id = c.id AND s.user_id = $3
            WHERE c.product_id = $1
            LIMIT 1
            "#,
        )
        .bind(product_id)
        .bind(buyer_id)
        .bind(seller_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(conversation)
    }

    pub async fn leave_conversation(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE conversation_participants SET left_at = NOW()
            WHERE conversation_id = $1 AND user_id = $2 AND left_at IS NULL
            "#,
        )
        .bind(conversation_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Mensagens
    // ---

    pub async fn list_messages(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Message>, AppError> {
        if !self.is_participant(conversation_id, user_id).await? {
            return Err(AppError::NotFound("Conversation"));
        }
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    pub async fn insert_message(
        &self,
        conversation_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> Result<Message, AppError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (conversation_id, sender_id, content, read_by)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(conversation_id)
        .bind(sender_id)
        .bind(content)
        .bind(sender_id.to_string())
        .fetch_one(&self.pool)
        .await?;

        // Conversa sobe na listagem quando recebe mensagem
        sqlx::query("UPDATE conversations SET updated_at = NOW() WHERE id = $1")
            .bind(conversation_id)
            .execute(&self.pool)
            .await?;

        Ok(message)
    }

    // Acrescenta o leitor à lista read_by das mensagens que ele ainda não leu.
    pub async fn mark_read(&self, conversation_id: Uuid, user_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE messages SET read_by = read_by || ',' || $3
            WHERE conversation_id = $1
              AND sender_id <> $2
              AND POSITION($3 IN read_by) = 0
            "#,
        )
        .bind(conversation_id)
        .bind(user_id)
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
