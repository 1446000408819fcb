//! Postgres-backed store.
//!
//! SYSTEM CONTEXT
//! ==============
//! `participants.name` is the primary key, so insert-if-absent is a single
//! `INSERT ... ON CONFLICT DO NOTHING`. Messages keep a `BIGSERIAL` sequence
//! column that defines insertion order.

use sqlx::{PgPool, Row};

use super::{ChatStore, Message, MessageKind, Participant, StoreError, UpdateResult};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn message_from_row(row: &sqlx::postgres::PgRow) -> Result<Message, StoreError> {
    let kind: String = row.try_get("kind")?;
    let kind = kind
        .parse::<MessageKind>()
        .map_err(|()| StoreError::Backend(format!("unknown message kind: {kind}")))?;
    Ok(Message {
        from: row.try_get("from")?,
        to: row.try_get("to")?,
        text: row.try_get("text")?,
        kind,
        time: row.try_get("time")?,
    })
}

#[async_trait::async_trait]
impl ChatStore for PgStore {
    async fn find_participant(&self, name: &str) -> Result<Option<Participant>, StoreError> {
        let row = sqlx::query_as::<_, (String, i64)>("SELECT name, last_seen FROM participants WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(name, last_seen)| Participant { name, last_seen }))
    }

    async fn insert_participant(&self, participant: &Participant) -> Result<bool, StoreError> {
        let result = sqlx::query("INSERT INTO participants (name, last_seen) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
            .bind(&participant.name)
            .bind(participant.last_seen)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError> {
        let rows = sqlx::query_as::<_, (String, i64)>("SELECT name, last_seen FROM participants")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(name, last_seen)| Participant { name, last_seen })
            .collect())
    }

    async fn touch_participant(&self, name: &str, last_seen: i64) -> Result<UpdateResult, StoreError> {
        let row = sqlx::query(
            r"WITH target AS (
                  SELECT name FROM participants WHERE name = $1
              ),
              updated AS (
                  UPDATE participants SET last_seen = $2
                  WHERE name = $1 AND last_seen <> $2
                  RETURNING name
              )
              SELECT (SELECT COUNT(*) FROM target) AS matched,
                     (SELECT COUNT(*) FROM updated) AS modified",
        )
        .bind(name)
        .bind(last_seen)
        .fetch_one(&self.pool)
        .await?;

        let matched: i64 = row.try_get("matched")?;
        let modified: i64 = row.try_get("modified")?;
        Ok(UpdateResult { matched: matched.unsigned_abs(), modified: modified.unsigned_abs() })
    }

    async fn delete_participant(&self, name: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM participants WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_message(&self, message: &Message) -> Result<(), StoreError> {
        sqlx::query(r#"INSERT INTO messages ("from", "to", text, kind, time) VALUES ($1, $2, $3, $4, $5)"#)
            .bind(&message.from)
            .bind(&message.to)
            .bind(&message.text)
            .bind(message.kind.as_str())
            .bind(&message.time)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_messages(&self) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query(r#"SELECT "from", "to", text, kind, time FROM messages ORDER BY seq ASC"#)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(message_from_row).collect()
    }
}

#[cfg(test)]
#[path = "postgres_test.rs"]
mod tests;
