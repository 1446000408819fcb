//! Document store contract shared by the presence and message services.
//!
//! DESIGN
//! ======
//! Services never hold authoritative copies of participants or messages.
//! Every operation goes through a `ChatStore` handle passed in explicitly,
//! so invariants are enforced at read/write time against the store.
//!
//! TRADE-OFFS
//! ==========
//! Name uniqueness is pushed down into `insert_participant` (insert-if-absent)
//! rather than a lookup followed by an insert. Two concurrent registrations
//! of the same name resolve to exactly one winner.

pub mod memory;
pub mod postgres;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use memory::MemoryStore;
pub use postgres::PgStore;

// =============================================================================
// RECORDS
// =============================================================================

/// A registered chat participant. `name` is the sole key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    /// Last heartbeat or registration, milliseconds since Unix epoch.
    pub last_seen: i64,
}

/// Visibility class of a stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Visible to every reader.
    #[serde(alias = "message")]
    Broadcast,
    /// Visible to sender and recipient only.
    #[serde(alias = "private_message")]
    Private,
    /// System join/leave notice. Visible to every reader.
    Status,
}

impl MessageKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Broadcast => "broadcast",
            Self::Private => "private",
            Self::Status => "status",
        }
    }
}

impl FromStr for MessageKind {
    type Err = ();

    /// Accepts the canonical names plus the legacy `message` / `private_message`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "broadcast" | "message" => Ok(Self::Broadcast),
            "private" | "private_message" => Ok(Self::Private),
            "status" => Ok(Self::Status),
            _ => Err(()),
        }
    }
}

/// An immutable chat log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: MessageKind,
    /// Creation time formatted `HH:MM:SS`.
    pub time: String,
}

/// Outcome of a single-document update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateResult {
    /// Documents that matched the filter.
    pub matched: u64,
    /// Documents whose value actually changed.
    pub modified: u64,
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store backend error: {0}")]
    Backend(String),
}

// =============================================================================
// CONTRACT
// =============================================================================

/// Persistence operations the chat core depends on.
#[async_trait::async_trait]
pub trait ChatStore: Send + Sync {
    async fn find_participant(&self, name: &str) -> Result<Option<Participant>, StoreError>;

    /// Insert `participant` unless its name is already taken.
    ///
    /// Returns `false` without writing when the name exists.
    async fn insert_participant(&self, participant: &Participant) -> Result<bool, StoreError>;

    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError>;

    /// Set `last_seen` for `name`.
    async fn touch_participant(&self, name: &str, last_seen: i64) -> Result<UpdateResult, StoreError>;

    /// Remove `name`. Returns whether a row was deleted.
    async fn delete_participant(&self, name: &str) -> Result<bool, StoreError>;

    async fn insert_message(&self, message: &Message) -> Result<(), StoreError>;

    /// All messages in insertion order.
    async fn list_messages(&self) -> Result<Vec<Message>, StoreError>;
}
