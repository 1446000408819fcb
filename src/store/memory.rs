//! In-process store backed by a `tokio` `RwLock`.
//!
//! Used by tests and by `STORE_BACKEND=memory`. Insert-if-absent runs under a
//! single write guard, so duplicate registration cannot slip through.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{ChatStore, Message, Participant, StoreError, UpdateResult};

#[derive(Default)]
struct MemoryInner {
    participants: HashMap<String, Participant>,
    messages: Vec<Message>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ChatStore for MemoryStore {
    async fn find_participant(&self, name: &str) -> Result<Option<Participant>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.participants.get(name).cloned())
    }

    async fn insert_participant(&self, participant: &Participant) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.participants.contains_key(&participant.name) {
            return Ok(false);
        }
        inner
            .participants
            .insert(participant.name.clone(), participant.clone());
        Ok(true)
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.participants.values().cloned().collect())
    }

    async fn touch_participant(&self, name: &str, last_seen: i64) -> Result<UpdateResult, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(participant) = inner.participants.get_mut(name) else {
            return Ok(UpdateResult::default());
        };
        let modified = u64::from(participant.last_seen != last_seen);
        participant.last_seen = last_seen;
        Ok(UpdateResult { matched: 1, modified })
    }

    async fn delete_participant(&self, name: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.participants.remove(name).is_some())
    }

    async fn insert_message(&self, message: &Message) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.messages.push(message.clone());
        Ok(())
    }

    async fn list_messages(&self) -> Result<Vec<Message>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.messages.clone())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
