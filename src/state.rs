//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! handed to the sweep task. It carries the store handle explicitly; there
//! is no global connection.

use std::sync::Arc;

use crate::config::ChatConfig;
use crate::store::ChatStore;

/// Shared application state. Clone is required by Axum; fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ChatStore>,
    pub config: ChatConfig,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn ChatStore>, config: ChatConfig) -> Self {
        Self { store, config }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::store::{MemoryStore, Participant};

    /// Create a test `AppState` over an empty in-memory store.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), ChatConfig::default())
    }

    /// Same as [`test_app_state`] but with join/leave notices enabled.
    #[must_use]
    pub fn announcing_app_state() -> AppState {
        let config = ChatConfig { announce_presence: true, ..ChatConfig::default() };
        AppState::new(Arc::new(MemoryStore::new()), config)
    }

    /// Insert participants directly, bypassing registration.
    pub async fn seed_participants(state: &AppState, names: &[&str], last_seen: i64) {
        for name in names {
            let participant = Participant { name: (*name).to_owned(), last_seen };
            assert!(state.store.insert_participant(&participant).await.unwrap());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_one_store() {
        let state = test_helpers::test_app_state();
        let cloned = state.clone();
        test_helpers::seed_participants(&state, &["alice"], 1).await;
        assert!(cloned.store.find_participant("alice").await.unwrap().is_some());
    }
}
