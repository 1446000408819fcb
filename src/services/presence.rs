//! Presence tracker — registration, heartbeats, and the idle sweep.
//!
//! DESIGN
//! ======
//! A participant is alive while its `last_seen` timestamp is recent. Joins
//! and heartbeats refresh it; a background task periodically evicts anyone
//! idle for longer than the configured threshold.
//!
//! ERROR HANDLING
//! ==============
//! The sweep runs unattended. Each eviction is an independent unit of work:
//! a store failure on one participant is logged and the rest still proceed.
//! Whatever was missed is picked up on the next cycle.
//!
//! Evicting a participant leaves its past messages in the log. A departed
//! name stays historically visible as a sender or recipient.

use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::services::{clock, message};
use crate::state::AppState;
use crate::store::{ChatStore, Participant, StoreError};

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 15;

const JOIN_NOTICE: &str = "joined the room";
const LEAVE_NOTICE: &str = "left the room";

/// `tokio::time::interval` panics on a zero period.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PresenceError {
    #[error("invalid participant name: {0}")]
    Validation(String),
    #[error("participant already registered: {0}")]
    Conflict(String),
    #[error("participant not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Normalize and check a display name.
///
/// # Errors
///
/// Returns `Validation` if the trimmed name is outside the allowed length.
pub fn validate_name(raw: &str) -> Result<String, PresenceError> {
    let name = raw.trim();
    let chars = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        return Err(PresenceError::Validation(format!(
            "name must be {NAME_MIN_CHARS}-{NAME_MAX_CHARS} characters, got {chars}"
        )));
    }
    Ok(name.to_owned())
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Register a new participant with `last_seen = now`.
///
/// When `announce` is set, a join notice is appended to the message log on a
/// best-effort basis.
///
/// # Errors
///
/// Returns `Conflict` if the name is taken, `Validation` for a malformed
/// name, or `Store` on I/O failure.
pub async fn register(store: &dyn ChatStore, name: &str, now: i64, announce: bool) -> Result<Participant, PresenceError> {
    let name = validate_name(name)?;
    let participant = Participant { name, last_seen: now };

    if !store.insert_participant(&participant).await? {
        return Err(PresenceError::Conflict(participant.name));
    }
    info!(name = %participant.name, "participant registered");

    // The participant row is already committed; a lost notice must not turn
    // the join into a reported failure.
    if announce {
        let notice = message::status_notice(&participant.name, JOIN_NOTICE, now);
        if let Err(e) = store.insert_message(&notice).await {
            warn!(error = %e, name = %participant.name, "failed to record join notice");
        }
    }

    Ok(participant)
}

/// Refresh `last_seen` for an existing participant.
///
/// Returns whether the stored value changed. A heartbeat landing on the same
/// millisecond as the previous one is a no-op, not an error.
///
/// # Errors
///
/// Returns `NotFound` if the participant does not exist.
pub async fn heartbeat(store: &dyn ChatStore, name: &str, now: i64) -> Result<bool, PresenceError> {
    let result = store.touch_participant(name, now).await?;
    if result.matched == 0 {
        return Err(PresenceError::NotFound(name.to_owned()));
    }
    Ok(result.modified > 0)
}

/// All currently registered participants, in store order.
///
/// # Errors
///
/// Returns `Store` on I/O failure.
pub async fn list_active(store: &dyn ChatStore) -> Result<Vec<Participant>, PresenceError> {
    Ok(store.list_participants().await?)
}

/// Whether `participant` has been idle strictly longer than `threshold`.
#[must_use]
pub fn is_stale(participant: &Participant, now: i64, threshold: Duration) -> bool {
    let threshold_ms = i64::try_from(threshold.as_millis()).unwrap_or(i64::MAX);
    now.saturating_sub(participant.last_seen) > threshold_ms
}

/// Evict every participant idle longer than `threshold`. Returns the number
/// actually removed.
///
/// Never fails: store errors are logged per participant.
pub async fn sweep(store: &dyn ChatStore, now: i64, threshold: Duration, announce: bool) -> usize {
    let participants = match store.list_participants().await {
        Ok(participants) => participants,
        Err(e) => {
            error!(error = %e, "sweep could not list participants");
            return 0;
        }
    };

    let stale = participants
        .into_iter()
        .filter(|p| is_stale(p, now, threshold))
        .collect::<Vec<_>>();
    if stale.is_empty() {
        return 0;
    }

    let outcomes = join_all(stale.iter().map(|p| evict(store, p, now, announce))).await;
    outcomes.into_iter().filter(|evicted| *evicted).count()
}

async fn evict(store: &dyn ChatStore, participant: &Participant, now: i64, announce: bool) -> bool {
    match store.delete_participant(&participant.name).await {
        Ok(true) => {
            info!(name = %participant.name, idle_ms = now - participant.last_seen, "participant evicted");
        }
        // EDGE: removed concurrently between list and delete.
        Ok(false) => return false,
        Err(e) => {
            warn!(error = %e, name = %participant.name, "failed to evict idle participant");
            return false;
        }
    }

    if announce {
        let notice = message::status_notice(&participant.name, LEAVE_NOTICE, now);
        if let Err(e) = store.insert_message(&notice).await {
            warn!(error = %e, name = %participant.name, "failed to record leave notice");
        }
    }
    true
}

// =============================================================================
// BACKGROUND TASK
// =============================================================================

/// Spawn the periodic idle sweep. Returns a handle for shutdown.
pub fn spawn_sweep_task(state: AppState) -> JoinHandle<()> {
    let interval = state.config.sweep_interval.max(MIN_SWEEP_INTERVAL);
    let threshold = state.config.idle_threshold;
    let announce = state.config.announce_presence;
    info!(
        interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
        threshold_secs = threshold.as_secs(),
        "idle sweep configured"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // First tick completes immediately; the first sweep runs one period in.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let evicted = sweep(state.store.as_ref(), clock::now_ms(), threshold, announce).await;
            if evicted > 0 {
                info!(evicted, "idle sweep finished");
            }
        }
    })
}

#[cfg(test)]
#[path = "presence_test.rs"]
mod tests;
