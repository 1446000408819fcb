use super::*;
use crate::store::MessageKind;

fn participant(name: &str, last_seen: i64) -> Participant {
    Participant { name: name.into(), last_seen }
}

fn message(from: &str, text: &str) -> Message {
    Message {
        from: from.into(),
        to: "All".into(),
        text: text.into(),
        kind: MessageKind::Broadcast,
        time: "12:00:00".into(),
    }
}

// =============================================================================
// participants
// =============================================================================

#[tokio::test]
async fn insert_participant_rejects_taken_name() {
    let store = MemoryStore::new();
    assert!(store.insert_participant(&participant("alice", 1)).await.unwrap());
    assert!(!store.insert_participant(&participant("alice", 2)).await.unwrap());

    let stored = store.find_participant("alice").await.unwrap().unwrap();
    assert_eq!(stored.last_seen, 1);
}

#[tokio::test]
async fn find_participant_missing_is_none() {
    let store = MemoryStore::new();
    assert!(store.find_participant("ghost").await.unwrap().is_none());
}

#[tokio::test]
async fn touch_participant_reports_matched_and_modified() {
    let store = MemoryStore::new();
    store.insert_participant(&participant("bob", 10)).await.unwrap();

    let changed = store.touch_participant("bob", 20).await.unwrap();
    assert_eq!(changed, UpdateResult { matched: 1, modified: 1 });

    let unchanged = store.touch_participant("bob", 20).await.unwrap();
    assert_eq!(unchanged, UpdateResult { matched: 1, modified: 0 });
}

#[tokio::test]
async fn touch_participant_missing_matches_nothing() {
    let store = MemoryStore::new();
    let result = store.touch_participant("ghost", 5).await.unwrap();
    assert_eq!(result, UpdateResult::default());
}

#[tokio::test]
async fn delete_participant_reports_removal() {
    let store = MemoryStore::new();
    store.insert_participant(&participant("carol", 1)).await.unwrap();
    assert!(store.delete_participant("carol").await.unwrap());
    assert!(!store.delete_participant("carol").await.unwrap());
    assert!(store.list_participants().await.unwrap().is_empty());
}

// =============================================================================
// messages
// =============================================================================

#[tokio::test]
async fn list_messages_preserves_insertion_order() {
    let store = MemoryStore::new();
    for text in ["one", "two", "three"] {
        store.insert_message(&message("alice", text)).await.unwrap();
    }
    let texts: Vec<String> = store
        .list_messages()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.text)
        .collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn clones_share_the_same_data() {
    let store = MemoryStore::new();
    let other = store.clone();
    store.insert_participant(&participant("dave", 1)).await.unwrap();
    assert!(other.find_participant("dave").await.unwrap().is_some());
}
