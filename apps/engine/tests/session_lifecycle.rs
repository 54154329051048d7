//! Session identity derivation and registry deduplication over the store.

use std::sync::Arc;

use engine::domain::dice::SequenceRoller;
use engine::domain::roster::Roster;
use engine::infra::keys;
use engine::infra::memory::InMemorySessionStore;
use engine::infra::store::SessionStore;
use engine::services::session::GameSession;

fn roster(names: &[&str]) -> Roster {
    Roster::new(names.iter().copied()).unwrap()
}

async fn construct(store: Arc<InMemorySessionStore>, names: &[&str]) -> GameSession {
    GameSession::create_or_resume(store, Arc::new(SequenceRoller::of(&[])), roster(names))
        .await
        .unwrap()
}

#[tokio::test]
async fn constructions_for_one_roster_share_one_identity() {
    let store = Arc::new(InMemorySessionStore::new());

    let first = construct(store.clone(), &["daniel", "alice", "carol", "bob"]).await;
    let second = construct(store.clone(), &["bob", "carol", "alice", "daniel"]).await;
    let third = construct(store.clone(), &["alice", "bob", "carol", "daniel"]).await;

    assert_eq!(first.session_id(), second.session_id());
    assert_eq!(first.session_id(), third.session_id());
    assert!(first.session_id().starts_with("game_"));

    // Exactly one registry entry, under the canonical encoding
    assert_eq!(
        store
            .get_field(keys::ACTIVE_GAMES, "alice:bob:carol:daniel")
            .await
            .unwrap(),
        Some(first.session_id().to_string())
    );
}

#[tokio::test]
async fn concurrent_constructions_converge() {
    let store = Arc::new(InMemorySessionStore::new());

    let (a, b) = tokio::join!(
        construct(store.clone(), &["alice", "bob"]),
        construct(store.clone(), &["bob", "alice"]),
    );

    assert_eq!(a.session_id(), b.session_id());
}

#[tokio::test]
async fn distinct_rosters_get_distinct_sessions() {
    let store = Arc::new(InMemorySessionStore::new());

    let ab = construct(store.clone(), &["alice", "bob"]).await;
    let ac = construct(store.clone(), &["alice", "carol"]).await;

    assert_ne!(ab.session_id(), ac.session_id());

    // Sessions are isolated purely by key namespacing
    ab.update_position("alice", engine::domain::dice::Face::new(6).unwrap())
        .await
        .unwrap();
    assert_eq!(ab.current_position("alice").await.unwrap(), 1);
    assert_eq!(ac.current_position("alice").await.unwrap(), 0);
}

#[tokio::test]
async fn resume_preserves_in_progress_positions() {
    let store = Arc::new(InMemorySessionStore::new());

    let session = construct(store.clone(), &["alice", "bob"]).await;
    let six = engine::domain::dice::Face::new(6).unwrap();
    let three = engine::domain::dice::Face::new(3).unwrap();
    session.update_position("alice", six).await.unwrap();
    session.update_position("alice", three).await.unwrap();
    assert_eq!(session.current_position("alice").await.unwrap(), 4);

    // A fresh process reattaching must see the same progress
    let resumed = construct(store, &["bob", "alice"]).await;
    assert_eq!(resumed.session_id(), session.session_id());
    assert_eq!(resumed.current_position("alice").await.unwrap(), 4);
    assert_eq!(resumed.current_position("bob").await.unwrap(), 0);
}
