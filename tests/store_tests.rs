use eventpro_client::{
    models::{Role, User},
    store::{FileSessionStore, MemorySessionStore, SessionStore},
};
use tempfile::tempdir;

fn sample_user() -> User {
    User {
        id: 42,
        name: "Dana Hale".to_string(),
        email: "dana@example.com".to_string(),
        role: Role::Organizer,
    }
}

#[tokio::test]
async fn test_file_store_token_round_trip() {
    let dir = tempdir().unwrap();
    let store = FileSessionStore::new(dir.path());

    assert_eq!(store.token().await, None);

    store.set_token(Some("tok-abc123")).await;
    assert_eq!(store.token().await, Some("tok-abc123".to_string()));

    store.set_token(None).await;
    assert_eq!(store.token().await, None);
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = tempdir().unwrap();

    {
        let store = FileSessionStore::new(dir.path());
        store.set_token(Some("tok-persist")).await;
        store.set_user(Some(&sample_user())).await;
    }

    // A fresh store over the same directory sees the previous run's state.
    let reopened = FileSessionStore::new(dir.path());
    assert_eq!(reopened.token().await, Some("tok-persist".to_string()));
    assert_eq!(reopened.user().await, Some(sample_user()));
}

#[tokio::test]
async fn test_clear_removes_both_keys_together() {
    let dir = tempdir().unwrap();
    let store = FileSessionStore::new(dir.path());

    store.set_token(Some("tok-xyz")).await;
    store.set_user(Some(&sample_user())).await;

    store.clear().await;

    assert_eq!(store.token().await, None);
    assert_eq!(store.user().await, None);
}

#[tokio::test]
async fn test_corrupt_user_record_reads_as_absent() {
    let dir = tempdir().unwrap();
    let store = FileSessionStore::new(dir.path());

    store.set_token(Some("tok-ok")).await;
    std::fs::write(dir.path().join("eventpro_user"), "{not json").unwrap();

    assert_eq!(store.user().await, None);
    // The token key is unaffected by a bad user record.
    assert_eq!(store.token().await, Some("tok-ok".to_string()));
}

#[tokio::test]
async fn test_missing_directory_is_created_on_first_write() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("deep").join("session");
    let store = FileSessionStore::new(&nested);

    assert_eq!(store.token().await, None);

    store.set_token(Some("tok-new")).await;
    assert_eq!(store.token().await, Some("tok-new".to_string()));
}

#[tokio::test]
async fn test_empty_token_file_reads_as_absent() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("eventpro_token"), "").unwrap();

    let store = FileSessionStore::new(dir.path());
    assert_eq!(store.token().await, None);
}

#[tokio::test]
async fn test_memory_store_round_trip() {
    let store = MemorySessionStore::new();
    assert_eq!(store.token().await, None);

    store.set_token(Some("tok-mem")).await;
    store.set_user(Some(&sample_user())).await;
    assert_eq!(store.token().await, Some("tok-mem".to_string()));
    assert_eq!(store.user().await, Some(sample_user()));

    store.clear().await;
    assert_eq!(store.token().await, None);
    assert_eq!(store.user().await, None);
}

#[tokio::test]
async fn test_memory_store_seeded() {
    let store = MemorySessionStore::seeded("tok-seed", &sample_user());
    assert_eq!(store.token().await, Some("tok-seed".to_string()));
    assert_eq!(store.user().await.unwrap().name, "Dana Hale");
}
