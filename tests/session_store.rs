#![allow(clippy::unwrap_used, clippy::expect_used)]

use base64ct::{Base64UrlUnpadded, Encoding};
use emailcheck::session::{
    FileStorage, IdentityAssertion, KeyValueStorage, SessionError, SessionStore, StoredUser,
    STORAGE_KEY,
};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

fn credential(payload: &Value) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"RS256","typ":"JWT"}"#);
    let body = Base64UrlUnpadded::encode_string(payload.to_string().as_bytes());
    format!("{header}.{body}.c2lnbmF0dXJl")
}

fn ada() -> String {
    credential(&json!({
        "iss": "https://accounts.google.com",
        "sub": "1234567890",
        "email": "ada@example.com",
        "name": "Ada Lovelace",
        "picture": "https://example.com/ada.png"
    }))
}

#[test]
fn login_survives_a_restart() {
    let dir = tempdir().expect("tempdir");

    let first = SessionStore::new(FileStorage::new(dir.path()));
    let user = first
        .handle_identity_login(&IdentityAssertion::new(ada()))
        .expect("login");
    assert_eq!(user.id, "1234567890");
    assert!(user.token.is_some());

    let second = SessionStore::new(FileStorage::new(dir.path()));
    assert!(!second.is_logged_in());
    assert!(second.restore_session());
    assert!(second.is_logged_in());

    let restored = second.current_user().expect("restored user");
    assert_eq!(restored.email, "ada@example.com");
    assert_eq!(restored.name, "Ada Lovelace");
    assert!(restored.token.is_none());
}

#[test]
fn persisted_entry_never_contains_the_credential() {
    let dir = tempdir().expect("tempdir");
    let token = ada();

    let store = SessionStore::new(FileStorage::new(dir.path()));
    let user = store
        .handle_identity_login(&IdentityAssertion::new(token.clone()))
        .expect("login");
    assert_eq!(
        user.token.as_ref().map(|t| t.expose_secret().to_string()),
        Some(token.clone())
    );

    let raw = store
        .storage()
        .get_item(STORAGE_KEY)
        .expect("read")
        .expect("entry present");
    assert!(!raw.contains(&token));

    let stored: StoredUser = serde_json::from_str(&raw).expect("stored user json");
    assert_eq!(
        stored,
        StoredUser {
            id: "1234567890".to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada Lovelace".to_string(),
            picture: "https://example.com/ada.png".to_string(),
        }
    );
}

#[test]
fn logout_removes_the_file() {
    let dir = tempdir().expect("tempdir");
    let store = SessionStore::new(FileStorage::new(dir.path()));
    store
        .handle_identity_login(&IdentityAssertion::new(ada()))
        .expect("login");
    assert!(dir.path().join("user.json").exists());

    store.logout();
    assert!(!store.is_logged_in());
    assert!(store.current_user().is_none());
    assert!(!dir.path().join("user.json").exists());

    let next = SessionStore::new(FileStorage::new(dir.path()));
    assert!(!next.restore_session());
}

#[test]
fn corrupt_file_is_discarded_on_restore() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("user.json"), "{not json").expect("write");

    let store = SessionStore::new(FileStorage::new(dir.path()));
    assert!(!store.restore_session());
    assert!(!store.is_logged_in());
    assert!(!dir.path().join("user.json").exists());
}

#[test]
fn malformed_credential_leaves_storage_untouched() {
    let dir = tempdir().expect("tempdir");
    let store = SessionStore::new(FileStorage::new(dir.path()));

    let err = store
        .handle_identity_login(&IdentityAssertion::new("no-dots-here"))
        .unwrap_err();
    assert!(matches!(err, SessionError::MalformedToken(_)));
    assert!(!store.is_logged_in());
    assert!(!dir.path().join("user.json").exists());
}

#[tokio::test]
async fn subscribers_see_login_and_logout() {
    let dir = tempdir().expect("tempdir");
    let store = SessionStore::new(FileStorage::new(dir.path()));
    let mut logged_in = store.subscribe_logged_in();
    assert!(!*logged_in.borrow_and_update());

    store
        .handle_identity_login(&IdentityAssertion::new(ada()))
        .expect("login");
    logged_in.changed().await.expect("sender alive");
    assert!(*logged_in.borrow_and_update());

    store.logout();
    logged_in.changed().await.expect("sender alive");
    assert!(!*logged_in.borrow_and_update());
}
