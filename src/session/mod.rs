//! Identity session: login from a Google identity credential, restore on
//! startup, logout. This module touches a security boundary and must never log
//! the credential.
//!
//! Flow Overview: the identity provider hands a signed credential to
//! `SessionStore::handle_identity_login`, which decodes its payload, updates the
//! observable `user`/`is_logged_in` cells and persists `{id, email, name,
//! picture}` under the `user` storage key. `restore_session` reads that entry
//! back on the next start; `logout` clears both memory and storage.

pub mod observable;
pub mod storage;
pub mod store;
pub mod token;

pub use observable::Observable;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{IdentityAssertion, SessionError, SessionStore, StoredUser, User, STORAGE_KEY};
pub use token::{IdentityClaims, TokenError};
