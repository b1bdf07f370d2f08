//! Session state for the signed-in user. The store is built once at startup,
//! restored from durable storage, and passed by reference to whatever needs
//! auth state. Only non-secret profile fields are persisted; the raw identity
//! credential stays in memory.

use super::{
    observable::Observable,
    storage::{KeyValueStorage, StorageError},
    token::{self, IdentityClaims, TokenError},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Storage key holding the persisted profile.
pub const STORAGE_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("malformed identity token: {0}")]
    MalformedToken(#[from] TokenError),
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

/// Identity-provider login response (Google Identity Services callback).
pub struct IdentityAssertion {
    pub credential: SecretString,
    pub select_by: Option<String>,
}

impl IdentityAssertion {
    #[must_use]
    pub fn new(credential: impl Into<String>) -> Self {
        Self {
            credential: SecretString::from(credential.into()),
            select_by: None,
        }
    }
}

/// The signed-in user. `token` is only present for sessions created by a login
/// in this process; restored sessions never carry it.
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: String,
    pub token: Option<SecretString>,
}

impl User {
    fn from_stored(stored: StoredUser, token: Option<SecretString>) -> Self {
        Self {
            id: stored.id,
            email: stored.email,
            name: stored.name,
            picture: stored.picture,
            token,
        }
    }
}

/// The persisted subset of `User`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: String,
}

impl From<IdentityClaims> for StoredUser {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            picture: claims.picture,
        }
    }
}

impl From<&User> for StoredUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            picture: user.picture.clone(),
        }
    }
}

pub struct SessionStore<S> {
    storage: S,
    user: Observable<Option<User>>,
    is_logged_in: Observable<bool>,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Creates an empty (signed-out) store. Call `restore_session` to load a
    /// persisted profile.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            user: Observable::new(None),
            is_logged_in: Observable::new(false),
        }
    }

    /// Decodes the assertion's credential, signs the user in and persists the
    /// profile (without the credential).
    ///
    /// The credential signature is not verified.
    ///
    /// # Errors
    /// `SessionError::MalformedToken` if the credential cannot be decoded; the
    /// state is left untouched. `SessionError::Storage` if persisting fails; the
    /// in-memory session is already set at that point.
    #[instrument(skip_all)]
    pub fn handle_identity_login(&self, assertion: &IdentityAssertion) -> Result<User, SessionError> {
        let credential = assertion.credential.expose_secret();
        let claims = token::decode_claims(credential).map_err(|err| {
            warn!("rejected identity credential: {err}");
            err
        })?;

        let stored = StoredUser::from(claims);
        let user = User::from_stored(
            stored.clone(),
            Some(SecretString::from(credential.to_string())),
        );

        self.set_user(Some(user.clone()));
        info!(
            user_id = %user.id,
            select_by = assertion.select_by.as_deref().unwrap_or("unknown"),
            "signed in"
        );

        let json = serde_json::to_string(&stored)?;
        self.storage.set_item(STORAGE_KEY, &json)?;

        Ok(user)
    }

    /// Signs out and removes the persisted profile. Storage removal is best
    /// effort.
    pub fn logout(&self) {
        self.set_user(None);

        if let Err(err) = self.storage.remove_item(STORAGE_KEY) {
            warn!("failed to remove stored session: {err}");
        }

        info!("signed out");
    }

    /// Loads a persisted profile. A corrupted entry is removed and the store is
    /// left signed out. Never fails; returns whether a session was restored.
    pub fn restore_session(&self) -> bool {
        let saved = match self.storage.get_item(STORAGE_KEY) {
            Ok(Some(saved)) => saved,
            Ok(None) => {
                debug!("no stored session");
                return false;
            }
            Err(err) => {
                warn!("failed to read stored session: {err}");
                return false;
            }
        };

        match serde_json::from_str::<StoredUser>(&saved) {
            Ok(stored) => {
                debug!(user_id = %stored.id, "restored session");
                self.set_user(Some(User::from_stored(stored, None)));
                true
            }
            Err(err) => {
                warn!("discarding corrupted stored session: {err}");
                if let Err(err) = self.storage.remove_item(STORAGE_KEY) {
                    warn!("failed to remove corrupted session: {err}");
                }
                self.set_user(None);
                false
            }
        }
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.user.get()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in.get()
    }

    #[must_use]
    pub fn subscribe_user(&self) -> watch::Receiver<Option<User>> {
        self.user.subscribe()
    }

    #[must_use]
    pub fn subscribe_logged_in(&self) -> watch::Receiver<bool> {
        self.is_logged_in.subscribe()
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The only writer of both cells; keeps `is_logged_in == user.is_some()`.
    fn set_user(&self, user: Option<User>) {
        let logged_in = user.is_some();
        self.user.set(user);
        self.is_logged_in.set(logged_in);
    }
}
