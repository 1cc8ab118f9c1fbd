//! Signed-in identity and the persisted bearer token.
//!
//! A [`Session`] is a cheap, cloneable handle. The CLI creates one per run
//! and hands it to [`ApiClient`](crate::ApiClient) when building it, so the
//! token used for requests and the token cleared on a 401 are always the
//! same object.
//!
//! Only the token is persisted (through a [`TokenStore`]). The user profile
//! is fetched again on every start.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::UserProfile;

/// Errors from reading or writing the persisted token.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read token from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write token to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove token at {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// =============================================================================
// Token stores
// =============================================================================

/// Where the bearer token lives between runs.
pub trait TokenStore: Send + Sync {
    /// Load the stored token, `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing storage cannot be read.
    fn load(&self) -> Result<Option<SecretString>, SessionError>;

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing storage cannot be written.
    fn save(&self, token: &SecretString) -> Result<(), SessionError>;

    /// Remove the stored token. Removing a missing token is not an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing storage cannot be written.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Keeps the token in a single file, creating parent directories on save.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<SecretString>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SecretString::from(token.to_owned())))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SessionError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, token: &SecretString) -> Result<(), SessionError> {
        let write_err = |source| SessionError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, token.expose_secret()).map_err(write_err)
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Keeps the token in memory only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`, as if a previous run saved it.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<SecretString>, SessionError> {
        let guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone().map(SecretString::from))
    }

    fn save(&self, token: &SecretString) -> Result<(), SessionError> {
        let mut guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token.expose_secret().to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
        Ok(())
    }
}

// =============================================================================
// Session
// =============================================================================

/// The client's view of who is signed in.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Box<dyn TokenStore>,
    state: RwLock<SessionState>,
}

#[derive(Default)]
struct SessionState {
    token: Option<SecretString>,
    user: Option<UserProfile>,
}

impl Session {
    /// Open a session backed by `store`, picking up any saved token.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn open(store: impl TokenStore + 'static) -> Result<Self, SessionError> {
        let token = store.load()?;
        debug!(has_token = token.is_some(), "Session opened");
        Ok(Self {
            inner: Arc::new(SessionInner {
                store: Box::new(store),
                state: RwLock::new(SessionState { token, user: None }),
            }),
        })
    }

    /// A signed-out session that persists nothing.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                store: Box::new(MemoryTokenStore::new()),
                state: RwLock::new(SessionState::default()),
            }),
        }
    }

    /// Whether a token is held (it may not have been checked yet).
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.read(|state| state.token.is_some())
    }

    /// The raw token for the `Authorization` header.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        self.read(|state| {
            state
                .token
                .as_ref()
                .map(|token| token.expose_secret().to_owned())
        })
    }

    /// The signed-in user's profile, once known.
    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.read(|state| state.user.clone())
    }

    /// Whether a user profile is loaded.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read(|state| state.user.is_some())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.read(|state| state.user.as_ref().is_some_and(UserProfile::is_admin))
    }

    /// Store a freshly issued token, in memory and in the token store.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the token cannot be persisted. The
    /// in-memory token is set either way.
    pub fn set_token(&self, token: SecretString) -> Result<(), SessionError> {
        let saved = self.inner.store.save(&token);
        self.write(|state| state.token = Some(token));
        saved
    }

    pub fn set_user(&self, user: UserProfile) {
        debug!(user_id = %user.id, role = %user.role, "Session user set");
        self.write(|state| state.user = Some(user));
    }

    /// Drop the token and profile.
    ///
    /// Failing to delete the persisted token is logged and otherwise
    /// ignored; the in-memory state is always cleared.
    pub fn expire(&self) {
        self.write(|state| {
            state.token = None;
            state.user = None;
        });
        if let Err(e) = self.inner.store.clear() {
            warn!(error = %e, "Failed to clear stored token");
        }
        debug!("Session expired");
    }

    fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        let guard = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut SessionState)) {
        let mut guard = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.has_token().then_some("[REDACTED]"))
            .field("user", &self.user())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bistro_core::{UserId, UserRole};

    fn profile(role: UserRole) -> UserProfile {
        UserProfile {
            id: UserId::new(1),
            username: "kim".to_string(),
            email: None,
            role,
            address: None,
        }
    }

    #[test]
    fn test_open_picks_up_saved_token() {
        let session = Session::open(MemoryTokenStore::with_token("saved")).unwrap();
        assert!(session.has_token());
        assert_eq!(session.bearer_token().as_deref(), Some("saved"));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_expire_clears_everything() {
        let session = Session::anonymous();
        session
            .set_token(SecretString::from("t0k3n".to_string()))
            .unwrap();
        session.set_user(profile(UserRole::Admin));
        assert!(session.is_admin());

        session.expire();
        assert!(!session.has_token());
        assert!(session.user().is_none());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::anonymous();
        let other = session.clone();
        session.set_user(profile(UserRole::Customer));
        assert!(other.is_authenticated());
        other.expire();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::anonymous();
        session
            .set_token(SecretString::from("super-secret".to_string()))
            .unwrap();
        let debug = format!("{session:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("bistro-token-{}", uuid::Uuid::new_v4()));
        let store = FileTokenStore::new(dir.join("nested").join("token"));

        assert!(store.load().unwrap().is_none());
        store.save(&SecretString::from("abc".to_string())).unwrap();
        assert_eq!(
            store.load().unwrap().unwrap().expose_secret(),
            "abc"
        );
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();

        fs::remove_dir_all(dir).ok();
    }
}
