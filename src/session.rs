//! Session store: the signed-in user and bearer token.
//!
//! The store is an explicit object owned by the caller and passed by
//! reference to the views that need it. [`SessionStore::hydrate`] loads the
//! persisted session at startup and [`SessionStore::logout`] tears it down.
//! Storage problems never surface as errors: the in-memory session stays
//! authoritative and the failure is only logged.

use crate::models::User;
use crate::utils::session_storage::{self, StoredSession};
use log::{info, warn};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    current: Option<Session>,
}

impl SessionStore {
    /// Load the persisted session from `path`, or start signed out.
    pub fn hydrate(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match session_storage::load_session(&path) {
            Ok(Some(stored)) => {
                info!("🔑 Restored session for user {}", stored.user.id);
                Some(Session {
                    user: stored.user,
                    token: stored.token,
                })
            }
            Ok(None) => None,
            Err(err) => {
                warn!("Ignoring unreadable session at {}: {}", path.display(), err);
                None
            }
        };

        Self { path, current }
    }

    /// A signed-out store that persists to `path` once someone logs in.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: None,
        }
    }

    pub fn login(&mut self, user: User, token: String) {
        let stored = StoredSession {
            token: token.clone(),
            user: user.clone(),
        };
        if let Err(err) = session_storage::save_session(&self.path, &stored) {
            warn!("Session for user {} will not survive a restart: {}", user.id, err);
        }

        info!("✅ Signed in as {} ({})", user.full_name, user.id);
        self.current = Some(Session { user, token });
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.current.take() {
            info!("Signed out user {}", session.user.id);
        }
        if let Err(err) = session_storage::clear_session(&self.path) {
            warn!("Failed to clear persisted session: {}", err);
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|session| session.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|session| &session.user)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user().map(|user| user.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
