//! Persistent admin session store.
//!
//! Single source of truth for "is the operator authenticated". The session is
//! a server-issued bearer credential mirrored to disk under a fixed file name
//! so it survives restarts. A stored session is assumed valid until the
//! backend rejects it; there is no client-side expiry check.

use crate::models::UserType;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the persisted session inside the data directory.
const SESSION_FILE: &str = "propconnect_admin_auth.json";

/// The client-held proof of admin authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub user_type: UserType,
    pub token: String,
}

/// Authentication state. The only permitted transitions are
/// `Anonymous -> Authenticated` via a successful login and
/// `Authenticated -> Anonymous` via logout or a 401 from the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Authenticated(Session),
}

pub struct SessionStore {
    path: PathBuf,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Resolve the initial state from the data directory. A missing file is
    /// simply logged-out; an unreadable or malformed file is discarded and
    /// treated the same way. This never fails, so startup cannot crash on a
    /// corrupt session record.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(SESSION_FILE);
        let state = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Session>(&content) {
                Ok(session) => {
                    debug!(username = %session.username, "Restored persisted session");
                    SessionState::Authenticated(session)
                }
                Err(e) => {
                    warn!("Discarding malformed session file: {}", e);
                    let _ = std::fs::remove_file(&path);
                    SessionState::Anonymous
                }
            },
            Err(_) => SessionState::Anonymous,
        };

        Self {
            path,
            state: RwLock::new(state),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.read(), SessionState::Authenticated(_))
    }

    /// Snapshot of the current session, if any.
    pub fn current(&self) -> Option<Session> {
        match &*self.state.read() {
            SessionState::Authenticated(session) => Some(session.clone()),
            SessionState::Anonymous => None,
        }
    }

    /// Bearer token for outgoing requests, if a session exists.
    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    /// Persist a freshly issued session and transition to Authenticated.
    /// Only the login flow calls this, and only after the role check passed.
    pub fn establish(&self, session: Session) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&session)?;
        std::fs::write(&self.path, content)?;
        *self.state.write() = SessionState::Authenticated(session);
        Ok(())
    }

    /// Wipe the session from memory and disk. Never fails: a filesystem
    /// error here must not keep a rejected credential alive.
    pub fn clear(&self) {
        *self.state.write() = SessionState::Anonymous;
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!("Failed to remove session file: {}", e);
            }
        }
    }
}
