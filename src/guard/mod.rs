//! Access gate for protected commands.
//!
//! Every subcommand that touches an admin endpoint passes through here before
//! doing any work. The store's state is fully resolved during
//! [`SessionStore::load`], so a protected command can never observe a
//! half-resolved session. Role is not re-checked: login already rejected
//! non-admin accounts, so a present session implies admin access.

use crate::session::{Session, SessionStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Not logged in. Run `propconnect login` first.")]
    NotAuthenticated,
}

/// Hand the current session to a protected command, or refuse.
pub fn require_admin(store: &SessionStore) -> Result<Session, GuardError> {
    store.current().ok_or(GuardError::NotAuthenticated)
}
