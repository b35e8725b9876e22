//! User directory collaborator (optional freshness path).
//!
//! The embedded-claim shortcut (see `gates::require_admin`) trusts the role
//! inside the resolved session. Where that staleness window is unacceptable,
//! a resolver consults this directory for the current role/tier instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use markethub_core::UserId;

use crate::{Role, Tier};

/// Current role/tier for a user, as the store knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub role: Role,
    pub tier: Option<Tier>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The store could not be reached or answered abnormally. Resolution
    /// fails closed on this.
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}

/// Lookup-by-id over the external user/role store.
///
/// Read-only from this core's perspective; no writes, no locks.
pub trait UserDirectory: Send + Sync {
    fn lookup(&self, user_id: UserId) -> Result<Option<UserRecord>, DirectoryError>;
}
