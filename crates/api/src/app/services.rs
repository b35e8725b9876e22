//! Service wiring: in-memory implementations of the external collaborators
//! (identity provider, user directory) and the listing catalog the gated
//! routes sit in front of.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use markethub_auth::{
    AuthConfig, DirectoryError, IdentityClaims, IdentityProvider, ProviderError, UserDirectory,
    UserRecord,
};
use markethub_core::{ErrorCode, ServiceResult, UserId};

/// Identity provider backed by a fixed token table.
///
/// Stands in for the external provider: a credential is an opaque key, the
/// claim is whatever was registered for it. Real deployments swap this for a
/// provider-backed implementation behind the same trait.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    tokens: HashMap<String, IdentityClaims>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a credential and the claim it vouches for.
    pub fn issue(&mut self, token: impl Into<String>, claims: IdentityClaims) {
        self.tokens.insert(token.into(), claims);
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    fn verify(
        &self,
        credential: &str,
        _now: DateTime<Utc>,
    ) -> Result<Option<IdentityClaims>, ProviderError> {
        Ok(self.tokens.get(credential).cloned())
    }
}

/// User directory backed by a fixed record table.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: HashMap<UserId, UserRecord>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: UserRecord) {
        self.users.insert(record.user_id, record);
    }

    pub fn all(&self) -> Vec<UserRecord> {
        let mut records: Vec<UserRecord> = self.users.values().cloned().collect();
        records.sort_by_key(|r| *r.user_id.as_uuid());
        records
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn lookup(&self, user_id: UserId) -> Result<Option<UserRecord>, DirectoryError> {
        Ok(self.users.get(&user_id).cloned())
    }
}

/// A marketplace listing (minimal read model for the gated routes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub owner: UserId,
    pub title: String,
    pub featured: bool,
}

/// In-memory listing catalog.
///
/// The business collaborator downstream of the gates; its outcomes use the
/// same `ServiceResult` envelope as the gates themselves.
#[derive(Debug, Default)]
pub struct ListingCatalog {
    listings: Mutex<Vec<Listing>>,
}

impl ListingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_for(&self, owner: UserId) -> ServiceResult<Vec<Listing>> {
        match self.listings.lock() {
            Ok(listings) => ServiceResult::ok(
                listings
                    .iter()
                    .filter(|l| l.owner == owner)
                    .cloned()
                    .collect(),
            ),
            Err(err) => poisoned(&err),
        }
    }

    pub fn get(&self, id: Uuid) -> ServiceResult<Listing> {
        match self.listings.lock() {
            Ok(listings) => match listings.iter().find(|l| l.id == id) {
                Some(listing) => ServiceResult::ok(listing.clone()),
                None => ServiceResult::fail(ErrorCode::NotFound, "Listing not found"),
            },
            Err(err) => poisoned(&err),
        }
    }

    pub fn create(&self, owner: UserId, title: String, featured: bool) -> ServiceResult<Listing> {
        if title.trim().is_empty() {
            return ServiceResult::fail(ErrorCode::Validation, "Listing title must not be empty");
        }

        let listing = Listing {
            id: Uuid::now_v7(),
            owner,
            title,
            featured,
        };

        match self.listings.lock() {
            Ok(mut listings) => {
                listings.push(listing.clone());
                ServiceResult::ok(listing)
            }
            Err(err) => poisoned(&err),
        }
    }
}

fn poisoned<T>(err: &dyn core::fmt::Display) -> ServiceResult<T> {
    tracing::error!(error = %err, "listing catalog lock poisoned");
    ServiceResult::fail(ErrorCode::Unknown, "Internal error")
}

/// Everything the routers need, wired once at startup.
pub struct AppServices {
    pub provider: Arc<InMemoryIdentityProvider>,
    pub directory: Arc<InMemoryUserDirectory>,
    pub catalog: ListingCatalog,
    pub config: Arc<AuthConfig>,
}

impl AppServices {
    pub fn new(
        provider: InMemoryIdentityProvider,
        directory: InMemoryUserDirectory,
        config: AuthConfig,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            directory: Arc::new(directory),
            catalog: ListingCatalog::new(),
            config: Arc::new(config),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
