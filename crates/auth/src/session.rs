//! Session resolution.
//!
//! A [`Session`] is the authoritative proof of caller identity for exactly one
//! request. Resolvers own the per-request memo: the first authoritative
//! resolution consults the identity provider, every later guard check in the
//! same request reuses that value, so one request can never observe two
//! identities.
//!
//! Two statically-selected resolver implementations share the
//! [`ResolveSession`] interface: [`ClaimResolver`] trusts the verified claim
//! as-is (usable in constrained runtimes with no store access) and
//! [`DirectoryResolver`] refreshes role/tier from the user directory.

use std::sync::Arc;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use markethub_core::UserId;

use crate::claims::{IdentityClaims, validate_claims};
use crate::config::AuthConfig;
use crate::directory::UserDirectory;
use crate::{Role, Tier};

/// Resolved identity for the current request.
///
/// Immutable once resolved; reused for every subsequent guard check in the
/// request; never persisted; discarded at request end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub role: Role,
    pub tier: Option<Tier>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Transport-level fault worth a bounded retry.
    #[error("transient identity provider fault: {0}")]
    Transient(String),

    /// Non-retryable provider fault. Resolution fails closed.
    #[error("identity provider fault: {0}")]
    Fault(String),
}

/// External identity provider: verify an opaque credential and return the
/// identity claim it vouches for, or `None` for an unknown/invalid credential.
///
/// Signature verification and token issuance live behind this trait; this
/// core only consumes the verdict.
pub trait IdentityProvider: Send + Sync {
    fn verify(
        &self,
        credential: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<IdentityClaims>, ProviderError>;
}

/// Per-request session resolution with two strengths.
///
/// `resolve` is the authoritative path and is required before any guard
/// decision that grants access to protected data or mutation. `cached` is the
/// optimistic path for render decisions only — a guard that gates a
/// state-changing or data-revealing operation solely on `cached` is unsafe.
pub trait ResolveSession: Send + Sync {
    /// Authoritative resolution. The first call verifies the credential and
    /// memoizes the outcome; later calls return the identical value without
    /// re-invoking the provider. Missing, expired, or invalid credentials
    /// yield `None` — never a fault a caller could misread as allowed.
    fn resolve(&self) -> Option<Session>;

    /// Optimistic resolution: the already-memoized session, if this request
    /// has resolved one. Never contacts the provider.
    fn cached(&self) -> Option<Session>;
}

/// Verify the credential against the provider, retrying bounded transient
/// faults, then validate the claim time window. Every failure path lands on
/// `None`.
fn verify_credential(
    provider: &dyn IdentityProvider,
    credential: Option<&str>,
    retries: u8,
) -> Option<IdentityClaims> {
    let credential = credential?;
    let now = Utc::now();

    let mut attempts: u8 = 0;
    loop {
        match provider.verify(credential, now) {
            Ok(Some(claims)) => {
                return match validate_claims(&claims, now) {
                    Ok(()) => Some(claims),
                    Err(err) => {
                        tracing::debug!(error = %err, "credential claims rejected");
                        None
                    }
                };
            }
            Ok(None) => {
                tracing::debug!("credential not recognized by identity provider");
                return None;
            }
            Err(ProviderError::Transient(msg)) if attempts < retries => {
                attempts += 1;
                tracing::debug!(
                    attempt = attempts,
                    error = %msg,
                    "transient identity provider fault, retrying"
                );
            }
            Err(err) => {
                tracing::warn!(error = %err, "identity provider failed, resolving absent");
                return None;
            }
        }
    }
}

/// Edge-safe resolver: trusts the role/tier embedded in the verified claim.
///
/// No store access, so usable in constrained runtimes; the trade-off is that
/// a role change only takes effect once the credential is re-issued.
pub struct ClaimResolver {
    provider: Arc<dyn IdentityProvider>,
    credential: Option<String>,
    retries: u8,
    memo: OnceLock<Option<Session>>,
}

impl ClaimResolver {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        credential: Option<String>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            provider,
            credential,
            retries: config.transient_retries,
            memo: OnceLock::new(),
        }
    }
}

impl ResolveSession for ClaimResolver {
    fn resolve(&self) -> Option<Session> {
        self.memo
            .get_or_init(|| {
                let claims =
                    verify_credential(&*self.provider, self.credential.as_deref(), self.retries)?;
                Some(Session {
                    user_id: claims.sub,
                    role: claims.role,
                    tier: claims.tier,
                })
            })
            .clone()
    }

    fn cached(&self) -> Option<Session> {
        self.memo.get().cloned().flatten()
    }
}

/// Full resolver: verifies the claim, then refreshes role/tier from the user
/// directory so directory-side changes apply without credential re-issue.
///
/// A directory fault or missing record fails closed to Absent.
pub struct DirectoryResolver {
    provider: Arc<dyn IdentityProvider>,
    directory: Arc<dyn UserDirectory>,
    credential: Option<String>,
    retries: u8,
    memo: OnceLock<Option<Session>>,
}

impl DirectoryResolver {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        directory: Arc<dyn UserDirectory>,
        credential: Option<String>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            provider,
            directory,
            credential,
            retries: config.transient_retries,
            memo: OnceLock::new(),
        }
    }
}

impl ResolveSession for DirectoryResolver {
    fn resolve(&self) -> Option<Session> {
        self.memo
            .get_or_init(|| {
                let claims =
                    verify_credential(&*self.provider, self.credential.as_deref(), self.retries)?;

                match self.directory.lookup(claims.sub) {
                    Ok(Some(record)) => Some(Session {
                        user_id: record.user_id,
                        role: record.role,
                        tier: record.tier,
                    }),
                    Ok(None) => {
                        tracing::debug!(user_id = %claims.sub, "verified claim for unknown user");
                        None
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "user directory lookup failed, resolving absent");
                        None
                    }
                }
            })
            .clone()
    }

    fn cached(&self) -> Option<Session> {
        self.memo.get().cloned().flatten()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
