//! `markethub-auth` — authorization and session-gating core (zero-trust).
//!
//! Shared by both marketplace applications. This crate is intentionally
//! decoupled from HTTP and storage: it resolves who the caller is, decides
//! whether they may act, and hands the decision to the boundary in a form
//! the boundary can translate (redirect at page boundaries, `ServiceResult`
//! envelope at API boundaries). Every unresolved or ambiguous state denies.

pub mod claims;
pub mod config;
pub mod directory;
pub mod gates;
pub mod roles;
pub mod session;
pub mod tiers;

pub use claims::{IdentityClaims, TokenValidationError, validate_claims};
pub use config::AuthConfig;
pub use directory::{DirectoryError, UserDirectory, UserRecord};
pub use gates::{
    AdminCheck, GateDenial, require_admin, require_any_role, require_role, require_session,
    require_tier,
};
pub use roles::{Role, SERVICE_ROLES, can_access, satisfies};
pub use session::{
    ClaimResolver, DirectoryResolver, IdentityProvider, ProviderError, ResolveSession, Session,
};
pub use tiers::{Tier, meets, meets_any};
