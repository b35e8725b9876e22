//! Auth configuration.
//!
//! The original applications kept a module-scoped auth singleton; here the
//! configuration is an explicit struct built once at process start and passed
//! by reference into resolver construction and redirect mapping, so tests can
//! substitute their own.

/// Process-wide authorization configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Where unauthenticated callers are sent at page boundaries.
    pub login_route: String,

    /// Generic dashboard root used when a forbidden caller's role has no
    /// more specific home.
    pub dashboard_route: String,

    /// Bounded retries applied inside session resolution to transient
    /// identity-provider faults. Exhaustion resolves Absent, never an
    /// assumed-valid session.
    pub transient_retries: u8,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_route: "/login".to_string(),
            dashboard_route: "/dashboard".to_string(),
            transient_retries: 2,
        }
    }
}
