//! Composite gates: route/action-level authorization built from the session
//! resolver and the pure role/tier predicates.
//!
//! Every gate resolves the session authoritatively, decides, and returns the
//! decision as a value. The boundary chooses the side effect: page handlers
//! turn a [`GateDenial`] into a redirect, API handlers turn it into the
//! `ServiceResult` envelope. Gates never raise and never default-allow.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use markethub_core::{ErrorCode, ServiceResult, UserId};

use crate::config::AuthConfig;
use crate::roles::{Role, can_access, satisfies};
use crate::session::{ResolveSession, Session};
use crate::tiers::{Tier, meets_any};

/// A gate's denial, carrying enough context for either boundary translation
/// and nothing a caller should not learn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDenial {
    /// No authoritative session could be resolved.
    Unauthenticated,

    /// A session exists but its role/tier does not satisfy the requirement.
    /// Carries the caller's role so the page boundary can pick their
    /// dashboard root.
    Forbidden { role: Option<Role> },
}

impl GateDenial {
    /// Page-boundary translation: the fixed route the caller is sent to.
    ///
    /// Unauthenticated callers go to login; forbidden callers go back to
    /// their role's dashboard root (generic root when the role is unknown).
    /// Nothing about *why* leaks beyond the target itself.
    pub fn redirect_target(&self, config: &AuthConfig) -> String {
        match self {
            GateDenial::Unauthenticated => config.login_route.clone(),
            GateDenial::Forbidden { role: Some(role) } => role.dashboard_path().to_string(),
            GateDenial::Forbidden { role: None } => config.dashboard_route.clone(),
        }
    }

    /// API-boundary translation: the envelope failure, no redirect.
    pub fn into_service_result<T>(self) -> ServiceResult<T> {
        match self {
            GateDenial::Unauthenticated => {
                ServiceResult::fail(ErrorCode::Unauthenticated, "Not authenticated")
            }
            GateDenial::Forbidden { .. } => ServiceResult::fail(ErrorCode::Forbidden, "Access denied"),
        }
    }
}

/// Admit any authenticated caller.
pub fn require_session(resolver: &dyn ResolveSession) -> Result<Session, GateDenial> {
    match resolver.resolve() {
        Some(session) => Ok(session),
        None => {
            tracing::debug!("gate denied: no session");
            Err(GateDenial::Unauthenticated)
        }
    }
}

/// Admit callers holding `required` — or an admin, per the named
/// admin-superset rule for single-role requirements.
pub fn require_role(resolver: &dyn ResolveSession, required: Role) -> Result<Session, GateDenial> {
    let session = require_session(resolver)?;
    if satisfies(session.role, required) {
        Ok(session)
    } else {
        tracing::debug!(role = %session.role, required = %required, "gate denied: role");
        Err(GateDenial::Forbidden {
            role: Some(session.role),
        })
    }
}

/// Admit callers whose role appears in `allowed`.
///
/// Exact membership: admins are **not** implicitly admitted — list
/// `Role::Admin` explicitly if intended. This asymmetry with [`require_role`]
/// is deliberate and load-bearing for existing call sites.
pub fn require_any_role(
    resolver: &dyn ResolveSession,
    allowed: &[Role],
) -> Result<Session, GateDenial> {
    let session = require_session(resolver)?;
    if can_access(session.role, allowed) {
        Ok(session)
    } else {
        tracing::debug!(role = %session.role, "gate denied: role not in allowed set");
        Err(GateDenial::Forbidden {
            role: Some(session.role),
        })
    }
}

/// Admit callers whose subscription tier meets any of the enumerated floors.
///
/// This is the authoritative layer of the tier gate; the UI capability layer
/// uses the same `meets`/`meets_any` predicates on a cached session. A
/// session without a tier is denied.
pub fn require_tier(resolver: &dyn ResolveSession, allowed: &[Tier]) -> Result<Session, GateDenial> {
    let session = require_session(resolver)?;
    let admitted = match session.tier {
        Some(tier) => meets_any(allowed, tier),
        None => false,
    };
    if admitted {
        Ok(session)
    } else {
        tracing::debug!(tier = ?session.tier, "gate denied: tier below required floor");
        Err(GateDenial::Forbidden {
            role: Some(session.role),
        })
    }
}

/// Outcome of the narrow "is this caller an admin" composition.
///
/// Wire shape (a compatibility contract): granted is
/// `{"success":true,"userId":<id>}`, denied is
/// `{"success":false,"error":<msg>,"status":401|403}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCheck {
    Granted { user_id: UserId },
    Denied { error: String, status: u16 },
}

impl AdminCheck {
    pub fn is_granted(&self) -> bool {
        matches!(self, AdminCheck::Granted { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            AdminCheck::Granted { .. } => 200,
            AdminCheck::Denied { status, .. } => *status,
        }
    }
}

impl Serialize for AdminCheck {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AdminCheck::Granted { user_id } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("userId", user_id)?;
                map.end()
            }
            AdminCheck::Denied { error, status } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.serialize_entry("status", status)?;
                map.end()
            }
        }
    }
}

/// Optimized admin gate: trusts the role embedded in the resolved session,
/// skipping a directory round-trip.
///
/// Known staleness window: a role revocation only takes effect when the
/// session is re-resolved/re-issued. Acceptable for this gate's latency
/// goals; pair with [`DirectoryResolver`](crate::session::DirectoryResolver)
/// where that window is not.
pub fn require_admin(resolver: &dyn ResolveSession) -> AdminCheck {
    match resolver.resolve() {
        None => AdminCheck::Denied {
            error: "Not authenticated".to_string(),
            status: 401,
        },
        Some(session) if session.role == Role::Admin => AdminCheck::Granted {
            user_id: session.user_id,
        },
        Some(session) => {
            tracing::debug!(role = %session.role, "admin gate denied");
            AdminCheck::Denied {
                error: "Unauthorized. Admin access required.".to_string(),
                status: 403,
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::roles::SERVICE_ROLES;

    /// Resolver stub with a pre-resolved outcome.
    struct FixedResolver(Option<Session>);

    impl ResolveSession for FixedResolver {
        fn resolve(&self) -> Option<Session> {
            self.0.clone()
        }

        fn cached(&self) -> Option<Session> {
            self.0.clone()
        }
    }

    fn session(role: Role, tier: Option<Tier>) -> Session {
        Session {
            user_id: UserId::new(),
            role,
            tier,
        }
    }

    fn resolver(session: Session) -> FixedResolver {
        FixedResolver(Some(session))
    }

    fn absent() -> FixedResolver {
        FixedResolver(None)
    }

    #[test]
    fn require_session_denies_absent_as_unauthenticated() {
        let denial = require_session(&absent()).unwrap_err();
        assert_eq!(denial, GateDenial::Unauthenticated);
        assert_eq!(denial.redirect_target(&AuthConfig::default()), "/login");

        let envelope: ServiceResult<()> = denial.into_service_result();
        assert_eq!(envelope.status(), 401);
        assert_eq!(envelope.code(), Some(ErrorCode::Unauthenticated));
    }

    #[test]
    fn require_role_admits_exact_role() {
        let resolved = resolver(session(Role::Tradesperson, None));
        let session = require_role(&resolved, Role::Tradesperson).unwrap();
        assert_eq!(session.role, Role::Tradesperson);
    }

    #[test]
    fn require_role_admits_admin_for_any_single_role() {
        let resolved = resolver(session(Role::Admin, None));
        assert!(require_role(&resolved, Role::Customer).is_ok());
        assert!(require_role(&resolved, Role::BusinessOwner).is_ok());
    }

    #[test]
    fn require_any_role_does_not_admit_unlisted_admin() {
        let resolved = resolver(session(Role::Admin, None));
        let denial =
            require_any_role(&resolved, &[Role::Tradesperson, Role::BusinessOwner]).unwrap_err();
        assert_eq!(
            denial,
            GateDenial::Forbidden {
                role: Some(Role::Admin)
            }
        );
    }

    #[test]
    fn customer_denied_from_service_roles_redirects_to_dashboard() {
        // Scenario: role=customer, allowed={tradesperson, business_owner, admin}.
        let resolved = resolver(session(Role::Customer, None));
        let denial = require_any_role(&resolved, &SERVICE_ROLES).unwrap_err();

        assert_eq!(denial.redirect_target(&AuthConfig::default()), "/dashboard");
    }

    #[test]
    fn forbidden_api_denial_is_403_envelope() {
        let resolved = resolver(session(Role::Customer, None));
        let denial = require_any_role(&resolved, &SERVICE_ROLES).unwrap_err();

        let envelope: ServiceResult<()> = denial.into_service_result();
        assert_eq!(envelope.status(), 403);
        assert_eq!(envelope.code(), Some(ErrorCode::Forbidden));
        assert!(envelope.error().is_some_and(|e| !e.is_empty()));
    }

    #[test]
    fn pro_tier_meets_pro_or_business_floor() {
        // Scenario: tier=pro, allowed floors ["pro", "business"].
        let resolved = resolver(session(Role::Customer, Some(Tier::Pro)));
        assert!(require_tier(&resolved, &[Tier::Pro, Tier::Business]).is_ok());
    }

    #[test]
    fn basic_tier_denied_by_pro_floor() {
        let resolved = resolver(session(Role::Customer, Some(Tier::Basic)));
        let denial = require_tier(&resolved, &[Tier::Pro, Tier::Business]).unwrap_err();
        assert_eq!(
            denial,
            GateDenial::Forbidden {
                role: Some(Role::Customer)
            }
        );
    }

    #[test]
    fn missing_tier_fails_closed() {
        let resolved = resolver(session(Role::Tradesperson, None));
        assert!(require_tier(&resolved, &[Tier::Basic]).is_err());
    }

    #[test]
    fn admin_gate_without_session_is_401() {
        let check = require_admin(&absent());
        assert_eq!(
            check,
            AdminCheck::Denied {
                error: "Not authenticated".to_string(),
                status: 401,
            }
        );
        assert_eq!(
            serde_json::to_value(&check).unwrap(),
            json!({"success": false, "error": "Not authenticated", "status": 401})
        );
    }

    #[test]
    fn admin_gate_denies_customer_with_403() {
        let resolved = resolver(session(Role::Customer, None));
        let check = require_admin(&resolved);
        assert_eq!(check.status(), 403);
        assert_eq!(
            serde_json::to_value(&check).unwrap(),
            json!({
                "success": false,
                "error": "Unauthorized. Admin access required.",
                "status": 403,
            })
        );
    }

    #[test]
    fn admin_gate_grants_admin_with_user_id() {
        let admin = session(Role::Admin, None);
        let user_id = admin.user_id;
        let check = require_admin(&resolver(admin));

        assert!(check.is_granted());
        assert_eq!(check.status(), 200);
        assert_eq!(
            serde_json::to_value(&check).unwrap(),
            json!({"success": true, "userId": user_id.to_string()})
        );
    }

    #[test]
    fn forbidden_redirects_use_role_dashboard_root() {
        let config = AuthConfig::default();
        let forbidden = |role| GateDenial::Forbidden { role: Some(role) };

        assert_eq!(forbidden(Role::Customer).redirect_target(&config), "/dashboard");
        assert_eq!(
            forbidden(Role::Tradesperson).redirect_target(&config),
            "/dashboard/tradesperson"
        );
        assert_eq!(
            forbidden(Role::BusinessOwner).redirect_target(&config),
            "/dashboard/business"
        );
        assert_eq!(forbidden(Role::Admin).redirect_target(&config), "/admin");
        assert_eq!(
            GateDenial::Forbidden { role: None }.redirect_target(&config),
            "/dashboard"
        );
    }
}
