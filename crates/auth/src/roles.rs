//! Role model and the pure role-membership predicates.

use serde::{Deserialize, Serialize};

/// Closed set of user categories governing coarse-grained access.
///
/// The trades marketplace uses all four; the sticker store uses the
/// `{Customer, Admin}` subset. There is no hierarchy among peers — an
/// operation declares the exact set it allows — except the explicit
/// admin-superset rule in [`satisfies`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Tradesperson,
    BusinessOwner,
    Admin,
}

/// Roles permitted to offer services on the marketplace.
pub const SERVICE_ROLES: [Role; 3] = [Role::Tradesperson, Role::BusinessOwner, Role::Admin];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Tradesperson => "tradesperson",
            Role::BusinessOwner => "business_owner",
            Role::Admin => "admin",
        }
    }

    /// Dashboard root a denied caller of this role is sent back to.
    ///
    /// These targets are part of the page-boundary contract; the closed role
    /// set keeps them constants rather than configuration.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Customer => "/dashboard",
            Role::Tradesperson => "/dashboard/tradesperson",
            Role::BusinessOwner => "/dashboard/business",
            Role::Admin => "/admin",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pure set-membership check: does `role` appear in `allowed`?
///
/// Total over every role/set pair; the empty set denies everyone. Admin gets
/// no special treatment here — `require_any_role` call sites must list
/// `Role::Admin` explicitly if they intend to admit admins.
pub fn can_access(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}

/// Single-role requirement with the named admin-superset rule:
/// admin satisfies any single required role.
///
/// This rule is deliberately kept out of [`can_access`] so that any-of-roles
/// call sites never admit admins they did not list.
pub fn satisfies(role: Role, required: Role) -> bool {
    role == required || role == Role::Admin
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
