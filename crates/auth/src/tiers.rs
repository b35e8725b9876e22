//! Subscription tiers and the meet-or-exceed gating predicate.
//!
//! The same predicates serve two layers: UI capability gates (best-effort,
//! may run on a cached session) and the server-side authorization gate
//! (authoritative). Sharing one implementation keeps the layers from
//! silently diverging.

use serde::{Deserialize, Serialize};

/// Closed, totally ordered subscription levels: `basic < pro < business`.
///
/// The derived `Ord` follows declaration order and is the single source of
/// the tier ordering — no call site re-encodes it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Pro,
    Business,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Basic => "basic",
            Tier::Pro => "pro",
            Tier::Business => "business",
        }
    }
}

impl core::fmt::Display for Tier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Does `actual` meet or exceed `required`?
pub fn meets(required: Tier, actual: Tier) -> bool {
    actual >= required
}

/// Admit if the actual tier meets any of the enumerated floors.
///
/// Models "minimum tier required" lists that may carry several acceptable
/// floors; the empty list admits nobody.
pub fn meets_any(allowed: &[Tier], actual: Tier) -> bool {
    allowed.iter().any(|required| meets(*required, actual))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
