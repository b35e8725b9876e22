//! `ServiceResult` — the uniform success/failure envelope for gated operations.
//!
//! Every gated operation in the platform returns this envelope rather than
//! raising: expected failure modes (auth, validation, not-found) are values.
//! The serialized field names (`success`, `data`, `error`, `code`, `status`)
//! are a wire contract shared with existing callers and must not change.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Closed failure taxonomy for the service boundary.
///
/// No operation may surface an error outside these five kinds; anything
/// unexpected is remapped to [`ErrorCode::Unknown`] at the nearest boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Unauthenticated,
    Forbidden,
    Validation,
    NotFound,
    Unknown,
}

impl ErrorCode {
    /// Conventional HTTP status for this code, used when the caller does not
    /// supply an explicit override.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorCode::Unauthenticated => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::Validation => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::Unknown => 500,
        }
    }

    /// Fallback message guaranteeing the non-empty `error` invariant.
    pub fn canonical_message(self) -> &'static str {
        match self {
            ErrorCode::Unauthenticated => "Not authenticated",
            ErrorCode::Forbidden => "Forbidden",
            ErrorCode::Validation => "Validation failed",
            ErrorCode::NotFound => "Not found",
            ErrorCode::Unknown => "Internal error",
        }
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::Validation => "VALIDATION",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Discriminated outcome of a gated operation.
///
/// Exactly one variant is populated; a failure always carries a non-empty
/// `error` and a recognized `code`. Construct via [`ServiceResult::ok`] and
/// [`ServiceResult::fail`] so those invariants hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceResult<T> {
    Success {
        data: T,
    },
    Failure {
        error: String,
        code: ErrorCode,
        /// Explicit transport status override; `None` means "use the
        /// conventional map for `code`".
        status: Option<u16>,
    },
}

impl<T> ServiceResult<T> {
    /// Successful outcome carrying `data`.
    pub fn ok(data: T) -> Self {
        ServiceResult::Success { data }
    }

    /// Failed outcome with the conventional status for `code`.
    ///
    /// An empty message is replaced by the code's canonical message so the
    /// non-empty `error` invariant holds unconditionally.
    pub fn fail(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let error = if message.is_empty() {
            code.canonical_message().to_string()
        } else {
            message
        };
        ServiceResult::Failure {
            error,
            code,
            status: None,
        }
    }

    /// Failed outcome with an explicit transport status.
    pub fn fail_with_status(code: ErrorCode, message: impl Into<String>, status: u16) -> Self {
        let message = message.into();
        let error = if message.is_empty() {
            code.canonical_message().to_string()
        } else {
            message
        };
        ServiceResult::Failure {
            error,
            code,
            status: Some(status),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ServiceResult::Success { .. })
    }

    /// Effective transport status: 200 on success, otherwise the explicit
    /// override or the conventional map for the code.
    pub fn status(&self) -> u16 {
        match self {
            ServiceResult::Success { .. } => 200,
            ServiceResult::Failure { code, status, .. } => status.unwrap_or(code.http_status()),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ServiceResult::Success { data } => Some(data),
            ServiceResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ServiceResult::Success { .. } => None,
            ServiceResult::Failure { error, .. } => Some(error),
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ServiceResult::Success { .. } => None,
            ServiceResult::Failure { code, .. } => Some(*code),
        }
    }

    /// Map the success payload, leaving failures untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ServiceResult<U> {
        match self {
            ServiceResult::Success { data } => ServiceResult::Success { data: f(data) },
            ServiceResult::Failure {
                error,
                code,
                status,
            } => ServiceResult::Failure {
                error,
                code,
                status,
            },
        }
    }
}

impl<T: Serialize> Serialize for ServiceResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ServiceResult::Success { data } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
                map.end()
            }
            ServiceResult::Failure { error, code, .. } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.serialize_entry("code", code)?;
                map.serialize_entry("status", &self.status())?;
                map.end()
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

    #[test]
    fn ok_serializes_without_error_field() {
        let result = ServiceResult::ok(json!({"id": 7}));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, json!({"success": true, "data": {"id": 7}}));
        assert!(result.is_success());
        assert_eq!(result.status(), 200);
        assert!(result.error().is_none());
    }

    #[test]
    fn fail_carries_code_and_conventional_status() {
        let result: ServiceResult<()> = ServiceResult::fail(ErrorCode::Forbidden, "no access");

        assert!(!result.is_success());
        assert_eq!(result.status(), 403);
        assert_eq!(result.error(), Some("no access"));
        assert_eq!(result.code(), Some(ErrorCode::Forbidden));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "error": "no access",
                "code": "FORBIDDEN",
                "status": 403,
            })
        );
    }

    #[test]
    fn explicit_status_overrides_convention() {
        let result: ServiceResult<()> =
            ServiceResult::fail_with_status(ErrorCode::Validation, "stale version", 409);
        assert_eq!(result.status(), 409);
    }

    #[test]
    fn empty_message_falls_back_to_canonical() {
        let result: ServiceResult<()> = ServiceResult::fail(ErrorCode::Unauthenticated, "");
        assert_eq!(result.error(), Some("Not authenticated"));
    }

    #[test]
    fn status_convention_is_exhaustive() {
        assert_eq!(ErrorCode::Unauthenticated.http_status(), 401);
        assert_eq!(ErrorCode::Forbidden.http_status(), 403);
        assert_eq!(ErrorCode::Validation.http_status(), 400);
        assert_eq!(ErrorCode::NotFound.http_status(), 404);
        assert_eq!(ErrorCode::Unknown.http_status(), 500);
    }

    #[test]
    fn code_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_value(ErrorCode::NotFound).unwrap(),
            json!("NOT_FOUND")
        );
        assert_eq!(
            serde_json::to_value(ErrorCode::Unauthenticated).unwrap(),
            json!("UNAUTHENTICATED")
        );
    }

    #[test]
    fn map_preserves_failure() {
        let result: ServiceResult<u32> = ServiceResult::fail(ErrorCode::NotFound, "gone");
        let mapped = result.map(|n| n.to_string());
        assert_eq!(mapped.status(), 404);
        assert_eq!(mapped.error(), Some("gone"));
    }
}
