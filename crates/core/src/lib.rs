//! `markethub-core` — shared value types for the marketplace platform.
//!
//! This crate holds the leaves every other layer depends on: strongly-typed
//! identifiers and the `ServiceResult` envelope returned by every gated
//! operation. No IO, no framework types.

pub mod id;
pub mod result;

pub use id::UserId;
pub use result::{ErrorCode, ServiceResult};
