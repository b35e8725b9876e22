//! HTTP boundary for the marketplace platform.
//!
//! Both boundary styles the auth core serves live here: page routes translate
//! gate denials into redirects, API routes translate them into the
//! `ServiceResult` wire envelope.

pub mod app;
pub mod middleware;
