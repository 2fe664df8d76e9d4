//! # API Shared
//!
//! Shared definitions for the FitNest APIs.
//!
//! Contains:
//! - Request/response types (`types` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
