//! # REST API Interface Layer
//!
//! HTTP endpoints for the injection tracker. This layer handles:
//! - Request/response serialization between JSON and DTOs
//! - Mapping DTOs onto domain commands and back
//! - Error translation from domain failures to HTTP status codes
//! - Request logging
//!
//! ## Design Principles
//!
//! - **Domain Separation**: Pure translation layer without business logic;
//!   validation failures come back from the services
//! - **Error Transparency**: Validation errors are returned verbatim so a
//!   form can show them
//! - **Degraded, Not Down**: Listing and analytics endpoints answer from the
//!   fallback source rather than failing, and carry `warnings` describing
//!   what was skipped

pub mod analytics_apis;
pub mod data_apis;
pub mod injection_apis;
pub mod mappers;
pub mod side_effect_apis;

pub use analytics_apis::*;
pub use data_apis::*;
pub use injection_apis::*;
pub use side_effect_apis::*;
