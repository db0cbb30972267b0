//! # Domain Module
//!
//! Business logic for the injection tracker.
//!
//! Everything here operates on the domain models and the record store; no
//! HTTP types or storage formats leak in. The REST layer maps public DTOs
//! onto these services and back.
//!
//! ## Module Organization
//!
//! - **injection_service**: Validating and recording injections, recent-history listing
//! - **side_effect_service**: Validating and recording side effect notes
//! - **analytics_service**: Weight/dosage series, trend fitting, and timeline markers
//! - **metrics**: Pure numeric routines (rolling average, least-squares fit, delta)
//! - **commands**: Internal command/query/result types passed between layers
//! - **models**: The injection and side effect domain entities
//!
//! ## Business Rules
//!
//! - Doses and weights cannot be negative; zero means "not recorded"
//! - Side effect notes require a description
//! - Dates submitted by forms must be ISO (YYYY-MM-DD); stored data is
//!   normalized more leniently by the storage layer
//! - Listings are newest first, with undated records kept at the end
//! - Records without a user tag are visible to every user

pub mod analytics_service;
pub mod commands;
pub mod injection_service;
pub mod metrics;
pub mod models;
pub mod side_effect_service;

pub use analytics_service::*;
pub use injection_service::*;
pub use side_effect_service::*;
