//! # IO Module
//!
//! The interface layer between clients and the domain logic.
//!
//! Translates HTTP requests into domain operations and formats domain
//! responses for clients. The communication protocol (REST over Axum),
//! serialization, and error translation all live here, keeping the boundary
//! between presentation and business logic clean.
//!
//! ## Supported Operations
//!
//! - **GET /api/injections**: Recent injection history
//! - **POST /api/injections**: Record an injection
//! - **GET /api/side-effects**: Recent side effect notes
//! - **POST /api/side-effects**: Record a side effect note
//! - **GET /api/analytics**: Chart series, markers, and summary numbers
//! - **POST /api/data/refresh**: Reload the record store, bypassing the cache

pub mod rest;

pub use rest::*;
