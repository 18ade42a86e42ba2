//! Roadmap Core - Shared types library.
//!
//! This crate provides the domain types used across all roadmap components:
//! - `server` - HTTP API over the flat-file data directory
//! - `cli` - Command-line tools for migrations and maintenance
//!
//! # Architecture
//!
//! The core crate contains only types, validation, and pure helpers - no I/O,
//! no file access, no HTTP. Everything here can be tested without a data
//! directory.
//!
//! # Modules
//!
//! - [`types`] - Typed ids, HEX colors, project status, text bounds
//! - [`model`] - Entity records and their validators
//! - [`ordering`] - Dense display order for product lines
//! - [`error`] - Validation error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod model;
pub mod ordering;
pub mod types;

pub use error::ValidationError;
pub use model::*;
pub use types::*;

#[doc(hidden)]
pub use uuid;

/// Current time as epoch milliseconds, the timestamp unit stored on disk.
#[must_use]
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
