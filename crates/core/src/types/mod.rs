//! Core types for the roadmap planner.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod color;
pub mod id;
pub mod status;
pub mod text;

pub use color::{HexColor, PALETTE, assign_color};
pub use id::*;
pub use status::ProjectStatus;
pub use text::validate_text;
