//! Geopin Core - Shared types and geographic helpers.
//!
//! This crate provides the pieces used across all Geopin components:
//! - `server` - JSON API for per-user saved addresses
//! - `cli` - Command-line tools for migrations and user management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and usernames
//! - [`geo`] - Coordinate validation and great-circle distance

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod geo;
pub mod types;

pub use geo::{CoordinateError, Coordinates};
pub use types::*;
