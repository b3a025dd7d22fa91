//! Business logic services.
//!
//! # Services
//!
//! - `addresses` - Address CRUD behind the ownership check, closest lookup
//! - `auth` - Username/password registration and login

pub mod addresses;
pub mod auth;

pub use addresses::{AddressAction, AddressError, AddressService};
pub use auth::{AuthError, AuthService};
