//! Domain models for the server.
//!
//! Plain value types built by the repositories from database rows. They carry
//! no behaviour beyond conversions for the JSON layer.

pub mod address;
pub mod session;
pub mod user;

pub use address::Address;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
