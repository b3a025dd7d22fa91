//! Username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// The input string is empty.
    #[error("username cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input has leading or trailing whitespace.
    #[error("username cannot start or end with whitespace")]
    SurroundingWhitespace,
}

/// A login name.
///
/// ## Constraints
///
/// - Length: 1-20 characters (matches the `VARCHAR(20)` column)
/// - No leading or trailing whitespace
///
/// ## Examples
///
/// ```
/// use geopin_core::Username;
///
/// assert!(Username::parse("alice").is_ok());
/// assert!(Username::parse("").is_err());
/// assert!(Username::parse(" alice").is_err());
/// assert!(Username::parse("a-name-that-is-far-too-long").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Maximum length of a username, in characters.
    pub const MAX_LENGTH: usize = 20;

    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 20 characters,
    /// or padded with whitespace.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        if s.is_empty() {
            return Err(UsernameError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.trim() != s {
            return Err(UsernameError::SurroundingWhitespace);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_usernames() {
        assert!(Username::parse("a").is_ok());
        assert!(Username::parse("alice_smith").is_ok());
        assert!(Username::parse(&"x".repeat(20)).is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Username::parse(""), Err(UsernameError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        assert_eq!(
            Username::parse(&"x".repeat(21)),
            Err(UsernameError::TooLong { max: 20 })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 20 two-byte characters is still 20 characters
        assert!(Username::parse(&"é".repeat(20)).is_ok());
    }

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(
            Username::parse("bob "),
            Err(UsernameError::SurroundingWhitespace)
        );
    }

    #[test]
    fn test_from_str_and_display() {
        let name: Username = "carol".parse().unwrap();
        assert_eq!(name.to_string(), "carol");
        assert_eq!(name.as_ref(), "carol");
    }
}
