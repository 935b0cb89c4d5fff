//! Session token type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`SessionToken`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Nothing left after trimming whitespace and quotes.
    #[error("session token is empty")]
    Empty,
    /// Whitespace inside the token; it could never be sent as a bearer header.
    #[error("session token contains whitespace")]
    Whitespace,
}

/// Opaque credential issued by the CMS backend.
///
/// Older clients persisted the token JSON-encoded, so a value wrapped in
/// double quotes is accepted and unwrapped. The literal [`SessionToken::DEMO`]
/// value is a sentinel meaning "no real session, serve fixture data".
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Sentinel value marking a demo session.
    pub const DEMO: &'static str = "demo-token";

    /// Parse a token, unwrapping one level of JSON quoting.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] when the token is empty or contains whitespace.
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let trimmed = raw.trim();
        let unquoted = trimmed
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(trimmed)
            .trim();

        if unquoted.is_empty() {
            return Err(TokenError::Empty);
        }
        if unquoted.chars().any(char::is_whitespace) {
            return Err(TokenError::Whitespace);
        }
        Ok(Self(unquoted.to_owned()))
    }

    /// The demo sentinel token.
    #[must_use]
    pub fn demo() -> Self {
        Self(Self::DEMO.to_owned())
    }

    /// Whether this is the demo sentinel.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.0 == Self::DEMO
    }

    /// The raw token, for the `Authorization` header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_demo() {
            f.write_str("SessionToken(demo)")
        } else {
            f.write_str("SessionToken([REDACTED])")
        }
    }
}
