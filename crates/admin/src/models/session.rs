//! Session-related types for staff authentication.
//!
//! Types stored in the session for authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cms_admin_core::{Email, SessionToken, UserRole};

/// Profile of the signed-in staff member, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Backend id; empty when the backend did not send one.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: UserRole,
}

impl SessionUser {
    /// Fallback profile built from the email used to sign in.
    ///
    /// The name is the local part of a valid address, otherwise the raw text.
    #[must_use]
    pub fn from_email(email: &str) -> Self {
        let name = Email::parse(email)
            .map_or_else(|_| email.to_string(), |parsed| parsed.local_part().to_string());
        Self {
            id: String::new(),
            name,
            email: email.to_string(),
            role: UserRole::default(),
        }
    }
}

/// Whether the backend vouched for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verification {
    /// The backend issued a token.
    Verified,
    /// The login exchange succeeded but no token was issued.
    Unverified,
}

/// Where page data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Backend API, authorised by the session token.
    Live,
    /// Built-in fixtures; nothing is sent to the backend.
    Demo,
}

/// Credential half of a session, stored apart from the user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCredential {
    /// Backend credential (or the demo sentinel).
    pub token: SessionToken,
    /// Whether the backend issued the token.
    pub verification: Verification,
    /// When the session started.
    pub signed_in_at: DateTime<Utc>,
}

/// Signed-in staff identity: a credential plus the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    /// Backend credential (or the demo sentinel).
    pub token: SessionToken,
    /// Profile of the signed-in user.
    pub user: SessionUser,
    /// Whether the backend issued the token.
    pub verification: Verification,
    /// When the session started.
    pub signed_in_at: DateTime<Utc>,
}

impl AdminSession {
    /// A verified session for a backend-issued token.
    #[must_use]
    pub fn verified(token: SessionToken, user: SessionUser) -> Self {
        Self {
            token,
            user,
            verification: Verification::Verified,
            signed_in_at: Utc::now(),
        }
    }

    /// A demo session using the sentinel token.
    #[must_use]
    pub fn demo(user: SessionUser) -> Self {
        Self::verified(SessionToken::demo(), user)
    }

    /// An unverified session; always served fixture data.
    #[must_use]
    pub fn unverified(token: SessionToken, user: SessionUser) -> Self {
        Self {
            verification: Verification::Unverified,
            ..Self::verified(token, user)
        }
    }

    /// Join the two halves read back from the session.
    #[must_use]
    pub fn from_parts(credential: SessionCredential, user: SessionUser) -> Self {
        Self {
            token: credential.token,
            user,
            verification: credential.verification,
            signed_in_at: credential.signed_in_at,
        }
    }

    /// The credential half, for storage.
    #[must_use]
    pub fn credential(&self) -> SessionCredential {
        SessionCredential {
            token: self.token.clone(),
            verification: self.verification,
            signed_in_at: self.signed_in_at,
        }
    }

    /// Demo when the token is the sentinel or the session is unverified.
    #[must_use]
    pub fn mode(&self) -> DataMode {
        if self.token.is_demo() || self.verification == Verification::Unverified {
            DataMode::Demo
        } else {
            DataMode::Live
        }
    }

    /// Short label for the session banner.
    #[must_use]
    pub fn mode_label(&self) -> &'static str {
        match (self.verification, self.mode()) {
            (Verification::Unverified, _) => "unverified",
            (_, DataMode::Demo) => "demo",
            (_, DataMode::Live) => "live",
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for the session credential.
    pub const TOKEN: &str = "admin_token";

    /// Key for the signed-in user profile.
    pub const USER: &str = "admin_user";

    /// Key for the pending flash toast.
    pub const TOAST: &str = "toast";
}
