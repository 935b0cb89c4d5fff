//! Extraction of the session token and user profile from login responses.
//!
//! Login responses are not uniform across backend versions. The token may be
//! named `token`, `accessToken`, `access_token`, `authToken`, `jwt` or
//! `idToken`, at the top level or nested under `data`; the profile may be
//! under `user`, `data.user`, `admin` or be `data` itself.

use serde_json::Value;

use cms_admin_core::{SessionToken, UserRole};

use crate::models::SessionUser;

/// Token field names, in lookup order.
pub const TOKEN_KEYS: &[&str] = &[
    "token",
    "accessToken",
    "access_token",
    "authToken",
    "jwt",
    "idToken",
];

/// What a login or token-generation response yielded.
#[derive(Debug, Clone, Default)]
pub struct LoginPayload {
    pub token: Option<SessionToken>,
    pub user: Option<SessionUser>,
}

impl LoginPayload {
    /// Inspect a response body.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        Self {
            token: find_token(body),
            user: find_user(body),
        }
    }
}

/// First usable token: top-level keys first, then the same keys under `data`.
fn find_token(body: &Value) -> Option<SessionToken> {
    let scopes = [Some(body), body.get("data")];
    scopes.into_iter().flatten().find_map(|scope| {
        TOKEN_KEYS.iter().find_map(|key| {
            scope
                .get(*key)
                .and_then(Value::as_str)
                .and_then(|raw| SessionToken::parse(raw).ok())
        })
    })
}

fn find_user(body: &Value) -> Option<SessionUser> {
    let candidates = [
        body.get("user"),
        body.get("data").and_then(|data| data.get("user")),
        body.get("admin"),
        body.get("data"),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter(|candidate| candidate.is_object())
        .find(|candidate| {
            ["id", "_id", "name", "email"]
                .iter()
                .any(|key| candidate.get(*key).is_some_and(|v| !v.is_null()))
        })
        .map(user_from_object)
}

fn user_from_object(object: &Value) -> SessionUser {
    let text = |key: &str| -> Option<String> {
        match object.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    };

    let email = text("email").unwrap_or_default();
    let name = text("name")
        .or_else(|| {
            let full = [text("firstName"), text("lastName")]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            (!full.is_empty()).then_some(full)
        })
        .or_else(|| text("username"))
        .unwrap_or_else(|| SessionUser::from_email(&email).name);

    SessionUser {
        id: text("id").or_else(|| text("_id")).unwrap_or_default(),
        name,
        email,
        role: text("role").map_or_else(UserRole::default, |r| UserRole::from_backend(&r)),
    }
}
