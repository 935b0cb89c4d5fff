//! Staff roles reported by the CMS backend.

use serde::{Deserialize, Serialize};

/// Role of the signed-in staff member.
///
/// The backend is inconsistent about casing and naming, so parsing is
/// lenient and anything unknown becomes [`UserRole::Editor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access, including staff management on the backend.
    Admin,
    /// Can edit website content.
    #[default]
    Editor,
    /// Read-only access.
    Viewer,
}

impl UserRole {
    /// Lenient conversion from whatever the backend sent.
    #[must_use]
    pub fn from_backend(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" | "administrator" | "superadmin" | "super_admin" => Self::Admin,
            "viewer" | "readonly" | "read_only" => Self::Viewer,
            _ => Self::Editor,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Editor => write!(f, "editor"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_backend_is_lenient() {
        assert_eq!(UserRole::from_backend("Admin"), UserRole::Admin);
        assert_eq!(UserRole::from_backend(" SUPER_ADMIN "), UserRole::Admin);
        assert_eq!(UserRole::from_backend("readonly"), UserRole::Viewer);
        assert_eq!(UserRole::from_backend("marketing"), UserRole::Editor);
    }

    #[test]
    fn test_display() {
        assert_eq!(UserRole::Viewer.to_string(), "viewer");
    }
}
