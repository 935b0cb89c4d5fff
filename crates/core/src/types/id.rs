//! Locally generated identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one item in a repeatable content list.
///
/// The backend does not assign ids to list entries, so the admin mints one
/// whenever an item enters a form (loaded from the API, taken from a fixture
/// or added by the user). It is only used to target remove actions and is
/// never sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListItemId(Uuid);

impl ListItemId {
    /// Mint a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id previously rendered into a form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(Self)
    }
}

impl Default for ListItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ListItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_distinct() {
        assert_ne!(ListItemId::new(), ListItemId::new());
    }

    #[test]
    fn test_parse_display_output() {
        let id = ListItemId::new();
        assert_eq!(ListItemId::parse(&id.to_string()).unwrap(), id);
        assert!(ListItemId::parse("not-a-uuid").is_none());
    }
}
