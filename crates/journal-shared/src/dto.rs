//! Data Transfer Objects - query strings accepted by the server.

use serde::{Deserialize, Serialize};

/// Query string of the journal page.
///
/// `editing` holds the id of the post currently shown as an edit form. It is
/// kept as text so a malformed value simply edits nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingQuery {
    pub editing: Option<String>,
}

impl ListingQuery {
    pub fn editing_id(&self) -> Option<i32> {
        self.editing.as_deref().and_then(|v| v.trim().parse().ok())
    }
}

/// Query string of the JSON post listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostsQuery {
    /// Only list posts by this exact author name.
    pub user: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_id_parses_numbers_only() {
        let query = ListingQuery {
            editing: Some("12".to_string()),
        };
        assert_eq!(query.editing_id(), Some(12));

        let query = ListingQuery {
            editing: Some("abc".to_string()),
        };
        assert_eq!(query.editing_id(), None);

        assert_eq!(ListingQuery::default().editing_id(), None);
    }
}
