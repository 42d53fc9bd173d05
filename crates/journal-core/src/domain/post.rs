use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{ANONYMOUS, User};

/// Post entity - a single journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: i32,
}

/// A post joined with its author, as the listing shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithUser {
    #[serde(flatten)]
    pub post: Post,
    pub user: User,
}

/// Values submitted for creating or updating a post.
///
/// The author is named rather than referenced; repositories resolve the name
/// to a user with create-if-absent semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub content: Option<String>,
    pub user_name: String,
    pub image_url: Option<String>,
}

impl PostInput {
    /// Build an input from raw form values.
    ///
    /// Empty content is stored as absent and a blank author name falls back
    /// to [`ANONYMOUS`].
    pub fn new(title: impl Into<String>, content: Option<String>, user_name: &str) -> Self {
        let user_name = if user_name.trim().is_empty() {
            ANONYMOUS.to_string()
        } else {
            user_name.to_string()
        };

        Self {
            title: title.into(),
            content: content.filter(|c| !c.is_empty()),
            user_name,
            image_url: None,
        }
    }

    pub fn with_image(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    /// Image URL an update should write, if any.
    ///
    /// Updates only overwrite the stored reference when a non-empty value is
    /// supplied; `None` keeps whatever the post already points at.
    pub fn replacement_image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }
}
