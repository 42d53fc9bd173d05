use async_trait::async_trait;

use crate::domain::{Post, PostInput, PostWithUser};
use crate::error::RepoError;

/// Generic repository trait for lookups and removal by key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with [`RepoError::NotFound`] when absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
///
/// Authors are resolved by name on every write: a name without a user
/// creates one, an existing user is never modified.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// All posts with their author, newest first.
    async fn fetch_posts(&self) -> Result<Vec<PostWithUser>, RepoError>;

    /// Posts whose author name matches exactly, newest first.
    async fn fetch_posts_by_user(&self, name: &str) -> Result<Vec<PostWithUser>, RepoError>;

    /// Insert a post owned by `input.user_name`.
    async fn create_post(&self, input: PostInput) -> Result<Post, RepoError>;

    /// Overwrite title, content and owner of an existing post.
    ///
    /// The image reference is only replaced when [`PostInput::replacement_image`]
    /// yields a value.
    async fn update_post(&self, id: i32, input: PostInput) -> Result<Post, RepoError>;

    /// Whether a user with exactly this name exists.
    async fn user_exists(&self, name: &str) -> Result<bool, RepoError>;

    async fn delete_post(&self, id: i32) -> Result<(), RepoError> {
        self.delete(id).await
    }
}
