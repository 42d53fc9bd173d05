//! In-memory post repository - used by tests and local runs without a database.
//!
//! Note: Data is lost on process restart.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use journal_core::domain::{Post, PostInput, PostWithUser, User};
use journal_core::error::RepoError;
use journal_core::ports::{BaseRepository, PostRepository};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    next_user_id: i32,
    next_post_id: i32,
}

impl Tables {
    fn upsert_user(&mut self, name: &str) -> i32 {
        if let Some(user) = self.users.iter().find(|u| u.name == name) {
            return user.id;
        }

        self.next_user_id += 1;
        let id = self.next_user_id;
        self.users.push(User {
            id,
            name: name.to_string(),
        });
        id
    }

    fn user(&self, id: i32) -> Result<&User, RepoError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| RepoError::Constraint(format!("user {id} does not exist")))
    }

    fn joined<F>(&self, keep: F) -> Result<Vec<PostWithUser>, RepoError>
    where
        F: Fn(&User) -> bool,
    {
        let mut rows = Vec::new();
        for post in &self.posts {
            let user = self.user(post.user_id)?;
            if keep(user) {
                rows.push(PostWithUser {
                    post: post.clone(),
                    user: user.clone(),
                });
            }
        }

        rows.sort_by(|a, b| {
            b.post
                .created_at
                .cmp(&a.post.created_at)
                .then(b.post.id.cmp(&a.post.id))
        });
        Ok(rows)
    }
}

/// Post repository backed by a `Vec` behind an async RwLock.
pub struct InMemoryPostRepository {
    tables: RwLock<Tables>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Number of distinct authors recorded so far.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);

        if tables.posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn fetch_posts(&self) -> Result<Vec<PostWithUser>, RepoError> {
        self.tables.read().await.joined(|_| true)
    }

    async fn fetch_posts_by_user(&self, name: &str) -> Result<Vec<PostWithUser>, RepoError> {
        self.tables.read().await.joined(|user| user.name == name)
    }

    async fn create_post(&self, input: PostInput) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let user_id = tables.upsert_user(&input.user_name);
        let image_url = input.replacement_image().map(str::to_owned);

        tables.next_post_id += 1;
        let post = Post {
            id: tables.next_post_id,
            title: input.title,
            content: input.content,
            image_url,
            created_at: Utc::now(),
            user_id,
        };
        tables.posts.push(post.clone());

        Ok(post)
    }

    async fn update_post(&self, id: i32, input: PostInput) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let index = tables
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        let current_owner = tables.posts[index].user_id;
        let same_owner = tables
            .user(current_owner)
            .is_ok_and(|owner| owner.name == input.user_name);
        let user_id = if same_owner {
            current_owner
        } else {
            tables.upsert_user(&input.user_name)
        };
        let image_url = input.replacement_image().map(str::to_owned);

        let post = &mut tables.posts[index];
        post.title = input.title;
        post.content = input.content;
        post.user_id = user_id;
        if let Some(url) = image_url {
            post.image_url = Some(url);
        }

        Ok(post.clone())
    }

    async fn user_exists(&self, name: &str) -> Result<bool, RepoError> {
        Ok(self.tables.read().await.users.iter().any(|u| u.name == name))
    }
}
