//! Seed CLI: inserts the sample authors and their first posts.
//!
//! Authors that already exist are skipped, so running it twice is harmless.

use anyhow::Context;

use journal_core::domain::PostInput;
use journal_core::error::RepoError;
use journal_core::ports::PostRepository;
use journal_infra::database::{self, DatabaseConfig};
use journal_infra::SeaOrmPostRepository;

/// (author, title, content)
const SAMPLES: &[(&str, &str, &str)] = &[
    ("Jane", "First Post", "Hello, World!"),
    ("Joe", "Second Post", "Hello, Journal!"),
];

/// Insert every sample whose author is not yet known. Returns how many were added.
async fn seed(repo: &dyn PostRepository) -> Result<usize, RepoError> {
    let mut created = 0;

    for &(author, title, content) in SAMPLES {
        if repo.user_exists(author).await? {
            tracing::info!(user_name = author, "User already exists, skipping");
            continue;
        }

        let post = repo
            .create_post(PostInput::new(title, Some(content.to_string()), author))
            .await?;
        tracing::info!(user_name = author, post_id = post.id, "Seeded post");
        created += 1;
    }

    Ok(created)
}

async fn run() -> anyhow::Result<usize> {
    let url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL is not defined in environment variables")?;

    let conn = database::connect(&DatabaseConfig {
        url,
        max_connections: 1,
        min_connections: 1,
    })
    .await
    .context("failed to connect to database")?;

    let repo = SeaOrmPostRepository::new(conn);
    Ok(seed(&repo).await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    match run().await {
        Ok(created) => {
            tracing::info!(created, "Seeding finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Seeding failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use journal_infra::InMemoryPostRepository;

    use super::*;

    #[tokio::test]
    async fn test_seeds_sample_posts() {
        let repo = InMemoryPostRepository::new();

        assert_eq!(seed(&repo).await.unwrap(), 2);

        let posts = repo.fetch_posts().await.unwrap();
        let jane = repo.fetch_posts_by_user("Jane").await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(jane[0].post.title, "First Post");
        assert_eq!(jane[0].post.content.as_deref(), Some("Hello, World!"));
    }

    #[tokio::test]
    async fn test_rerun_skips_existing_users() {
        let repo = InMemoryPostRepository::new();
        repo.create_post(PostInput::new("Mine", None, "Joe"))
            .await
            .unwrap();

        assert_eq!(seed(&repo).await.unwrap(), 1);
        assert_eq!(seed(&repo).await.unwrap(), 0);

        let joe = repo.fetch_posts_by_user("Joe").await.unwrap();
        assert_eq!(joe.len(), 1);
        assert_eq!(joe[0].post.title, "Mine");
        assert_eq!(repo.user_count().await, 2);
    }
}
