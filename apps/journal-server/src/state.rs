//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;
use sea_orm::DbConn;

use journal_core::ports::{ImageStore, PostRepository};
use journal_infra::{LocalImageStore, SeaOrmPostRepository, database};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub images: Arc<dyn ImageStore>,
    /// Pool behind `posts`, kept for health checks.
    pub db: Option<DbConn>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        images: Arc<dyn ImageStore>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            posts,
            images,
            db: None,
            max_upload_bytes,
        }
    }

    /// Build the production state: database pool, repository and upload directory.
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let conn = database::connect(&config.database)
            .await
            .context("failed to connect to database")?;

        let images = LocalImageStore::new(&config.uploads_dir);
        images.ensure_dir().await.with_context(|| {
            format!(
                "failed to create upload directory {}",
                config.uploads_dir.display()
            )
        })?;

        let posts = Arc::new(SeaOrmPostRepository::new(conn.clone()));

        tracing::info!(
            uploads_dir = %config.uploads_dir.display(),
            "Application state initialized"
        );

        Ok(Self {
            db: Some(conn),
            ..Self::new(posts, Arc::new(images), config.max_upload_bytes)
        })
    }
}
