//! SeaORM post repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, SelectTwo, Set,
};

use journal_core::domain::{Post, PostInput, PostWithUser};
use journal_core::error::RepoError;
use journal_core::ports::PostRepository;

use super::base::{SeaOrmBaseRepository, query_error};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

/// SeaORM post repository.
pub type SeaOrmPostRepository = SeaOrmBaseRepository<PostEntity>;

impl SeaOrmPostRepository {
    /// Resolve a user by name, creating it when absent.
    ///
    /// Existing rows are left untouched. The insert tolerates a concurrent
    /// writer claiming the same name first.
    async fn upsert_user(&self, name: &str) -> Result<user::Model, RepoError> {
        let candidate = user::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        };

        let inserted = UserEntity::insert(candidate)
            .on_conflict(
                OnConflict::column(user::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(query_error)?;

        if inserted > 0 {
            tracing::debug!(user_name = %name, "Created user on first post");
        }

        UserEntity::find()
            .filter(user::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(query_error)?
            .ok_or(RepoError::NotFound)
    }

    async fn load_joined(
        &self,
        query: SelectTwo<PostEntity, UserEntity>,
    ) -> Result<Vec<PostWithUser>, RepoError> {
        let rows = query
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        rows.into_iter().map(join_author).collect()
    }
}

fn join_author(
    (post, user): (post::Model, Option<user::Model>),
) -> Result<PostWithUser, RepoError> {
    let user = user.ok_or_else(|| {
        RepoError::Constraint(format!("post {} references a missing user", post.id))
    })?;

    Ok(PostWithUser {
        post: post.into(),
        user: user.into(),
    })
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn fetch_posts(&self) -> Result<Vec<PostWithUser>, RepoError> {
        self.load_joined(PostEntity::find().find_also_related(UserEntity))
            .await
    }

    async fn fetch_posts_by_user(&self, name: &str) -> Result<Vec<PostWithUser>, RepoError> {
        self.load_joined(
            PostEntity::find()
                .find_also_related(UserEntity)
                .filter(user::Column::Name.eq(name)),
        )
        .await
    }

    async fn create_post(&self, input: PostInput) -> Result<Post, RepoError> {
        let user = self.upsert_user(&input.user_name).await?;
        let image_url = input.replacement_image().map(str::to_owned);

        let model = post::ActiveModel {
            title: Set(input.title),
            content: Set(input.content),
            image_url: Set(image_url),
            created_at: Set(Utc::now().into()),
            user_id: Set(user.id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(query_error)?;

        tracing::debug!(post_id = model.id, user_id = user.id, "Post created");
        Ok(model.into())
    }

    async fn update_post(&self, id: i32, input: PostInput) -> Result<Post, RepoError> {
        let (existing, owner) = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(query_error)?
            .ok_or(RepoError::NotFound)?;

        let user_id = match owner {
            Some(owner) if owner.name == input.user_name => owner.id,
            _ => self.upsert_user(&input.user_name).await?.id,
        };
        let image_url = input.replacement_image().map(str::to_owned);

        let mut active = existing.into_active_model();
        active.title = Set(input.title);
        active.content = Set(input.content);
        active.user_id = Set(user_id);
        if let Some(url) = image_url {
            active.image_url = Set(Some(url));
        }

        let model = active.update(&self.db).await.map_err(query_error)?;

        tracing::debug!(post_id = model.id, user_id, "Post updated");
        Ok(model.into())
    }

    async fn user_exists(&self, name: &str) -> Result<bool, RepoError> {
        let count = UserEntity::find()
            .filter(user::Column::Name.eq(name))
            .count(&self.db)
            .await
            .map_err(query_error)?;
        Ok(count > 0)
    }
}
