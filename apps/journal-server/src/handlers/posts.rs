//! Journal handlers: the page loader, the intent dispatcher and the JSON listing.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, http::header, web};

use journal_core::domain::Intent;
use journal_core::ports::BaseRepository;
use journal_shared::ApiResponse;
use journal_shared::dto::{ListingQuery, PostsQuery};

use super::submission::Submission;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

/// GET / - render the journal page.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<ListingQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.fetch_posts().await?;
    let html = views::render_index(&posts, query.editing_id());

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// POST / - apply a create, update or delete submission, then go back to the listing.
pub async fn submit(state: web::Data<AppState>, payload: Multipart) -> AppResult<HttpResponse> {
    let submission = Submission::read(payload, state.max_upload_bytes).await?;
    dispatch(&state, submission).await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish())
}

/// GET /api/posts - the listing as JSON, optionally narrowed to one author.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PostsQuery>,
) -> AppResult<HttpResponse> {
    let posts = match query.user.as_deref() {
        Some(name) => state.posts.fetch_posts_by_user(name).await?,
        None => state.posts.fetch_posts().await?,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

async fn dispatch(state: &AppState, submission: Submission) -> AppResult<()> {
    let intent = match submission.intent() {
        Some(Ok(intent)) => intent,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Ignoring submission");
            return Ok(());
        }
        None => return Ok(()),
    };

    tracing::debug!(%intent, "Handling submission");
    match intent {
        Intent::Create => create(state, submission).await,
        Intent::Update => update(state, submission).await,
        Intent::Delete => delete(state, submission).await,
    }
}

async fn store_image(state: &AppState, submission: &mut Submission) -> AppResult<Option<String>> {
    match submission.take_image() {
        Some(file) => Ok(Some(state.images.save(&file.file_name, &file.bytes).await?)),
        None => Ok(None),
    }
}

async fn create(state: &AppState, mut submission: Submission) -> AppResult<()> {
    let image_url = store_image(state, &mut submission).await?;

    let post = state
        .posts
        .create_post(submission.post_input().with_image(image_url))
        .await?;

    tracing::info!(post_id = post.id, "Journal entry created");
    Ok(())
}

async fn update(state: &AppState, mut submission: Submission) -> AppResult<()> {
    let id = submission.post_id()?;
    let existing = state.posts.find_by_id(id).await?;

    let mut image_url = store_image(state, &mut submission).await?;

    if submission.remove_image() {
        if let Some(old) = existing.as_ref().and_then(|p| p.image_url.as_deref()) {
            if let Err(e) = state.images.remove(old).await {
                tracing::error!(error = %e, image_url = old, "Failed to delete image");
            }
            // The store keeps the previous reference when no new value is given
            image_url = None;
        }
    }

    state
        .posts
        .update_post(id, submission.post_input().with_image(image_url))
        .await?;

    tracing::info!(post_id = id, "Journal entry updated");
    Ok(())
}

async fn delete(state: &AppState, submission: Submission) -> AppResult<()> {
    let id = submission.post_id()?;
    state.posts.delete_post(id).await?;

    tracing::info!(post_id = id, "Journal entry deleted");
    Ok(())
}
