use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::AuthSession,
    error::ApiError,
    posts::dto::{CreatePostRequest, CreatedPostResponse, PostListItem},
    posts::repo::Post,
    state::AppState,
};

pub fn post_routes() -> Router<AppState> {
    Router::new().route("/api/posts", get(list_posts).post(create_post))
}

/// Trimmed post content, or EmptyContent if nothing is left.
pub(crate) fn normalize_content(content: &str) -> Result<&str, ApiError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ApiError::EmptyContent);
    }
    Ok(trimmed)
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthSession(account_id): AuthSession,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatedPostResponse>), ApiError> {
    let content = normalize_content(&payload.content)?;
    let post = Post::create(&state.db, account_id, content).await?;
    info!(post_id = %post.id, %account_id, "post created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedPostResponse {
            id: post.id,
            created_at: post.created_at,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostListItem>>, ApiError> {
    let posts = Post::list_all(&state.db).await?;
    Ok(Json(posts.into_iter().map(PostListItem::from).collect()))
}
