use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::instrument;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::{NewPost, Post, PostPatch};
use crate::state::AppState;

pub(crate) fn post_not_found(id: u64) -> AppError {
    tracing::warn!("post {} not found", id);
    AppError::NotFound(format!("Post {id} not found"))
}

#[instrument(skip(state))]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let posts = state.store.all_posts().await?;
    tracing::debug!("list_posts returning {} posts", posts.len());
    Ok(Json(posts))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<Post>, AppError> {
    state
        .store
        .post_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| post_not_found(id))
}

#[instrument(skip(state, draft), fields(title = %draft.title))]
pub async fn add_post(
    State(state): State<AppState>,
    AppJson(draft): AppJson<NewPost>,
) -> Result<impl IntoResponse, AppError> {
    draft.validate()?;
    let post = state.store.create_post(draft).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

#[instrument(skip(state, patch))]
pub async fn update_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
    AppJson(patch): AppJson<PostPatch>,
) -> Result<Json<Post>, AppError> {
    patch.validate()?;
    state
        .store
        .update_post(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| post_not_found(id))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_post(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(post_not_found(id))
    }
}

#[instrument(skip(state))]
pub async fn like_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<Post>, AppError> {
    state
        .store
        .like_post(id)
        .await?
        .map(Json)
        .ok_or_else(|| post_not_found(id))
}
