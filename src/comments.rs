use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::instrument;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::{Comment, NewComment};
use crate::posts::post_not_found;
use crate::state::AppState;

/// Comments of a post, newest first. An unknown post simply has none.
#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    AppPath(post_id): AppPath<u64>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = state.store.comments_by_post_id(post_id).await?;
    Ok(Json(comments))
}

#[instrument(skip(state, draft), fields(author = %draft.author))]
pub async fn add_comment(
    State(state): State<AppState>,
    AppPath(post_id): AppPath<u64>,
    AppJson(draft): AppJson<NewComment>,
) -> Result<impl IntoResponse, AppError> {
    draft.validate()?;
    // The store accepts dangling post ids; the route does not.
    if state.store.post_by_id(post_id).await?.is_none() {
        return Err(post_not_found(post_id));
    }

    let draft = NewComment {
        post_id: Some(post_id),
        ..draft
    };
    let comment = state.store.create_comment(draft).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
