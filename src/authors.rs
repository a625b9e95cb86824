use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::instrument;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::{NewUser, User};
use crate::state::AppState;

#[instrument(skip(state, user), fields(username = %user.username))]
pub async fn add_author(
    State(state): State<AppState>,
    AppJson(user): AppJson<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    user.validate()?;
    let username = user.username.clone();
    match state.store.create_user_if_absent(user).await? {
        Some(author) => Ok((StatusCode::CREATED, Json(author))),
        None => {
            tracing::error!("add_author username {} already taken", username);
            Err(AppError::Conflict(format!(
                "Username {username} is already taken"
            )))
        }
    }
}

#[instrument(skip(state))]
pub async fn get_author(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<User>, AppError> {
    state
        .store
        .user_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Author {id} not found")))
}

#[instrument(skip(state))]
pub async fn get_author_by_username(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
) -> Result<Json<User>, AppError> {
    state
        .store
        .user_by_username(&username)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Author {username} not found")))
}
