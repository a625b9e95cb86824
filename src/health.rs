use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

const MESSAGE: &str = "Blog API";

pub async fn health_check_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    tracing::trace!("health_check started");
    let stats = state.store.stats().await?;

    Ok(Json(json!({
        "status": "ok",
        "message": MESSAGE,
        "posts": stats.posts,
        "comments": stats.comments,
        "users": stats.users,
    })))
}
