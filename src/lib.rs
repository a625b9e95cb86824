use axum::{
    http::{HeaderValue, Method, Request},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

pub mod authors;
pub mod comments;
pub mod config;
pub mod error;
pub mod extract;
pub mod health;
pub mod models;
pub mod posts;
pub mod seed;
pub mod state;
pub mod storage;

use crate::config::CorsConfig;
use crate::state::AppState;

/// Builds the application router with its middleware stack.
pub fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    let api = Router::new()
        .route("/healthcheck", get(health::health_check_handler))
        .route("/posts", get(posts::list_posts).post(posts::add_post))
        .route(
            "/posts/:id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/:id/like", post(posts::like_post))
        .route(
            "/posts/:id/comments",
            get(comments::list_comments).post(comments::add_comment),
        )
        .route("/authors", post(authors::add_author))
        .route("/authors/:id", get(authors::get_author))
        .route(
            "/authors/by-username/:username",
            get(authors::get_author_by_username),
        );

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(TruncatedUuid))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if config.allow_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

pub fn generate_truncated_uuid() -> String {
    let hex = Uuid::new_v4().as_simple().to_string();
    hex[..24].to_string()
}

/// Stamps `x-request-id` on requests that arrive without one.
#[derive(Clone, Copy)]
struct TruncatedUuid;

impl MakeRequestId for TruncatedUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&generate_truncated_uuid())
            .ok()
            .map(RequestId::new)
    }
}
