use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route(
            "/contact",
            post(handlers::submit).fallback(handlers::method_not_allowed),
        )
        .route(
            "/contact.php",
            post(handlers::submit).fallback(handlers::method_not_allowed),
        )
        .with_state(state)
}
