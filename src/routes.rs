//! Router assembly.
//!
//! One router serves the API for every deployment; static hosting of the
//! built front end is switched on by configuration.

use std::path::Path;

use axum::{
    Router,
    routing::{delete, get},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    error::Error,
    handlers::{
        create_user, delete_user, delete_user_by_query, health_check, list_users,
        user_method_not_allowed, users_method_not_allowed,
    },
    state::AppState,
};

/// Routes under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/users",
            get(list_users)
                .post(create_user)
                .delete(delete_user_by_query)
                .fallback(users_method_not_allowed),
        )
        .route(
            "/users/{id}",
            delete(delete_user).fallback(user_method_not_allowed),
        )
}

/// Builds the complete application router.
///
/// When `static_dir` is given, any path not claimed by the API is served
/// from that directory, and unknown paths fall back to its `index.html`
/// so client-side routing keeps working.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new().nest("/api", api_routes().fallback(api_not_found));

    let router = match static_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Serving static front end");
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router.fallback(api_not_found),
    };

    router.with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

async fn api_not_found() -> Error {
    Error::NotFound("Route not found".to_string())
}
