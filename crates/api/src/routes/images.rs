//! Route definitions for the gallery.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// Browser-facing routes, mounted at the root.
///
/// ```text
/// GET    /                    -> index
/// POST   /upload              -> upload
/// GET    /uploads/{filename}  -> serve_file
/// POST   /delete/{id}         -> delete
/// ```
pub fn page_router() -> Router<AppState> {
    Router::new()
        .route("/", get(images::index))
        .route("/upload", post(images::upload))
        .route("/uploads/{filename}", get(images::serve_file))
        .route("/delete/{id}", post(images::delete))
}

/// JSON routes, mounted under `/api/v1`.
///
/// ```text
/// GET    /images              -> list_json
/// ```
pub fn api_router() -> Router<AppState> {
    Router::new().route("/images", get(images::list_json))
}
