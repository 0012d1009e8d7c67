pub mod health;
pub mod images;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /images                                          list (JSON)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(images::api_router())
}
