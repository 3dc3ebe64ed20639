//! API route configuration.

use crate::api::handlers::{
    add_favorite_handler, count_favorites_handler, get_favorites_handler, health_handler,
    is_favorite_handler, remove_all_favorites_handler, remove_favorite_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// Favorites routes, nested under `/favorites`.
///
/// # Endpoints
///
/// - `POST   /{user_id}`                     - Add a favorite
/// - `GET    /{user_id}`                     - List favorites (cached)
/// - `DELETE /{user_id}`                     - Remove all favorites
/// - `GET    /{user_id}/count`               - Count favorites
/// - `DELETE /{user_id}/{product_id}`        - Remove a favorite
/// - `GET    /{user_id}/{product_id}/exists` - Membership check (cached)
///
/// The static `count` segment wins over `{product_id}`, so a product whose
/// id is literally `count` cannot be removed through this API.
pub fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{user_id}",
            get(get_favorites_handler)
                .post(add_favorite_handler)
                .delete(remove_all_favorites_handler),
        )
        .route("/{user_id}/count", get(count_favorites_handler))
        .route("/{user_id}/{product_id}", delete(remove_favorite_handler))
        .route("/{user_id}/{product_id}/exists", get(is_favorite_handler))
}

/// Operational routes mounted at the root.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
