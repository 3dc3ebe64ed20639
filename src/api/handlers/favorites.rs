//! Handlers for the per-user favorites endpoints.
//!
//! Each handler delegates to exactly one [`FavoriteService`] method; cache
//! handling and business rules live in the service.
//!
//! [`FavoriteService`]: crate::application::services::FavoriteService

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;
use validator::Validate;

use crate::api::dto::favorites::{
    AddFavoriteRequest, CountResponse, DeletedCountResponse, FavoriteResponse, IsFavoriteResponse,
};
use crate::domain::entities::UserFavoritesView;
use crate::error::AppError;
use crate::state::AppState;

/// Adds a product to a user's favorites.
///
/// # Endpoint
///
/// `POST /favorites/{user_id}`
///
/// # Request Body
///
/// ```json
/// {
///   "product_id": "p1",
///   "product_name": "Case",        // optional
///   "product_price": 9.99,         // optional, >= 0
///   "product_image_url": "...",    // optional
///   "category": "cases"            // optional
/// }
/// ```
///
/// # Errors
///
/// - **400**: blank product id or negative price
/// - **409**: product already in favorites
pub async fn add_favorite_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteResponse>), AppError> {
    payload.validate()?;

    info!(user_id = %user_id, product_id = %payload.product_id, "Add favorite request");

    let favorite = state
        .favorite_service
        .add_favorite(&user_id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(FavoriteResponse::from(favorite))))
}

/// Removes a product from a user's favorites.
///
/// # Endpoint
///
/// `DELETE /favorites/{user_id}/{product_id}`
///
/// # Errors
///
/// - **404**: the product is not in the user's favorites
pub async fn remove_favorite_handler(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    info!(user_id = %user_id, product_id = %product_id, "Remove favorite request");

    state
        .favorite_service
        .remove_favorite(&user_id, &product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists a user's favorites, newest first.
///
/// # Endpoint
///
/// `GET /favorites/{user_id}`
///
/// # Response
///
/// ```json
/// {
///   "user_id": "u1",
///   "total_count": 1,
///   "favorites": [
///     {
///       "favorite_id": 1,
///       "product_id": "p1",
///       "product_name": "Case",
///       "product_price": 9.99,
///       "product_image_url": null,
///       "category": null,
///       "created_at": "2025-03-01T12:00:00Z"
///     }
///   ]
/// }
/// ```
pub async fn get_favorites_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserFavoritesView>, AppError> {
    let view = state.favorite_service.get_user_favorites(&user_id).await?;

    Ok(Json(view))
}

/// `GET /favorites/{user_id}/{product_id}/exists`
pub async fn is_favorite_handler(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(String, String)>,
) -> Result<Json<IsFavoriteResponse>, AppError> {
    let is_favorite = state
        .favorite_service
        .is_favorite(&user_id, &product_id)
        .await?;

    Ok(Json(IsFavoriteResponse { is_favorite }))
}

/// `GET /favorites/{user_id}/count`
pub async fn count_favorites_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.favorite_service.count_favorites(&user_id).await?;

    Ok(Json(CountResponse { count }))
}

/// Removes every favorite of a user.
///
/// # Endpoint
///
/// `DELETE /favorites/{user_id}`
///
/// Succeeds with `deleted_count: 0` when the user had none.
pub async fn remove_all_favorites_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DeletedCountResponse>, AppError> {
    info!(user_id = %user_id, "Remove all favorites request");

    let deleted_count = state
        .favorite_service
        .remove_all_favorites(&user_id)
        .await?;

    Ok(Json(DeletedCountResponse { deleted_count }))
}
