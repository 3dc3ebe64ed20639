//! DTOs for favorites endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Favorite, ProductSnapshot};

/// Request to add a product to a user's favorites.
///
/// Everything except `product_id` is an optional snapshot of the product
/// as the client saw it at favoriting time.
#[derive(Debug, Deserialize, Validate)]
pub struct AddFavoriteRequest {
    #[validate(length(min = 1, message = "Product ID cannot be blank"))]
    pub product_id: String,

    pub product_name: Option<String>,

    #[validate(range(min = 0.0, message = "Product price must be positive or zero"))]
    pub product_price: Option<f64>,

    pub product_image_url: Option<String>,

    pub category: Option<String>,
}

impl From<AddFavoriteRequest> for ProductSnapshot {
    fn from(req: AddFavoriteRequest) -> Self {
        ProductSnapshot {
            product_id: req.product_id,
            product_name: req.product_name,
            product_price: req.product_price,
            product_image_url: req.product_image_url,
            category: req.category,
        }
    }
}

/// A stored favorite, as returned when it is created.
#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub favorite_id: i64,
    pub user_id: String,
    pub product_id: String,
    pub product_name: Option<String>,
    pub product_price: Option<f64>,
    pub product_image_url: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Favorite> for FavoriteResponse {
    fn from(favorite: Favorite) -> Self {
        Self {
            favorite_id: favorite.id,
            user_id: favorite.user_id,
            product_id: favorite.product.product_id,
            product_name: favorite.product.product_name,
            product_price: favorite.product.product_price,
            product_image_url: favorite.product.product_image_url,
            category: favorite.product.category,
            created_at: favorite.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IsFavoriteResponse {
    pub is_favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct DeletedCountResponse {
    pub deleted_count: i64,
}
