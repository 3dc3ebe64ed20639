//! Favorite entity: one user's link to one product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product attributes captured at the moment a product is favorited.
///
/// The snapshot is denormalized into the favorite record and is never
/// refreshed from the product catalog afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub product_id: String,
    pub product_name: Option<String>,
    pub product_price: Option<f64>,
    pub product_image_url: Option<String>,
    pub category: Option<String>,
}

impl ProductSnapshot {
    /// Creates a snapshot carrying only the product id.
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            ..Default::default()
        }
    }
}

/// A stored favorite.
///
/// `id` and `created_at` are assigned by the store and never change; the
/// record is deleted rather than updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub user_id: String,
    pub product: ProductSnapshot,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    /// Creates a new Favorite instance.
    pub fn new(
        id: i64,
        user_id: String,
        product: ProductSnapshot,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            product,
            created_at,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product.product_id
    }
}

/// Input data for inserting a new favorite.
#[derive(Debug, Clone)]
pub struct NewFavorite {
    pub user_id: String,
    pub product: ProductSnapshot,
    pub created_at: DateTime<Utc>,
}

impl NewFavorite {
    /// Stamps a new favorite with the current time.
    pub fn now(user_id: impl Into<String>, product: ProductSnapshot) -> Self {
        Self {
            user_id: user_id.into(),
            product,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_creation() {
        let now = Utc::now();
        let favorite = Favorite::new(
            7,
            "u1".to_string(),
            ProductSnapshot {
                product_id: "p1".to_string(),
                product_name: Some("Case".to_string()),
                product_price: Some(9.99),
                product_image_url: None,
                category: Some("cases".to_string()),
            },
            now,
        );

        assert_eq!(favorite.id, 7);
        assert_eq!(favorite.user_id, "u1");
        assert_eq!(favorite.product_id(), "p1");
        assert_eq!(favorite.product.product_price, Some(9.99));
        assert_eq!(favorite.created_at, now);
    }

    #[test]
    fn test_new_favorite_is_stamped() {
        let before = Utc::now();
        let new_favorite = NewFavorite::now("u1", ProductSnapshot::new("p1"));

        assert_eq!(new_favorite.user_id, "u1");
        assert_eq!(new_favorite.product.product_id, "p1");
        assert!(new_favorite.product.product_name.is_none());
        assert!(new_favorite.created_at >= before);
    }
}
