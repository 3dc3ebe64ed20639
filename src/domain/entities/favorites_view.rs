//! Per-user aggregate of favorites, the value held in the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::favorite::Favorite;

/// One entry of a [`UserFavoritesView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub favorite_id: i64,
    pub product_id: String,
    pub product_name: Option<String>,
    pub product_price: Option<f64>,
    pub product_image_url: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Favorite> for FavoriteEntry {
    fn from(favorite: Favorite) -> Self {
        Self {
            favorite_id: favorite.id,
            product_id: favorite.product.product_id,
            product_name: favorite.product.product_name,
            product_price: favorite.product.product_price,
            product_image_url: favorite.product.product_image_url,
            category: favorite.product.category,
            created_at: favorite.created_at,
        }
    }
}

/// All favorites of one user, in store order.
///
/// Never persisted on its own: it is rebuilt from the store whenever the
/// cached copy is missing, so losing it only costs latency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFavoritesView {
    pub user_id: String,
    pub total_count: usize,
    pub favorites: Vec<FavoriteEntry>,
}

impl UserFavoritesView {
    /// Builds the view, keeping `total_count` equal to the number of entries.
    pub fn build(user_id: impl Into<String>, favorites: Vec<Favorite>) -> Self {
        let favorites: Vec<FavoriteEntry> = favorites.into_iter().map(Into::into).collect();

        Self {
            user_id: user_id.into(),
            total_count: favorites.len(),
            favorites,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.favorites.iter().any(|f| f.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProductSnapshot;

    fn favorite(id: i64, product_id: &str) -> Favorite {
        Favorite::new(
            id,
            "u1".to_string(),
            ProductSnapshot::new(product_id),
            Utc::now(),
        )
    }

    #[test]
    fn test_build_counts_entries() {
        let view = UserFavoritesView::build("u1", vec![favorite(2, "p2"), favorite(1, "p1")]);

        assert_eq!(view.user_id, "u1");
        assert_eq!(view.total_count, 2);
        assert_eq!(view.favorites[0].favorite_id, 2);
        assert_eq!(view.favorites[1].product_id, "p1");
        assert!(view.contains("p1"));
        assert!(!view.contains("p3"));
    }

    #[test]
    fn test_build_empty() {
        let view = UserFavoritesView::build("nobody", Vec::new());

        assert!(view.is_empty());
        assert_eq!(view.total_count, 0);
    }

    #[test]
    fn test_json_shape() {
        let view = UserFavoritesView::build("u1", vec![favorite(1, "p1")]);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["user_id"], "u1");
        assert_eq!(json["total_count"], 1);
        assert_eq!(json["favorites"][0]["product_id"], "p1");

        let back: UserFavoritesView = serde_json::from_value(json).unwrap();
        assert_eq!(back, view);
    }
}
