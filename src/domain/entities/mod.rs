//! Core domain entities.
//!
//! - [`Favorite`] - A stored user/product link with its product snapshot
//! - [`UserFavoritesView`] - Derived per-user aggregate, the cached read model
//!
//! Creation data lives in separate structs ([`NewFavorite`]), following the
//! same "new type for inserts" split used across the domain layer.

pub mod favorite;
pub mod favorites_view;

pub use favorite::{Favorite, NewFavorite, ProductSnapshot};
pub use favorites_view::{FavoriteEntry, UserFavoritesView};
