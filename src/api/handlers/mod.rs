//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod favorites;
pub mod health;

pub use favorites::{
    add_favorite_handler, count_favorites_handler, get_favorites_handler, is_favorite_handler,
    remove_all_favorites_handler, remove_favorite_handler,
};
pub use health::health_handler;
