//! Business logic services for the application layer.

pub mod favorite_service;

pub use favorite_service::FavoriteService;
