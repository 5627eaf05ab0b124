pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod uploads;

pub use db::create_pool;
pub use pagination::{PageMeta, Paginated, PaginationArgs, PaginationError};
