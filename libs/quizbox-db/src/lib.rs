pub mod db;
pub mod maintenance;
pub mod models;
pub mod repositories;

pub use db::{DbConfig, DbConfigError, connect, init_db};
pub use sqlx;
