pub mod admin;
pub mod ads;
pub mod app;
pub mod health;
pub mod quiz;
