pub mod auth;
pub mod event;
pub mod health;
pub mod registration;
pub mod user;
