pub mod auth;
pub mod event;
pub mod health;
pub mod identity;
pub mod registration;
pub mod user;
