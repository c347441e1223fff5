pub mod auth;
pub mod event;
pub mod id;
pub mod list;
pub mod registration;
pub mod role;
pub mod user;
