pub mod auth;
pub mod event;
pub mod page;
pub mod registration;
pub mod user;
