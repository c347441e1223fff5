pub mod database;
pub mod identity;
pub mod redis;
pub mod repository;
