pub mod model;
pub mod pagination;
pub mod repository;
pub mod service;
