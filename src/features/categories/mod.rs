pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod path_label;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod services;
pub mod tree;

pub use services::CategoryService;
