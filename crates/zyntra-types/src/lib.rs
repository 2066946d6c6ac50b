pub mod api;
pub mod models;
pub mod sample;
