pub mod api;
pub mod cli;
pub mod errors;
pub mod models;
pub mod render;
pub mod settings;
