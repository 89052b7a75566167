pub mod alerts;
pub mod commands;
pub mod domain;
pub mod exposure;
pub mod request;
pub mod scan;
pub mod settings;

pub use commands::{Cli, Commands};
