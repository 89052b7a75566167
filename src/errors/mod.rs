pub mod types;

pub use types::RiskmapError;
