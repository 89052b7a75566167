pub mod credentials;
pub mod settings;
pub mod store;

pub use credentials::{mask_key, resolve_credential};
pub use settings::{Settings, SettingsStore, STORAGE_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
