use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::credentials::resolve_credential;
use super::store::{FileStore, KeyValueStore};
use crate::errors::RiskmapError;

/// Fixed key the settings document lives under in the key-value store.
pub const STORAGE_KEY: &str = "settings";

/// Environment fallback when no credential is stored.
pub const API_KEY_ENV: &str = "RISKMAP_API_KEY";

// Known settings keys, camelCase as persisted and exported.
pub const KEY_API_KEY: &str = "apiKey";
pub const KEY_DEMO_MODE: &str = "demoMode";
pub const KEY_AUTO_REFRESH: &str = "autoRefresh";
pub const KEY_DARK_MODE: &str = "darkMode";
pub const KEY_ALERT_EMAIL: &str = "alertEmail";
pub const KEY_RISK_THRESHOLD: &str = "riskThreshold";
pub const KEY_EMAIL_ALERTS: &str = "emailAlerts";
pub const KEY_MAP_ZOOM: &str = "defaultMapZoom";
pub const KEY_RESULTS_PER_PAGE: &str = "resultsPerPage";
pub const KEY_SHOW_BANNERS: &str = "showDetailedBanners";
pub const KEY_API_TIMEOUT: &str = "apiTimeout";
pub const KEY_MAX_RESULTS: &str = "maxSearchResults";
pub const KEY_CACHE_EXPIRY: &str = "cacheExpiry";
pub const KEY_DEFAULT_QUERY: &str = "defaultSearchQuery";
pub const KEY_ENABLE_LOGGING: &str = "enableLogging";

/// The user preference document: one flat JSON object. Unknown keys are
/// carried through merges and exports untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    entries: Map<String, Value>,
}

impl Settings {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Shallow merge: keys from `other` win.
    pub fn merge(&mut self, other: &Settings) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// API credential: stored value (with `$VAR` indirection) first, then
    /// the environment fallback.
    pub fn api_key(&self) -> Option<String> {
        if let Some(stored) = self.get(KEY_API_KEY).and_then(Value::as_str) {
            if !stored.is_empty() {
                return Some(resolve_credential(stored));
            }
        }
        std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
    }

    pub fn demo_mode(&self) -> bool {
        self.bool_or(KEY_DEMO_MODE, false)
    }

    pub fn auto_refresh(&self) -> bool {
        self.bool_or(KEY_AUTO_REFRESH, false)
    }

    pub fn dark_mode(&self) -> bool {
        self.bool_or(KEY_DARK_MODE, false)
    }

    pub fn email_alerts(&self) -> bool {
        self.bool_or(KEY_EMAIL_ALERTS, true)
    }

    pub fn enable_logging(&self) -> bool {
        self.bool_or(KEY_ENABLE_LOGGING, true)
    }

    pub fn show_detailed_banners(&self) -> bool {
        self.bool_or(KEY_SHOW_BANNERS, false)
    }

    pub fn risk_threshold(&self) -> u64 {
        self.number_or(KEY_RISK_THRESHOLD, 75)
    }

    pub fn map_zoom(&self) -> u64 {
        self.number_or(KEY_MAP_ZOOM, 2)
    }

    pub fn results_per_page(&self) -> u64 {
        self.number_or(KEY_RESULTS_PER_PAGE, 25)
    }

    pub fn api_timeout(&self) -> u64 {
        self.number_or(KEY_API_TIMEOUT, 10)
    }

    pub fn max_results(&self) -> u64 {
        self.number_or(KEY_MAX_RESULTS, 100)
    }

    pub fn cache_expiry(&self) -> u64 {
        self.number_or(KEY_CACHE_EXPIRY, 30)
    }

    pub fn alert_email(&self) -> Option<&str> {
        self.get(KEY_ALERT_EMAIL)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn default_query(&self) -> Option<&str> {
        self.get(KEY_DEFAULT_QUERY)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => default,
        }
    }

    // Imported documents sometimes carry numbers as strings.
    fn number_or(&self, key: &str, default: u64) -> u64 {
        match self.get(key) {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
                .unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }
}

/// Settings persistence over an injected key-value store.
pub struct SettingsStore {
    store: Box<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        SettingsStore { store }
    }

    /// Settings backed by the platform config directory.
    pub fn open_default() -> Result<Self, RiskmapError> {
        Ok(SettingsStore::new(Box::new(FileStore::open_default()?)))
    }

    /// Current settings. An absent or unparseable document reads as empty.
    pub fn read(&self) -> Result<Settings, RiskmapError> {
        match self.store.get(STORAGE_KEY)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => Ok(settings),
                Err(e) => {
                    warn!(error = %e, "Stored settings are not valid JSON, starting empty");
                    Ok(Settings::default())
                }
            },
            None => Ok(Settings::default()),
        }
    }

    /// Shallow-merge `partial` into the stored document and persist.
    /// Returns the merged result.
    pub fn write(&self, partial: &Settings) -> Result<Settings, RiskmapError> {
        let mut current = self.read()?;
        current.merge(partial);
        self.persist(&current)?;
        Ok(current)
    }

    /// Drop the stored document entirely.
    pub fn reset(&self) -> Result<(), RiskmapError> {
        self.store.delete(STORAGE_KEY)
    }

    /// Serialized settings with the credential stripped, for sharing.
    pub fn export(&self) -> Result<Vec<u8>, RiskmapError> {
        let mut settings = self.read()?;
        settings.remove(KEY_API_KEY);
        Ok(serde_json::to_vec_pretty(&settings)?)
    }

    /// Suggested name for an exported settings file.
    pub fn export_filename() -> String {
        format!(
            "riskmap-settings-{}.json",
            chrono::Local::now().format("%Y-%m-%d")
        )
    }

    /// Merge a previously exported document into the stored settings.
    /// Anything that is not a JSON object is rejected and the store is left
    /// unchanged.
    pub fn import(&self, bytes: &[u8]) -> Result<Settings, RiskmapError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| RiskmapError::Import(format!("Not valid JSON: {}", e)))?;
        let imported = match value {
            Value::Object(entries) => Settings { entries },
            other => {
                return Err(RiskmapError::Import(format!(
                    "Expected a JSON object of settings, got {}",
                    json_type_name(&other)
                )))
            }
        };
        self.write(&imported)
    }

    fn persist(&self, settings: &Settings) -> Result<(), RiskmapError> {
        self.store.set(STORAGE_KEY, &serde_json::to_string(settings)?)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
