use tracing::info;

use super::demo::DemoProvider;
use super::http::HttpProvider;
use super::provider::ScanProvider;
use crate::errors::RiskmapError;
use crate::settings::Settings;

/// Pick the provider for the current settings: fixtures when demo mode is
/// on, otherwise the real API with the resolved credential.
pub fn create_provider(settings: &Settings) -> Result<Box<dyn ScanProvider>, RiskmapError> {
    if settings.demo_mode() {
        info!("Demo mode enabled, using canned fixtures");
        return Ok(Box::new(DemoProvider::new()));
    }

    let api_key = settings.api_key().ok_or_else(|| {
        RiskmapError::Config(
            "No API key configured and demo mode is off. \
             Run `riskmap settings set apiKey <KEY>` or `riskmap settings demo on`."
                .into(),
        )
    })?;

    Ok(Box::new(HttpProvider::new(&api_key, settings.api_timeout())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_demo_mode_selects_fixtures() {
        let settings: Settings =
            serde_json::from_value(json!({ "demoMode": true })).unwrap();
        let provider = create_provider(&settings).unwrap();
        assert_eq!(provider.provider_name(), "demo");
    }

    #[test]
    fn test_stored_key_selects_http() {
        let settings: Settings =
            serde_json::from_value(json!({ "apiKey": "k-123456" })).unwrap();
        let provider = create_provider(&settings).unwrap();
        assert_eq!(provider.provider_name(), "http");
    }

    #[test]
    fn test_no_key_no_demo_is_config_error() {
        let settings = Settings::default();
        // keep the env fallback out of this test
        std::env::remove_var(crate::settings::settings::API_KEY_ENV);
        let err = create_provider(&settings).unwrap_err();
        assert!(matches!(err, RiskmapError::Config(_)));
    }
}
