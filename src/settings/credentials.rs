use tracing::debug;

/// Resolve a credential value. A value starting with '$' is treated as an
/// environment variable reference and resolved from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// Mask an API key for display, keeping only a short prefix.
pub fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(5).collect();
    if key.chars().count() <= 5 {
        "•".repeat(key.chars().count())
    } else {
        format!("{}…", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credential_literal() {
        assert_eq!(resolve_credential("abc123key"), "abc123key");
    }

    #[test]
    fn test_resolve_credential_env_var() {
        std::env::set_var("TEST_RISKMAP_CRED", "secret123");
        assert_eq!(resolve_credential("$TEST_RISKMAP_CRED"), "secret123");
        std::env::remove_var("TEST_RISKMAP_CRED");
    }

    #[test]
    fn test_resolve_credential_missing_env_var() {
        assert_eq!(
            resolve_credential("$NONEXISTENT_RISKMAP_VAR"),
            "$NONEXISTENT_RISKMAP_VAR"
        );
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("abcdefghij"), "abcde…");
        assert_eq!(mask_key("abc"), "•••");
    }
}
