pub mod demo;
pub mod http;
pub mod provider;
pub mod router;
pub mod types;

pub use provider::{ScanProvider, DEFAULT_ALERT_TRIGGERS};
pub use router::create_provider;
pub use types::{ApiInfo, ScanReceipt};

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::RiskmapError;
use crate::models::Device;

fn ip_literal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,3}(?:\.\d{1,3}){3}$").expect("static regex"))
}

/// Route a free-text query: a plain IPv4 literal goes through the host
/// lookup, anything else through search.
pub async fn query_devices(
    provider: &dyn ScanProvider,
    query: &str,
    limit: usize,
) -> Result<Vec<Device>, RiskmapError> {
    if ip_literal().is_match(query) {
        provider.host(query).await
    } else {
        provider.search(query, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_literal_detection() {
        assert!(ip_literal().is_match("8.8.8.8"));
        assert!(ip_literal().is_match("192.168.0.1"));
        assert!(!ip_literal().is_match("8.8.8"));
        assert!(!ip_literal().is_match("webcam country:KR"));
        assert!(!ip_literal().is_match("example.com"));
    }

    #[tokio::test]
    async fn test_query_routes_ip_to_host_lookup() {
        let provider = demo::DemoProvider::new();
        let devices = query_devices(&provider, "203.0.113.8", 100).await.unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].ip(), "203.0.113.8");
    }

    #[tokio::test]
    async fn test_query_routes_text_to_search() {
        let provider = demo::DemoProvider::new();
        let devices = query_devices(&provider, "port:23 telnet", 100).await.unwrap();
        assert!(devices.len() > 1);
    }
}
