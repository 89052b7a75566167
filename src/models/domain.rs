use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// DNS-level information for a domain, as returned by the domain info
/// endpoint and optionally enriched with a forward resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainInfo {
    pub domain: String,
    pub subdomains: Vec<String>,
    pub tags: Vec<String>,
    pub ports: Vec<u16>,
    pub data: Vec<DnsRecord>,
    /// Hostname to resolved address; null for hostnames that did not resolve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<BTreeMap<String, Option<String>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsRecord {
    pub subdomain: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
    pub last_seen: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_info_deserializes_records() {
        let info: DomainInfo = serde_json::from_value(serde_json::json!({
            "domain": "example.com",
            "subdomains": ["www", "mail"],
            "tags": ["cms"],
            "data": [
                { "subdomain": "www", "type": "A", "value": "93.184.216.34" },
                { "subdomain": "", "type": "MX", "value": "mail.example.com" }
            ]
        }))
        .unwrap();
        assert_eq!(info.subdomains.len(), 2);
        assert_eq!(info.data[0].record_type, "A");
        assert!(info.resolution.is_none());
    }
}
