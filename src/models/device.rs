use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Severity label attached to a vulnerability entry, ordered from most to
/// least severe. Unrecognized labels map to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    pub fn parse(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Unknown,
        }
    }

    /// Contribution of one vulnerability with this severity to the risk score.
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Critical => 10,
            Severity::High => 5,
            Severity::Medium => 3,
            Severity::Low => 1,
            Severity::Unknown => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Unknown => "unknown",
        }
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        Severity::parse(&s)
    }
}

/// Metadata for a single vulnerability identifier. The API sends either a
/// full object or, for some feeds, a bare summary string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "VulnRepr")]
pub struct VulnInfo {
    pub severity: Severity,
    pub summary: Option<String>,
    pub cvss: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VulnRepr {
    Full {
        severity: Option<String>,
        summary: Option<String>,
        cvss: Option<f64>,
    },
    Summary(String),
}

impl From<VulnRepr> for VulnInfo {
    fn from(repr: VulnRepr) -> Self {
        match repr {
            VulnRepr::Full { severity, summary, cvss } => VulnInfo {
                // An entry with no severity label counts as low, not unknown.
                severity: severity.map_or(Severity::Low, |s| Severity::parse(&s)),
                summary,
                cvss,
            },
            VulnRepr::Summary(text) => VulnInfo {
                severity: Severity::Low,
                summary: Some(text),
                cvss: None,
            },
        }
    }
}

/// Geolocation block. Some responses nest it, others flatten the same
/// fields at the top level of the device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country_name: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerMeta {
    pub module: Option<String>,
}

/// One service banner captured on the device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceBanner {
    pub port: Option<u16>,
    pub transport: Option<String>,
    #[serde(rename = "_shodan")]
    pub meta: Option<BannerMeta>,
    pub data: Option<String>,
    pub timestamp: Option<String>,
}

/// Upper bound on raw banner text carried into the detail panel.
const BANNER_PREVIEW_LIMIT: usize = 500;

impl ServiceBanner {
    pub fn service(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.module.as_deref())
    }

    /// Banner text capped for display.
    pub fn preview(&self) -> Option<&str> {
        self.data.as_deref().map(|d| {
            let end = d
                .char_indices()
                .nth(BANNER_PREVIEW_LIMIT)
                .map_or(d.len(), |(i, _)| i);
            &d[..end]
        })
    }
}

/// A scanned device as returned by the device query and host lookup
/// endpoints. Everything beyond the IP is best-effort: fields are absent or
/// null depending on what the scanner observed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub ip_str: Option<String>,
    pub os: Option<String>,
    pub ports: Vec<u16>,
    pub hostnames: Vec<String>,
    pub domains: Vec<String>,
    /// Vulnerability id to metadata. Search matches sometimes carry a bare
    /// list of ids instead of a map; both shapes are accepted.
    #[serde(deserialize_with = "vulns_lenient")]
    pub vulns: BTreeMap<String, VulnInfo>,
    pub location: Option<Location>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country_name: Option<String>,
    pub city: Option<String>,
    pub data: Vec<ServiceBanner>,
}

fn vulns_lenient<'de, D>(deserializer: D) -> Result<BTreeMap<String, VulnInfo>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum VulnsRepr {
        Map(BTreeMap<String, VulnInfo>),
        Ids(Vec<String>),
    }

    Ok(match Option::<VulnsRepr>::deserialize(deserializer)? {
        Some(VulnsRepr::Map(map)) => map,
        Some(VulnsRepr::Ids(ids)) => ids
            .into_iter()
            .map(|id| {
                (
                    id,
                    VulnInfo {
                        severity: Severity::Unknown,
                        summary: None,
                        cvss: None,
                    },
                )
            })
            .collect(),
        None => BTreeMap::new(),
    })
}

impl Device {
    pub fn ip(&self) -> &str {
        self.ip_str.as_deref().unwrap_or("N/A")
    }

    /// Latitude/longitude pair, root-level fields first, then the nested
    /// location block. `None` when neither shape carries both coordinates.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            return Some((lat, lon));
        }
        let loc = self.location.as_ref()?;
        match (loc.latitude, loc.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Country name, preferring the nested location block over root fields.
    pub fn country(&self) -> Option<&str> {
        self.location
            .as_ref()
            .and_then(|l| l.country_name.as_deref())
            .or(self.country_name.as_deref())
    }

    pub fn city(&self) -> Option<&str> {
        self.location
            .as_ref()
            .and_then(|l| l.city.as_deref())
            .or(self.city.as_deref())
    }

    /// Detected service module names, in banner order, deduplicated.
    pub fn services(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for banner in &self.data {
            if let Some(module) = banner.service() {
                if !seen.iter().any(|s| s == module) {
                    seen.push(module.to_string());
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse_case_insensitive() {
        assert_eq!(Severity::parse("CRITICAL"), Severity::Critical);
        assert_eq!(Severity::parse("High"), Severity::High);
        assert_eq!(Severity::parse("weird"), Severity::Unknown);
    }

    #[test]
    fn test_device_coordinates_root_level() {
        let device: Device = serde_json::from_value(serde_json::json!({
            "ip_str": "203.0.113.8",
            "latitude": 37.56,
            "longitude": 126.97
        }))
        .unwrap();
        assert_eq!(device.coordinates(), Some((37.56, 126.97)));
    }

    #[test]
    fn test_device_coordinates_nested_location() {
        let device: Device = serde_json::from_value(serde_json::json!({
            "ip_str": "203.0.113.8",
            "location": { "latitude": 51.5, "longitude": -0.12, "city": "London" }
        }))
        .unwrap();
        assert_eq!(device.coordinates(), Some((51.5, -0.12)));
        assert_eq!(device.city(), Some("London"));
    }

    #[test]
    fn test_device_missing_coordinates() {
        let device: Device = serde_json::from_value(serde_json::json!({
            "ip_str": "192.0.2.44",
            "location": { "country_name": "Brazil" }
        }))
        .unwrap();
        assert_eq!(device.coordinates(), None);
        assert_eq!(device.country(), Some("Brazil"));
    }

    #[test]
    fn test_vuln_info_from_object_and_string() {
        let device: Device = serde_json::from_value(serde_json::json!({
            "ip_str": "198.51.100.23",
            "vulns": {
                "CVE-2021-44228": { "severity": "critical", "summary": "JNDI injection" },
                "CVE-2019-0001": "legacy feed entry",
                "CVE-2020-1234": { "summary": "no severity label" }
            }
        }))
        .unwrap();
        assert_eq!(device.vulns["CVE-2021-44228"].severity, Severity::Critical);
        assert_eq!(device.vulns["CVE-2019-0001"].severity, Severity::Low);
        assert_eq!(
            device.vulns["CVE-2019-0001"].summary.as_deref(),
            Some("legacy feed entry")
        );
        assert_eq!(device.vulns["CVE-2020-1234"].severity, Severity::Low);
    }

    #[test]
    fn test_vulns_as_id_list() {
        let device: Device = serde_json::from_value(serde_json::json!({
            "ip_str": "198.51.100.23",
            "vulns": ["CVE-2021-44228", "CVE-2022-22965"]
        }))
        .unwrap();
        assert_eq!(device.vulns.len(), 2);
        assert_eq!(device.vulns["CVE-2021-44228"].severity, Severity::Unknown);
    }

    #[test]
    fn test_services_deduplicated() {
        let device: Device = serde_json::from_value(serde_json::json!({
            "ip_str": "198.51.100.23",
            "data": [
                { "port": 80, "_shodan": { "module": "http" } },
                { "port": 8080, "_shodan": { "module": "http" } },
                { "port": 22, "_shodan": { "module": "ssh" } },
                { "port": 9999 }
            ]
        }))
        .unwrap();
        assert_eq!(device.services(), vec!["http", "ssh"]);
    }

    #[test]
    fn test_banner_preview_capped() {
        let banner = ServiceBanner {
            data: Some("x".repeat(600)),
            ..Default::default()
        };
        assert_eq!(banner.preview().unwrap().len(), 500);
    }
}
