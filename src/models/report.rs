use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::device::Device;

/// Summary of a domain's internet-facing footprint, aggregated from a
/// hostname search over the scanning API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureReport {
    pub domain: String,
    pub total_ips: usize,
    /// Open port (as string, matching the wire shape) to occurrence count.
    pub ports: BTreeMap<String, usize>,
    pub services: BTreeMap<String, usize>,
    pub countries: BTreeMap<String, usize>,
    pub vulnerabilities: Vec<String>,
    pub timestamps: Vec<String>,
}

impl ExposureReport {
    pub fn from_devices(domain: &str, devices: &[Device]) -> Self {
        let mut report = ExposureReport {
            domain: domain.to_string(),
            total_ips: devices.len(),
            ..Default::default()
        };

        for device in devices {
            for port in &device.ports {
                *report.ports.entry(port.to_string()).or_insert(0) += 1;
            }
            for service in device.services() {
                *report.services.entry(service).or_insert(0) += 1;
            }
            if let Some(country) = device.country() {
                *report.countries.entry(country.to_string()).or_insert(0) += 1;
            }
            for vuln_id in device.vulns.keys() {
                if !report.vulnerabilities.contains(vuln_id) {
                    report.vulnerabilities.push(vuln_id.clone());
                }
            }
            for banner in &device.data {
                if let Some(ts) = &banner.timestamp {
                    if !report.timestamps.contains(ts) {
                        report.timestamps.push(ts.clone());
                    }
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_devices_aggregates_counts() {
        let devices: Vec<Device> = serde_json::from_value(serde_json::json!([
            {
                "ip_str": "198.51.100.1",
                "ports": [80, 443],
                "location": { "country_name": "Germany" },
                "vulns": { "CVE-2021-44228": { "severity": "critical" } },
                "data": [
                    { "port": 80, "_shodan": { "module": "http" }, "timestamp": "t1" }
                ]
            },
            {
                "ip_str": "198.51.100.2",
                "ports": [80],
                "location": { "country_name": "Germany" },
                "vulns": { "CVE-2021-44228": { "severity": "critical" } },
                "data": [
                    { "port": 80, "_shodan": { "module": "http" }, "timestamp": "t2" },
                    { "port": 80, "_shodan": { "module": "http" }, "timestamp": "t1" }
                ]
            }
        ]))
        .unwrap();

        let report = ExposureReport::from_devices("example.com", &devices);
        assert_eq!(report.total_ips, 2);
        assert_eq!(report.ports["80"], 2);
        assert_eq!(report.ports["443"], 1);
        assert_eq!(report.services["http"], 2);
        assert_eq!(report.countries["Germany"], 2);
        // duplicates collapse
        assert_eq!(report.vulnerabilities, vec!["CVE-2021-44228"]);
        assert_eq!(report.timestamps, vec!["t1", "t2"]);
    }

    #[test]
    fn test_from_devices_empty() {
        let report = ExposureReport::from_devices("example.com", &[]);
        assert_eq!(report.total_ips, 0);
        assert!(report.ports.is_empty());
    }
}
