use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::provider::ScanProvider;
use super::types::{ApiInfo, ScanReceipt};
use crate::errors::RiskmapError;
use crate::models::{AlertNotification, Device, DomainInfo, ExposureReport, NetworkAlert};

/// Offline provider serving canned fixtures. Lets the dashboard be
/// exercised end to end without a credential or network access.
#[derive(Debug)]
pub struct DemoProvider;

impl DemoProvider {
    pub fn new() -> Self {
        DemoProvider
    }

    /// Fixture devices. The last one has no geolocation on purpose, so the
    /// map exclusion path stays visible in demo mode.
    fn devices() -> Vec<Device> {
        serde_json::from_value(json!([
            {
                "ip_str": "198.51.100.23",
                "os": "Linux 3.x",
                "ports": [80, 554, 8080],
                "hostnames": ["cam-23.example.net"],
                "domains": ["example.net"],
                "location": {
                    "latitude": 37.5665,
                    "longitude": 126.978,
                    "country_name": "South Korea",
                    "city": "Seoul"
                },
                "vulns": {
                    "CVE-2018-9995": {
                        "severity": "high",
                        "summary": "DVR authentication bypass via crafted cookie"
                    }
                },
                "data": [
                    { "port": 80, "transport": "tcp", "_shodan": { "module": "http" },
                      "data": "HTTP/1.1 200 OK\r\nServer: Boa/0.94.14rc21\r\n",
                      "timestamp": "2025-06-01T09:12:00" },
                    { "port": 554, "transport": "tcp", "_shodan": { "module": "rtsp" },
                      "data": "RTSP/1.0 200 OK\r\n",
                      "timestamp": "2025-06-01T09:12:05" }
                ]
            },
            {
                "ip_str": "203.0.113.8",
                "os": "Linux 2.6.x",
                "ports": [23, 443, 8080],
                "hostnames": ["gw.example.org"],
                "domains": ["example.org"],
                "latitude": 52.52,
                "longitude": 13.405,
                "country_name": "Germany",
                "city": "Berlin",
                "vulns": {
                    "CVE-2021-44228": {
                        "severity": "critical",
                        "summary": "Log4j JNDI remote code execution"
                    },
                    "CVE-2017-17215": {
                        "severity": "high",
                        "summary": "Router remote code execution via UPnP"
                    }
                },
                "data": [
                    { "port": 23, "transport": "tcp", "_shodan": { "module": "telnet" },
                      "data": "login: ",
                      "timestamp": "2025-06-02T14:40:00" },
                    { "port": 443, "transport": "tcp", "_shodan": { "module": "https" },
                      "data": "HTTP/1.1 401 Unauthorized\r\n",
                      "timestamp": "2025-06-02T14:40:02" }
                ]
            },
            {
                "ip_str": "192.0.2.44",
                "ports": [21],
                "hostnames": [],
                "domains": [],
                "data": [
                    { "port": 21, "transport": "tcp", "_shodan": { "module": "ftp" },
                      "data": "220 FTP server ready\r\n",
                      "timestamp": "2025-06-03T03:05:00" }
                ]
            }
        ]))
        .expect("demo device fixtures are valid")
    }
}

impl Default for DemoProvider {
    fn default() -> Self {
        DemoProvider::new()
    }
}

#[async_trait]
impl ScanProvider for DemoProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Device>, RiskmapError> {
        debug!(query, "Serving demo search results");
        let mut devices = Self::devices();
        devices.truncate(limit);
        Ok(devices)
    }

    async fn host(&self, ip: &str) -> Result<Vec<Device>, RiskmapError> {
        let devices = Self::devices();
        Ok(devices
            .iter()
            .find(|d| d.ip() == ip)
            .cloned()
            .map(|d| vec![d])
            .unwrap_or_else(|| vec![devices[0].clone()]))
    }

    async fn request_scan(&self, _ip: &str) -> Result<ScanReceipt, RiskmapError> {
        Ok(ScanReceipt {
            id: Some("demo123".into()),
            count: 1,
            credits_left: Some(100),
        })
    }

    async fn domain_info(&self, domain: &str) -> Result<DomainInfo, RiskmapError> {
        Ok(serde_json::from_value(json!({
            "domain": domain,
            "subdomains": ["www", "mail", "remote", "login"],
            "tags": ["cms", "e-commerce"],
            "ports": [80, 443, 8080, 25]
        }))?)
    }

    async fn resolve(
        &self,
        hostnames: &[String],
    ) -> Result<BTreeMap<String, Option<String>>, RiskmapError> {
        Ok(hostnames
            .iter()
            .map(|h| (h.clone(), Some("198.51.100.23".to_string())))
            .collect())
    }

    async fn reverse(
        &self,
        ips: &[String],
    ) -> Result<BTreeMap<String, Vec<String>>, RiskmapError> {
        Ok(ips
            .iter()
            .map(|ip| (ip.clone(), vec![format!("host-{}.example.net", ip.replace('.', "-"))]))
            .collect())
    }

    async fn create_alert(
        &self,
        name: &str,
        network: &str,
        _triggers: &[String],
    ) -> Result<NetworkAlert, RiskmapError> {
        Ok(serde_json::from_value(json!({
            "id": "demo123",
            "name": name,
            "filters": { "ip": network }
        }))?)
    }

    async fn list_alerts(&self) -> Result<Vec<NetworkAlert>, RiskmapError> {
        Ok(serde_json::from_value(json!([
            { "id": "demo123", "name": "Corporate Network",
              "filters": { "ip": "198.51.100.0/24" },
              "triggers": { "malware": {}, "open_database": {} },
              "created": "2025-06-07" },
            { "id": "demo456", "name": "IoT Devices",
              "filters": { "ip": "203.0.113.0/24" },
              "triggers": { "iot": {} },
              "created": "2025-06-08" }
        ]))?)
    }

    async fn alert_details(&self, id: &str) -> Result<NetworkAlert, RiskmapError> {
        self.list_alerts()
            .await?
            .into_iter()
            .find(|a| a.id.as_deref() == Some(id))
            .ok_or_else(|| RiskmapError::Api(format!("Alert {} not found", id)))
    }

    async fn triggered_notifications(
        &self,
        id: &str,
    ) -> Result<Vec<AlertNotification>, RiskmapError> {
        if id == "demo123" {
            return Ok(AlertNotification::from_payload(json!({
                "matches": [
                    { "id": "default", "provider": "email",
                      "description": "Email the security team" }
                ]
            })));
        }
        Ok(Vec::new())
    }

    async fn exposure_report(
        &self,
        domain: &str,
        _limit: usize,
    ) -> Result<ExposureReport, RiskmapError> {
        Ok(serde_json::from_value(json!({
            "domain": domain,
            "ports": { "80": 15, "443": 10, "22": 5, "21": 2 },
            "vulnerabilities": ["CVE-2021-44228", "CVE-2022-22965"],
            "services": { "http": 20, "ssh": 5, "ftp": 2 },
            "total_ips": 32
        }))?)
    }

    async fn api_info(&self) -> Result<ApiInfo, RiskmapError> {
        Ok(ApiInfo {
            plan: Some("demo".into()),
            query_credits: Some(100),
            scan_credits: Some(100),
        })
    }

    fn provider_name(&self) -> &str {
        "demo"
    }
}
