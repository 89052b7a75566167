use std::collections::BTreeMap;

use async_trait::async_trait;

use super::types::{ApiInfo, ScanReceipt};
use crate::errors::RiskmapError;
use crate::models::{AlertNotification, Device, DomainInfo, ExposureReport, NetworkAlert};

/// Triggers applied to a new network alert when the caller names none.
pub const DEFAULT_ALERT_TRIGGERS: [&str; 4] = ["malware", "vulnerable", "open_database", "iot"];

/// The external scanning API. One implementation speaks HTTP to the real
/// service, another serves canned fixtures for demo mode.
#[async_trait]
pub trait ScanProvider: Send + Sync + std::fmt::Debug {
    /// Free-text device search, capped at `limit` results.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Device>, RiskmapError>;

    /// Direct host lookup for a single IP address.
    async fn host(&self, ip: &str) -> Result<Vec<Device>, RiskmapError>;

    /// Ask the scanner to visit an IP on demand.
    async fn request_scan(&self, ip: &str) -> Result<ScanReceipt, RiskmapError>;

    /// DNS-level information for a domain.
    async fn domain_info(&self, domain: &str) -> Result<DomainInfo, RiskmapError>;

    /// Forward resolution; unresolvable hostnames map to `None`.
    async fn resolve(
        &self,
        hostnames: &[String],
    ) -> Result<BTreeMap<String, Option<String>>, RiskmapError>;

    /// Reverse resolution of IP addresses to hostnames.
    async fn reverse(
        &self,
        ips: &[String],
    ) -> Result<BTreeMap<String, Vec<String>>, RiskmapError>;

    async fn create_alert(
        &self,
        name: &str,
        network: &str,
        triggers: &[String],
    ) -> Result<NetworkAlert, RiskmapError>;

    async fn list_alerts(&self) -> Result<Vec<NetworkAlert>, RiskmapError>;

    async fn alert_details(&self, id: &str) -> Result<NetworkAlert, RiskmapError>;

    /// Notification channels attached to an alert.
    async fn triggered_notifications(
        &self,
        id: &str,
    ) -> Result<Vec<AlertNotification>, RiskmapError>;

    /// Footprint summary for a domain, aggregated from a hostname search.
    async fn exposure_report(
        &self,
        domain: &str,
        limit: usize,
    ) -> Result<ExposureReport, RiskmapError>;

    /// Cheap call used to verify the credential.
    async fn api_info(&self) -> Result<ApiInfo, RiskmapError>;

    /// Provider name for logging.
    fn provider_name(&self) -> &str;
}
