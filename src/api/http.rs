use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use super::provider::ScanProvider;
use super::types::{ApiInfo, ScanReceipt};
use crate::errors::RiskmapError;
use crate::models::{AlertNotification, Device, DomainInfo, ExposureReport, NetworkAlert};

const DEFAULT_BASE_URL: &str = "https://api.shodan.io";

/// HTTP implementation of the scanning API. Endpoints and payload shapes
/// follow the Shodan REST conventions; the credential travels as the `key`
/// query parameter on every request.
#[derive(Debug)]
pub struct HttpProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl HttpProvider {
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, RiskmapError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, RiskmapError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RiskmapError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpProvider {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, RiskmapError> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| RiskmapError::Network(format!("Request to {} failed: {}", path, e)))?;
        check(path, resp).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, RiskmapError> {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| RiskmapError::Network(format!("Request to {} failed: {}", path, e)))?;
        check(path, resp).await
    }
}

/// Map the response to a payload or an error. The API reports failures
/// both through status codes and through an `error` field in the body.
async fn check(path: &str, resp: Response) -> Result<Value, RiskmapError> {
    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(RiskmapError::Authentication("Invalid API key".into()));
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(RiskmapError::RateLimit("API request limit reached".into()));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| RiskmapError::Network(format!("Failed to read response from {}: {}", path, e)))?;
    let data: Option<Value> = serde_json::from_str(&body).ok();

    if let Some(message) = data
        .as_ref()
        .and_then(|d| d.get("error"))
        .and_then(Value::as_str)
    {
        return Err(RiskmapError::Api(message.to_string()));
    }
    // Proxies answer errors with HTML; keep the status in the message
    // instead of complaining about the body.
    if !status.is_success() {
        return Err(RiskmapError::Api(format!(
            "Request to {} failed with status {}",
            path, status
        )));
    }
    let data = data.ok_or_else(|| {
        RiskmapError::Api(format!("Unparseable response from {}", path))
    })?;

    debug!(path, status = %status, "API call succeeded");
    Ok(data)
}

#[async_trait]
impl ScanProvider for HttpProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Device>, RiskmapError> {
        let data = self
            .get_json("/shodan/host/search", &[("query", query)])
            .await?;
        let matches = data
            .get("matches")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let mut devices: Vec<Device> = serde_json::from_value(matches)?;
        devices.truncate(limit);
        Ok(devices)
    }

    async fn host(&self, ip: &str) -> Result<Vec<Device>, RiskmapError> {
        let data = self.get_json(&format!("/shodan/host/{}", ip), &[]).await?;
        let device: Device = serde_json::from_value(data)?;
        Ok(vec![device])
    }

    async fn request_scan(&self, ip: &str) -> Result<ScanReceipt, RiskmapError> {
        let data = self.post_json("/shodan/scan", &json!({ "ips": ip })).await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn domain_info(&self, domain: &str) -> Result<DomainInfo, RiskmapError> {
        let data = self.get_json(&format!("/dns/domain/{}", domain), &[]).await?;
        let mut info: DomainInfo = serde_json::from_value(data)?;
        if info.domain.is_empty() {
            info.domain = domain.to_string();
        }
        // Enrich with a forward resolution; failure here is not fatal.
        match self.resolve(&[domain.to_string()]).await {
            Ok(resolution) => info.resolution = Some(resolution),
            Err(e) => debug!(domain, error = %e, "Resolution enrichment failed"),
        }
        Ok(info)
    }

    async fn resolve(
        &self,
        hostnames: &[String],
    ) -> Result<BTreeMap<String, Option<String>>, RiskmapError> {
        let joined = hostnames.join(",");
        let data = self
            .get_json("/dns/resolve", &[("hostnames", joined.as_str())])
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn reverse(
        &self,
        ips: &[String],
    ) -> Result<BTreeMap<String, Vec<String>>, RiskmapError> {
        let joined = ips.join(",");
        let data = self.get_json("/dns/reverse", &[("ips", joined.as_str())]).await?;
        // Unresolvable addresses come back as null; read them as empty lists.
        let mut out = BTreeMap::new();
        if let Value::Object(entries) = data {
            for (ip, hosts) in entries {
                let hosts: Vec<String> = match hosts {
                    Value::Null => Vec::new(),
                    other => serde_json::from_value(other)?,
                };
                out.insert(ip, hosts);
            }
        }
        Ok(out)
    }

    async fn create_alert(
        &self,
        name: &str,
        network: &str,
        triggers: &[String],
    ) -> Result<NetworkAlert, RiskmapError> {
        let body = json!({
            "name": name,
            "filters": { "ip": network },
            "triggers": triggers,
        });
        let data = self.post_json("/shodan/alert", &body).await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn list_alerts(&self) -> Result<Vec<NetworkAlert>, RiskmapError> {
        let data = self.get_json("/shodan/alert/info", &[]).await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn alert_details(&self, id: &str) -> Result<NetworkAlert, RiskmapError> {
        let data = self
            .get_json(&format!("/shodan/alert/{}/info", id), &[])
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn triggered_notifications(
        &self,
        id: &str,
    ) -> Result<Vec<AlertNotification>, RiskmapError> {
        let data = self
            .get_json(&format!("/shodan/alert/{}/notifier", id), &[])
            .await?;
        Ok(AlertNotification::from_payload(data))
    }

    async fn exposure_report(
        &self,
        domain: &str,
        limit: usize,
    ) -> Result<ExposureReport, RiskmapError> {
        let devices = self.search(&format!("hostname:{}", domain), limit).await?;
        Ok(ExposureReport::from_devices(domain, &devices))
    }

    async fn api_info(&self) -> Result<ApiInfo, RiskmapError> {
        let data = self.get_json("/api-info", &[]).await?;
        Ok(serde_json::from_value(data)?)
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}
