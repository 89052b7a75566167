use serde::{Deserialize, Serialize};

/// Receipt returned when an on-demand scan is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanReceipt {
    pub id: Option<String>,
    pub count: u32,
    pub credits_left: Option<u32>,
}

/// Account/plan details, used for the connection test.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiInfo {
    pub plan: Option<String>,
    pub query_credits: Option<u32>,
    pub scan_credits: Option<u32>,
}
