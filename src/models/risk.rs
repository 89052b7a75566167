use serde::Serialize;

use super::device::Device;

/// Ports that raise the score on their own: legacy remote access and the
/// usual unattended-admin suspects.
pub const HIGH_INTEREST_PORTS: [u16; 5] = [21, 22, 23, 2323, 8080];

/// Risk assessment for one device, parallel to the device list.
#[derive(Debug, Clone, Serialize)]
pub struct Risk {
    pub device_id: String,
    pub risk_score: u32,
    pub services: Vec<String>,
    pub vulnerability_count: usize,
    pub port_count: usize,
}

impl Risk {
    /// Score a device: severity weights summed over its vulnerabilities,
    /// plus 3 per high-interest open port, scaled by 5 and clamped to 100.
    pub fn assess(device: &Device) -> Self {
        let mut base: u32 = device.vulns.values().map(|v| v.severity.weight()).sum();
        for port in &device.ports {
            if HIGH_INTEREST_PORTS.contains(port) {
                base += 3;
            }
        }

        Risk {
            device_id: device.ip().to_string(),
            risk_score: (base * 5).min(100),
            services: device.services(),
            vulnerability_count: device.vulns.len(),
            port_count: device.ports.len(),
        }
    }

    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }
}

/// Display band for a risk score, matching the dashboard's badge colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Critical,
    Elevated,
    Moderate,
    Low,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        if score > 75 {
            RiskLevel::Critical
        } else if score > 50 {
            RiskLevel::Elevated
        } else if score > 25 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}
