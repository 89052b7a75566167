use console::style;

use crate::models::{Risk, RiskLevel, Severity};

/// Colored risk badge for a table cell; `None` renders as a dim N/A.
pub fn risk_badge(risk: Option<&Risk>) -> String {
    match risk {
        Some(r) => {
            let text = r.risk_score.to_string();
            match r.level() {
                RiskLevel::Critical => style(text).red().bold().to_string(),
                RiskLevel::Elevated => style(text).yellow().bold().to_string(),
                RiskLevel::Moderate => style(text).cyan().to_string(),
                RiskLevel::Low => style(text).green().to_string(),
            }
        }
        None => style("N/A").dim().to_string(),
    }
}

pub fn severity_badge(severity: Severity) -> String {
    let text = severity.label();
    match severity {
        Severity::Critical => style(text).red().bold().to_string(),
        Severity::High => style(text).yellow().to_string(),
        Severity::Medium => style(text).cyan().to_string(),
        Severity::Low => style(text).green().to_string(),
        Severity::Unknown => style(text).dim().to_string(),
    }
}

/// Comma-joined port list, or N/A when nothing is open.
pub fn format_ports(ports: &[u16]) -> String {
    if ports.is_empty() {
        "N/A".to_string()
    } else {
        ports
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

/// "country / city" with per-part fallbacks, as the dashboard shows it.
pub fn format_location(country: Option<&str>, city: Option<&str>) -> String {
    format!(
        "{} / {}",
        country.unwrap_or("Unknown"),
        city.unwrap_or("Unknown")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_badge_absent() {
        assert!(risk_badge(None).contains("N/A"));
    }

    #[test]
    fn test_format_ports() {
        assert_eq!(format_ports(&[]), "N/A");
        assert_eq!(format_ports(&[23, 80]), "23, 80");
    }

    #[test]
    fn test_format_location_fallbacks() {
        assert_eq!(format_location(None, None), "Unknown / Unknown");
        assert_eq!(
            format_location(Some("Germany"), Some("Berlin")),
            "Germany / Berlin"
        );
    }
}
