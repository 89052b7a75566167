use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use console::style;

use super::formatting::{format_list, format_location, format_ports, risk_badge, severity_badge};
use crate::models::{AlertNotification, Device, ExposureReport, NetworkAlert, Risk};

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|l| Cell::new(l).add_attribute(Attribute::Bold))
        .collect()
}

/// Notice shown instead of a table when a query matches nothing.
pub fn no_results_notice() -> String {
    style("No devices found for your query.").yellow().to_string()
}

/// Main dashboard table: one row per device, risk column from the parallel
/// risk list. Shows at most `per_page` rows and notes the rest.
pub fn device_table(devices: &[Device], risks: &[Risk], per_page: usize) -> String {
    let mut table = base_table();
    table.set_header(header(&["IP", "Location", "OS", "Ports", "Risk"]));

    for (device, index) in devices.iter().zip(0..).take(per_page) {
        table.add_row(vec![
            Cell::new(device.ip()),
            Cell::new(format_location(device.country(), device.city())),
            Cell::new(device.os.as_deref().unwrap_or("Unknown")),
            Cell::new(format_ports(&device.ports)),
            Cell::new(risk_badge(risks.get(index))),
        ]);
    }

    let mut out = table.to_string();
    if devices.len() > per_page {
        out.push_str(&format!(
            "\n{}",
            style(format!("… and {} more", devices.len() - per_page)).dim()
        ));
    }
    out
}

/// Expanded panel for one device: hostnames, domains, services,
/// vulnerabilities, and optionally the raw banners.
pub fn device_detail(device: &Device, risk: Option<&Risk>, show_banners: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        style("Device").bold().underlined(),
        style(device.ip()).cyan().bold()
    ));
    lines.push(format!("  Hostnames: {}", format_list(&device.hostnames)));
    lines.push(format!("  Domains:   {}", format_list(&device.domains)));

    let services = risk.map(|r| r.services.clone()).unwrap_or_else(|| device.services());
    if services.is_empty() {
        lines.push(format!("  Services:  {}", style("No detailed service information").dim()));
    } else {
        lines.push(format!("  Services:  {}", services.join(", ")));
    }

    if device.vulns.is_empty() {
        lines.push("  No known vulnerabilities".to_string());
    } else {
        lines.push("  Vulnerabilities:".to_string());
        for (id, info) in &device.vulns {
            let summary = info.summary.as_deref().unwrap_or("No details available");
            lines.push(format!(
                "    {} [{}] {}",
                style(id).bold(),
                severity_badge(info.severity),
                summary
            ));
        }
    }

    if show_banners && !device.data.is_empty() {
        lines.push("  Banners:".to_string());
        for banner in &device.data {
            let port = banner.port.map_or("?".to_string(), |p| p.to_string());
            let service = banner.service().unwrap_or("unknown");
            let preview = banner.preview().unwrap_or("").trim_end().to_string();
            lines.push(format!(
                "    {}/{} ({}): {}",
                port,
                banner.transport.as_deref().unwrap_or("?"),
                service,
                style(preview).dim()
            ));
        }
    }

    lines.join("\n")
}

/// Alert listing: ID / Name / Network / Triggers / Created.
pub fn alerts_table(alerts: &[NetworkAlert]) -> String {
    if alerts.is_empty() {
        return style("No network alerts found.").yellow().to_string();
    }

    let mut table = base_table();
    table.set_header(header(&["ID", "Name", "Network", "Triggers", "Created"]));
    for alert in alerts {
        table.add_row(vec![
            Cell::new(alert.id.as_deref().unwrap_or("N/A")),
            Cell::new(alert.name.as_deref().unwrap_or("N/A")),
            Cell::new(if alert.filters.ip.is_empty() {
                "N/A".to_string()
            } else {
                alert.filters.ip.join(", ")
            }),
            Cell::new(if alert.triggers.is_empty() {
                "N/A".to_string()
            } else {
                alert.trigger_names().join(", ")
            }),
            Cell::new(alert.created.as_deref().unwrap_or("N/A")),
        ]);
    }
    table.to_string()
}

/// Notification channels attached to an alert, one line each.
pub fn notifications_list(notifications: &[AlertNotification]) -> String {
    if notifications.is_empty() {
        return style("No triggered notifications.").dim().to_string();
    }
    let mut lines = vec!["Notifications:".to_string()];
    for notification in notifications {
        lines.push(format!(
            "  {} {} ({})",
            style("•").cyan(),
            notification.description.as_deref().unwrap_or("N/A"),
            notification.provider.as_deref().unwrap_or("unknown")
        ));
    }
    lines.join("\n")
}

/// Footprint summary for an exposure report.
pub fn exposure_summary(report: &ExposureReport) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        style("Exposure report for").bold(),
        style(&report.domain).cyan().bold()
    ));
    lines.push(format!("  Internet-facing hosts: {}", report.total_ips));

    if !report.ports.is_empty() {
        let ports: Vec<String> = report
            .ports
            .iter()
            .map(|(port, count)| format!("{} ({})", port, count))
            .collect();
        lines.push(format!("  Open ports:  {}", ports.join(", ")));
    }
    if !report.services.is_empty() {
        let services: Vec<String> = report
            .services
            .iter()
            .map(|(name, count)| format!("{} ({})", name, count))
            .collect();
        lines.push(format!("  Services:    {}", services.join(", ")));
    }
    if !report.countries.is_empty() {
        let countries: Vec<String> = report
            .countries
            .iter()
            .map(|(name, count)| format!("{} ({})", name, count))
            .collect();
        lines.push(format!("  Countries:   {}", countries.join(", ")));
    }
    if report.vulnerabilities.is_empty() {
        lines.push("  No known vulnerabilities".to_string());
    } else {
        lines.push(format!(
            "  Vulnerabilities: {}",
            style(report.vulnerabilities.join(", ")).red()
        ));
    }
    lines.join("\n")
}
