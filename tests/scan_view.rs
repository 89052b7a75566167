use riskmap::api::{self, demo::DemoProvider, ScanProvider};
use riskmap::models::{ExposureReport, Risk};
use riskmap::render::{alerts_table, device_table, no_results_notice, notifications_list, MapLayer};

#[tokio::test]
async fn demo_scan_renders_every_device_but_maps_only_located_ones() {
    let provider = DemoProvider::new();
    let devices = api::query_devices(&provider, "webcam country:KR", 100)
        .await
        .unwrap();
    let risks: Vec<Risk> = devices.iter().map(Risk::assess).collect();

    let table = device_table(&devices, &risks, 25);
    for device in &devices {
        assert!(table.contains(device.ip()), "table is missing {}", device.ip());
    }

    let layer = MapLayer::from_devices(&devices);
    assert_eq!(layer.markers().len(), devices.len() - 1);
    assert!(!layer.render().contains("192.0.2.44"));
}

#[tokio::test]
async fn zero_devices_produce_a_notice_not_a_table() {
    let provider = DemoProvider::new();
    let devices = provider.search("anything", 0).await.unwrap();
    assert!(devices.is_empty());
    // the scan handler prints this instead of an empty table
    assert!(no_results_notice().contains("No devices found"));
}

#[tokio::test]
async fn search_results_are_capped_at_the_limit() {
    let provider = DemoProvider::new();
    let devices = provider.search("anything", 2).await.unwrap();
    assert_eq!(devices.len(), 2);
}

#[tokio::test]
async fn risk_scores_follow_vulnerabilities_and_ports() {
    let provider = DemoProvider::new();
    let devices = provider.search("anything", 100).await.unwrap();
    let by_ip = |ip: &str| {
        devices
            .iter()
            .find(|d| d.ip() == ip)
            .map(Risk::assess)
            .unwrap()
    };

    // high vuln (5) + 8080 (3) = 8 → 40
    assert_eq!(by_ip("198.51.100.23").risk_score, 40);
    // critical (10) + high (5) + telnet (3) + 8080 (3) = 21 → clamped later at 100
    assert_eq!(by_ip("203.0.113.8").risk_score, 100);
    // ftp port only = 3 → 15
    assert_eq!(by_ip("192.0.2.44").risk_score, 15);
}

#[tokio::test]
async fn alert_details_come_with_notification_channels() {
    let provider = DemoProvider::new();
    let alert = provider.alert_details("demo123").await.unwrap();
    let notifications = provider.triggered_notifications("demo123").await.unwrap();

    let rendered = format!(
        "{}\n{}",
        alerts_table(std::slice::from_ref(&alert)),
        notifications_list(&notifications)
    );
    assert!(rendered.contains("Corporate Network"));
    assert!(rendered.contains("Email the security team"));

    // an alert with no channels renders the empty notice instead
    let none = provider.triggered_notifications("demo456").await.unwrap();
    assert!(notifications_list(&none).contains("No triggered notifications."));
}

#[tokio::test]
async fn exposure_report_from_live_search_aggregates_devices() {
    // HttpProvider aggregates client-side; do the same over demo devices to
    // pin the aggregation contract.
    let provider = DemoProvider::new();
    let devices = provider.search("hostname:example.net", 100).await.unwrap();
    let report = ExposureReport::from_devices("example.net", &devices);

    assert_eq!(report.total_ips, 3);
    assert_eq!(report.ports["8080"], 2);
    assert!(report.vulnerabilities.contains(&"CVE-2021-44228".to_string()));
    assert_eq!(report.countries["Germany"], 1);
}
