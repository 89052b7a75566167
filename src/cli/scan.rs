use console::style;
use tracing::info;

use crate::api;
use crate::cli::commands::ScanArgs;
use crate::errors::RiskmapError;
use crate::models::Risk;
use crate::render;
use crate::settings::SettingsStore;

pub async fn handle_scan(args: ScanArgs) -> Result<(), RiskmapError> {
    let store = SettingsStore::open_default()?;
    let settings = store.read()?;

    let query = args
        .query
        .or_else(|| settings.default_query().map(String::from))
        .ok_or_else(|| {
            RiskmapError::InvalidTarget(
                "Enter an IP address, range, or search query".into(),
            )
        })?;

    let provider = api::create_provider(&settings)?;
    info!(provider = provider.provider_name(), query = %query, "Querying devices");

    let spinner = render::spinner(format!("Scanning {}…", query));
    let result = api::query_devices(
        provider.as_ref(),
        &query,
        settings.max_results() as usize,
    )
    .await;
    spinner.finish_and_clear();
    let devices = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("{}", render::no_results_notice());
        return Ok(());
    }

    let risks: Vec<Risk> = devices.iter().map(Risk::assess).collect();

    println!(
        "{}",
        style(format!("{} devices", devices.len())).bold()
    );
    println!(
        "{}",
        render::device_table(&devices, &risks, settings.results_per_page() as usize)
    );

    // Detail panels: on request, or automatically for a single-host lookup.
    if args.detail || devices.len() == 1 {
        for (device, risk) in devices.iter().zip(&risks) {
            println!();
            println!(
                "{}",
                render::device_detail(device, Some(risk), settings.show_detailed_banners())
            );
        }
    }

    if !args.no_map {
        println!();
        println!("{}", render::MapLayer::from_devices(&devices).render());
    }

    let threshold = settings.risk_threshold();
    let over: Vec<&Risk> = risks
        .iter()
        .filter(|r| u64::from(r.risk_score) > threshold)
        .collect();
    if !over.is_empty() {
        println!();
        println!(
            "{}",
            style(format!(
                "⚠ {} device(s) exceed the risk threshold ({})",
                over.len(),
                threshold
            ))
            .red()
            .bold()
        );
        if settings.email_alerts() {
            if let Some(email) = settings.alert_email() {
                println!(
                    "{}",
                    style(format!("  Email alerts are configured for {}", email)).dim()
                );
            }
        }
    }

    Ok(())
}
