use console::style;
use tracing::info;

use crate::api;
use crate::cli::commands::RequestArgs;
use crate::errors::RiskmapError;
use crate::render;
use crate::settings::SettingsStore;

pub async fn handle_request(args: RequestArgs) -> Result<(), RiskmapError> {
    let settings = SettingsStore::open_default()?.read()?;
    let provider = api::create_provider(&settings)?;
    info!(ip = %args.ip, "Requesting on-demand scan");

    let spinner = render::spinner(format!("Requesting scan of {}…", args.ip));
    let result = provider.request_scan(&args.ip).await;
    spinner.finish_and_clear();
    let receipt = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
        return Ok(());
    }

    println!(
        "{} Scan of {} requested (id: {}, {} address(es))",
        style("✓").green(),
        style(&args.ip).cyan(),
        receipt.id.as_deref().unwrap_or("unknown"),
        receipt.count
    );
    if let Some(credits) = receipt.credits_left {
        println!("{}", style(format!("  {} scan credits left", credits)).dim());
    }
    Ok(())
}
