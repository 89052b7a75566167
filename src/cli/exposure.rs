use tracing::info;

use crate::api;
use crate::cli::commands::ExposureArgs;
use crate::errors::RiskmapError;
use crate::render;
use crate::settings::SettingsStore;

pub async fn handle_exposure(args: ExposureArgs) -> Result<(), RiskmapError> {
    let settings = SettingsStore::open_default()?.read()?;
    let provider = api::create_provider(&settings)?;
    info!(domain = %args.domain, "Generating exposure report");

    let spinner = render::spinner(format!("Generating report for {}…", args.domain));
    let result = provider
        .exposure_report(&args.domain, settings.max_results() as usize)
        .await;
    spinner.finish_and_clear();
    let report = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("{}", render::exposure_summary(&report));
    Ok(())
}
