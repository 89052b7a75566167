use console::style;
use tracing::{debug, info};

use crate::api::{self, DEFAULT_ALERT_TRIGGERS};
use crate::cli::commands::AlertCommands;
use crate::errors::RiskmapError;
use crate::render;
use crate::settings::SettingsStore;

pub async fn handle_alerts(command: AlertCommands) -> Result<(), RiskmapError> {
    let settings = SettingsStore::open_default()?.read()?;
    let provider = api::create_provider(&settings)?;

    match command {
        AlertCommands::Create {
            name,
            network,
            triggers,
            json,
        } => {
            let triggers = if triggers.is_empty() {
                DEFAULT_ALERT_TRIGGERS.iter().map(|t| t.to_string()).collect()
            } else {
                triggers
            };
            info!(name = %name, network = %network, "Creating network alert");

            let spinner = render::spinner(format!("Creating alert '{}'…", name));
            let result = provider.create_alert(&name, &network, &triggers).await;
            spinner.finish_and_clear();
            let alert = result?;

            if json {
                println!("{}", serde_json::to_string_pretty(&alert)?);
                return Ok(());
            }
            println!(
                "{} Alert '{}' created (id: {})",
                style("✓").green(),
                name,
                alert.id.as_deref().unwrap_or("unknown")
            );
        }
        AlertCommands::List { json } => {
            let spinner = render::spinner("Loading alerts…");
            let result = provider.list_alerts().await;
            spinner.finish_and_clear();
            let alerts = result?;

            if json {
                println!("{}", serde_json::to_string_pretty(&alerts)?);
                return Ok(());
            }
            println!("{}", render::alerts_table(&alerts));
        }
        AlertCommands::Show { id, json } => {
            let spinner = render::spinner(format!("Loading alert {}…", id));
            let details = provider.alert_details(&id).await;
            // A notification lookup failure never hides the alert itself.
            let notifications = match provider.triggered_notifications(&id).await {
                Ok(notifications) => notifications,
                Err(e) => {
                    debug!(id = %id, error = %e, "Notification lookup failed");
                    Vec::new()
                }
            };
            spinner.finish_and_clear();
            let alert = details?;

            if json {
                let combined = serde_json::json!({
                    "alert": alert,
                    "notifications": notifications,
                });
                println!("{}", serde_json::to_string_pretty(&combined)?);
                return Ok(());
            }
            println!("{}", render::alerts_table(std::slice::from_ref(&alert)));
            println!("{}", render::notifications_list(&notifications));
        }
    }
    Ok(())
}
