use std::fs;

use console::style;
use serde_json::Value;
use tracing::info;

use crate::api;
use crate::cli::commands::{SettingsCommands, Toggle};
use crate::errors::RiskmapError;
use crate::render;
use crate::settings::settings::{KEY_API_KEY, KEY_DEMO_MODE};
use crate::settings::{mask_key, Settings, SettingsStore};

pub async fn handle_settings(command: SettingsCommands) -> Result<(), RiskmapError> {
    let store = SettingsStore::open_default()?;

    match command {
        SettingsCommands::Show { json } => {
            let settings = store.read()?;
            if json {
                let mut display = settings.clone();
                if let Some(Value::String(key)) = display.get(KEY_API_KEY).cloned() {
                    display.set(KEY_API_KEY, Value::String(mask_key(&key)));
                }
                println!("{}", serde_json::to_string_pretty(&display)?);
                return Ok(());
            }
            if settings.is_empty() {
                println!("{}", style("No stored preferences.").dim());
                return Ok(());
            }
            for (key, value) in settings.iter() {
                if key == KEY_API_KEY {
                    let masked = value.as_str().map(mask_key).unwrap_or_default();
                    println!("{} = {}", style(key).bold(), masked);
                } else {
                    println!("{} = {}", style(key).bold(), value);
                }
            }
        }
        SettingsCommands::Set { key, value } => {
            // "80" becomes a number, "true" a boolean, anything else a string.
            let value: Value =
                serde_json::from_str(&value).unwrap_or(Value::String(value));
            let mut partial = Settings::default();
            partial.set(&key, value);
            store.write(&partial)?;
            println!("{} Saved {}", style("✓").green(), style(&key).bold());
        }
        SettingsCommands::Demo { state } => {
            let enable = state.as_bool();
            let mut partial = Settings::default();
            partial.set(KEY_DEMO_MODE, Value::Bool(enable));
            store.write(&partial)?;
            info!(enable, "Toggled demo mode");
            println!(
                "{} Demo mode {}",
                style("✓").green(),
                if enable { "enabled" } else { "disabled" }
            );
        }
        SettingsCommands::Reset => {
            store.reset()?;
            println!("{} All preferences reset to defaults", style("✓").green());
        }
        SettingsCommands::Export { output } => {
            let path = output.unwrap_or_else(|| SettingsStore::export_filename().into());
            fs::write(&path, store.export()?)?;
            println!(
                "{} Preferences exported to {} (API key excluded)",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        SettingsCommands::Import { file } => {
            let bytes = fs::read(&file)?;
            let merged = store.import(&bytes)?;
            println!(
                "{} Imported {} ({} keys stored)",
                style("✓").green(),
                style(file.display()).cyan(),
                merged.iter().count()
            );
        }
        SettingsCommands::Test => {
            let settings = store.read()?;
            let provider = api::create_provider(&settings)?;
            let spinner = render::spinner("Testing connection…");
            let result = provider.api_info().await;
            spinner.finish_and_clear();

            match result {
                Ok(info) => {
                    println!(
                        "{} API connection successful, key is valid ({} plan)",
                        style("✓").green(),
                        info.plan.as_deref().unwrap_or("unknown")
                    );
                }
                Err(e) => {
                    println!(
                        "{} API connection failed: {}",
                        style("✗").red(),
                        e
                    );
                    return Err(e);
                }
            }
        }
    }
    Ok(())
}
