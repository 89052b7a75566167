use console::style;

use crate::api;
use crate::cli::commands::DomainCommands;
use crate::errors::RiskmapError;
use crate::render;
use crate::settings::SettingsStore;

pub async fn handle_domain(command: DomainCommands) -> Result<(), RiskmapError> {
    let settings = SettingsStore::open_default()?.read()?;
    let provider = api::create_provider(&settings)?;

    match command {
        DomainCommands::Info { domain, json } => {
            let spinner = render::spinner(format!("Fetching domain info for {}…", domain));
            let result = provider.domain_info(&domain).await;
            spinner.finish_and_clear();
            let info = result?;

            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
                return Ok(());
            }

            println!("{} {}", style("Domain").bold(), style(&info.domain).cyan().bold());
            if !info.tags.is_empty() {
                println!("  Tags:       {}", info.tags.join(", "));
            }
            if !info.subdomains.is_empty() {
                println!("  Subdomains: {}", info.subdomains.join(", "));
            }
            if !info.ports.is_empty() {
                let ports: Vec<String> = info.ports.iter().map(|p| p.to_string()).collect();
                println!("  Ports:      {}", ports.join(", "));
            }
            for record in &info.data {
                let host = if record.subdomain.is_empty() {
                    info.domain.clone()
                } else {
                    format!("{}.{}", record.subdomain, info.domain)
                };
                println!("  {:<6} {} → {}", record.record_type, host, record.value);
            }
            if let Some(resolution) = &info.resolution {
                for (host, addr) in resolution {
                    match addr {
                        Some(ip) => println!("  Resolves: {} → {}", host, ip),
                        None => println!("  Resolves: {} → {}", host, style("unresolved").dim()),
                    }
                }
            }
        }
        DomainCommands::Resolve { hostnames, json } => {
            let spinner = render::spinner("Resolving hostnames…");
            let result = provider.resolve(&hostnames).await;
            spinner.finish_and_clear();
            let resolved = result?;

            if json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
                return Ok(());
            }
            for (host, addr) in &resolved {
                match addr {
                    Some(ip) => println!("{} → {}", host, style(ip).cyan()),
                    None => println!("{} → {}", host, style("unresolved").dim()),
                }
            }
        }
        DomainCommands::Reverse { ips, json } => {
            let spinner = render::spinner("Reverse-resolving addresses…");
            let result = provider.reverse(&ips).await;
            spinner.finish_and_clear();
            let resolved = result?;

            if json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
                return Ok(());
            }
            for (ip, hosts) in &resolved {
                if hosts.is_empty() {
                    println!("{} → {}", ip, style("no hostnames").dim());
                } else {
                    println!("{} → {}", ip, hosts.join(", "));
                }
            }
        }
    }
    Ok(())
}
