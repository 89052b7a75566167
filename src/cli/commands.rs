use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "riskmap",
    version,
    long_version = concat!(
        env!("CARGO_PKG_VERSION"),
        " (built ",
        env!("BUILD_TIMESTAMP"),
        ")"
    ),
    about = "IoT device risk dashboard for Shodan-style scanning APIs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query devices and render the risk table and map
    Scan(ScanArgs),
    /// Request an on-demand scan of an IP address
    Request(RequestArgs),
    /// Domain lookups against the API's DNS endpoints
    #[command(subcommand)]
    Domain(DomainCommands),
    /// Manage network alerts
    #[command(subcommand)]
    Alerts(AlertCommands),
    /// Generate an exposure report for a domain
    Exposure(ExposureArgs),
    /// Inspect and modify stored preferences
    #[command(subcommand)]
    Settings(SettingsCommands),
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// IP address, range, or search query (falls back to the stored
    /// default query)
    pub query: Option<String>,

    /// Print the raw device payload as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the map view
    #[arg(long)]
    pub no_map: bool,

    /// Show the detail panel for every device
    #[arg(long)]
    pub detail: bool,
}

#[derive(Args, Clone)]
pub struct RequestArgs {
    /// IP address to scan
    pub ip: String,

    /// Print the raw receipt as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Clone)]
pub enum DomainCommands {
    /// DNS records, subdomains and tags for a domain
    Info {
        domain: String,
        #[arg(long)]
        json: bool,
    },
    /// Resolve hostnames to IP addresses
    Resolve {
        #[arg(required = true)]
        hostnames: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Reverse-resolve IP addresses to hostnames
    Reverse {
        #[arg(required = true)]
        ips: Vec<String>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Clone)]
pub enum AlertCommands {
    /// Create a watch rule on a network range
    Create {
        /// Alert name
        name: String,
        /// Network range in CIDR notation
        network: String,
        /// Comma-separated trigger names (defaults apply when omitted)
        #[arg(long, value_delimiter = ',')]
        triggers: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// List configured alerts
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one alert in full
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Clone)]
pub struct ExposureArgs {
    /// Domain to report on
    pub domain: String,

    /// Print the raw report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Clone)]
pub enum SettingsCommands {
    /// Print stored preferences (credential masked)
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Store one preference (value parsed as JSON when possible)
    Set { key: String, value: String },
    /// Switch demo mode on or off
    Demo { state: Toggle },
    /// Delete all stored preferences
    Reset,
    /// Write preferences to a file, credential excluded
    Export {
        /// Destination path (defaults to a dated file in the working
        /// directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Merge preferences from an exported file
    Import { file: PathBuf },
    /// Verify the API credential with a cheap request
    Test,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn as_bool(self) -> bool {
        self == Toggle::On
    }
}
