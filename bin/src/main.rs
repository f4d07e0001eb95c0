//! aquameter CLI - prepaid water account monitor.

use std::time::Duration;

use anyhow::Result;
use aquameter_lib::{
    Account, ClientConfig, DEFAULT_CID, DEFAULT_CLIENT_CODE, DEFAULT_CLIENT_TYPE,
};
use clap::{Parser, Subcommand};

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "aquameter")]
#[command(about = "Prepaid water account monitor for the utility's payment API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Water account client code
    #[arg(long, global = true, default_value = DEFAULT_CLIENT_CODE)]
    client_code: String,

    /// Client type code (e.g. IC)
    #[arg(long, global = true, default_value = DEFAULT_CLIENT_TYPE)]
    client_type: String,

    /// Secondary cid credential
    #[arg(long, global = true, default_value = DEFAULT_CID)]
    cid: String,

    /// Override the payment API endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 120)]
    timeout: u64,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one fetch-and-estimate cycle and print the result
    Query {
        /// Print the estimate as JSON
        #[arg(long)]
        json: bool,
    },

    /// Poll on a fixed interval, retaining the last known estimate
    Watch {
        /// Seconds between refreshes
        #[arg(short, long, default_value_t = 86_400)]
        interval: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let account = Account::new(cli.client_code, cli.client_type, cli.cid)?;
    let mut config = ClientConfig {
        timeout: Duration::from_secs(cli.timeout),
        ..ClientConfig::default()
    };
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    match cli.command {
        Commands::Query { json } => commands::query::query(account, config, json).await,
        Commands::Watch { interval } => {
            commands::watch::watch(account, config, Duration::from_secs(interval)).await
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
