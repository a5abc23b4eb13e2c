//! Interactive command line wallet for the TON network.

mod commands;
mod config;
mod confirm;
mod errors;
mod prompt;
mod shell;
mod spinner;

use anyhow::Result;
use colored::Colorize;
use config::{CliConfig, Overrides};
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the wallet shell.
#[derive(Debug, StructOpt)]
#[structopt(name = "ton-cli", about = "Interactive wallet for the TON network")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// toncenter.com API key
    #[structopt(long = "api-key")]
    api_key: Option<String>,

    /// TON REST API endpoint (full URL, including protocol, port and path)
    #[structopt(short, long)]
    node: Option<String>,

    /// Show debug logs
    #[structopt(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let opt = Opt::from_args();

    // Load configuration
    let config = CliConfig::load(
        opt.config.as_deref(),
        Overrides {
            api_key: opt.api_key,
            node: opt.node,
            debug: opt.debug,
        },
    )?;

    // Initialize logging
    let filter = if config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Refuse the public endpoint without an API key
    if config.needs_api_key() {
        eprintln!(
            "{}",
            "toncenter.com's API requires an API key to work properly. Obtain one at https://t.me/tonapibot"
                .yellow()
        );
        return Ok(());
    }

    shell::run(&config).await
}
