//! Get-account command for the wallet shell.

use crate::config::CliConfig;
use crate::errors::CliError;
use crate::prompt;
use ton_client::{from_nano, Address, TonClient};
use tracing::info;

/// Runs the get-account command.
pub async fn run(config: &CliConfig) -> Result<(), CliError> {
    let address = prompt::input("TON account address")?;
    let address: Address = address.parse()?;

    let client = TonClient::new(&config.node, config.api_key.clone());
    info!("Fetching balance for {}", address);
    let balance = client.get_balance(&address).await?;
    println!("💎 {}", from_nano(balance));

    Ok(())
}
