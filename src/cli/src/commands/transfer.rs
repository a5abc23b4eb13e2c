//! Transfer command for the wallet shell.

use crate::config::CliConfig;
use crate::confirm;
use crate::errors::CliError;
use crate::prompt;
use ton_client::{from_nano, to_nano, Address, TonClient, WalletContract};
use tracing::info;

/// Runs the transfer command.
///
/// Steps run strictly in order: collect input, submit, poll for
/// confirmation, report the balance. A failure at any step propagates
/// to the dispatch boundary; a submitted transfer is not reversible.
pub async fn run(config: &CliConfig) -> Result<(), CliError> {
    // Collect input
    let address_to = prompt::input("Ton account of the recipient")?;
    let amount = prompt::input("Amount")?;
    let private_key = prompt::secret("Private key")?;

    let to: Address = address_to.parse()?;
    let value = to_nano(&amount)?;

    // Submit
    let client = TonClient::new(&config.node, config.api_key.clone());
    let wallet = WalletContract::from_secret_key_hex(&client, &private_key)?;
    let seqno = wallet.seqno().await?;
    info!("Submitting transfer of {} nano to {}", value, to);
    wallet.transfer(&to, value, seqno, false).await?;
    println!("seqno: {}", seqno);

    // Poll for confirmation, then report the resulting balance
    confirm::wait_for_transaction(&wallet, seqno).await?;
    let balance = wallet.balance().await?;
    println!("Done. Balance: {}", from_nano(balance));

    Ok(())
}
