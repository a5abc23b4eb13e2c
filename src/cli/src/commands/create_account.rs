//! Create-account command for the wallet shell.

use crate::errors::CliError;
use crate::prompt;
use ton_client::{generate_wallet, KeySource};
use uuid::Uuid;

/// Runs the create-account command.
///
/// The generation is purely local; nothing is announced to the network
/// until the new wallet receives or sends funds.
pub async fn run() -> Result<(), CliError> {
    println!("Yes: can be imported to Tonkeeper but less secure");
    println!("No:  cannot be imported to Tonkeeper but more secure");
    let use_mnemonic = prompt::confirm("Use mnemonic", true)?;

    let source = if use_mnemonic {
        KeySource::Mnemonic
    } else {
        // A throwaway high-entropy password nobody ever has to type
        KeySource::Password(format!("{}{}", Uuid::new_v4(), Uuid::new_v4()))
    };

    let wallet = generate_wallet(source)?;
    println!("Address: {}", wallet.address);
    println!("Public key: {}", hex::encode(wallet.keypair.public.to_bytes()));
    println!("Secret key: {}", hex::encode(wallet.keypair.to_bytes()));
    if let Some(mnemonic) = &wallet.mnemonic {
        println!("Mnemonic: {}", mnemonic);
    }

    Ok(())
}
