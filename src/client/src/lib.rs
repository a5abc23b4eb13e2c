//! Thin client for the TON network.
//!
//! Wraps the JSON-RPC endpoint of a TON node and handles the local key
//! material needed to open and operate a wallet contract. The heavy
//! lifting (prompting, configuration, confirmation polling) lives in
//! the `ton-cli` crate.

pub mod client;
pub mod errors;
pub mod types;
pub mod wallet;

// Re-export commonly used types and functions
pub use client::TonClient;
pub use errors::ClientError;
pub use types::{from_nano, to_nano, Address};
pub use wallet::{generate_wallet, KeySource, NewWallet, WalletContract};
