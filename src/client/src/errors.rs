//! Error types for the client crate.

use thiserror::Error;

/// Errors that can occur in the client crate.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Error when a network operation fails.
    #[error("Network error: {0}")]
    Network(String),

    /// Error when the node reports a JSON-RPC level error.
    #[error("Node returned error: {0}")]
    Rpc(String),

    /// Error when a request to the node yields an unusable response.
    #[error("Node request failed: {0}")]
    NodeRequestFailed(String),

    /// Error when an address is invalid.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Error when an amount is invalid.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Error when a transfer cannot be constructed.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Error when a secret key is invalid.
    #[error("Invalid secret key: {0}")]
    InvalidSecretKey(String),

    /// Error when key derivation fails.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
}
