//! Error types for the wallet shell.

use std::error::Error as StdError;
use std::fmt;
use ton_client::ClientError;

/// Errors that can occur while running a shell command. All of them
/// are caught at the dispatch boundary; none terminates the shell.
#[derive(Debug)]
pub enum CliError {
    /// Error reported by the client library.
    Client(ClientError),

    /// Error reading user input.
    Input(std::io::Error),

    /// Error when a command name is not recognized.
    UnknownCommand(String),

    /// Error when a submitted transaction was not confirmed within the
    /// polling budget.
    ConfirmationTimeout {
        /// Number of seqno reads attempted before giving up.
        attempts: u32,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Client(e) => write!(f, "{}", e),
            CliError::Input(e) => write!(f, "Input error: {}", e),
            CliError::UnknownCommand(name) => write!(f, "Unknown command: {}", name),
            CliError::ConfirmationTimeout { attempts } => write!(
                f,
                "Transaction not confirmed after {} reads; it may still land later",
                attempts
            ),
        }
    }
}

impl StdError for CliError {}

impl From<ClientError> for CliError {
    fn from(error: ClientError) -> Self {
        CliError::Client(error)
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Input(error)
    }
}
