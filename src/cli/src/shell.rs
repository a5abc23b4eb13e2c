//! Interactive command loop.

use crate::commands::{create_account, get_account, transfer};
use crate::config::CliConfig;
use crate::errors::CliError;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::debug;

/// The commands available in the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Transfer,
    CreateAccount,
    GetAccount,
    Exit,
}

impl Command {
    /// All commands, in menu order.
    pub const ALL: [Command; 4] = [
        Command::Transfer,
        Command::CreateAccount,
        Command::GetAccount,
        Command::Exit,
    ];

    /// The name the command is entered as.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Transfer => "ton-transfer",
            Command::CreateAccount => "create-account",
            Command::GetAccount => "get-account",
            Command::Exit => "exit",
        }
    }
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ton-transfer" => Ok(Command::Transfer),
            "create-account" => Ok(Command::CreateAccount),
            "get-account" => Ok(Command::GetAccount),
            "exit" => Ok(Command::Exit),
            other => Err(CliError::UnknownCommand(other.to_string())),
        }
    }
}

/// Runs the shell until the user exits or stdin closes.
///
/// Every command error is caught here, printed to stderr, and the loop
/// continues; only `exit` (or end of input) leaves the shell.
pub async fn run(config: &CliConfig) -> anyhow::Result<()> {
    loop {
        println!();
        println!("Choose Ton network command:");
        for command in Command::ALL {
            println!("  {}", command.name());
        }
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            // stdin closed
            return Ok(());
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e.to_string().red());
                continue;
            }
        };

        if command == Command::Exit {
            return Ok(());
        }

        debug!("Dispatching {}", command.name());
        if let Err(e) = dispatch(command, config).await {
            eprintln!("{}", e.to_string().red());
        }
    }
}

async fn dispatch(command: Command, config: &CliConfig) -> Result<(), CliError> {
    match command {
        Command::Transfer => transfer::run(config).await,
        Command::CreateAccount => create_account::run().await,
        Command::GetAccount => get_account::run(config).await,
        // Handled by the loop before dispatch
        Command::Exit => Ok(()),
    }
}
