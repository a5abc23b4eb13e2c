//! Interactive prompt helpers.

use crate::errors::CliError;
use std::io::{self, BufRead, Write};

/// Prompts for a line of input and returns it trimmed.
pub fn input(message: &str) -> Result<String, CliError> {
    print!("{}: ", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(CliError::Input(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed while waiting for input",
        )));
    }

    Ok(line.trim().to_string())
}

/// Prompts for a secret without echoing it back.
pub fn secret(message: &str) -> Result<String, CliError> {
    let value = rpassword::prompt_password(format!("{}: ", message))?;
    Ok(value.trim().to_string())
}

/// Prompts for a yes/no answer; an empty answer picks the default.
pub fn confirm(message: &str, default: bool) -> Result<bool, CliError> {
    let suffix = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        let answer = input(&format!("{} {}", message, suffix))?;
        match answer.to_ascii_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => println!("Please answer y or n (got {:?})", other),
        }
    }
}
