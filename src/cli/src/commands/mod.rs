//! Commands for the wallet shell.

pub mod create_account;
pub mod get_account;
pub mod transfer;
