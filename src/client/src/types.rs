//! Account addresses and amount conversions for the TON network.

use crate::errors::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of nano units in one TON.
pub const NANO_PER_TON: u128 = 1_000_000_000;

/// Number of decimal places carried by the nano unit.
const NANO_DECIMALS: usize = 9;

/// A TON account address in raw form: a workchain id and a 32-byte
/// account hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// The workchain the account lives in.
    pub workchain: i32,
    /// The account hash within the workchain.
    pub hash: [u8; 32],
}

impl Address {
    /// Creates an address in the base workchain.
    pub fn new(workchain: i32, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.workchain, hex::encode(self.hash))
    }
}

impl FromStr for Address {
    type Err = ClientError;

    /// Parses the raw `workchain:hex` form, e.g. `0:83dfd5...`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (workchain, hash_hex) = s
            .split_once(':')
            .ok_or_else(|| ClientError::InvalidAddress(format!("missing workchain: {}", s)))?;

        let workchain: i32 = workchain
            .parse()
            .map_err(|_| ClientError::InvalidAddress(format!("invalid workchain: {}", s)))?;

        let hash_bytes = hex::decode(hash_hex)
            .map_err(|_| ClientError::InvalidAddress(format!("invalid account hash: {}", s)))?;
        if hash_bytes.len() != 32 {
            return Err(ClientError::InvalidAddress(format!(
                "invalid account hash length: {} (expected 32)",
                hash_bytes.len()
            )));
        }

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&hash_bytes);

        Ok(Self { workchain, hash })
    }
}

/// Converts a human-readable decimal TON amount to nano units.
///
/// The conversion is exact: at most nine fractional digits are
/// accepted and nothing is rounded.
pub fn to_nano(amount: &str) -> Result<u128, ClientError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(ClientError::InvalidAmount("empty amount".to_string()));
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClientError::InvalidAmount(format!(
            "not a decimal number: {}",
            amount
        )));
    }
    if amount.contains('.') && fraction.is_empty() {
        return Err(ClientError::InvalidAmount(format!(
            "trailing decimal point: {}",
            amount
        )));
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClientError::InvalidAmount(format!(
            "not a decimal number: {}",
            amount
        )));
    }
    if fraction.len() > NANO_DECIMALS {
        return Err(ClientError::InvalidAmount(format!(
            "more than {} decimal places: {}",
            NANO_DECIMALS, amount
        )));
    }

    let whole: u128 = whole
        .parse()
        .map_err(|_| ClientError::InvalidAmount(format!("amount out of range: {}", amount)))?;

    // Pad the fraction out to nine digits before parsing it.
    let mut fraction_digits = fraction.to_string();
    while fraction_digits.len() < NANO_DECIMALS {
        fraction_digits.push('0');
    }
    let fraction: u128 = fraction_digits
        .parse()
        .map_err(|_| ClientError::InvalidAmount(format!("amount out of range: {}", amount)))?;

    whole
        .checked_mul(NANO_PER_TON)
        .and_then(|n| n.checked_add(fraction))
        .ok_or_else(|| ClientError::InvalidAmount(format!("amount out of range: {}", amount)))
}

/// Converts a nano unit amount back to its decimal TON form.
pub fn from_nano(nano: u128) -> String {
    let whole = nano / NANO_PER_TON;
    let fraction = nano % NANO_PER_TON;

    if fraction == 0 {
        return whole.to_string();
    }

    let fraction = format!("{:09}", fraction);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}
