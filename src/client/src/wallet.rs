//! Wallet key handling and transfer construction.

use crate::client::TonClient;
use crate::errors::ClientError;
use crate::types::Address;
use bip32::{Mnemonic, XPrv};
use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tracing::debug;

/// BIP32 derivation path for mnemonic-backed keys (TON coin type).
const DERIVATION_PATH: &str = "m/44'/607'/0'";

/// How the key material for a new wallet is produced.
pub enum KeySource {
    /// Derive from a fresh BIP39 mnemonic. The phrase is returned so
    /// the wallet can be imported into other software.
    Mnemonic,
    /// Derive from a password. No phrase exists to leak, but the
    /// wallet cannot be imported elsewhere.
    Password(String),
}

/// A freshly generated wallet.
pub struct NewWallet {
    /// The keypair controlling the wallet.
    pub keypair: Keypair,
    /// The derived wallet contract address.
    pub address: Address,
    /// The mnemonic phrase, when one backed the generation.
    pub mnemonic: Option<String>,
}

/// Generates a new wallet from the given key source.
pub fn generate_wallet(source: KeySource) -> Result<NewWallet, ClientError> {
    let (keypair, mnemonic) = match source {
        KeySource::Mnemonic => {
            let mnemonic = Mnemonic::random(OsRng, Default::default());
            let keypair = keypair_from_seed(mnemonic.to_seed("").as_bytes())?;
            (keypair, Some(mnemonic.phrase().to_string()))
        }
        KeySource::Password(password) => (keypair_from_entropy(password.as_bytes())?, None),
    };

    let address = derive_address(&keypair.public);
    Ok(NewWallet {
        keypair,
        address,
        mnemonic,
    })
}

/// Derives an ed25519 keypair from a BIP39 seed via the wallet path.
fn keypair_from_seed(seed: &[u8]) -> Result<Keypair, ClientError> {
    let path = DERIVATION_PATH
        .parse()
        .map_err(|e| ClientError::KeyDerivation(format!("Invalid derivation path: {}", e)))?;
    let root = XPrv::derive_from_path(seed, &path)
        .map_err(|e| ClientError::KeyDerivation(format!("BIP32 derivation failed: {}", e)))?;

    keypair_from_entropy(&root.to_bytes())
}

/// Derives an ed25519 keypair by hashing arbitrary entropy down to a
/// 32-byte seed.
fn keypair_from_entropy(entropy: &[u8]) -> Result<Keypair, ClientError> {
    let mut hasher = Sha256::new();
    hasher.update(entropy);
    let result = hasher.finalize();

    let mut seed = [0u8; 32];
    seed.copy_from_slice(&result);

    let secret = SecretKey::from_bytes(&seed)
        .map_err(|e| ClientError::KeyDerivation(format!("Invalid key material: {}", e)))?;
    let public = PublicKey::from(&secret);

    Ok(Keypair { secret, public })
}

/// Derives the base-workchain address of a wallet contract from its
/// public key.
pub fn derive_address(public: &PublicKey) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(public.as_bytes());
    let result = hasher.finalize();

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);

    Address::new(0, hash)
}

/// A wallet contract handle bound to a client.
pub struct WalletContract<'a> {
    client: &'a TonClient,
    keypair: Keypair,
    address: Address,
}

impl<'a> WalletContract<'a> {
    /// Opens a wallet from raw secret key bytes.
    ///
    /// Accepts either a 32-byte secret key or a 64-byte secret+public
    /// keypair.
    pub fn from_secret_key(client: &'a TonClient, secret_key: &[u8]) -> Result<Self, ClientError> {
        let keypair = match secret_key.len() {
            32 => {
                let secret = SecretKey::from_bytes(secret_key)
                    .map_err(|e| ClientError::InvalidSecretKey(e.to_string()))?;
                let public = PublicKey::from(&secret);
                Keypair { secret, public }
            }
            64 => Keypair::from_bytes(secret_key)
                .map_err(|e| ClientError::InvalidSecretKey(e.to_string()))?,
            len => {
                return Err(ClientError::InvalidSecretKey(format!(
                    "invalid length: {} (expected 32 or 64)",
                    len
                )))
            }
        };

        let address = derive_address(&keypair.public);
        Ok(Self {
            client,
            keypair,
            address,
        })
    }

    /// Opens a wallet from a hex-encoded secret key.
    pub fn from_secret_key_hex(client: &'a TonClient, secret_key: &str) -> Result<Self, ClientError> {
        let bytes = hex::decode(secret_key.trim())
            .map_err(|e| ClientError::InvalidSecretKey(format!("invalid hex: {}", e)))?;
        Self::from_secret_key(client, &bytes)
    }

    /// The address of this wallet contract.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The wallet's public key bytes.
    pub fn public_key(&self) -> [u8; 32] {
        self.keypair.public.to_bytes()
    }

    /// Reads the current seqno of the wallet account.
    pub async fn seqno(&self) -> Result<u32, ClientError> {
        self.client.get_seqno(&self.address).await
    }

    /// Reads the current balance of the wallet account, in nano units.
    pub async fn balance(&self) -> Result<u128, ClientError> {
        self.client.get_balance(&self.address).await
    }

    /// Signs and submits a transfer of `value` nano units to `to`.
    ///
    /// The seqno must be the one read before submission; the node
    /// rejects the message otherwise.
    pub async fn transfer(
        &self,
        to: &Address,
        value: u128,
        seqno: u32,
        bounce: bool,
    ) -> Result<(), ClientError> {
        let body = serde_json::json!({
            "from": self.address.to_string(),
            "to": to.to_string(),
            "value": value,
            "seqno": seqno,
            "bounce": bounce,
        });

        // Sign the canonical body bytes
        let body_bytes = serde_json::to_vec(&body)
            .map_err(|e| ClientError::Transaction(format!("Failed to serialize transfer: {}", e)))?;
        let signature = self.keypair.sign(&body_bytes);

        let message = serde_json::json!({
            "body": body,
            "signature": hex::encode(signature.to_bytes()),
        });

        debug!(
            "Submitting transfer of {} nano from {} to {} at seqno {}",
            value, self.address, to, seqno
        );
        self.client.send_transaction(&message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TonClient {
        TonClient::new("http://localhost:8081/jsonRPC", None)
    }

    #[test]
    fn test_open_from_32_byte_secret() {
        let client = client();
        let wallet = WalletContract::from_secret_key(&client, &[1u8; 32]).unwrap();
        assert_eq!(wallet.address().workchain, 0);

        // Same secret produces the same address
        let again = WalletContract::from_secret_key(&client, &[1u8; 32]).unwrap();
        assert_eq!(wallet.address(), again.address());
    }

    #[test]
    fn test_open_from_64_byte_keypair() {
        let client = client();
        let keypair = keypair_from_entropy(b"fixture").unwrap();
        let secret = keypair.secret.to_bytes();

        let from_pair = WalletContract::from_secret_key(&client, &keypair.to_bytes()).unwrap();
        let from_secret = WalletContract::from_secret_key(&client, &secret).unwrap();
        assert_eq!(from_pair.address(), from_secret.address());
    }

    #[test]
    fn test_open_rejects_bad_key() {
        let client = client();
        assert!(WalletContract::from_secret_key(&client, &[0u8; 31]).is_err());
        assert!(WalletContract::from_secret_key_hex(&client, "not-hex").is_err());
    }

    #[test]
    fn test_generate_mnemonic_wallet() {
        let wallet = generate_wallet(KeySource::Mnemonic).unwrap();
        let mnemonic = wallet.mnemonic.expect("mnemonic-backed wallet has a phrase");
        assert!(mnemonic.split_whitespace().count() >= 12);
        assert_eq!(wallet.address.workchain, 0);
    }

    #[test]
    fn test_generate_password_wallet_is_deterministic() {
        let first = generate_wallet(KeySource::Password("hunter2".to_string())).unwrap();
        let second = generate_wallet(KeySource::Password("hunter2".to_string())).unwrap();
        assert!(first.mnemonic.is_none());
        assert_eq!(first.address, second.address);

        let other = generate_wallet(KeySource::Password("different".to_string())).unwrap();
        assert_ne!(first.address, other.address);
    }
}
