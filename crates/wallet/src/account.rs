//! Accounts and aelf address derivation.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, WalletError};
use crate::key_pair::{KeyPair, SIGNATURE_LENGTH};

const CHECKSUM_LENGTH: usize = 4;

/// An aelf address: the double sha256 of the uncompressed public key.
///
/// Rendered as base58 with a 4-byte double-sha256 checksum appended, the same
/// scheme the aelf node and SDKs use for account and contract addresses.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 32]);

impl Address {
    /// Derives the address of a public key.
    pub fn from_public_key(public_key: &[u8]) -> Self {
        let first = Sha256::digest(public_key);
        let second = Sha256::digest(first);
        Self(second.into())
    }

    /// Parses a base58check address string.
    pub fn parse(text: &str) -> Result<Self> {
        let decoded = bs58::decode(text)
            .into_vec()
            .map_err(|e| WalletError::InvalidAddress(e.to_string()))?;
        if decoded.len() != 32 + CHECKSUM_LENGTH {
            return Err(WalletError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                32 + CHECKSUM_LENGTH,
                decoded.len()
            )));
        }
        let (body, checksum) = decoded.split_at(32);
        if checksum != &checksum_of(body)[..] {
            return Err(WalletError::InvalidAddress("checksum mismatch".into()));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(body);
        Ok(Self(bytes))
    }

    /// The raw 32 address bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

fn checksum_of(body: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let first = Sha256::digest(body);
    let second = Sha256::digest(first);
    let mut checksum = [0u8; CHECKSUM_LENGTH];
    checksum.copy_from_slice(&second[..CHECKSUM_LENGTH]);
    checksum
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut data = Vec::with_capacity(32 + CHECKSUM_LENGTH);
        data.extend_from_slice(&self.0);
        data.extend_from_slice(&checksum_of(&self.0));
        f.write_str(&bs58::encode(data).into_string())
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({self})")
    }
}

impl TryFrom<String> for Address {
    type Error = WalletError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}

/// A signing identity: a keypair together with its derived address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    key_pair: KeyPair,
    address: Address,
}

impl Account {
    /// Creates a fresh account with a newly generated keypair.
    pub fn generate() -> Self {
        Self::from_key_pair(KeyPair::generate())
    }

    /// Creates an account from a hex-encoded private key.
    pub fn from_private_key(hex_key: &str) -> Result<Self> {
        Ok(Self::from_key_pair(KeyPair::from_private_key(hex_key)?))
    }

    /// Wraps an existing keypair.
    pub fn from_key_pair(key_pair: KeyPair) -> Self {
        let address = Address::from_public_key(&key_pair.public_key());
        Self { key_pair, address }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// Signs a 32-byte digest with this account's key.
    pub fn sign(&self, digest: &[u8; 32]) -> [u8; SIGNATURE_LENGTH] {
        self.key_pair.sign(digest)
    }
}
