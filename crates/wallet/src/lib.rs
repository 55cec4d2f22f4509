//! Signing identities for aelf-style chains.
//!
//! This crate provides the pieces a chain client needs to authorize
//! transactions:
//! - secp256k1 keypair generation and import
//! - aelf address derivation (double sha256 of the public key, base58check)
//! - recoverable ECDSA signatures over transaction digests

pub mod account;
pub mod error;
pub mod key_pair;

pub use account::{Account, Address};
pub use error::{Result, WalletError};
pub use key_pair::{KeyPair, SIGNATURE_LENGTH};
