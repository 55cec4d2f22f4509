//! secp256k1 keypair with recoverable signatures.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};

use crate::error::{Result, WalletError};

/// Length of a serialized recoverable signature (r || s || recovery id).
pub const SIGNATURE_LENGTH: usize = 65;

/// A secp256k1 keypair.
///
/// aelf transactions are authorized with recoverable ECDSA signatures over the
/// sha256 digest of the serialized transaction, so the public key never needs
/// to travel with the transaction.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generates a fresh keypair from the OS entropy source.
    pub fn generate() -> Self {
        let (secret, public) = SECP256K1.generate_keypair(&mut rand::thread_rng());
        Self { secret, public }
    }

    /// Imports a keypair from a hex-encoded 32-byte private key.
    pub fn from_private_key(hex_key: &str) -> Result<Self> {
        let bytes = hex::decode(hex_key.trim_start_matches("0x"))
            .map_err(|e| WalletError::InvalidPrivateKey(e.to_string()))?;
        let secret = SecretKey::from_slice(&bytes)
            .map_err(|e| WalletError::InvalidPrivateKey(e.to_string()))?;
        let public = PublicKey::from_secret_key(SECP256K1, &secret);
        Ok(Self { secret, public })
    }

    /// The uncompressed 65-byte public key.
    pub fn public_key(&self) -> [u8; 65] {
        self.public.serialize_uncompressed()
    }

    /// Hex encoding of the private key. Handle with care.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret.secret_bytes())
    }

    /// Signs a 32-byte digest, returning a 65-byte recoverable signature.
    pub fn sign(&self, digest: &[u8; 32]) -> [u8; SIGNATURE_LENGTH] {
        let message = Message::from_digest(*digest);
        let signature = SECP256K1.sign_ecdsa_recoverable(&message, &self.secret);
        let (recovery_id, compact) = signature.serialize_compact();

        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..64].copy_from_slice(&compact);
        out[64] = recovery_id.to_i32() as u8;
        out
    }

    /// Verifies a recoverable signature by recovering the signer and comparing
    /// it with this keypair's public key.
    pub fn verify(&self, digest: &[u8; 32], signature: &[u8; SIGNATURE_LENGTH]) -> bool {
        let message = Message::from_digest(*digest);
        let Ok(recovery_id) = RecoveryId::from_i32(signature[64] as i32) else {
            return false;
        };
        let Ok(signature) = RecoverableSignature::from_compact(&signature[..64], recovery_id)
        else {
            return false;
        };
        match SECP256K1.recover_ecdsa(&message, &signature) {
            Ok(recovered) => recovered == self.public,
            Err(_) => false,
        }
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the secret half.
        f.debug_struct("KeyPair")
            .field("public", &hex::encode(self.public_key()))
            .finish()
    }
}
