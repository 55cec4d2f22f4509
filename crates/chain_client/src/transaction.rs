// Copyright (C) 2025 The AElf Contract View Project.
//
// transaction.rs file belongs to the aelf-contract-view project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Transaction construction and signing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use aelf_wallet::Account;

use crate::client::CallArgs;
use crate::error::{ChainError, Result};
use crate::interface::ChainStatus;

/// Number of leading characters of the best chain hash used as the reference
/// block prefix.
const REF_BLOCK_PREFIX_LENGTH: usize = 8;

/// An aelf-shape transaction envelope.
///
/// Both read execution and broadcast use the same envelope: reads are signed
/// but never broadcast, writes are signed and sent. The transaction id is the
/// hex sha256 digest of the unsigned canonical JSON, so it is known before
/// broadcast and stable under signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    pub from: String,
    pub to: String,
    pub method_name: String,
    /// JSON-encoded call arguments.
    pub params: String,
    /// Reference block fields anchor the transaction to a recent chain state.
    pub ref_block_number: u64,
    pub ref_block_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl Transaction {
    /// Builds an unsigned transaction against the current chain status.
    pub fn build(
        from: Option<&Account>,
        to: &str,
        method: &str,
        args: &CallArgs,
        status: &ChainStatus,
    ) -> Result<Self> {
        let params = serde_json::to_string(args)
            .map_err(|e| ChainError::Signing(format!("cannot encode call args: {e}")))?;
        let prefix = status
            .best_chain_hash
            .get(..REF_BLOCK_PREFIX_LENGTH)
            .unwrap_or(&status.best_chain_hash)
            .to_string();
        Ok(Self {
            from: from.map(|a| a.address().to_string()).unwrap_or_default(),
            to: to.to_string(),
            method_name: method.to_string(),
            params,
            ref_block_number: status.best_chain_height,
            ref_block_prefix: prefix,
            signature: None,
        })
    }

    /// sha256 over the canonical JSON of the unsigned transaction.
    pub fn digest(&self) -> Result<[u8; 32]> {
        let unsigned = Self {
            signature: None,
            ..self.clone()
        };
        let bytes = serde_json::to_vec(&unsigned)
            .map_err(|e| ChainError::Signing(format!("cannot encode transaction: {e}")))?;
        Ok(Sha256::digest(&bytes).into())
    }

    /// The transaction id: hex of the digest.
    pub fn id(&self) -> Result<String> {
        Ok(hex::encode(self.digest()?))
    }

    /// Signs the digest with `signer` and attaches the hex signature.
    pub fn sign(&mut self, signer: &Account) -> Result<()> {
        let digest = self.digest()?;
        self.signature = Some(hex::encode(signer.sign(&digest)));
        Ok(())
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Hex encoding of the full envelope, the shape the node's raw
    /// transaction endpoints expect.
    pub fn to_raw(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)
            .map_err(|e| ChainError::Signing(format!("cannot encode transaction: {e}")))?;
        Ok(hex::encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status() -> ChainStatus {
        ChainStatus {
            chain_id: "AELF".into(),
            genesis_contract_address: "genesis".into(),
            best_chain_height: 4242,
            best_chain_hash: "a1b2c3d4e5f60718".into(),
        }
    }

    fn args() -> CallArgs {
        let mut map = CallArgs::new();
        map.insert("symbol".into(), json!("ELF"));
        map
    }

    #[test]
    fn ref_block_fields_come_from_chain_status() {
        let tx = Transaction::build(None, "contract", "GetBalance", &args(), &status()).unwrap();
        assert_eq!(tx.ref_block_number, 4242);
        assert_eq!(tx.ref_block_prefix, "a1b2c3d4");
    }

    #[test]
    fn id_is_stable_under_signing() {
        let signer = Account::generate();
        let mut tx =
            Transaction::build(Some(&signer), "contract", "Transfer", &args(), &status()).unwrap();
        let unsigned_id = tx.id().unwrap();
        tx.sign(&signer).unwrap();
        assert_eq!(tx.id().unwrap(), unsigned_id);
        assert_eq!(unsigned_id.len(), 64);
    }

    #[test]
    fn signature_verifies_against_signer_key() {
        let signer = Account::generate();
        let mut tx =
            Transaction::build(Some(&signer), "contract", "Transfer", &args(), &status()).unwrap();
        tx.sign(&signer).unwrap();

        let sig_bytes = hex::decode(tx.signature.as_ref().unwrap()).unwrap();
        let sig: [u8; 65] = sig_bytes.try_into().unwrap();
        assert!(signer.key_pair().verify(&tx.digest().unwrap(), &sig));
    }

    #[test]
    fn distinct_args_give_distinct_ids() {
        let a = Transaction::build(None, "contract", "GetBalance", &args(), &status()).unwrap();
        let mut other_args = args();
        other_args.insert("owner".into(), json!("someone"));
        let b = Transaction::build(None, "contract", "GetBalance", &other_args, &status()).unwrap();
        assert_ne!(a.id().unwrap(), b.id().unwrap());
    }
}
