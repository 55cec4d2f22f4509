// Copyright (C) 2025 The AElf Contract View Project.
//
// client.rs file belongs to the aelf-contract-view project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! The chain access capability interface.

use async_trait::async_trait;
use serde_json::Value;

use aelf_wallet::Account;

use crate::error::Result;
use crate::interface::{ChainStatus, ContractInterface};

/// Arguments of a contract call, keyed by input field name.
pub type CallArgs = serde_json::Map<String, Value>;

/// Broadcast-side status of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Known to the node but not yet included in a block.
    Pending,
    /// Included in a block.
    Mined,
    /// Rejected or reverted after broadcast.
    Failed(String),
}

/// An opaque handle to a contract bound on a specific endpoint.
///
/// Carries the interface fetched at bind time and, optionally, the identity
/// calls through this handle are signed with. Consumers treat it as opaque
/// except for [`BoundContract::interface`], which feeds descriptor
/// extraction.
#[derive(Debug, Clone)]
pub struct BoundContract {
    endpoint: String,
    address: String,
    interface: ContractInterface,
    signer: Option<Account>,
}

impl BoundContract {
    pub fn new(
        endpoint: impl Into<String>,
        address: impl Into<String>,
        interface: ContractInterface,
        signer: Option<Account>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            address: address.into(),
            interface,
            signer,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn interface(&self) -> &ContractInterface {
        &self.interface
    }

    pub fn signer(&self) -> Option<&Account> {
        self.signer.as_ref()
    }
}

/// Narrow interface to a chain node.
///
/// Everything the resolution and invocation layer needs from a chain, and
/// nothing more: status lookup, contract binding, read calls and transaction
/// sends. Implementations own all wire encoding. The endpoint is always an
/// explicit parameter; implementations hold no ambient notion of a "current"
/// endpoint.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Queries the status of the chain behind `endpoint`.
    async fn get_chain_status(&self, endpoint: &str) -> Result<ChainStatus>;

    /// Binds a contract at `address`, fetching its published interface.
    /// Calls through the returned handle are signed with `signer` when one is
    /// given.
    async fn bind_contract(
        &self,
        endpoint: &str,
        address: &str,
        signer: Option<&Account>,
    ) -> Result<BoundContract>;

    /// Executes a side-effect-free call. Never broadcasts a transaction.
    async fn call_read(
        &self,
        contract: &BoundContract,
        method: &str,
        args: &CallArgs,
    ) -> Result<Value>;

    /// Constructs, signs and broadcasts a transaction; returns its id after
    /// the node acknowledged the broadcast.
    async fn send_transaction(
        &self,
        contract: &BoundContract,
        method: &str,
        args: &CallArgs,
        signer: &Account,
    ) -> Result<String>;

    /// Looks up the broadcast-side status of a sent transaction.
    async fn transaction_result(
        &self,
        endpoint: &str,
        transaction_id: &str,
    ) -> Result<TransactionStatus>;
}
