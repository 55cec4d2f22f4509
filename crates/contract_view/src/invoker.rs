// Copyright (C) 2025 The AElf Contract View Project.
//
// invoker.rs file belongs to the aelf-contract-view project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Uniform invocation over resolved methods.
//!
//! One surface for both method categories: reads execute without a
//! transaction; writes construct, sign and broadcast one. Argument validation
//! happens structurally against the method descriptor before anything touches
//! the network.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tracing::debug;

use aelf_chain_client::{CallArgs, ChainClient, TransactionStatus};
use aelf_wallet::Account;

use crate::config::ConfirmationPolicy;
use crate::descriptor::MethodDescriptor;
use crate::error::{Error, Result};
use crate::resolver::{ResolvedContract, SharedState};

/// Result of a read invocation. No transaction is ever involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResult {
    pub value: Value,
}

/// How far a write got by the time it returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// The node acknowledged the broadcast.
    Broadcast,
    /// The transaction was observed mined (confirmation polling enabled).
    Confirmed,
}

/// Result of a write invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    pub transaction_id: String,
    pub confirmation: ConfirmationStatus,
}

/// One async mutex per signing identity, shared by every invoker of a
/// resolver: concurrent writes through the same identity would race on the
/// node-side nonce/sequence.
#[derive(Clone, Default)]
pub(crate) struct WriteLocks {
    inner: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl WriteLocks {
    fn for_identity(&self, address: String) -> Arc<tokio::sync::Mutex<()>> {
        self.inner.lock().entry(address).or_default().clone()
    }
}

/// The uniform call surface over resolved methods.
pub struct Invoker<C: ChainClient + 'static> {
    client: Arc<C>,
    confirmation: ConfirmationPolicy,
    /// Present on resolver-bound invokers; used to refuse invocations while
    /// a resolution session is pending.
    pending: Option<Arc<RwLock<SharedState>>>,
    write_locks: WriteLocks,
}

impl<C: ChainClient + 'static> Invoker<C> {
    /// A standalone invoker. Without a resolver to consult it never reports
    /// [`Error::ResolutionPending`].
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            confirmation: ConfirmationPolicy::default(),
            pending: None,
            write_locks: WriteLocks::default(),
        }
    }

    pub fn with_confirmation(mut self, confirmation: ConfirmationPolicy) -> Self {
        self.confirmation = confirmation;
        self
    }

    pub(crate) fn bound(
        client: Arc<C>,
        confirmation: ConfirmationPolicy,
        pending: Arc<RwLock<SharedState>>,
        write_locks: WriteLocks,
    ) -> Self {
        Self {
            client,
            confirmation,
            pending: Some(pending),
            write_locks,
        }
    }

    /// Executes a read method. Never constructs or broadcasts a transaction.
    pub async fn invoke_read(
        &self,
        contract: &ResolvedContract,
        method: &MethodDescriptor,
        args: &CallArgs,
    ) -> Result<ReadResult> {
        self.ensure_enabled()?;
        validate_args(method, args)?;

        let value = self
            .client
            .call_read(&contract.handle, &method.name, args)
            .await
            .map_err(Error::from_read)?;
        Ok(ReadResult { value })
    }

    /// Constructs, signs and broadcasts a transaction for a write method.
    /// Returns after broadcast acknowledgment, or after the transaction is
    /// mined when the confirmation policy says to wait.
    pub async fn invoke_write(
        &self,
        contract: &ResolvedContract,
        method: &MethodDescriptor,
        args: &CallArgs,
        identity: Option<&Account>,
    ) -> Result<WriteResult> {
        self.ensure_enabled()?;
        validate_args(method, args)?;
        let identity = identity.ok_or(Error::MissingIdentity)?;

        let lock = self.write_locks.for_identity(identity.address().to_string());
        let _guard = lock.lock().await;

        let transaction_id = self
            .client
            .send_transaction(&contract.handle, &method.name, args, identity)
            .await
            .map_err(Error::from_write)?;
        debug!(method = %method.name, %transaction_id, "write broadcast");

        let confirmation = if self.confirmation.wait {
            self.await_confirmation(contract, &transaction_id).await?
        } else {
            ConfirmationStatus::Broadcast
        };

        Ok(WriteResult {
            transaction_id,
            confirmation,
        })
    }

    /// Invocation is refused while the contract is being (re)resolved; the
    /// caller surfaces this as a temporarily-disabled contract, not a
    /// failure.
    fn ensure_enabled(&self) -> Result<()> {
        if let Some(shared) = &self.pending {
            if shared.read().loading {
                return Err(Error::ResolutionPending);
            }
        }
        Ok(())
    }

    async fn await_confirmation(
        &self,
        contract: &ResolvedContract,
        transaction_id: &str,
    ) -> Result<ConfirmationStatus> {
        for _ in 0..self.confirmation.max_polls {
            let status = self
                .client
                .transaction_result(contract.handle.endpoint(), transaction_id)
                .await
                .map_err(Error::from_read)?;
            match status {
                TransactionStatus::Mined => return Ok(ConfirmationStatus::Confirmed),
                TransactionStatus::Failed(reason) => return Err(Error::BroadcastRejected(reason)),
                TransactionStatus::Pending => {
                    tokio::time::sleep(self.confirmation.poll_interval).await
                }
            }
        }
        // still only broadcast-acknowledged after the polling budget
        Ok(ConfirmationStatus::Broadcast)
    }
}

/// Checks the supplied argument mapping against the descriptor: the key set
/// must match the input field names exactly, and each value must structurally
/// fit its field type. Nothing is coerced, dropped or defaulted.
fn validate_args(method: &MethodDescriptor, args: &CallArgs) -> Result<()> {
    let missing: Vec<String> = method
        .input_fields
        .iter()
        .filter(|f| !args.contains_key(&f.name))
        .map(|f| f.name.clone())
        .collect();
    let unexpected: Vec<String> = args
        .keys()
        .filter(|k| !method.input_fields.iter().any(|f| &f.name == *k))
        .cloned()
        .collect();
    let mistyped: Vec<String> = method
        .input_fields
        .iter()
        .filter(|f| {
            args.get(&f.name)
                .is_some_and(|value| !f.field_type.accepts(value))
        })
        .map(|f| f.name.clone())
        .collect();

    if missing.is_empty() && unexpected.is_empty() && mistyped.is_empty() {
        Ok(())
    } else {
        Err(Error::ArgumentMismatch {
            method: method.name.clone(),
            missing,
            unexpected,
            mistyped,
        })
    }
}
