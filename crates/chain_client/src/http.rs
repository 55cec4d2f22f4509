// Copyright (C) 2025 The AElf Contract View Project.
//
// http.rs file belongs to the aelf-contract-view project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! HTTP implementation of [`ChainClient`] for aelf-style node REST APIs.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use aelf_wallet::Account;

use crate::client::{BoundContract, CallArgs, ChainClient, TransactionStatus};
use crate::error::{ChainError, Result};
use crate::interface::{ChainStatus, ContractInterface};
use crate::transaction::Transaction;

const CHAIN_STATUS_PATH: &str = "/api/blockChain/chainStatus";
const CONTRACT_INTERFACE_PATH: &str = "/api/blockChain/contractInterface";
const EXECUTE_TRANSACTION_PATH: &str = "/api/blockChain/executeTransaction";
const SEND_TRANSACTION_PATH: &str = "/api/blockChain/sendTransaction";
const TRANSACTION_RESULT_PATH: &str = "/api/blockChain/transactionResult";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct RawTransactionDto {
    raw_transaction: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendTransactionDto {
    transaction_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TransactionResultDto {
    status: String,
    #[serde(default)]
    error: Option<String>,
}

/// A [`ChainClient`] over the node's REST surface.
///
/// Stateless with respect to endpoints: the same client serves any number of
/// chains, and every request names its endpoint explicitly.
#[derive(Debug, Clone)]
pub struct HttpChainClient {
    http: reqwest::Client,
}

impl HttpChainClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Uses a preconfigured HTTP client (custom timeouts, proxies, headers).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    fn api_url(endpoint: &str, path: &str) -> Result<Url> {
        // concatenate rather than Url::join so an endpoint with a path
        // prefix (e.g. behind a gateway) keeps it
        let full = format!("{}{}", endpoint.trim_end_matches('/'), path);
        Url::parse(&full)
            .map_err(|e| ChainError::Unreachable(format!("invalid endpoint `{endpoint}`: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ChainError::Unreachable(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T> {
        debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ChainError::Unreachable(e.to_string()))?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChainError::Unreachable(e.to_string()))?;
        if !status.is_success() {
            let detail = if body.is_empty() {
                status.to_string()
            } else {
                format!("{status}: {body}")
            };
            return Err(ChainError::Rejected(detail));
        }
        serde_json::from_str(&body).map_err(|e| ChainError::MalformedResponse(e.to_string()))
    }

    /// Builds and signs the call envelope shared by reads and writes.
    async fn build_envelope(
        &self,
        contract: &BoundContract,
        method: &str,
        args: &CallArgs,
        signer: Option<&Account>,
    ) -> Result<Transaction> {
        let status = self.get_chain_status(contract.endpoint()).await?;
        let mut tx = Transaction::build(signer, contract.address(), method, args, &status)?;
        if let Some(signer) = signer {
            tx.sign(signer)?;
        }
        Ok(tx)
    }
}

impl Default for HttpChainClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    async fn get_chain_status(&self, endpoint: &str) -> Result<ChainStatus> {
        let url = Self::api_url(endpoint, CHAIN_STATUS_PATH)?;
        self.get_json(url).await
    }

    async fn bind_contract(
        &self,
        endpoint: &str,
        address: &str,
        signer: Option<&Account>,
    ) -> Result<BoundContract> {
        let mut url = Self::api_url(endpoint, CONTRACT_INTERFACE_PATH)?;
        url.query_pairs_mut().append_pair("address", address);

        let interface: ContractInterface = self.get_json(url).await.map_err(|e| match e {
            // The interface endpoint answering garbage means the contract's
            // metadata is unusable, not that the node is down.
            ChainError::MalformedResponse(detail) => ChainError::MalformedMetadata(detail),
            other => other,
        })?;

        debug!(endpoint, address, methods = interface.methods.len(), "bound contract");
        Ok(BoundContract::new(endpoint, address, interface, signer.cloned()))
    }

    async fn call_read(
        &self,
        contract: &BoundContract,
        method: &str,
        args: &CallArgs,
    ) -> Result<Value> {
        let tx = self
            .build_envelope(contract, method, args, contract.signer())
            .await?;
        let url = Self::api_url(contract.endpoint(), EXECUTE_TRANSACTION_PATH)?;
        let body = RawTransactionDto {
            raw_transaction: tx.to_raw()?,
        };
        self.post_json(url, &body).await
    }

    async fn send_transaction(
        &self,
        contract: &BoundContract,
        method: &str,
        args: &CallArgs,
        signer: &Account,
    ) -> Result<String> {
        let tx = self
            .build_envelope(contract, method, args, Some(signer))
            .await?;
        let url = Self::api_url(contract.endpoint(), SEND_TRANSACTION_PATH)?;
        let body = RawTransactionDto {
            raw_transaction: tx.to_raw()?,
        };
        let sent: SendTransactionDto = self.post_json(url, &body).await?;
        debug!(method, transaction_id = %sent.transaction_id, "transaction broadcast");
        Ok(sent.transaction_id)
    }

    async fn transaction_result(
        &self,
        endpoint: &str,
        transaction_id: &str,
    ) -> Result<TransactionStatus> {
        let mut url = Self::api_url(endpoint, TRANSACTION_RESULT_PATH)?;
        url.query_pairs_mut()
            .append_pair("transactionId", transaction_id);

        let result: TransactionResultDto = self.get_json(url).await?;
        Ok(match result.status.to_ascii_uppercase().as_str() {
            "MINED" => TransactionStatus::Mined,
            "FAILED" | "NODE_VALIDATION_FAILED" => TransactionStatus::Failed(
                result.error.unwrap_or_else(|| "transaction failed".to_string()),
            ),
            _ => TransactionStatus::Pending,
        })
    }
}
