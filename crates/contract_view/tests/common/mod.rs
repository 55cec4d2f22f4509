//! Shared test support: a scriptable in-memory chain with call counters and
//! completion gates, so resolution and invocation behavior can be pinned
//! down without a node.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{broadcast, Semaphore};

use aelf_contract_view::{
    BoundContract, CallArgs, ChainClient, SessionEvent, SessionId,
};
use aelf_chain_client::{
    ChainError, ChainStatus, ContractInterface, InterfaceMethod, InterfaceParameter,
    TransactionStatus,
};
use aelf_wallet::Account;

pub const GENESIS_ADDRESS: &str = "genesis-contract";
pub const TOKEN_ADDRESS: &str = "token-contract";

/// A recorded contract binding: endpoint, address and signer address.
#[derive(Debug, Clone)]
pub struct RecordedBind {
    pub endpoint: String,
    pub address: String,
    pub signer: Option<String>,
}

pub struct MockChain {
    status: ChainStatus,
    interfaces: Mutex<HashMap<String, ContractInterface>>,
    read_results: Mutex<HashMap<(String, String), Value>>,
    tx_status: Mutex<TransactionStatus>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,

    pub network_calls: AtomicUsize,
    tx_counter: AtomicUsize,
    binds: Mutex<Vec<RecordedBind>>,
    broadcasts: Mutex<Vec<(String, String)>>,
}

impl MockChain {
    pub fn new() -> Self {
        let mut interfaces = HashMap::new();
        interfaces.insert(GENESIS_ADDRESS.to_string(), genesis_interface());
        interfaces.insert(TOKEN_ADDRESS.to_string(), token_interface());
        Self {
            status: ChainStatus {
                chain_id: "AELF".into(),
                genesis_contract_address: GENESIS_ADDRESS.into(),
                best_chain_height: 100,
                best_chain_hash: "feedc0dedeadbeef".into(),
            },
            interfaces: Mutex::new(interfaces),
            read_results: Mutex::new(HashMap::new()),
            tx_status: Mutex::new(TransactionStatus::Mined),
            gates: Mutex::new(HashMap::new()),
            network_calls: AtomicUsize::new(0),
            tx_counter: AtomicUsize::new(0),
            binds: Mutex::new(Vec::new()),
            broadcasts: Mutex::new(Vec::new()),
        }
    }

    /// Deploys a contract interface at `address`.
    pub fn install_contract(&self, address: &str, interface: ContractInterface) {
        self.interfaces.lock().insert(address.into(), interface);
    }

    /// Removes a deployed contract; subsequent binds of `address` fail.
    pub fn remove_contract(&self, address: &str) {
        self.interfaces.lock().remove(address);
    }

    /// Scripts the value a read of (`address`, `method`) returns.
    pub fn set_read_result(&self, address: &str, method: &str, value: Value) {
        self.read_results
            .lock()
            .insert((address.into(), method.into()), value);
    }

    /// Scripts the status reported for any broadcast transaction.
    pub fn set_transaction_status(&self, status: TransactionStatus) {
        *self.tx_status.lock() = status;
    }

    /// Installs a completion gate: binds against `endpoint` block until
    /// [`release`](Self::release) grants a permit.
    pub fn gate(&self, endpoint: &str) {
        self.gates
            .lock()
            .insert(endpoint.into(), Arc::new(Semaphore::new(0)));
    }

    /// Lets one gated bind on `endpoint` proceed.
    pub fn release(&self, endpoint: &str) {
        if let Some(gate) = self.gates.lock().get(endpoint) {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> usize {
        self.network_calls.load(Ordering::SeqCst)
    }

    pub fn binds(&self) -> Vec<RecordedBind> {
        self.binds.lock().clone()
    }

    /// Broadcast transactions as (method, signer address) pairs.
    pub fn broadcasts(&self) -> Vec<(String, String)> {
        self.broadcasts.lock().clone()
    }

    async fn pass_gate(&self, endpoint: &str) {
        let gate = self.gates.lock().get(endpoint).cloned();
        if let Some(gate) = gate {
            let permit = gate.acquire().await.expect("gate closed");
            permit.forget();
        }
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn get_chain_status(&self, _endpoint: &str) -> Result<ChainStatus, ChainError> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.status.clone())
    }

    async fn bind_contract(
        &self,
        endpoint: &str,
        address: &str,
        signer: Option<&Account>,
    ) -> Result<BoundContract, ChainError> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        self.binds.lock().push(RecordedBind {
            endpoint: endpoint.into(),
            address: address.into(),
            signer: signer.map(|s| s.address().to_string()),
        });
        self.pass_gate(endpoint).await;

        let interface = self
            .interfaces
            .lock()
            .get(address)
            .cloned()
            .ok_or_else(|| ChainError::MalformedMetadata(format!("no contract at {address}")))?;
        Ok(BoundContract::new(
            endpoint,
            address,
            interface,
            signer.cloned(),
        ))
    }

    async fn call_read(
        &self,
        contract: &BoundContract,
        method: &str,
        args: &CallArgs,
    ) -> Result<Value, ChainError> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);

        if contract.address() == GENESIS_ADDRESS && method == "GetContractAddressByName" {
            // any well-formed name hash resolves to the token contract
            let hash = args.get("value").and_then(Value::as_str).unwrap_or("");
            if hash.len() == 64 {
                return Ok(Value::String(TOKEN_ADDRESS.into()));
            }
            return Err(ChainError::Rejected("malformed name hash".into()));
        }

        self.read_results
            .lock()
            .get(&(contract.address().to_string(), method.to_string()))
            .cloned()
            .ok_or_else(|| ChainError::Rejected(format!("no read result for {method}")))
    }

    async fn send_transaction(
        &self,
        _contract: &BoundContract,
        method: &str,
        _args: &CallArgs,
        signer: &Account,
    ) -> Result<String, ChainError> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        self.broadcasts
            .lock()
            .push((method.to_string(), signer.address().to_string()));
        let n = self.tx_counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("mock-tx-{n:04}"))
    }

    async fn transaction_result(
        &self,
        _endpoint: &str,
        _transaction_id: &str,
    ) -> Result<TransactionStatus, ChainError> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tx_status.lock().clone())
    }
}

pub fn genesis_interface() -> ContractInterface {
    ContractInterface {
        methods: vec![InterfaceMethod {
            name: "GetContractAddressByName".into(),
            parameters: vec![InterfaceParameter {
                name: "value".into(),
                type_name: "bytes".into(),
            }],
            is_view: Some(true),
        }],
    }
}

pub fn token_interface() -> ContractInterface {
    ContractInterface {
        methods: vec![
            InterfaceMethod {
                name: "GetBalance".into(),
                parameters: vec![
                    InterfaceParameter {
                        name: "owner".into(),
                        type_name: "address".into(),
                    },
                    InterfaceParameter {
                        name: "symbol".into(),
                        type_name: "string".into(),
                    },
                ],
                is_view: Some(true),
            },
            InterfaceMethod {
                name: "Transfer".into(),
                parameters: vec![
                    InterfaceParameter {
                        name: "to".into(),
                        type_name: "address".into(),
                    },
                    InterfaceParameter {
                        name: "amount".into(),
                        type_name: "int64".into(),
                    },
                    InterfaceParameter {
                        name: "symbol".into(),
                        type_name: "string".into(),
                    },
                ],
                is_view: Some(false),
            },
        ],
    }
}

/// A one-method interface, handy for distinguishing contracts in tests.
pub fn marker_interface(method: &str) -> ContractInterface {
    ContractInterface {
        methods: vec![InterfaceMethod {
            name: method.into(),
            parameters: Vec::new(),
            is_view: Some(true),
        }],
    }
}

pub fn args(entries: &[(&str, Value)]) -> CallArgs {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Waits (bounded) for the terminal event of `session`.
pub async fn completion_of(
    events: &mut broadcast::Receiver<SessionEvent>,
    session: SessionId,
) -> SessionEvent {
    let deadline = Duration::from_secs(5);
    loop {
        let event = tokio::time::timeout(deadline, events.recv())
            .await
            .expect("timed out waiting for session completion")
            .expect("event channel closed");
        match &event {
            SessionEvent::Resolved { session: s, .. }
            | SessionEvent::Failed { session: s, .. }
            | SessionEvent::Superseded { session: s } => {
                if *s == session {
                    return event;
                }
            }
            SessionEvent::Started { .. } => {}
        }
    }
}
