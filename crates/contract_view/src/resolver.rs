// Copyright (C) 2025 The AElf Contract View Project.
//
// resolver.rs file belongs to the aelf-contract-view project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Contract resolution sessions.
//!
//! The resolver owns the async lifecycle of `(endpoint, address, identity)`
//! into a bound contract with classified method sets. Every input change
//! starts exactly one new session; of all in-flight sessions, only the most
//! recently requested one may ever publish its result (last-request-wins,
//! regardless of completion order).

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use aelf_chain_client::{hash_name, BoundContract, CallArgs, ChainClient};
use aelf_wallet::Account;

use crate::classifier::{classify, Classified};
use crate::config::{ConfirmationPolicy, ViewConfig};
use crate::descriptor::{describe, MethodDescriptor};
use crate::error::{DiscoveryStep, Error, Result};
use crate::invoker::{Invoker, WriteLocks};
use crate::session::{SessionEvent, SessionId, SessionRequest, SessionState};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// A successfully resolved contract: the bound handle plus its classified
/// method sets. Replaced atomically as a whole; never partially updated.
#[derive(Debug, Clone)]
pub struct ResolvedContract {
    pub address: String,
    pub handle: BoundContract,
    pub read_methods: Vec<MethodDescriptor>,
    pub write_methods: Vec<MethodDescriptor>,
}

impl ResolvedContract {
    /// Looks a method up in either set.
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.read_methods
            .iter()
            .chain(self.write_methods.iter())
            .find(|m| m.name == name)
    }
}

/// What the presentation layer reads: loading flag, last published error and
/// the currently published contract.
#[derive(Debug, Clone, Default)]
pub struct ViewSnapshot {
    pub is_loading: bool,
    pub error: Option<Error>,
    pub contract: Option<ResolvedContract>,
}

pub(crate) struct SharedState {
    /// Sequence number of the most recently requested session. The only
    /// session allowed to publish.
    latest: u64,
    requested: SessionRequest,
    /// Identity generated on demand when the caller supplied none; retained
    /// for the resolver's lifetime.
    generated_identity: Option<Account>,
    pub(crate) loading: bool,
    error: Option<Error>,
    contract: Option<ResolvedContract>,
}

/// The orchestrating component: turns input triples into resolution sessions
/// and publishes results staleness-safely.
pub struct ContractResolver<C: ChainClient + 'static> {
    client: Arc<C>,
    discovery_name: String,
    confirmation: ConfirmationPolicy,
    shared: Arc<RwLock<SharedState>>,
    events: broadcast::Sender<SessionEvent>,
    write_locks: WriteLocks,
}

impl<C: ChainClient + 'static> ContractResolver<C> {
    /// Creates a resolver for the configured initial triple. No session is
    /// started yet; call [`bootstrap`](Self::bootstrap), a setter or
    /// [`resolve`](Self::resolve).
    pub fn new(client: Arc<C>, config: ViewConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let shared = SharedState {
            latest: 0,
            requested: SessionRequest {
                endpoint: config.endpoint,
                address: config.address,
                identity: config.identity,
            },
            generated_identity: None,
            loading: false,
            error: None,
            contract: None,
        };
        Self {
            client,
            discovery_name: config.discovery_name,
            confirmation: config.confirmation,
            shared: Arc::new(RwLock::new(shared)),
            events,
            write_locks: WriteLocks::default(),
        }
    }

    /// Subscribes to session lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Current published state.
    pub fn snapshot(&self) -> ViewSnapshot {
        let s = self.shared.read();
        ViewSnapshot {
            is_loading: s.loading,
            error: s.error.clone(),
            contract: s.contract.clone(),
        }
    }

    /// Lifecycle state of a session, derived from the sequence counter: the
    /// latest session is pending/resolved/failed according to the published
    /// state; any older session is superseded.
    pub fn session_state(&self, session: SessionId) -> SessionState {
        let s = self.shared.read();
        if session.value() < s.latest {
            return SessionState::Superseded;
        }
        if s.loading || session.value() > s.latest {
            return SessionState::Pending;
        }
        if s.error.is_some() {
            SessionState::Failed
        } else {
            SessionState::Resolved
        }
    }

    /// Starts a session for the configured initial triple.
    pub fn bootstrap(&self) -> SessionId {
        let request = self.shared.read().requested.clone();
        self.begin(request)
    }

    /// Starts a session for an explicit triple.
    pub fn resolve(
        &self,
        endpoint: impl Into<String>,
        address: Option<String>,
        identity: Option<Account>,
    ) -> SessionId {
        self.begin(SessionRequest {
            endpoint: endpoint.into(),
            address,
            identity,
        })
    }

    /// Switches the endpoint, keeping address and identity, and starts a new
    /// session.
    pub fn set_endpoint(&self, endpoint: impl Into<String>) -> SessionId {
        let mut request = self.shared.read().requested.clone();
        request.endpoint = endpoint.into();
        self.begin(request)
    }

    /// Switches the contract address (or clears it to re-run default
    /// discovery) and starts a new session.
    pub fn set_contract_address(&self, address: Option<String>) -> SessionId {
        let mut request = self.shared.read().requested.clone();
        request.address = address;
        self.begin(request)
    }

    /// Switches the signing identity and starts a new session.
    pub fn set_identity(&self, identity: Option<Account>) -> SessionId {
        let mut request = self.shared.read().requested.clone();
        request.identity = identity;
        self.begin(request)
    }

    /// An invoker sharing this resolver's client, confirmation policy and
    /// pending state: it refuses invocations while a session is pending and
    /// serializes writes per identity together with every other invoker of
    /// this resolver.
    pub fn invoker(&self) -> Invoker<C> {
        Invoker::bound(
            self.client.clone(),
            self.confirmation.clone(),
            self.shared.clone(),
            self.write_locks.clone(),
        )
    }

    /// The identity sessions run under: the supplied one, else the retained
    /// generated one (created here on first use).
    fn effective_identity(&self, supplied: &Option<Account>) -> Account {
        if let Some(identity) = supplied {
            return identity.clone();
        }
        let mut s = self.shared.write();
        if let Some(identity) = &s.generated_identity {
            return identity.clone();
        }
        let identity = Account::generate();
        info!(address = %identity.address(), "generated session identity");
        s.generated_identity = Some(identity.clone());
        identity
    }

    fn begin(&self, request: SessionRequest) -> SessionId {
        let seq = {
            let mut s = self.shared.write();
            s.latest += 1;
            s.loading = true;
            s.error = None;
            s.requested = request.clone();
            s.latest
        };
        let session = SessionId::new(seq);
        debug!(
            %session,
            endpoint = %request.endpoint,
            address = request.address.as_deref().unwrap_or("<default>"),
            "resolution session started"
        );
        let _ = self.events.send(SessionEvent::Started {
            session,
            request: request.clone(),
        });

        let identity = self.effective_identity(&request.identity);
        let client = self.client.clone();
        let shared = self.shared.clone();
        let events = self.events.clone();
        let discovery_name = self.discovery_name.clone();

        tokio::spawn(async move {
            let outcome =
                resolve_request(client.as_ref(), &discovery_name, &request, &identity).await;

            // The staleness check and the publication happen under one lock:
            // a stale completion can never clobber a newer session's state,
            // whatever order completions arrive in.
            let mut s = shared.write();
            if s.latest != seq {
                drop(s);
                debug!(%session, "superseded; result discarded");
                let _ = events.send(SessionEvent::Superseded { session });
                return;
            }
            match outcome {
                Ok(contract) => {
                    info!(
                        %session,
                        address = %contract.address,
                        reads = contract.read_methods.len(),
                        writes = contract.write_methods.len(),
                        "contract resolved"
                    );
                    s.contract = Some(contract.clone());
                    s.error = None;
                    s.loading = false;
                    drop(s);
                    let _ = events.send(SessionEvent::Resolved { session, contract });
                }
                Err(error) => {
                    warn!(%session, %error, "resolution failed");
                    // the requested triple has no usable contract; drop the
                    // one from the previous triple rather than show it
                    s.contract = None;
                    s.error = Some(error.clone());
                    s.loading = false;
                    drop(s);
                    let _ = events.send(SessionEvent::Failed { session, error });
                }
            }
        });

        session
    }
}

async fn resolve_request<C: ChainClient>(
    client: &C,
    discovery_name: &str,
    request: &SessionRequest,
    identity: &Account,
) -> Result<ResolvedContract> {
    let address = match request.address.as_deref().filter(|a| !a.is_empty()) {
        Some(address) => address.to_string(),
        None => discover_default(client, &request.endpoint, identity, discovery_name).await?,
    };

    let handle = client
        .bind_contract(&request.endpoint, &address, Some(identity))
        .await
        .map_err(Error::from_bind)?;

    let descriptors = describe(handle.interface())?;
    let Classified {
        read_methods,
        write_methods,
    } = classify(descriptors);

    Ok(ResolvedContract {
        address,
        handle,
        read_methods,
        write_methods,
    })
}

/// Resolves the configured canonical name through the zero contract: chain
/// status for the genesis address, bind the zero contract, ask it for the
/// address registered under the name hash. Requires a signed call, which is
/// why the resolver ensures an identity exists first.
async fn discover_default<C: ChainClient>(
    client: &C,
    endpoint: &str,
    identity: &Account,
    name: &str,
) -> Result<String> {
    debug!(endpoint, name, "discovering default contract");

    let status = client
        .get_chain_status(endpoint)
        .await
        .map_err(|e| Error::discovery(DiscoveryStep::ChainStatus, e))?;

    let zero = client
        .bind_contract(endpoint, &status.genesis_contract_address, Some(identity))
        .await
        .map_err(|e| Error::discovery(DiscoveryStep::BindZeroContract, e))?;

    let mut args = CallArgs::new();
    args.insert(
        "value".to_string(),
        Value::String(hex::encode(hash_name(name))),
    );
    let value = client
        .call_read(&zero, "GetContractAddressByName", &args)
        .await
        .map_err(|e| Error::discovery(DiscoveryStep::ResolveName, e))?;

    match value {
        Value::String(address) if !address.is_empty() => Ok(address),
        other => Err(Error::discovery(
            DiscoveryStep::ResolveName,
            format!("no address registered for `{name}` (got {other})"),
        )),
    }
}
