// Copyright (C) 2025 The AElf Contract View Project.
//
// lib.rs file belongs to the aelf-contract-view project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Contract method resolution, classification and invocation.
//!
//! Given an RPC endpoint, a contract address (or none, for default
//! discovery) and an optional signing identity, this crate resolves the
//! contract's callable interface, splits it into read-only and mutating
//! method sets, and offers a uniform invocation surface over both. Input
//! changes are handled as resolution sessions with last-request-wins
//! staleness: a slow resolution for an old input can never overwrite state
//! for a newer one.
//!
//! Presentation is out of scope — embedders subscribe to
//! [`SessionEvent`]s, read [`ViewSnapshot`]s and call back into the resolver
//! and its invokers.

pub mod classifier;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod invoker;
pub mod resolver;
pub mod session;

pub use classifier::{classify, Classified};
pub use config::{
    default_rpcs, init_default_rpcs, ConfirmationPolicy, RpcOption, ViewConfig,
    DEFAULT_DISCOVERY_NAME,
};
pub use descriptor::{describe, FieldDescriptor, FieldType, MethodDescriptor, Mutability};
pub use error::{DiscoveryStep, Error, Result};
pub use invoker::{ConfirmationStatus, Invoker, ReadResult, WriteResult};
pub use resolver::{ContractResolver, ResolvedContract, ViewSnapshot};
pub use session::{SessionEvent, SessionId, SessionRequest, SessionState};

// Commonly needed collaborator types
pub use aelf_chain_client::{BoundContract, CallArgs, ChainClient, HttpChainClient};
pub use aelf_wallet::Account;
