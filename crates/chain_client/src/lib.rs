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

//! Chain access for the contract view core.
//!
//! This crate defines the narrow capability interface the resolution and
//! invocation layer consumes ([`ChainClient`]) together with an HTTP
//! implementation against an aelf-style node REST surface
//! ([`HttpChainClient`]). All wire-level encoding lives here; the core above
//! never sees raw HTTP bodies or transaction bytes.

mod client;
mod error;
mod http;
mod interface;
mod transaction;

pub use client::{BoundContract, CallArgs, ChainClient, TransactionStatus};
pub use error::{ChainError, Result};
pub use http::HttpChainClient;
pub use interface::{ChainStatus, ContractInterface, InterfaceMethod, InterfaceParameter};
pub use transaction::Transaction;

use sha2::{Digest, Sha256};

/// Hashes a canonical contract name the way the zero contract expects it:
/// sha256 over the UTF-8 bytes of the name.
pub fn hash_name(name: &str) -> [u8; 32] {
    Sha256::digest(name.as_bytes()).into()
}
