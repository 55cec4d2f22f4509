// Copyright (C) 2025 The AElf Contract View Project.
//
// error.rs file belongs to the aelf-contract-view project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use thiserror::Error;

/// Result type for chain access operations
pub type Result<T> = std::result::Result<T, ChainError>;

/// Errors produced at the wire boundary.
///
/// Variants carry stringified causes so they stay cheap to clone and publish
/// through snapshots and event channels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    /// The endpoint could not be reached at all (DNS, connect, timeout,
    /// invalid URL).
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    /// The node answered but refused the request.
    #[error("rejected by node: {0}")]
    Rejected(String),

    /// The contract's published interface was missing or could not be decoded.
    #[error("malformed contract metadata: {0}")]
    MalformedMetadata(String),

    /// The node answered with a body this client could not decode.
    #[error("malformed node response: {0}")]
    MalformedResponse(String),

    /// Transaction construction or signing failed before anything was sent.
    #[error("signing failed: {0}")]
    Signing(String),
}
