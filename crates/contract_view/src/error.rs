//! Error taxonomy of the resolution and invocation core.

use thiserror::Error;

use aelf_chain_client::ChainError;

/// Result type for resolution and invocation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Where default contract discovery failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStep {
    /// Querying the chain status for the genesis contract address.
    ChainStatus,
    /// Binding the zero contract.
    BindZeroContract,
    /// Resolving the canonical name through the zero contract.
    ResolveName,
}

impl std::fmt::Display for DiscoveryStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ChainStatus => "chain status lookup",
            Self::BindZeroContract => "zero contract binding",
            Self::ResolveName => "name resolution",
        })
    }
}

/// Errors surfaced by the resolver and the invoker.
///
/// Resolution-phase errors are captured on the session and published once via
/// the snapshot and the event channel; invocation-phase errors are returned to
/// the invoking caller. Superseded sessions never surface an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Network-level failure talking to the RPC endpoint.
    #[error("endpoint unreachable: {0}")]
    EndpointUnreachable(String),

    /// The bound contract exposes no retrievable interface.
    #[error("contract interface unavailable: {0}")]
    DescriptorUnavailable(String),

    /// Caller-supplied arguments do not match the method signature. Raised
    /// before any network call; nothing is coerced silently.
    #[error(
        "argument mismatch for `{method}`: missing {missing:?}, unexpected {unexpected:?}, mistyped {mistyped:?}"
    )]
    ArgumentMismatch {
        method: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
        mistyped: Vec<String>,
    },

    /// A write was attempted without a signing identity.
    #[error("write call requires a signing identity")]
    MissingIdentity,

    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// The chain rejected the broadcast transaction.
    #[error("broadcast rejected: {0}")]
    BroadcastRejected(String),

    /// The read call was rejected or reverted.
    #[error("read call rejected: {0}")]
    CallRejected(String),

    /// Default contract discovery failed. Not retried automatically.
    #[error("default contract discovery failed during {step}: {cause}")]
    DiscoveryFailed { step: DiscoveryStep, cause: String },

    /// A resolution session for this contract is still pending; the contract
    /// is temporarily disabled, not broken. Re-invoke once it resolves.
    #[error("contract resolution in progress; invocation temporarily disabled")]
    ResolutionPending,
}

impl Error {
    pub(crate) fn discovery(step: DiscoveryStep, cause: impl std::fmt::Display) -> Self {
        Self::DiscoveryFailed {
            step,
            cause: cause.to_string(),
        }
    }

    /// Maps a wire error encountered while binding or describing a contract.
    pub(crate) fn from_bind(e: ChainError) -> Self {
        match e {
            ChainError::Unreachable(d) => Self::EndpointUnreachable(d),
            ChainError::MalformedMetadata(d) | ChainError::MalformedResponse(d) => {
                Self::DescriptorUnavailable(d)
            }
            ChainError::Rejected(d) => Self::DescriptorUnavailable(d),
            ChainError::Signing(d) => Self::SigningFailed(d),
        }
    }

    /// Maps a wire error from a read call.
    pub(crate) fn from_read(e: ChainError) -> Self {
        match e {
            ChainError::Unreachable(d) => Self::EndpointUnreachable(d),
            ChainError::Signing(d) => Self::SigningFailed(d),
            ChainError::Rejected(d)
            | ChainError::MalformedMetadata(d)
            | ChainError::MalformedResponse(d) => Self::CallRejected(d),
        }
    }

    /// Maps a wire error from a transaction send.
    pub(crate) fn from_write(e: ChainError) -> Self {
        match e {
            ChainError::Unreachable(d) => Self::EndpointUnreachable(d),
            ChainError::Signing(d) => Self::SigningFailed(d),
            ChainError::Rejected(d)
            | ChainError::MalformedMetadata(d)
            | ChainError::MalformedResponse(d) => Self::BroadcastRejected(d),
        }
    }
}
