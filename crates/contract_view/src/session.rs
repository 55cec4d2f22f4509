//! Resolution sessions and their lifecycle events.

use aelf_wallet::Account;

use crate::error::Error;
use crate::resolver::ResolvedContract;

/// Identifies one resolution session. Ids are strictly increasing per
/// resolver; a larger id always belongs to a newer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn new(seq: u64) -> Self {
        Self(seq)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a resolution session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Still resolving.
    Pending,
    /// Completed and published its contract.
    Resolved,
    /// Completed with a published error.
    Failed,
    /// A newer session started; this one's result is (or will be) discarded.
    Superseded,
}

/// The input triple a session resolves: endpoint, contract address and
/// signing identity. An absent address triggers default contract discovery;
/// an absent identity makes the resolver use its generated one.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub endpoint: String,
    pub address: Option<String>,
    pub identity: Option<Account>,
}

/// Typed lifecycle events published on the resolver's broadcast channel.
///
/// Presentation layers render these however they choose (spinners, toasts,
/// nothing); the core never renders. `Superseded` is not a failure and
/// carries no error.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Started {
        session: SessionId,
        request: SessionRequest,
    },
    Resolved {
        session: SessionId,
        contract: ResolvedContract,
    },
    Failed {
        session: SessionId,
        error: Error,
    },
    Superseded {
        session: SessionId,
    },
}

impl SessionEvent {
    /// The session this event belongs to.
    pub fn session(&self) -> SessionId {
        match self {
            Self::Started { session, .. }
            | Self::Resolved { session, .. }
            | Self::Failed { session, .. }
            | Self::Superseded { session } => *session,
        }
    }
}
