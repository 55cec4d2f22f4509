//! Core configuration and the process-wide default RPC list.

use std::time::Duration;

use once_cell::sync::OnceCell;

use aelf_wallet::Account;

/// Canonical name the default discovery procedure resolves when no contract
/// address is supplied: the token contract.
pub const DEFAULT_DISCOVERY_NAME: &str = "AElf.ContractNames.Token";

/// Configuration of one resolver instance.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Initial RPC endpoint.
    pub endpoint: String,
    /// Initial contract address; `None` triggers default discovery.
    pub address: Option<String>,
    /// Signing identity; `None` makes the resolver generate one on demand
    /// and retain it.
    pub identity: Option<Account>,
    /// Canonical name resolved through the zero contract when no address is
    /// given.
    pub discovery_name: String,
    /// Whether (and how) writes wait for mining after broadcast.
    pub confirmation: ConfirmationPolicy,
}

impl ViewConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            address: None,
            identity: None,
            discovery_name: DEFAULT_DISCOVERY_NAME.to_string(),
            confirmation: ConfirmationPolicy::default(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_identity(mut self, identity: Account) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_discovery_name(mut self, name: impl Into<String>) -> Self {
        self.discovery_name = name.into();
        self
    }

    pub fn with_confirmation(mut self, confirmation: ConfirmationPolicy) -> Self {
        self.confirmation = confirmation;
        self
    }
}

/// Confirmation behavior of write invocations.
///
/// Broadcast acknowledgment is always awaited; waiting for the transaction to
/// be mined is an explicit opt-in, never implied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub wait: bool,
    pub poll_interval: Duration,
    pub max_polls: u32,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            wait: false,
            poll_interval: Duration::from_secs(1),
            max_polls: 10,
        }
    }
}

impl ConfirmationPolicy {
    /// Return as soon as the node acknowledges the broadcast.
    pub fn broadcast_only() -> Self {
        Self::default()
    }

    /// Poll the transaction result until it is mined (or polls run out).
    pub fn wait_for_mining() -> Self {
        Self {
            wait: true,
            ..Self::default()
        }
    }
}

/// A labeled RPC endpoint for endpoint pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcOption {
    pub label: String,
    pub url: String,
}

impl RpcOption {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

static DEFAULT_RPCS: OnceCell<Vec<RpcOption>> = OnceCell::new();

/// Installs the process-wide default RPC list. Effective only once, before
/// the first [`default_rpcs`] call; returns `false` if the list was already
/// loaded. The resolver itself never reads this — endpoints always reach it
/// as explicit parameters. It exists for embedding UIs to seed their pickers.
pub fn init_default_rpcs(options: Vec<RpcOption>) -> bool {
    DEFAULT_RPCS.set(options).is_ok()
}

/// The process-wide default RPC list, falling back to the aelf public nodes.
pub fn default_rpcs() -> &'static [RpcOption] {
    DEFAULT_RPCS
        .get_or_init(|| {
            vec![
                RpcOption::new("Mainnet", "https://aelf-public-node.aelf.io"),
                RpcOption::new("Testnet", "https://aelf-test-node.aelf.io"),
            ]
        })
        .as_slice()
}
