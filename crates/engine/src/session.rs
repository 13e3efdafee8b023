//! Wallet session state as a pure reducer.
//!
//! State is never mutated in place: every change is a named [`SessionEvent`]
//! applied by [`reduce`], which returns the next state.
//!
//! Transitions:
//! - `disconnected -> connecting -> connected`
//! - `connected -> disconnected`
//! - any state `-> error` on a provider-reported failure
//! - `error` clears on the next successful transition

use serde::Serialize;

use supermarket_common::types::{TokenBalance, WalletAddress};

/// Coarse connection status derived from the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// Snapshot of one wallet session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSessionState {
    pub address: Option<WalletAddress>,
    pub connected: bool,
    pub connecting: bool,
    pub chain_id: Option<u64>,
    /// Native balance recorded by the last balance refresh.
    pub native_balance: Option<String>,
    pub last_error: Option<String>,
}

impl WalletSessionState {
    pub fn status(&self) -> SessionStatus {
        if self.last_error.is_some() {
            SessionStatus::Error
        } else if self.connected {
            SessionStatus::Connected
        } else if self.connecting {
            SessionStatus::Connecting
        } else {
            SessionStatus::Disconnected
        }
    }

    /// Apply `event`, consuming the current state.
    pub fn apply(self, event: SessionEvent) -> Self {
        reduce(&self, event)
    }
}

/// Events reported by the user or the wallet provider.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ConnectRequested,
    Connected {
        address: WalletAddress,
        chain_id: Option<u64>,
    },
    /// `None` means the provider no longer exposes an account.
    AccountChanged {
        address: Option<WalletAddress>,
    },
    ChainChanged {
        chain_id: u64,
    },
    ProviderFailed {
        message: String,
    },
    DisconnectRequested,
    BalancesRefreshed {
        balances: Vec<TokenBalance>,
    },
}

/// Compute the state that follows `state` after `event`.
pub fn reduce(state: &WalletSessionState, event: SessionEvent) -> WalletSessionState {
    match event {
        SessionEvent::ConnectRequested => {
            if state.connected {
                return state.clone();
            }
            WalletSessionState {
                connecting: true,
                last_error: None,
                ..state.clone()
            }
        }

        SessionEvent::Connected { address, chain_id } => connected_as(state, address, chain_id),

        SessionEvent::AccountChanged {
            address: Some(address),
        } => {
            let chain_id = state.chain_id;
            connected_as(state, address, chain_id)
        }

        SessionEvent::AccountChanged { address: None } => WalletSessionState::default(),

        SessionEvent::ChainChanged { chain_id } => {
            if !state.connected {
                return state.clone();
            }
            WalletSessionState {
                chain_id: Some(chain_id),
                last_error: None,
                ..state.clone()
            }
        }

        SessionEvent::ProviderFailed { message } => WalletSessionState {
            connecting: false,
            last_error: Some(message),
            ..state.clone()
        },

        SessionEvent::DisconnectRequested => WalletSessionState::default(),

        SessionEvent::BalancesRefreshed { balances } => {
            if !state.connected {
                return state.clone();
            }
            let native_balance = balances
                .into_iter()
                .find(|b| b.symbol == "ETH")
                .map(|b| b.balance)
                .or_else(|| state.native_balance.clone());
            WalletSessionState {
                native_balance,
                ..state.clone()
            }
        }
    }
}

fn connected_as(
    state: &WalletSessionState,
    address: WalletAddress,
    chain_id: Option<u64>,
) -> WalletSessionState {
    // A different account invalidates the recorded balance.
    let native_balance = match &state.address {
        Some(previous) if *previous == address => state.native_balance.clone(),
        _ => None,
    };
    WalletSessionState {
        address: Some(address),
        connected: true,
        connecting: false,
        chain_id,
        native_balance,
        last_error: None,
    }
}
