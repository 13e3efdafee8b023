//! Read-only chain access for balance queries.
//!
//! The rest of the workspace talks to the chain only through [`ChainClient`],
//! so a JSON-RPC backed client and test doubles are interchangeable.

pub mod rpc;
pub mod units;

use std::time::Duration;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use thiserror::Error;

pub use rpc::RpcChainClient;

/// Failure of a single chain query.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("RPC transport error: {0}")]
    Transport(String),

    #[error("Contract call failed: {0}")]
    Contract(String),

    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unit conversion failed: {0}")]
    Units(String),
}

/// Read-only blockchain query capability.
#[async_trait]
pub trait ChainClient: Send + Sync + 'static {
    /// Native currency balance of `owner`, in wei.
    async fn native_balance(&self, owner: Address) -> Result<U256, ChainError>;

    /// ERC-20 `balanceOf(owner)` on `token`, in the token's base units.
    async fn erc20_balance(&self, token: Address, owner: Address) -> Result<U256, ChainError>;
}
