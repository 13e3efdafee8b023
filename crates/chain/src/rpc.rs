//! JSON-RPC chain client built on alloy.

use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use async_trait::async_trait;

use crate::{ChainClient, ChainError};

// Only the view function we read is declared.
sol! {
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// [`ChainClient`] backed by an HTTP JSON-RPC provider.
#[derive(Clone)]
pub struct RpcChainClient {
    provider: DynProvider,
}

impl RpcChainClient {
    /// Build a client for the given RPC URL. No request is made until the first query.
    pub fn connect_http(rpc_url: &str) -> anyhow::Result<Self> {
        let provider = ProviderBuilder::new()
            .connect_http(rpc_url.parse()?)
            .erased();

        tracing::info!(rpc_url, "Chain client configured");
        Ok(Self { provider })
    }
}

impl std::fmt::Debug for RpcChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChainClient").finish_non_exhaustive()
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn native_balance(&self, owner: Address) -> Result<U256, ChainError> {
        self.provider
            .get_balance(owner)
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))
    }

    async fn erc20_balance(&self, token: Address, owner: Address) -> Result<U256, ChainError> {
        let contract = IERC20::new(token, self.provider.clone());
        contract
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| ChainError::Contract(format!("balanceOf on {}: {}", token, e)))
    }
}
