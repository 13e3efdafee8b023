//! Balance aggregator — one native query plus one `balanceOf` per token.
//!
//! Failure policy per asset:
//! - Native asset: a failed query drops the entry (see [`NativeFailurePolicy`])
//! - Contract asset: a failed query yields a `"0"` placeholder, so every
//!   token is always present in the result
//!
//! Only address validation errors and task-level faults reach the caller.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;

use supermarket_chain::units::scale_units;
use supermarket_chain::{ChainClient, ChainError};
use supermarket_common::error::AppError;
use supermarket_common::types::{
    AssetContract, AssetDescriptor, SUPPORTED_ASSETS, TokenBalance, WalletAddress,
};

/// Default upper bound on a single asset query.
const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Balance string used when a token query fails.
pub const FAILED_QUERY_PLACEHOLDER: &str = "0";

/// What to emit for the native asset when its query fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NativeFailurePolicy {
    /// Leave the native asset out of the result.
    #[default]
    Omit,
    /// Emit a `"0"` entry, matching the token behaviour.
    ZeroPlaceholder,
}

/// Aggregates balances of the fixed asset list for one address.
#[derive(Clone)]
pub struct BalanceAggregator {
    client: Arc<dyn ChainClient>,
    assets: Vec<AssetDescriptor>,
    query_timeout: Duration,
    native_failure_policy: NativeFailurePolicy,
}

impl BalanceAggregator {
    pub fn new(client: Arc<dyn ChainClient>) -> Self {
        Self {
            client,
            assets: SUPPORTED_ASSETS.to_vec(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            native_failure_policy: NativeFailurePolicy::default(),
        }
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_native_failure_policy(mut self, policy: NativeFailurePolicy) -> Self {
        self.native_failure_policy = policy;
        self
    }

    /// Validate `address` and aggregate its balances.
    pub async fn aggregate(&self, address: &str) -> Result<Vec<TokenBalance>, AppError> {
        let wallet = WalletAddress::parse(address)?;
        self.aggregate_for(&wallet).await
    }

    /// Aggregate balances for an already-validated address.
    ///
    /// All queries run concurrently; each result is slotted by asset, so the
    /// output always follows the asset list order.
    pub async fn aggregate_for(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Vec<TokenBalance>, AppError> {
        let owner = wallet.address();

        let handles: Vec<_> = self
            .assets
            .iter()
            .copied()
            .map(|asset| {
                let client = Arc::clone(&self.client);
                let timeout = self.query_timeout;
                tokio::spawn(async move { query_asset(client, asset, owner, timeout).await })
            })
            .collect();

        let outcomes = futures::future::join_all(handles).await;

        let mut balances = Vec::with_capacity(self.assets.len());
        for (asset, joined) in self.assets.iter().zip(outcomes) {
            let outcome = joined.map_err(|e| {
                AppError::AggregationFailed(format!("{} query task failed: {}", asset.symbol, e))
            })?;

            match outcome {
                Ok(amount) => balances.push(TokenBalance::new(asset, amount)),
                Err(e) => {
                    tracing::warn!(
                        wallet = %wallet.shorten(),
                        symbol = asset.symbol,
                        error = %e,
                        "Balance query failed"
                    );
                    if let Some(placeholder) = self.placeholder_for(asset) {
                        balances.push(placeholder);
                    }
                }
            }
        }

        tracing::debug!(
            wallet = %wallet.shorten(),
            entries = balances.len(),
            "Aggregated wallet balances"
        );

        Ok(balances)
    }

    fn placeholder_for(&self, asset: &AssetDescriptor) -> Option<TokenBalance> {
        match (asset.contract, self.native_failure_policy) {
            (AssetContract::Native, NativeFailurePolicy::Omit) => None,
            _ => Some(TokenBalance::new(asset, FAILED_QUERY_PLACEHOLDER)),
        }
    }
}

impl std::fmt::Debug for BalanceAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalanceAggregator")
            .field("assets", &self.assets.len())
            .field("query_timeout", &self.query_timeout)
            .field("native_failure_policy", &self.native_failure_policy)
            .finish_non_exhaustive()
    }
}

async fn query_asset(
    client: Arc<dyn ChainClient>,
    asset: AssetDescriptor,
    owner: Address,
    timeout: Duration,
) -> Result<String, ChainError> {
    let query = async {
        match asset.contract {
            AssetContract::Native => client.native_balance(owner).await,
            AssetContract::Erc20(token) => client.erc20_balance(token, owner).await,
        }
    };

    let raw = tokio::time::timeout(timeout, query)
        .await
        .map_err(|_| ChainError::Timeout(timeout))??;

    scale_units(raw, asset.decimals)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use alloy::primitives::U256;
    use async_trait::async_trait;
    use supermarket_common::types::{USDC_ADDRESS, USDT_ADDRESS, WBTC_ADDRESS};

    use super::*;

    const WALLET: &str = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

    /// Scripted chain: every query succeeds unless listed as failing.
    #[derive(Default)]
    struct ScriptedChain {
        fail_native: bool,
        failing_tokens: HashSet<Address>,
        slow_tokens: HashSet<Address>,
        panic_native: bool,
    }

    #[async_trait]
    impl ChainClient for ScriptedChain {
        async fn native_balance(&self, _owner: Address) -> Result<U256, ChainError> {
            if self.panic_native {
                panic!("provider exploded");
            }
            if self.fail_native {
                return Err(ChainError::Transport("connection refused".into()));
            }
            // 1.5 ETH
            Ok(U256::from(1_500_000_000_000_000_000u128))
        }

        async fn erc20_balance(&self, token: Address, _owner: Address) -> Result<U256, ChainError> {
            if self.slow_tokens.contains(&token) {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            if self.failing_tokens.contains(&token) {
                return Err(ChainError::Contract("execution reverted".into()));
            }
            let amount = match token {
                t if t == USDC_ADDRESS => 250_500_000u64, // 250.5 USDC
                t if t == USDT_ADDRESS => 10_000_000u64,  // 10 USDT
                t if t == WBTC_ADDRESS => 25_000_000u64,  // 0.25 WBTC
                _ => 0,
            };
            Ok(U256::from(amount))
        }
    }

    fn aggregator(chain: ScriptedChain) -> BalanceAggregator {
        BalanceAggregator::new(Arc::new(chain))
    }

    fn symbols(balances: &[TokenBalance]) -> Vec<&str> {
        balances.iter().map(|b| b.symbol.as_str()).collect()
    }

    #[tokio::test]
    async fn test_all_queries_succeed() {
        let balances = aggregator(ScriptedChain::default())
            .aggregate(WALLET)
            .await
            .unwrap();

        assert_eq!(symbols(&balances), vec!["ETH", "USDC", "USDT", "WBTC"]);
        assert_eq!(balances[0].balance, "1.5");
        assert_eq!(balances[0].address, "native");
        assert_eq!(balances[1].balance, "250.5");
        assert_eq!(balances[2].balance, "10.0");
        assert_eq!(balances[3].balance, "0.25");
        assert_eq!(balances[3].decimals, 8);
    }

    #[tokio::test]
    async fn test_one_token_failure_yields_zero_placeholder() {
        let chain = ScriptedChain {
            failing_tokens: HashSet::from([USDT_ADDRESS]),
            ..Default::default()
        };
        let balances = aggregator(chain).aggregate(WALLET).await.unwrap();

        assert_eq!(balances.len(), 4);
        assert_eq!(balances[2].symbol, "USDT");
        assert_eq!(balances[2].balance, "0");
        assert_eq!(balances[1].balance, "250.5");
        assert_eq!(balances[3].balance, "0.25");
    }

    #[tokio::test]
    async fn test_native_failure_omits_eth() {
        let chain = ScriptedChain {
            fail_native: true,
            ..Default::default()
        };
        let balances = aggregator(chain).aggregate(WALLET).await.unwrap();

        assert_eq!(symbols(&balances), vec!["USDC", "USDT", "WBTC"]);
    }

    #[tokio::test]
    async fn test_native_failure_with_zero_policy() {
        let chain = ScriptedChain {
            fail_native: true,
            ..Default::default()
        };
        let balances = aggregator(chain)
            .with_native_failure_policy(NativeFailurePolicy::ZeroPlaceholder)
            .aggregate(WALLET)
            .await
            .unwrap();

        assert_eq!(balances.len(), 4);
        assert_eq!(balances[0].symbol, "ETH");
        assert_eq!(balances[0].balance, "0");
    }

    #[tokio::test]
    async fn test_everything_fails() {
        let chain = ScriptedChain {
            fail_native: true,
            failing_tokens: HashSet::from([USDC_ADDRESS, USDT_ADDRESS, WBTC_ADDRESS]),
            ..Default::default()
        };
        let balances = aggregator(chain).aggregate(WALLET).await.unwrap();

        assert_eq!(symbols(&balances), vec!["USDC", "USDT", "WBTC"]);
        assert!(balances.iter().all(|b| b.balance == "0"));
    }

    #[tokio::test]
    async fn test_slow_token_times_out_to_placeholder() {
        let chain = ScriptedChain {
            slow_tokens: HashSet::from([WBTC_ADDRESS]),
            ..Default::default()
        };
        let balances = aggregator(chain)
            .with_query_timeout(Duration::from_millis(50))
            .aggregate(WALLET)
            .await
            .unwrap();

        assert_eq!(balances.len(), 4);
        assert_eq!(balances[3].symbol, "WBTC");
        assert_eq!(balances[3].balance, "0");
        assert_eq!(balances[1].balance, "250.5");
    }

    #[tokio::test]
    async fn test_invalid_address_fails_fast() {
        let result = aggregator(ScriptedChain::default())
            .aggregate("0x1234")
            .await;
        assert!(matches!(result, Err(AppError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_panicking_query_is_aggregation_failure() {
        let chain = ScriptedChain {
            panic_native: true,
            ..Default::default()
        };
        let result = aggregator(chain).aggregate(WALLET).await;
        assert!(matches!(result, Err(AppError::AggregationFailed(_))));
    }
}
