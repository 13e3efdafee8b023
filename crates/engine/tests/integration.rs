//! Integration tests for the balance pipeline.
//!
//! Aggregates balances against an in-memory chain, values them, and feeds the
//! result into a wallet session, the way a client refresh would.

use std::collections::HashMap;
use std::sync::Arc;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use supermarket_chain::{ChainClient, ChainError};
use supermarket_common::types::{USDC_ADDRESS, USDT_ADDRESS, WBTC_ADDRESS, WalletAddress};
use supermarket_engine::aggregator::BalanceAggregator;
use supermarket_engine::session::{SessionEvent, SessionStatus, WalletSessionState};
use supermarket_engine::valuer::PortfolioValuer;

// ============================================================
// Shared helpers
// ============================================================

/// In-memory ledger keyed by (token, owner). Missing token entries revert.
struct Ledger {
    native: HashMap<Address, U256>,
    tokens: HashMap<(Address, Address), U256>,
}

#[async_trait]
impl ChainClient for Ledger {
    async fn native_balance(&self, owner: Address) -> Result<U256, ChainError> {
        Ok(self.native.get(&owner).copied().unwrap_or(U256::ZERO))
    }

    async fn erc20_balance(&self, token: Address, owner: Address) -> Result<U256, ChainError> {
        self.tokens
            .get(&(token, owner))
            .copied()
            .ok_or_else(|| ChainError::Contract("execution reverted".to_string()))
    }
}

fn owner() -> WalletAddress {
    WalletAddress::parse("0x52908400098527886E0F7030069857D2E4169EE7").unwrap()
}

fn ledger() -> Ledger {
    let who = owner().address();
    Ledger {
        // 0.5 ETH
        native: HashMap::from([(who, U256::from(500_000_000_000_000_000u128))]),
        tokens: HashMap::from([
            ((USDC_ADDRESS, who), U256::from(100_500_000u64)),
            ((USDT_ADDRESS, who), U256::from(1_000_000u64)),
            // WBTC deliberately missing
        ]),
    }
}

// ============================================================
// Pipeline
// ============================================================

#[tokio::test]
async fn test_aggregate_then_value() {
    let aggregator = BalanceAggregator::new(Arc::new(ledger()));
    let balances = aggregator.aggregate_for(&owner()).await.unwrap();

    assert_eq!(balances.len(), 4);
    assert_eq!(balances[0].balance, "0.5");
    assert_eq!(balances[1].balance, "100.5");
    assert_eq!(balances[2].balance, "1.0");
    assert_eq!(balances[3].symbol, "WBTC");
    assert_eq!(balances[3].balance, "0");

    let total = PortfolioValuer::default().total_value(&balances);
    assert!((total - (1200.0 + 100.5 + 1.0)).abs() < 1e-9);
}

#[tokio::test]
async fn test_unknown_wallet_has_zero_value() {
    let aggregator = BalanceAggregator::new(Arc::new(ledger()));
    let stranger = format!("0x{}", "b".repeat(40));
    let balances = aggregator.aggregate(&stranger).await.unwrap();

    // Native reads zero; every token reverts for an unknown holder
    assert_eq!(balances.len(), 4);
    assert_eq!(balances[0].balance, "0.0");
    assert_eq!(PortfolioValuer::default().total_value(&balances), 0.0);
}

#[tokio::test]
async fn test_refresh_updates_session() {
    let aggregator = BalanceAggregator::new(Arc::new(ledger()));

    let session = WalletSessionState::default()
        .apply(SessionEvent::ConnectRequested)
        .apply(SessionEvent::Connected {
            address: owner(),
            chain_id: Some(1),
        });
    assert_eq!(session.status(), SessionStatus::Connected);

    let address = session.address.clone().unwrap();
    let balances = aggregator.aggregate_for(&address).await.unwrap();
    let session = session.apply(SessionEvent::BalancesRefreshed { balances });

    assert_eq!(session.native_balance.as_deref(), Some("0.5"));
    assert_eq!(session.status(), SessionStatus::Connected);
}
