//! Portfolio valuer — sums `amount × unit price` over a balance list.
//!
//! Prices come from a static table; there is no live feed. Entries that do not
//! parse to a positive finite number contribute nothing, and unknown symbols
//! are priced at zero. Valuation never fails.

use std::collections::HashMap;

use serde::Serialize;

use supermarket_common::types::TokenBalance;

/// Unit prices in USD keyed by upper-case symbol.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    prices: HashMap<String, f64>,
}

impl PriceTable {
    /// Fixed placeholder prices for the supported assets.
    pub fn placeholder() -> Self {
        Self::default()
            .with_price("ETH", 2400.0)
            .with_price("USDC", 1.0)
            .with_price("USDT", 1.0)
            .with_price("WBTC", 43000.0)
    }

    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_ascii_uppercase(), price);
        self
    }

    /// Price for `symbol`, or `0.0` if unknown.
    pub fn unit_price(&self, symbol: &str) -> f64 {
        self.prices
            .get(&symbol.to_ascii_uppercase())
            .copied()
            .unwrap_or(0.0)
    }
}

/// Balances annotated with their USD value, plus the total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub balances: Vec<TokenBalance>,
    pub total_value: f64,
}

#[derive(Debug, Clone)]
pub struct PortfolioValuer {
    prices: PriceTable,
}

impl PortfolioValuer {
    pub fn new(prices: PriceTable) -> Self {
        Self { prices }
    }

    /// Total USD value of `balances`.
    pub fn total_value(&self, balances: &[TokenBalance]) -> f64 {
        balances.iter().map(|b| self.entry_value(b)).sum()
    }

    /// Per-entry USD values alongside the total.
    pub fn value_breakdown(&self, balances: Vec<TokenBalance>) -> PortfolioValuation {
        let balances: Vec<TokenBalance> = balances
            .into_iter()
            .map(|mut b| {
                b.usd_value = Some(self.entry_value(&b));
                b
            })
            .collect();
        let total_value = balances.iter().filter_map(|b| b.usd_value).sum();

        PortfolioValuation {
            balances,
            total_value,
        }
    }

    fn entry_value(&self, balance: &TokenBalance) -> f64 {
        match parse_amount(&balance.balance) {
            Some(amount) => amount * self.prices.unit_price(&balance.symbol),
            None => 0.0,
        }
    }
}

impl Default for PortfolioValuer {
    fn default() -> Self {
        Self::new(PriceTable::placeholder())
    }
}

/// Parse a balance string into a positive finite amount.
fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(symbol: &str, amount: &str) -> TokenBalance {
        TokenBalance {
            symbol: symbol.to_string(),
            balance: amount.to_string(),
            decimals: 18,
            address: "native".to_string(),
            usd_value: None,
        }
    }

    #[test]
    fn test_total_value() {
        let valuer = PortfolioValuer::default();
        let balances = vec![
            balance("ETH", "0.5"),
            balance("USDC", "100.50"),
            balance("WBTC", "0.1"),
        ];
        let total = valuer.total_value(&balances);
        assert!((total - (1200.0 + 100.5 + 4300.0)).abs() < 1e-9);
    }

    #[test]
    fn test_bad_amounts_contribute_zero() {
        let valuer = PortfolioValuer::default();
        let balances = vec![
            balance("ETH", "-1"),
            balance("ETH", "abc"),
            balance("ETH", ""),
            balance("ETH", "NaN"),
            balance("ETH", "inf"),
            balance("USDC", "2"),
        ];
        assert_eq!(valuer.total_value(&balances), 2.0);
    }

    #[test]
    fn test_unknown_symbol_priced_at_zero() {
        let valuer = PortfolioValuer::default();
        assert_eq!(valuer.total_value(&[balance("DOGE", "1000")]), 0.0);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(PortfolioValuer::default().total_value(&[]), 0.0);
    }

    #[test]
    fn test_value_breakdown() {
        let valuer = PortfolioValuer::default();
        let valuation =
            valuer.value_breakdown(vec![balance("ETH", "0.5"), balance("USDT", "0")]);
        assert_eq!(valuation.balances[0].usd_value, Some(1200.0));
        assert_eq!(valuation.balances[1].usd_value, Some(0.0));
        assert_eq!(valuation.total_value, 1200.0);
    }

    #[test]
    fn test_custom_price_table() {
        let prices = PriceTable::default().with_price("eth", 3000.0);
        assert_eq!(prices.unit_price("ETH"), 3000.0);
        assert_eq!(prices.unit_price("USDC"), 0.0);
    }
}
