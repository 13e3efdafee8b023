use std::sync::LazyLock;

use alloy::primitives::{Address, address};
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::AppError;

static ADDRESS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("valid address pattern"));

/// Returns true if `candidate` is a `0x`-prefixed, 40-hex-character account address.
pub fn is_valid_address(candidate: &str) -> bool {
    ADDRESS_PATTERN.is_match(candidate)
}

/// An account address that has passed format validation.
///
/// Keeps the caller's original spelling (case is preserved) next to the
/// parsed 20-byte value used for chain queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAddress {
    text: String,
    address: Address,
}

impl WalletAddress {
    /// Validate and parse a textual address.
    pub fn parse(candidate: &str) -> Result<Self, AppError> {
        if !is_valid_address(candidate) {
            return Err(AppError::InvalidAddress(candidate.to_string()));
        }
        let address = candidate
            .parse::<Address>()
            .map_err(|_| AppError::InvalidAddress(candidate.to_string()))?;
        Ok(Self {
            text: candidate.to_string(),
            address,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Short display form, e.g. `0x1234...abcd`.
    pub fn shorten(&self) -> String {
        format!("{}...{}", &self.text[..6], &self.text[self.text.len() - 4..])
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for WalletAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Where an asset's balance lives on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetContract {
    /// The chain's base currency, read with `eth_getBalance`.
    Native,
    /// An ERC-20 token, read with `balanceOf(address)`.
    Erc20(Address),
}

impl std::fmt::Display for AssetContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetContract::Native => write!(f, "native"),
            AssetContract::Erc20(addr) => write!(f, "{}", addr),
        }
    }
}

impl Serialize for AssetContract {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A supported asset and how to read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetDescriptor {
    pub symbol: &'static str,
    #[serde(rename = "address")]
    pub contract: AssetContract,
    pub decimals: u8,
}

/// Ethereum mainnet token contracts.
pub const USDC_ADDRESS: Address = address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
pub const USDT_ADDRESS: Address = address!("0xdAC17F958D2ee523a2206206994597C13D831ec7");
pub const WBTC_ADDRESS: Address = address!("0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599");

/// The fixed asset list, in aggregation order: native first, then tokens.
pub const SUPPORTED_ASSETS: [AssetDescriptor; 4] = [
    AssetDescriptor {
        symbol: "ETH",
        contract: AssetContract::Native,
        decimals: 18,
    },
    AssetDescriptor {
        symbol: "USDC",
        contract: AssetContract::Erc20(USDC_ADDRESS),
        decimals: 6,
    },
    AssetDescriptor {
        symbol: "USDT",
        contract: AssetContract::Erc20(USDT_ADDRESS),
        decimals: 6,
    },
    AssetDescriptor {
        symbol: "WBTC",
        contract: AssetContract::Erc20(WBTC_ADDRESS),
        decimals: 8,
    },
];

/// Look up a supported asset by symbol (case-insensitive).
pub fn asset_by_symbol(symbol: &str) -> Option<&'static AssetDescriptor> {
    SUPPORTED_ASSETS
        .iter()
        .find(|asset| asset.symbol.eq_ignore_ascii_case(symbol))
}

/// Supported networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Ethereum,
    Sepolia,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Ethereum, Network::Sepolia];

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Ethereum => 1,
            Network::Sepolia => 11_155_111,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.chain_id() == chain_id)
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Ethereum => write!(f, "ethereum"),
            Network::Sepolia => write!(f, "sepolia"),
        }
    }
}

/// A balance for one asset, scaled to human-readable units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub symbol: String,
    /// Decimal string already scaled by `decimals`.
    pub balance: String,
    pub decimals: u8,
    /// Contract address, or `"native"` for the base currency.
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd_value: Option<f64>,
}

impl TokenBalance {
    pub fn new(asset: &AssetDescriptor, balance: impl Into<String>) -> Self {
        Self {
            symbol: asset.symbol.to_string(),
            balance: balance.into(),
            decimals: asset.decimals,
            address: asset.contract.to_string(),
            usd_value: None,
        }
    }
}
