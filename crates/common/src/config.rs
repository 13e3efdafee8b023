use serde::Deserialize;

/// Deployment environment, read from `APP_ENV` (or `NODE_ENV` as a fallback).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    /// Parse an environment name. Anything unrecognized is treated as production.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" => Environment::Test,
            _ => Environment::Production,
        }
    }

    /// Whether internal fault messages may be returned to clients.
    pub fn exposes_error_detail(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
            Environment::Test => write!(f, "test"),
        }
    }
}

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen port (default: 3001)
    pub port: u16,

    /// Frontend origin allowed by CORS (default: http://localhost:3000)
    pub frontend_url: String,

    /// Deployment environment; gates error detail exposure
    pub environment: Environment,

    /// Ethereum JSON-RPC URL used for live balance queries
    pub eth_rpc_url: String,

    /// Upper bound on a single per-asset balance query in milliseconds (default: 10000)
    pub balance_query_timeout_ms: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let environment = std::env::var("APP_ENV")
            .or_else(|_| std::env::var("NODE_ENV"))
            .map(|v| Environment::parse(&v))
            .unwrap_or(Environment::Development);

        Ok(Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid u16"))?,
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            environment,
            eth_rpc_url: std::env::var("ETH_RPC_URL")
                .unwrap_or_else(|_| "https://eth.llamarpc.com".to_string()),
            balance_query_timeout_ms: std::env::var("BALANCE_QUERY_TIMEOUT_MS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("BALANCE_QUERY_TIMEOUT_MS must be a valid u64"))?,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            frontend_url: "http://localhost:3000".to_string(),
            environment: Environment::Development,
            eth_rpc_url: "https://eth.llamarpc.com".to_string(),
            balance_query_timeout_ms: 10_000,
        }
    }
}
