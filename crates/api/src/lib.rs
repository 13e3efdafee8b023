//! CryptoSupermarket HTTP API.
//!
//! Most endpoints are static placeholders. The live portfolio endpoint runs
//! the balance aggregator and static-price valuer from `supermarket-engine`.

pub mod middleware;
pub mod routes;
pub mod state;
