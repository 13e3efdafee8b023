pub mod aggregator;
pub mod analysis;
pub mod session;
pub mod valuer;
