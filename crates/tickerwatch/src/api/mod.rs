//! API clients for quote and search providers

pub mod serper;
pub mod yahoo;

pub use serper::SerperClient;
pub use yahoo::YahooFinanceClient;
