pub mod config;
pub mod endpoints;
pub mod query;
pub mod transport;
