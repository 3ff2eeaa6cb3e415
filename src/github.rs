//! GitHub search API client and types.

pub mod client;
pub mod types;
