//! Cache module for the Redis-backed key-value store
//!
//! Token records, per-user token indexes, version counters and rate-limit
//! counters all live here when a Redis URL is configured.

pub mod redis_client;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;

pub use gk_shared::config::CacheConfig;
