//! Cache module for Redis-based storage
//!
//! This module provides the Redis client shared by every Redis-backed
//! component and the script-backed verification code store.

pub mod code_cache;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use code_cache::RedisCodeStore;
pub use redis_client::{store_error, RedisClient};

// Re-export commonly used types
pub use bb_shared::config::CacheConfig;
