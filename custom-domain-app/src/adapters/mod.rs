//! Production adapters for the core collaborator traits.

mod http_oracle;
mod redis_store;

pub use http_oracle::HttpAuthorizationOracle;
pub use redis_store::RedisKeyValueStore;
