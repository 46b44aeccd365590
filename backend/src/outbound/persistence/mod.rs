//! Storage adapters: one per supported backend.
//!
//! The in-memory adapter is the behavioural reference; the MySQL and
//! MongoDB adapters must match it logically even though id representation
//! and persistence differ.

pub mod memory;
pub mod models;
pub mod mongo;
pub mod mysql;
pub mod pool;
pub mod schema;

pub use memory::MemoryStorage;
pub use mongo::MongoStorage;
pub use mysql::MysqlStorage;
pub use pool::{DbPool, PoolConfig, PoolError};
