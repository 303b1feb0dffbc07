#![forbid(unsafe_code)]

pub mod pool;
pub mod repository;

pub use pool::{PoolError, SentencePool};
pub use repository::{InMemoryRepository, ProgressRepository, Storage, StorageError};
