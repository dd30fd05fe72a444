pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::domain::{Message, MessageId};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("backend error: {0}")]
    Backend(#[from] mongodb::error::Error),

    #[error("backend returned unexpected data: {0}")]
    Unexpected(String),
}

/// One collection of messages. Implementations must keep list results in
/// insertion order and never hand out an id twice.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Round-trip to the backend to confirm it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn list(&self) -> Result<Vec<Message>, StoreError>;

    async fn get(&self, id: &MessageId) -> Result<Message, StoreError>;

    /// Store `text` under a backend-generated id and return the created record.
    async fn insert(&self, text: String) -> Result<Message, StoreError>;

    /// Returns how many documents were removed (0 or 1).
    async fn delete(&self, id: &MessageId) -> Result<u64, StoreError>;

    async fn delete_all(&self) -> Result<u64, StoreError>;
}
