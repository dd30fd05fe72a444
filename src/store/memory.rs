use crate::domain::{Message, MessageId};
use crate::store::{MessageStore, StoreError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process store. Keeps messages in a `Vec` so listing preserves
/// insertion order the way the document store's natural order does.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Vec<Message>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Message>, StoreError> {
        Ok(self.inner.read().await.clone())
    }

    async fn get(&self, id: &MessageId) -> Result<Message, StoreError> {
        let msgs = self.inner.read().await;
        msgs.iter().find(|m| &m.id == id).cloned().ok_or(StoreError::NotFound)
    }

    async fn insert(&self, text: String) -> Result<Message, StoreError> {
        let msg = Message::new(MessageId::generate(), text);
        self.inner.write().await.push(msg.clone());
        Ok(msg)
    }

    async fn delete(&self, id: &MessageId) -> Result<u64, StoreError> {
        let mut msgs = self.inner.write().await;
        match msgs.iter().position(|m| &m.id == id) {
            Some(idx) => {
                msgs.remove(idx);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut msgs = self.inner.write().await;
        let n = msgs.len() as u64;
        msgs.clear();
        Ok(n)
    }
}
