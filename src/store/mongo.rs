use crate::domain::{Message, MessageId};
use crate::store::{MessageStore, StoreError};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Document shape of the `messages` collection. Only used at this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MessageDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    message: String,
}

impl From<MessageDoc> for Message {
    fn from(d: MessageDoc) -> Self {
        Message::new(MessageId(d.id), d.message)
    }
}

/// MongoDB-backed store. The driver's `Client` is a connection pool; every
/// operation checks a connection out for its duration and returns it.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
    messages: Collection<MessageDoc>,
}

impl MongoStore {
    /// Build a pooled client for `url`. No I/O happens until the first
    /// operation; call [`MessageStore::ping`] to check reachability.
    pub async fn connect(url: &str, database: &str, collection: &str, timeout: Duration) -> Result<Self, StoreError> {
        let mut opts = ClientOptions::parse(url).await?;
        opts.app_name = Some("message_store".to_string());
        opts.connect_timeout = Some(timeout);
        opts.server_selection_timeout = Some(timeout);
        let client = Client::with_options(opts)?;
        let db = client.database(database);
        let messages = db.collection::<MessageDoc>(collection);
        Ok(Self { db, messages })
    }
}

#[async_trait]
impl MessageStore for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Message>, StoreError> {
        let cursor = self.messages.find(doc! {}, None).await?;
        let docs: Vec<MessageDoc> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Message::from).collect())
    }

    async fn get(&self, id: &MessageId) -> Result<Message, StoreError> {
        self.messages
            .find_one(doc! { "_id": id.0 }, None)
            .await?
            .map(Message::from)
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, text: String) -> Result<Message, StoreError> {
        // insert without an _id so the driver assigns one, then read it back
        // from the insert result
        let raw = self.messages.clone_with_type::<Document>();
        let res = raw.insert_one(doc! { "message": text.as_str() }, None).await?;
        let oid = res
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Unexpected(format!("inserted_id is not an ObjectId: {}", res.inserted_id)))?;
        debug!(id = %oid, "inserted message");
        Ok(Message::new(MessageId(oid), text))
    }

    async fn delete(&self, id: &MessageId) -> Result<u64, StoreError> {
        let res = self.messages.delete_one(doc! { "_id": id.0 }, None).await?;
        Ok(res.deleted_count)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let res = self.messages.delete_many(doc! {}, None).await?;
        Ok(res.deleted_count)
    }
}
