use crate::domain::error::DomainError;
use mongodb::bson::oid::ObjectId;
use std::fmt;
use std::str::FromStr;

/// Identifier assigned by the persistence backend when a message is created.
/// On the wire it is the 24-character hex form of a MongoDB `ObjectId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub ObjectId);

impl MessageId {
    /// A fresh identifier. Only backends that generate ids themselves call this.
    pub fn generate() -> Self {
        MessageId(ObjectId::new())
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl FromStr for MessageId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(MessageId)
            .map_err(|_| DomainError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl From<ObjectId> for MessageId {
    fn from(oid: ObjectId) -> Self {
        MessageId(oid)
    }
}

/// A stored message. Both fields are fixed at creation; there is no update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub message: String,
}

impl Message {
    pub fn new(id: MessageId, message: impl Into<String>) -> Self {
        Self { id, message: message.into() }
    }

    pub fn is_palindrome(&self) -> bool {
        is_palindrome(&self.message)
    }
}

/// Exact, character-by-character palindrome check. Case and whitespace count.
pub fn is_palindrome(s: &str) -> bool {
    let mut fwd = s.chars();
    let mut back = s.chars().rev();
    // walking both ends meets in the middle after len/2 steps; the rest is symmetric
    for _ in 0..s.chars().count() / 2 {
        if fwd.next() != back.next() {
            return false;
        }
    }
    true
}
