use crate::domain::Message;
use serde::Serialize;

/// JSON shape of a stored message. The id goes out under `_id`, the
/// document store's own key, as a hex string.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MessageOut {
    #[serde(rename = "_id")]
    pub id: String,
    pub message: String,
}

impl From<Message> for MessageOut {
    fn from(m: Message) -> Self {
        Self { id: m.id.to_hex(), message: m.message }
    }
}

/// Single-message response; the only place `ispalindrome` appears.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MessageDetailOut {
    #[serde(flatten)]
    pub base: MessageOut,
    pub ispalindrome: bool,
}

impl From<Message> for MessageDetailOut {
    fn from(m: Message) -> Self {
        let ispalindrome = m.is_palindrome();
        Self { base: MessageOut::from(m), ispalindrome }
    }
}
