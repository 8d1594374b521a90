//! Buyer/seller conversations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::{ConversationId, MessageId, ProductId, StoreId, UserId};

/// Which side of a conversation wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Buyer,
    Seller,
}

/// A single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    #[serde(default)]
    pub conversation_id: Option<ConversationId>,
    pub sender: Sender,
    pub body: String,
    pub sent_at: NaiveDateTime,
}

/// A thread between a buyer and a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub buyer_id: UserId,
    /// Buyer's display name.
    pub participant: String,
    pub store_id: StoreId,
    pub store_name: String,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub unread: u32,
    pub messages: Vec<Message>,
}

impl Conversation {
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.iter().max_by_key(|m| m.sent_at)
    }

    /// First `max_chars` characters of the latest message.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        self.last_message().map_or_else(String::new, |m| {
            let mut chars = m.body.chars();
            let head: String = chars.by_ref().take(max_chars).collect();
            if chars.next().is_some() {
                format!("{head}…")
            } else {
                head
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 2)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap_or_default()
    }

    #[test]
    fn test_preview_uses_latest_message() {
        let convo = Conversation {
            id: ConversationId::new("c1"),
            buyer_id: UserId::new("u1"),
            participant: "Omar".to_string(),
            store_id: StoreId::new("s1"),
            store_name: "Store".to_string(),
            product_id: None,
            unread: 1,
            messages: vec![
                Message {
                    id: MessageId::new("m2"),
                    conversation_id: None,
                    sender: Sender::Seller,
                    body: "Yes, it ships tomorrow morning".to_string(),
                    sent_at: at(11),
                },
                Message {
                    id: MessageId::new("m1"),
                    conversation_id: None,
                    sender: Sender::Buyer,
                    body: "Is this in stock?".to_string(),
                    sent_at: at(9),
                },
            ],
        };

        assert_eq!(convo.preview(8), "Yes, it …");
        assert_eq!(convo.preview(100), "Yes, it ships tomorrow morning");
    }
}
