//! Buyer/seller messaging writes.

use chrono::Utc;
use souq_core::{ConversationId, Message, MessageId, Sender};
use tracing::instrument;
use uuid::Uuid;

use super::tables;
use crate::backend::{Backend, decode_row, to_row};

/// Send a message and return it as stored.
///
/// On failure the locally built message is returned, so the thread still
/// shows what the user typed.
#[instrument(skip(backend, body), fields(len = body.len()))]
pub async fn send_message<B: Backend>(
    backend: &B,
    conversation_id: &ConversationId,
    sender: Sender,
    body: &str,
) -> Message {
    let message = Message {
        id: MessageId::new(Uuid::new_v4().to_string()),
        conversation_id: Some(conversation_id.clone()),
        sender,
        body: body.trim().to_string(),
        sent_at: Utc::now().naive_utc(),
    };

    let row = match to_row(&message) {
        Ok(row) => row,
        Err(e) => {
            tracing::error!(operation = "send_message", error = %e, "Failed to encode message");
            return message;
        }
    };

    match backend.insert(tables::MESSAGES, row).await.map(decode_row::<Message>) {
        Ok(Ok(stored)) => stored,
        Ok(Err(e)) => {
            tracing::error!(operation = "send_message", error = %e, "Failed to decode row");
            message
        }
        Err(e) => {
            tracing::error!(operation = "send_message", error = %e, "Backend insert failed");
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;

    #[tokio::test]
    async fn test_send_message_trims_body() {
        let message = send_message(
            &MockBackend::new(),
            &ConversationId::new("c1"),
            Sender::Buyer,
            "  Is the blue one back?  ",
        )
        .await;
        assert_eq!(message.body, "Is the blue one back?");
        assert_eq!(message.sender, Sender::Buyer);
        assert_eq!(message.conversation_id, Some(ConversationId::new("c1")));
    }
}
