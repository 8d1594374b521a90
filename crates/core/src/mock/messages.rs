//! Seed conversations between the demo buyer and a few stores.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{Conversation, Message, Sender};
use crate::types::{ConversationId, MessageId, ProductId, StoreId, UserId};

type Line = (Sender, (i32, u32, u32, u32), &'static str);

struct ThreadSeed {
    id: &'static str,
    store: &'static str,
    product: Option<&'static str>,
    unread: u32,
    lines: &'static [Line],
}

const THREAD_SEEDS: &[ThreadSeed] = &[
    ThreadSeed {
        id: "c1",
        store: "s1",
        product: Some("p1"),
        unread: 1,
        lines: &[
            (
                Sender::Buyer,
                (2026, 5, 10, 9),
                "Hi! Is the tagine safe on a gas stove?",
            ),
            (
                Sender::Seller,
                (2026, 5, 10, 11),
                "Yes, with a heat diffuser. Start on low heat for the first use.",
            ),
            (
                Sender::Seller,
                (2026, 5, 14, 16),
                "We also restocked the blue pattern if you prefer it.",
            ),
        ],
    },
    ThreadSeed {
        id: "c2",
        store: "s3",
        product: Some("p5"),
        unread: 0,
        lines: &[
            (
                Sender::Buyer,
                (2026, 5, 14, 18),
                "Can you ship order o-1001 before Friday?",
            ),
            (
                Sender::Seller,
                (2026, 5, 15, 8),
                "It leaves our warehouse tomorrow morning, insha'Allah.",
            ),
            (Sender::Buyer, (2026, 5, 15, 9), "Perfect, thank you!"),
        ],
    },
    ThreadSeed {
        id: "c3",
        store: "s5",
        product: None,
        unread: 2,
        lines: &[
            (
                Sender::Buyer,
                (2026, 2, 20, 14),
                "Do you make an unscented version of the soap?",
            ),
            (
                Sender::Seller,
                (2026, 2, 21, 10),
                "Not yet, but a fragrance-free olive oil bar is coming this spring.",
            ),
            (
                Sender::Seller,
                (2026, 4, 2, 10),
                "It is live now! Look for the Savon Nature bar.",
            ),
        ],
    },
];

const BUYER_ID: &str = "u-buyer";
const BUYER_NAME: &str = "Layla Haddad";

fn timestamp((y, m, d, h): (i32, u32, u32, u32)) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(h, 0, 0)
}

static CONVERSATIONS: LazyLock<Vec<Conversation>> = LazyLock::new(|| {
    THREAD_SEEDS
        .iter()
        .map(|thread| Conversation {
            id: ConversationId::new(thread.id),
            buyer_id: UserId::new(BUYER_ID),
            participant: BUYER_NAME.to_string(),
            store_id: StoreId::new(thread.store),
            store_name: super::stores::store_name(thread.store).to_string(),
            product_id: thread.product.map(ProductId::new),
            unread: thread.unread,
            messages: thread
                .lines
                .iter()
                .enumerate()
                .filter_map(|(n, (sender, at, body))| {
                    Some(Message {
                        id: MessageId::new(format!("{}-m{}", thread.id, n + 1)),
                        conversation_id: Some(ConversationId::new(thread.id)),
                        sender: *sender,
                        body: (*body).to_string(),
                        sent_at: timestamp(*at)?,
                    })
                })
                .collect(),
        })
        .collect()
});

/// Every seed conversation.
#[must_use]
pub fn conversations() -> &'static [Conversation] {
    &CONVERSATIONS
}

/// Conversations visible to a participant: the buyer who opened them, or the
/// store they were opened with.
#[must_use]
pub fn conversations_for(user_id: &str, store_id: Option<&str>) -> Vec<Conversation> {
    conversations()
        .iter()
        .filter(|c| c.buyer_id == user_id || store_id.is_some_and(|s| c.store_id == s))
        .cloned()
        .collect()
}
