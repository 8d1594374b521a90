//! Buyer/seller messaging.
//!
//! Threads come from the seed conversations. Messages sent during a session
//! are written through the backend and also kept in the session outbox, so
//! they show up in their thread even when the backend does not echo them.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use souq_core::{Conversation, Message, Sender, mock};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, session_keys};
use crate::services::messages::send_message;
use crate::state::AppState;
use crate::views::{Layout, PageContext};

/// Longest message body accepted.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Sent messages kept in the session; older ones drop off first.
pub const MAX_OUTBOX_MESSAGES: usize = 50;

const PREVIEW_CHARS: usize = 60;

/// Send form data.
#[derive(Debug, Deserialize)]
pub struct SendForm {
    pub body: String,
}

/// Conversation list entry.
#[derive(Debug, Clone)]
pub struct ConversationView {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub unread: u32,
    pub last_at: String,
}

/// One message bubble.
#[derive(Debug, Clone)]
pub struct MessageView {
    pub body: String,
    pub mine: bool,
    pub sent_at: String,
}

/// Conversation list template.
#[derive(Template, WebTemplate)]
#[template(path = "messages/index.html")]
pub struct MessagesIndexTemplate {
    pub layout: Layout,
    pub conversations: Vec<ConversationView>,
}

/// Thread template.
#[derive(Template, WebTemplate)]
#[template(path = "messages/show.html")]
pub struct MessageThreadTemplate {
    pub layout: Layout,
    pub id: String,
    pub title: String,
    pub product_id: Option<String>,
    pub messages: Vec<MessageView>,
    pub max_chars: usize,
}

/// Threads the user takes part in, as buyer or as the store's seller.
fn visible_conversations(user: &CurrentUser) -> Vec<Conversation> {
    mock::conversations_for(
        user.id.as_str(),
        user.store_id.as_ref().map(souq_core::StoreId::as_str),
    )
}

/// Which side `user` writes as in `conversation`.
fn side_of(user: &CurrentUser, conversation: &Conversation) -> Sender {
    if conversation.buyer_id == user.id {
        Sender::Buyer
    } else {
        Sender::Seller
    }
}

/// The other party's name, as the thread title.
fn title_for(user: &CurrentUser, conversation: &Conversation) -> String {
    match side_of(user, conversation) {
        Sender::Buyer => conversation.store_name.clone(),
        Sender::Seller => conversation.participant.clone(),
    }
}

async fn outbox(session: &Session) -> Vec<Message> {
    session
        .get::<Vec<Message>>(session_keys::OUTBOX)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Add `message` to the outbox, dropping the oldest beyond the cap.
fn push_outbox(outbox: &mut Vec<Message>, message: Message) {
    outbox.push(message);
    let excess = outbox.len().saturating_sub(MAX_OUTBOX_MESSAGES);
    outbox.drain(..excess);
}

/// Append outbox messages for `conversation` and keep the thread in time order.
fn with_outbox(mut conversation: Conversation, outbox: &[Message]) -> Conversation {
    conversation.messages.extend(
        outbox
            .iter()
            .filter(|m| m.conversation_id.as_ref() == Some(&conversation.id))
            .cloned(),
    );
    conversation.messages.sort_by_key(|m| m.sent_at);
    conversation
}

/// Display the user's conversations, most recent first.
#[instrument(skip(auth, ctx, session))]
pub async fn index(auth: RequireAuth, ctx: PageContext, session: Session) -> impl IntoResponse {
    let RequireAuth(user) = auth;
    let layout = ctx.layout();
    let sent = outbox(&session).await;

    let mut threads: Vec<Conversation> = visible_conversations(&user)
        .into_iter()
        .map(|c| with_outbox(c, &sent))
        .collect();
    threads.sort_by(|a, b| {
        let at = |c: &Conversation| c.last_message().map(|m| m.sent_at);
        at(b).cmp(&at(a))
    });

    let conversations = threads
        .iter()
        .map(|c| ConversationView {
            id: c.id.to_string(),
            title: title_for(&user, c),
            preview: c.preview(PREVIEW_CHARS),
            unread: c.unread,
            last_at: c
                .last_message()
                .map(|m| m.sent_at.format("%b %-d, %H:%M").to_string())
                .unwrap_or_default(),
        })
        .collect();

    MessagesIndexTemplate {
        layout,
        conversations,
    }
}

fn find_thread(user: &CurrentUser, id: &str) -> Result<Conversation, AppError> {
    visible_conversations(user)
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::NotFound(format!("conversation {id}")))
}

/// Display one thread.
#[instrument(skip(auth, ctx, session))]
pub async fn show(
    auth: RequireAuth,
    ctx: PageContext,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let RequireAuth(user) = auth;
    let conversation = with_outbox(find_thread(&user, &id)?, &outbox(&session).await);
    let me = side_of(&user, &conversation);

    Ok(MessageThreadTemplate {
        layout: ctx.layout(),
        id: conversation.id.to_string(),
        title: title_for(&user, &conversation),
        product_id: conversation.product_id.as_ref().map(ToString::to_string),
        messages: conversation
            .messages
            .iter()
            .map(|m| MessageView {
                body: m.body.clone(),
                mine: m.sender == me,
                sent_at: m.sent_at.format("%b %-d, %H:%M").to_string(),
            })
            .collect(),
        max_chars: MAX_MESSAGE_CHARS,
    })
}

/// Send a message in a thread.
#[instrument(skip(state, auth, session, form), fields(conversation_id = %id))]
pub async fn send(
    State(state): State<AppState>,
    auth: RequireAuth,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<SendForm>,
) -> Result<Redirect, AppError> {
    let RequireAuth(user) = auth;
    let conversation = find_thread(&user, &id)?;
    let thread_url = format!("/messages/{}", conversation.id);

    let body = form.body.trim();
    if body.is_empty() {
        return Ok(Redirect::to(&thread_url));
    }
    if body.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::BadRequest(format!(
            "message longer than {MAX_MESSAGE_CHARS} characters"
        )));
    }

    let message = send_message(
        state.backend(),
        &conversation.id,
        side_of(&user, &conversation),
        body,
    )
    .await;

    let mut sent = outbox(&session).await;
    push_outbox(&mut sent, message);
    session.insert(session_keys::OUTBOX, &sent).await?;

    add_breadcrumb(
        "messages",
        "Sent message",
        Some(&[("conversation_id", conversation.id.as_str())]),
    );
    Ok(Redirect::to(&thread_url))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use souq_core::{ConversationId, Email, MessageId, Role, StoreId, UserId};

    use super::*;

    fn user(id: &str, role: Role, store: Option<&str>) -> CurrentUser {
        CurrentUser {
            id: UserId::new(id),
            email: Email::parse("someone@souq.test").unwrap(),
            name: "Someone".to_string(),
            role,
            store_id: store.map(StoreId::new),
            access_token: "token".to_string(),
        }
    }

    #[test]
    fn test_buyer_and_seller_see_their_threads() {
        let buyer = user("u-buyer", Role::Buyer, None);
        assert_eq!(visible_conversations(&buyer).len(), 3);
        let seller = user("u-seller", Role::Seller, Some("s1"));
        let threads = visible_conversations(&seller);
        assert_eq!(threads.len(), 1);
        let thread = threads.first().unwrap();
        assert_eq!(side_of(&seller, thread), Sender::Seller);
        assert_eq!(title_for(&seller, thread), thread.participant);
    }

    #[test]
    fn test_foreign_thread_is_not_found() {
        let outsider = user("u-omar", Role::Buyer, None);
        assert!(matches!(find_thread(&outsider, "c1"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_outbox_messages_join_their_thread_in_order() {
        let thread = mock::conversations().iter().find(|c| c.id == "c1").unwrap().clone();
        let before = thread.messages.len();
        let late = Message {
            id: MessageId::new("local-1"),
            conversation_id: Some(ConversationId::new("c1")),
            sender: Sender::Buyer,
            body: "Thanks!".to_string(),
            sent_at: NaiveDate::from_ymd_opt(2030, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        };
        let other = Message {
            conversation_id: Some(ConversationId::new("c2")),
            ..late.clone()
        };
        let merged = with_outbox(thread, &[late, other]);
        assert_eq!(merged.messages.len(), before + 1);
        assert_eq!(merged.last_message().unwrap().body, "Thanks!");
    }

    #[test]
    fn test_outbox_keeps_only_the_latest_messages() {
        let sent_at = NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut sent = Vec::new();
        for n in 0..MAX_OUTBOX_MESSAGES + 5 {
            push_outbox(
                &mut sent,
                Message {
                    id: MessageId::new(format!("local-{n}")),
                    conversation_id: Some(ConversationId::new("c1")),
                    sender: Sender::Buyer,
                    body: format!("note {n}"),
                    sent_at,
                },
            );
        }
        assert_eq!(sent.len(), MAX_OUTBOX_MESSAGES);
        assert_eq!(sent.first().unwrap().body, "note 5");
        assert_eq!(
            sent.last().unwrap().body,
            format!("note {}", MAX_OUTBOX_MESSAGES + 4)
        );
    }
}
