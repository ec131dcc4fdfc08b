//! Telegram update handlers.
//!
//! Each handler is a small adapter that:
//! - turns a teloxide update into an `InboundEvent`
//! - runs it through the core dispatcher
//! - delivers the returned replies in order

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use atb_core::messaging::{outbox::deliver_replies, types::InboundEvent};

use crate::router::AppState;

mod callback;
mod message;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    callback::handle_callback(bot, q, state).await
}

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    message::handle_message(bot, msg, state).await
}

/// Dispatch one event and send whatever it produced. Send failures are logged, never fatal.
async fn dispatch_and_deliver(state: &AppState, event: InboundEvent) {
    let chat_id = event.chat_id();
    let replies = state.dispatcher.handle(event).await;
    if replies.is_empty() {
        return;
    }

    let _guard = state.chat_locks.lock_chat(chat_id.0).await;
    match deliver_replies(state.messenger.as_ref(), &replies).await {
        Ok(n) => tracing::debug!(chat_id = chat_id.0, replies = n, "replies delivered"),
        Err(e) => tracing::warn!(chat_id = chat_id.0, error = %e, "failed to deliver reply"),
    }
}
