use std::sync::Arc;

use teloxide::prelude::*;

use atb_core::{
    domain::{ChatId, UserId},
    messaging::types::{CallbackQuery as CoreCallback, InboundEvent},
};

use crate::router::AppState;

pub async fn handle_callback(
    _bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    // Always answer so the client stops its loading indicator, even for unknown payloads.
    if let Err(e) = state.messenger.answer_callback_query(&q.id, None).await {
        tracing::warn!(callback_id = %q.id, error = %e, "failed to answer callback query");
    }

    let chat_id = q.message.as_ref().map(|m| m.chat.id.0);
    let Some(event) = callback_event(q.from.id.0, chat_id, q.data.as_deref()) else {
        return Ok(());
    };

    super::dispatch_and_deliver(&state, event).await;
    Ok(())
}

/// Callbacks without a chat (inline-mode messages) or without data are answered but not dispatched.
pub(crate) fn callback_event(
    user_id: u64,
    chat_id: Option<i64>,
    data: Option<&str>,
) -> Option<InboundEvent> {
    let chat_id = chat_id?;
    let payload = data.filter(|d| !d.is_empty())?;
    Some(InboundEvent::Callback(CoreCallback {
        user_id: UserId(user_id as i64),
        chat_id: ChatId(chat_id),
        payload: payload.to_string(),
    }))
}
