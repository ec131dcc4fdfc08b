use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{MessageEntity, MessageEntityKind},
};

use atb_core::{
    domain::{ChatId, UserId},
    messaging::types::{InboundEvent, TextMessage},
};

use crate::router::AppState;

pub async fn handle_message(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let user_id = msg.from().map(|u| u.id.0);
    let is_command = msg.entities().is_some_and(starts_with_bot_command);
    let Some(event) = message_event(user_id, msg.chat.id.0, msg.text(), is_command) else {
        return Ok(());
    };

    super::dispatch_and_deliver(&state, event).await;
    Ok(())
}

/// Telegram's own command marker: a `bot_command` entity at offset 0.
pub(crate) fn starts_with_bot_command(entities: &[MessageEntity]) -> bool {
    entities
        .iter()
        .any(|e| e.offset == 0 && matches!(e.kind, MessageEntityKind::BotCommand))
}

/// Non-text messages (stickers, photos, ...) become empty text; anonymous senders are skipped.
pub(crate) fn message_event(
    user_id: Option<u64>,
    chat_id: i64,
    text: Option<&str>,
    is_command: bool,
) -> Option<InboundEvent> {
    let user_id = user_id?;
    Some(InboundEvent::Message(TextMessage::new(
        UserId(user_id as i64),
        ChatId(chat_id),
        text.unwrap_or(""),
        is_command,
    )))
}
