use crate::domain::{ChatId, UserId};

/// Messenger-agnostic inbound update.
///
/// Telegram-specific fields stay in the Telegram adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    Message(TextMessage),
    Callback(CallbackQuery),
}

impl InboundEvent {
    pub fn user_id(&self) -> UserId {
        match self {
            InboundEvent::Message(m) => m.user_id,
            InboundEvent::Callback(c) => c.user_id,
        }
    }

    pub fn chat_id(&self) -> ChatId {
        match self {
            InboundEvent::Message(m) => m.chat_id,
            InboundEvent::Callback(c) => c.chat_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextMessage {
    pub user_id: UserId,
    pub chat_id: ChatId,
    /// Empty for non-text messages (stickers, photos, ...).
    pub text: String,
    pub is_command: bool,
    /// Lowercased command name without `/` or `@botname`; empty when not a command.
    pub command_name: String,
}

impl TextMessage {
    /// Build a message from raw text, detecting `/command[@bot] args` by shape.
    pub fn from_text(user_id: UserId, chat_id: ChatId, text: &str) -> Self {
        Self::new(user_id, chat_id, text, looks_like_command(text))
    }

    /// Build a message whose command flag was decided by the transport
    /// (Telegram marks commands with a `bot_command` entity at offset 0).
    pub fn new(user_id: UserId, chat_id: ChatId, text: &str, is_command: bool) -> Self {
        let command_name = if is_command {
            parse_command(text).0
        } else {
            String::new()
        };
        Self {
            user_id,
            chat_id,
            text: text.to_string(),
            is_command,
            command_name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackQuery {
    pub user_id: UserId,
    pub chat_id: ChatId,
    pub payload: String,
}

/// `/` directly followed by a command character; `/ naruto` is plain text.
pub fn looks_like_command(text: &str) -> bool {
    let mut chars = text.trim_start().chars();
    chars.next() == Some('/')
        && chars
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split `/cmd@botname arg1 ...` into `("cmd", "arg1 ...")`.
pub fn parse_command(text: &str) -> (String, String) {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

/// Named keyboard layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyboardKind {
    LanguagePicker,
    QuickActions(crate::i18n::Lang),
    DonatePicker,
}

/// Inline keyboard: a named layout rendered into ordered rows of buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub kind: KeyboardKind,
    pub rows: Vec<Vec<InlineButton>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub target: ButtonTarget,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ButtonTarget {
    /// Sends this payload back as a callback query.
    Callback(String),
    /// Opens an external link.
    Url(String),
}

impl InlineButton {
    pub fn callback(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: ButtonTarget::Callback(payload.into()),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: ButtonTarget::Url(url.into()),
        }
    }
}

/// One reply instruction produced by the dispatcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundReply {
    pub chat_id: ChatId,
    /// Message text, or the caption when an image is attached.
    pub text: String,
    pub keyboard: Option<InlineKeyboard>,
    pub image_url: Option<String>,
}

impl OutboundReply {
    pub fn text(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            keyboard: None,
            image_url: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn with_image(mut self, url: Option<String>) -> Self {
        self.image_url = url;
        self
    }
}

/// Capabilities / feature flags of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub supports_images: bool,
    pub supports_inline_keyboards: bool,
    pub max_message_len: usize,
    pub max_caption_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_with_bot_suffix_and_args() {
        assert_eq!(
            parse_command("/Top@AnimeBot extra words"),
            ("top".to_string(), "extra words".to_string())
        );
        assert_eq!(parse_command("/random"), ("random".to_string(), String::new()));
    }

    #[test]
    fn plain_text_is_not_a_command() {
        let m = TextMessage::from_text(UserId(1), ChatId(2), "naruto");
        assert!(!m.is_command);
        assert!(m.command_name.is_empty());
        assert_eq!(m.text, "naruto");

        let c = TextMessage::from_text(UserId(1), ChatId(2), "/help");
        assert!(c.is_command);
        assert_eq!(c.command_name, "help");
    }

    #[test]
    fn slash_without_command_name_is_plain_text() {
        for text in ["/ naruto", "/", "/🎌 bebop"] {
            let m = TextMessage::from_text(UserId(1), ChatId(2), text);
            assert!(!m.is_command, "{text:?}");
            assert!(m.command_name.is_empty());
        }
    }

    #[test]
    fn transport_command_flag_wins() {
        let m = TextMessage::new(UserId(1), ChatId(2), "/etc/hosts", false);
        assert!(!m.is_command);
        let m = TextMessage::new(UserId(1), ChatId(2), "/Stats@AnimeBot", true);
        assert_eq!(m.command_name, "stats");
    }
}
