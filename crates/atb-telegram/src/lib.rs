//! Telegram adapter (teloxide).
//!
//! This crate implements the `atb-core` MessagingPort over Telegram Bot API.

use async_trait::async_trait;

use reqwest::Url;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile},
};

use tokio::time::sleep;

pub mod handlers;
pub mod router;

use atb_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{
        port::MessagingPort,
        types::{ButtonTarget, InlineKeyboard, MessagingCapabilities},
    },
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

/// Render a keyboard descriptor into Telegram inline markup.
pub fn to_markup(keyboard: &InlineKeyboard) -> Result<InlineKeyboardMarkup> {
    let mut rows = Vec::with_capacity(keyboard.rows.len());
    for row in &keyboard.rows {
        let mut buttons = Vec::with_capacity(row.len());
        for b in row {
            let button = match &b.target {
                ButtonTarget::Callback(payload) => {
                    InlineKeyboardButton::callback(b.label.clone(), payload.clone())
                }
                ButtonTarget::Url(url) => {
                    let url = Url::parse(url)
                        .map_err(|e| Error::External(format!("invalid button url {url}: {e}")))?;
                    InlineKeyboardButton::url(b.label.clone(), url)
                }
            };
            buttons.push(button);
        }
        rows.push(buttons);
    }
    Ok(InlineKeyboardMarkup::new(rows))
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            supports_images: true,
            supports_inline_keyboards: true,
            max_message_len: 4096,
            max_caption_len: 1024,
        }
    }

    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<MessageRef> {
        let markup = keyboard.map(to_markup).transpose()?;
        let msg = self
            .with_retry(|| {
                let req = self.bot.send_message(Self::tg_chat(chat_id), text.to_string());
                match markup.clone() {
                    Some(m) => req.reply_markup(m),
                    None => req,
                }
            })
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn send_image(
        &self,
        chat_id: ChatId,
        url: &str,
        caption: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<MessageRef> {
        let photo_url =
            Url::parse(url).map_err(|e| Error::External(format!("invalid image url: {e}")))?;
        let markup = keyboard.map(to_markup).transpose()?;
        let msg = self
            .with_retry(|| {
                let req = self
                    .bot
                    .send_photo(Self::tg_chat(chat_id), InputFile::url(photo_url.clone()))
                    .caption(caption.to_string());
                match markup.clone() {
                    Some(m) => req.reply_markup(m),
                    None => req,
                }
            })
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn answer_callback_query(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        self.with_retry(|| {
            let mut req = self.bot.answer_callback_query(callback_id.to_string());
            if let Some(t) = text {
                req = req.text(t.to_string());
            }
            req
        })
        .await?;
        Ok(())
    }
}
