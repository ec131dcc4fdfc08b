use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

use crate::{
    domain::{ChatId, MessageRef},
    messaging::{
        port::MessagingPort,
        types::{InlineKeyboard, MessagingCapabilities},
    },
    Result,
};

/// Chats tracked before idle ones are dropped from the schedule.
const PRUNE_ABOVE: usize = 1024;

#[derive(Clone, Copy, Debug)]
pub struct ThrottleConfig {
    /// Minimum spacing between *any* outbound calls (global flood control).
    pub global_min_interval: Duration,
    /// Minimum spacing between calls per chat.
    pub per_chat_min_interval: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            global_min_interval: Duration::from_millis(40), // ~25/sec
            // List replies send two messages back to back; keep them close.
            per_chat_min_interval: Duration::from_millis(350),
        }
    }
}

/// Next free send slot, globally and per chat.
#[derive(Debug)]
struct SendSchedule {
    cfg: ThrottleConfig,
    global_next: Instant,
    chat_next: HashMap<ChatId, Instant>,
}

impl SendSchedule {
    fn new(cfg: ThrottleConfig, now: Instant) -> Self {
        Self {
            cfg,
            global_next: now,
            chat_next: HashMap::new(),
        }
    }

    /// Book the earliest slot free for `chat` (or for a chat-less call) and
    /// return how long the caller must wait for it.
    fn book(&mut self, chat: Option<ChatId>, now: Instant) -> Duration {
        let mut start = self.global_next.max(now);
        if let Some(chat) = chat {
            if let Some(&next) = self.chat_next.get(&chat) {
                start = start.max(next);
            }
            self.chat_next.insert(chat, start + self.cfg.per_chat_min_interval);
        }
        self.global_next = start + self.cfg.global_min_interval;

        if self.chat_next.len() > PRUNE_ABOVE {
            // A chat whose next slot has passed would not be delayed anyway.
            self.chat_next.retain(|_, next| *next > now);
        }

        start - now
    }
}

/// MessagingPort decorator that rate-limits outbound calls.
///
/// Best-effort defense against Telegram 429s when many users hit the bot at
/// once. The Telegram adapter still retries once on `RetryAfter`.
pub struct ThrottledMessenger {
    inner: Arc<dyn MessagingPort>,
    schedule: Mutex<SendSchedule>,
}

impl ThrottledMessenger {
    pub fn new(inner: Arc<dyn MessagingPort>, cfg: ThrottleConfig) -> Self {
        Self {
            inner,
            schedule: Mutex::new(SendSchedule::new(cfg, Instant::now())),
        }
    }

    async fn wait_turn(&self, chat: Option<ChatId>) {
        let wait = self.schedule.lock().await.book(chat, Instant::now());
        if !wait.is_zero() {
            sleep(wait).await;
        }
    }
}

#[async_trait::async_trait]
impl MessagingPort for ThrottledMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        self.inner.capabilities()
    }

    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<MessageRef> {
        self.wait_turn(Some(chat_id)).await;
        self.inner.send_text(chat_id, text, keyboard).await
    }

    async fn send_image(
        &self,
        chat_id: ChatId,
        url: &str,
        caption: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<MessageRef> {
        self.wait_turn(Some(chat_id)).await;
        self.inner.send_image(chat_id, url, caption, keyboard).await
    }

    async fn answer_callback_query(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        // Callback answers carry no chat; only the global spacing applies.
        self.wait_turn(None).await;
        self.inner.answer_callback_query(callback_id, text).await
    }
}
