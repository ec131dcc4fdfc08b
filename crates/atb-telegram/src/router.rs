use std::{collections::HashMap, sync::Arc};

use teloxide::{dispatching::Dispatcher as UpdateDispatcher, dptree, prelude::*};

use tokio::sync::{Mutex, OwnedMutexGuard};

use atb_core::messaging::throttled::{ThrottleConfig, ThrottledMessenger};
use atb_core::{config::Config, dispatcher::Dispatcher, messaging::port::MessagingPort};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub messenger: Arc<dyn MessagingPort>,
    pub chat_locks: Arc<ChatLocks>,
}

/// Per-chat send ordering. Different chats never wait on each other.
#[derive(Default)]
pub struct ChatLocks {
    inner: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

/// Locks kept before unused ones are dropped.
const PRUNE_ABOVE: usize = 256;

impl ChatLocks {
    pub async fn lock_chat(&self, chat_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            let lock = map
                .entry(chat_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone();
            if map.len() > PRUNE_ABOVE {
                // Only the map holds an unused lock; holders and waiters keep a clone.
                map.retain(|_, l| Arc::strong_count(l) > 1);
            }
            lock
        };
        lock.lock_owned().await
    }
}

pub async fn run_polling(cfg: Arc<Config>, dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!(username = %me.username(), "bot started"),
        Err(e) => tracing::warn!(error = %e, "get_me failed; starting anyway"),
    }
    tracing::info!(
        catalog = %cfg.catalog_base_url,
        default_language = %cfg.default_language,
        top_list_limit = cfg.top_list_limit,
        "configuration loaded"
    );

    // The Telegram adapter still retries once on RetryAfter under the throttle.
    let raw_messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let messenger: Arc<dyn MessagingPort> = Arc::new(ThrottledMessenger::new(
        raw_messenger,
        ThrottleConfig::default(),
    ));

    let state = Arc::new(AppState {
        dispatcher,
        messenger,
        chat_locks: Arc::new(ChatLocks::default()),
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    UpdateDispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
