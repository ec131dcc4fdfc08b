//! Process-wide usage counters.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tokio::sync::Mutex;

use crate::{domain::UserId, i18n::Lang};

#[derive(Debug, Default)]
struct Counters {
    seen: HashSet<UserId>,
    action_counts: BTreeMap<String, u64>,
    language_counts: BTreeMap<String, u64>,
}

/// Point-in-time copy of the counters, used for the stats report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AnalyticsSnapshot {
    pub total_distinct_users: u64,
    pub action_counts: BTreeMap<String, u64>,
    pub language_counts: BTreeMap<String, u64>,
}

impl AnalyticsSnapshot {
    pub fn action_count(&self, action: &str) -> u64 {
        self.action_counts.get(action).copied().unwrap_or(0)
    }

    pub fn language_count(&self, lang: Lang) -> u64 {
        self.language_counts.get(lang.code()).copied().unwrap_or(0)
    }
}

/// Monotonic counters of distinct users, per-action and per-language usage.
///
/// Never decremented or reset; lives as long as the process.
#[derive(Debug, Default)]
pub struct AnalyticsCounter {
    inner: Mutex<Counters>,
}

impl AnalyticsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `user` as seen. Returns true only the first time.
    pub async fn observe_user(&self, user: UserId) -> bool {
        let mut c = self.inner.lock().await;
        let first = c.seen.insert(user);
        if first {
            tracing::info!(user_id = user.0, total = c.seen.len(), "new user");
        }
        first
    }

    /// Count one invocation of `action` in `lang`.
    pub async fn record_action(&self, action: &str, lang: Lang) {
        let mut c = self.inner.lock().await;
        let action_total = {
            let n = c.action_counts.entry(action.to_string()).or_insert(0);
            *n += 1;
            *n
        };
        *c.language_counts.entry(lang.code().to_string()).or_insert(0) += 1;
        tracing::debug!(action, lang = %lang, action_total, "action recorded");
    }

    pub async fn snapshot(&self) -> AnalyticsSnapshot {
        let c = self.inner.lock().await;
        AnalyticsSnapshot {
            total_distinct_users: c.seen.len() as u64,
            action_counts: c.action_counts.clone(),
            language_counts: c.language_counts.clone(),
        }
    }
}
