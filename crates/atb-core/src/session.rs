use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::{domain::UserId, i18n::Lang};

/// Language resolved for one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedLang {
    pub lang: Lang,
    /// False when the user never picked a language and `lang` is the fallback.
    pub explicit: bool,
}

/// Per-user language preference, kept for the lifetime of the process.
///
/// Sessions are created lazily on the first explicit language choice; reads
/// for unknown users return the fallback without creating anything.
#[derive(Debug)]
pub struct SessionStore {
    fallback: Lang,
    langs: Mutex<HashMap<UserId, Lang>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Lang::default())
    }
}

impl SessionStore {
    pub fn new(fallback: Lang) -> Self {
        Self {
            fallback,
            langs: Mutex::new(HashMap::new()),
        }
    }

    /// The single place where the default-language fallback is applied.
    pub async fn resolve(&self, user: UserId) -> ResolvedLang {
        match self.langs.lock().await.get(&user) {
            Some(&lang) => ResolvedLang {
                lang,
                explicit: true,
            },
            None => ResolvedLang {
                lang: self.fallback,
                explicit: false,
            },
        }
    }

    /// Record an explicit language choice. Returns the previous choice, if any.
    pub async fn set_language(&self, user: UserId, lang: Lang) -> Option<Lang> {
        self.langs.lock().await.insert(user, lang)
    }

    pub async fn len(&self) -> usize {
        self.langs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.langs.lock().await.is_empty()
    }
}
