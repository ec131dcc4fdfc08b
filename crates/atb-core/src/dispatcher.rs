//! Update dispatcher: inbound event in, ordered reply instructions out.

use std::sync::Arc;

use crate::{
    analytics::AnalyticsCounter,
    catalog::{CatalogError, CatalogRecord, CatalogSource, ListResult, TopFilter},
    domain::{ChatId, UserId},
    formatting::{format_list, format_record, format_stats},
    i18n::{Lang, Localizer, MessageKey},
    keyboards::{self, DonateLinks},
    messaging::types::{InboundEvent, InlineKeyboard, OutboundReply, TextMessage},
    routing::Action,
    session::{ResolvedLang, SessionStore},
};

/// Tunables for the dispatcher.
#[derive(Clone, Debug)]
pub struct DispatchSettings {
    pub top_limit: usize,
    pub donate_links: DonateLinks,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            top_limit: 5,
            donate_links: DonateLinks::default(),
        }
    }
}

/// Decides, for every inbound event, which action runs, in which language and
/// with which keyboard.
///
/// The dispatcher never sends anything; it returns zero, one or two replies.
/// Store locks are only taken for short critical sections and are never held
/// across a catalog call.
pub struct Dispatcher {
    sessions: Arc<SessionStore>,
    analytics: Arc<AnalyticsCounter>,
    catalog: Arc<dyn CatalogSource>,
    l10n: Arc<dyn Localizer>,
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(
        sessions: Arc<SessionStore>,
        analytics: Arc<AnalyticsCounter>,
        catalog: Arc<dyn CatalogSource>,
        l10n: Arc<dyn Localizer>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            sessions,
            analytics,
            catalog,
            l10n,
            settings,
        }
    }

    pub fn analytics(&self) -> &AnalyticsCounter {
        &self.analytics
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub async fn handle(&self, event: InboundEvent) -> Vec<OutboundReply> {
        let user = event.user_id();
        let chat = event.chat_id();

        self.analytics.observe_user(user).await;
        let resolved = self.sessions.resolve(user).await;

        let action = match &event {
            InboundEvent::Message(msg) => match route_message(msg) {
                MessageRoute::Action(action) => action,
                MessageRoute::EmptyInput => {
                    return vec![OutboundReply::text(
                        chat,
                        self.text(resolved.lang, MessageKey::EmptyInput),
                    )];
                }
                MessageRoute::Ignored => {
                    tracing::debug!(command = %msg.command_name, "ignoring unknown command");
                    return Vec::new();
                }
            },
            InboundEvent::Callback(cb) => match Action::from_callback(&cb.payload) {
                Some(action) => action,
                None => {
                    tracing::debug!(payload = %cb.payload, "ignoring unknown callback");
                    return Vec::new();
                }
            },
        };

        self.run(action, chat, user, resolved).await
    }

    async fn run(
        &self,
        action: Action,
        chat: ChatId,
        user: UserId,
        resolved: ResolvedLang,
    ) -> Vec<OutboundReply> {
        // Language selection is counted under the newly chosen language.
        let lang = match &action {
            Action::SelectLanguage(chosen) => *chosen,
            _ => resolved.lang,
        };
        if let Some(name) = action.analytics_name() {
            self.analytics.record_action(name, lang).await;
        }

        match action {
            Action::Start => {
                let keyboard = if resolved.explicit {
                    self.quick_actions(lang)
                } else {
                    keyboards::language_picker()
                };
                vec![OutboundReply::text(chat, self.text(lang, MessageKey::Start))
                    .with_keyboard(keyboard)]
            }
            Action::Help => vec![OutboundReply::text(chat, self.text(lang, MessageKey::Help))
                .with_keyboard(self.quick_actions(lang))],
            Action::SelectLanguage(chosen) => {
                self.sessions.set_language(user, chosen).await;
                let text = format!(
                    "{}\n{}",
                    self.text(chosen, MessageKey::LangChanged),
                    self.text(chosen, MessageKey::Start)
                );
                vec![OutboundReply::text(chat, text).with_keyboard(self.quick_actions(chosen))]
            }
            Action::Donate => vec![OutboundReply::text(
                chat,
                self.text(lang, MessageKey::DonateMessage),
            )
            .with_keyboard(keyboards::donate_picker(
                lang,
                self.l10n.as_ref(),
                &self.settings.donate_links,
            ))],
            Action::DonateThanks => {
                vec![OutboundReply::text(chat, self.text(lang, MessageKey::DonateThanks))]
            }
            Action::SearchPrompt => {
                vec![OutboundReply::text(chat, self.text(lang, MessageKey::SearchPrompt))]
            }
            Action::Stats => {
                let snapshot = self.analytics.snapshot().await;
                vec![OutboundReply::text(
                    chat,
                    format_stats(&snapshot, lang, self.l10n.as_ref()),
                )]
            }
            Action::Search(query) => self.search(chat, lang, &query).await,
            Action::Random => self.random(chat, lang).await,
            Action::Top(filter) => self.top(chat, lang, filter).await,
        }
    }

    async fn search(&self, chat: ChatId, lang: Lang, query: &str) -> Vec<OutboundReply> {
        let found = match self.catalog.search(query, 1).await {
            Ok(records) => records.into_iter().next(),
            Err(e) => {
                log_catalog_error("search", &e);
                return vec![self.failure(chat, lang, MessageKey::ApiError)];
            }
        };

        match found {
            Some(record) => vec![self.record_reply(chat, lang, &record)],
            None => {
                tracing::info!(operation = "search", query, "catalog returned no results");
                vec![self.failure(chat, lang, MessageKey::NotFound)]
            }
        }
    }

    async fn random(&self, chat: ChatId, lang: Lang) -> Vec<OutboundReply> {
        match self.catalog.random().await {
            Ok(record) => vec![self.record_reply(chat, lang, &record)],
            Err(e) => {
                log_catalog_error("random", &e);
                vec![self.failure(chat, lang, MessageKey::ApiError)]
            }
        }
    }

    async fn top(&self, chat: ChatId, lang: Lang, filter: TopFilter) -> Vec<OutboundReply> {
        let list = self.top_list(lang, filter).await;
        let Some(first) = list.items.first() else {
            let text = format_list(&list, lang, self.l10n.as_ref());
            return vec![OutboundReply::text(chat, text).with_keyboard(self.quick_actions(lang))];
        };

        // List first, then the top entry with its image; keyboard goes on the last message.
        vec![
            OutboundReply::text(chat, format_list(&list, lang, self.l10n.as_ref())),
            self.record_reply(chat, lang, first),
        ]
    }

    /// Fetch a ranked list and normalize every outcome into a [`ListResult`].
    pub async fn top_list(&self, lang: Lang, filter: TopFilter) -> ListResult {
        let operation = filter.operation();
        match self.catalog.top_list(filter, self.settings.top_limit).await {
            Ok(items) if items.is_empty() => {
                tracing::info!(operation, "catalog returned no results");
                ListResult::failed(self.text(lang, MessageKey::NotFound))
            }
            Ok(mut items) => {
                items.truncate(self.settings.top_limit);
                ListResult::ok(self.text(lang, heading_key(filter)), items)
            }
            Err(e) => {
                log_catalog_error(operation, &e);
                ListResult::failed(self.text(lang, MessageKey::ApiError))
            }
        }
    }

    fn record_reply(&self, chat: ChatId, lang: Lang, record: &CatalogRecord) -> OutboundReply {
        OutboundReply::text(chat, format_record(record, lang, self.l10n.as_ref()))
            .with_image(record.image_url.clone())
            .with_keyboard(self.quick_actions(lang))
    }

    fn failure(&self, chat: ChatId, lang: Lang, key: MessageKey) -> OutboundReply {
        OutboundReply::text(chat, self.text(lang, key)).with_keyboard(self.quick_actions(lang))
    }

    fn quick_actions(&self, lang: Lang) -> InlineKeyboard {
        keyboards::quick_actions(lang, self.l10n.as_ref())
    }

    fn text(&self, lang: Lang, key: MessageKey) -> String {
        self.l10n.text(lang, key).to_string()
    }
}

enum MessageRoute {
    Action(Action),
    EmptyInput,
    Ignored,
}

fn route_message(msg: &TextMessage) -> MessageRoute {
    if msg.is_command {
        return match Action::from_command(&msg.command_name) {
            Some(action) => MessageRoute::Action(action),
            None => MessageRoute::Ignored,
        };
    }

    let query = msg.text.trim();
    if query.is_empty() {
        MessageRoute::EmptyInput
    } else {
        MessageRoute::Action(Action::Search(query.to_string()))
    }
}

fn heading_key(filter: TopFilter) -> MessageKey {
    match filter {
        TopFilter::All => MessageKey::TopAnime,
        TopFilter::ByPopularity => MessageKey::TopPopular,
        TopFilter::CurrentSeason => MessageKey::TopSeason,
        TopFilter::CurrentYear => MessageKey::TopYear,
    }
}

fn log_catalog_error(operation: &str, err: &CatalogError) {
    match err {
        CatalogError::Transport(_) => {
            tracing::warn!(operation, error = %err, "catalog request failed")
        }
        CatalogError::Malformed(_) => {
            tracing::warn!(operation, error = %err, "catalog response did not parse")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::{
        catalog::CatalogResult,
        i18n::StaticLocalizer,
        messaging::types::{CallbackQuery, KeyboardKind},
    };

    enum Outcome {
        Records(Vec<CatalogRecord>),
        Transport,
        Malformed,
    }

    struct FakeCatalog {
        outcome: Outcome,
        calls: Mutex<Vec<String>>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeCatalog {
        fn new(outcome: Outcome) -> Self {
            Self {
                outcome,
                calls: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        async fn respond(&self, call: String) -> CatalogResult<Vec<CatalogRecord>> {
            self.calls.lock().unwrap().push(call);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match &self.outcome {
                Outcome::Records(r) => Ok(r.clone()),
                Outcome::Transport => Err(CatalogError::Transport("connection refused".into())),
                Outcome::Malformed => Err(CatalogError::Malformed("expected value".into())),
            }
        }
    }

    #[async_trait]
    impl CatalogSource for FakeCatalog {
        async fn search(&self, query: &str, limit: usize) -> CatalogResult<Vec<CatalogRecord>> {
            self.respond(format!("search:{query}:{limit}")).await
        }

        async fn random(&self) -> CatalogResult<CatalogRecord> {
            self.respond("random".to_string())
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| CatalogError::Malformed("missing data".into()))
        }

        async fn top_list(
            &self,
            filter: TopFilter,
            limit: usize,
        ) -> CatalogResult<Vec<CatalogRecord>> {
            self.respond(format!("{}:{limit}", filter.operation())).await
        }
    }

    fn record(title: &str, image: Option<&str>) -> CatalogRecord {
        CatalogRecord {
            title: title.to_string(),
            score: 8.5,
            synopsis: "synopsis".to_string(),
            episode_count: Some(12),
            status: "Finished Airing".to_string(),
            genres: vec!["Action".to_string()],
            image_url: image.map(str::to_string),
        }
    }

    fn dispatcher(catalog: Arc<FakeCatalog>) -> Dispatcher {
        Dispatcher::new(
            Arc::new(SessionStore::default()),
            Arc::new(AnalyticsCounter::new()),
            catalog,
            Arc::new(StaticLocalizer),
            DispatchSettings::default(),
        )
    }

    fn text(user: i64, text: &str) -> InboundEvent {
        InboundEvent::Message(TextMessage::from_text(UserId(user), ChatId(user + 100), text))
    }

    fn callback(user: i64, payload: &str) -> InboundEvent {
        InboundEvent::Callback(CallbackQuery {
            user_id: UserId(user),
            chat_id: ChatId(user + 100),
            payload: payload.to_string(),
        })
    }

    fn l10n(lang: Lang, key: MessageKey) -> String {
        StaticLocalizer.text(lang, key).to_string()
    }

    fn kind(reply: &OutboundReply) -> Option<KeyboardKind> {
        reply.keyboard.as_ref().map(|k| k.kind)
    }

    #[tokio::test]
    async fn random_for_new_user_sends_card_with_image_in_fallback_language() {
        let catalog = Arc::new(FakeCatalog::new(Outcome::Records(vec![record(
            "Mushishi",
            Some("https://cdn/m.jpg"),
        )])));
        let d = dispatcher(catalog.clone());

        let replies = d.handle(text(1, "/random")).await;

        assert_eq!(catalog.calls(), vec!["random"]);
        assert_eq!(replies.len(), 1);
        let r = &replies[0];
        assert_eq!(r.chat_id, ChatId(101));
        assert_eq!(r.image_url.as_deref(), Some("https://cdn/m.jpg"));
        assert!(r.text.starts_with("🎌 Mushishi"));
        assert!(r.text.contains("12 серій"));
        assert_eq!(kind(r), Some(KeyboardKind::QuickActions(Lang::Ua)));

        let stats = d.analytics().snapshot().await;
        assert_eq!(stats.total_distinct_users, 1);
        assert_eq!(stats.action_count("random"), 1);
        assert_eq!(stats.language_count(Lang::Ua), 1);
    }

    #[tokio::test]
    async fn random_without_image_is_text_only() {
        let catalog = Arc::new(FakeCatalog::new(Outcome::Records(vec![record("Mushishi", None)])));
        let d = dispatcher(catalog);

        let replies = d.handle(callback(1, "action_random")).await;
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].image_url, None);
        assert_eq!(kind(&replies[0]), Some(KeyboardKind::QuickActions(Lang::Ua)));
    }

    #[tokio::test]
    async fn search_with_no_results_replies_not_found_in_user_language() {
        let catalog = Arc::new(FakeCatalog::new(Outcome::Records(vec![])));
        let d = dispatcher(catalog.clone());
        d.handle(callback(1, "lang_da")).await;

        let replies = d.handle(text(1, "  naruto ")).await;

        assert_eq!(catalog.calls(), vec!["search:naruto:1"]);
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].text, l10n(Lang::Da, MessageKey::NotFound));
        assert_eq!(replies[0].image_url, None);
        assert_eq!(d.analytics().snapshot().await.action_count("search"), 1);
    }

    #[tokio::test]
    async fn text_that_only_starts_with_a_slash_is_searched() {
        let catalog = Arc::new(FakeCatalog::new(Outcome::Records(vec![])));
        let d = dispatcher(catalog.clone());

        let replies = d.handle(text(1, "/ naruto")).await;

        assert_eq!(catalog.calls(), vec!["search:/ naruto:1"]);
        assert_eq!(replies[0].text, l10n(Lang::Ua, MessageKey::NotFound));
    }

    #[tokio::test]
    async fn catalog_failures_map_to_api_error_and_still_count() {
        for outcome in [Outcome::Transport, Outcome::Malformed] {
            let d = dispatcher(Arc::new(FakeCatalog::new(outcome)));

            let replies = d.handle(text(1, "bebop")).await;
            assert_eq!(replies.len(), 1);
            assert_eq!(replies[0].text, l10n(Lang::Ua, MessageKey::ApiError));
            assert_eq!(kind(&replies[0]), Some(KeyboardKind::QuickActions(Lang::Ua)));

            let replies = d.handle(text(1, "/top_year")).await;
            assert_eq!(replies.len(), 1);
            assert_eq!(replies[0].text, l10n(Lang::Ua, MessageKey::ApiError));

            let replies = d.handle(callback(1, "action_random")).await;
            assert_eq!(replies.len(), 1);
            assert_eq!(replies[0].text, l10n(Lang::Ua, MessageKey::ApiError));
            assert_eq!(replies[0].image_url, None);
            assert_eq!(kind(&replies[0]), Some(KeyboardKind::QuickActions(Lang::Ua)));

            let stats = d.analytics().snapshot().await;
            assert_eq!(stats.action_count("search"), 1);
            assert_eq!(stats.action_count("top_year"), 1);
            assert_eq!(stats.action_count("random"), 1);
            assert_eq!(stats.language_count(Lang::Ua), 3);
        }
    }

    #[tokio::test]
    async fn start_offers_language_picker_until_a_language_is_chosen() {
        let d = dispatcher(Arc::new(FakeCatalog::new(Outcome::Records(vec![]))));

        let first = d.handle(text(1, "/start")).await;
        assert_eq!(first[0].text, l10n(Lang::Ua, MessageKey::Start));
        assert_eq!(kind(&first[0]), Some(KeyboardKind::LanguagePicker));

        let changed = d.handle(callback(1, "lang_en")).await;
        assert_eq!(
            changed[0].text,
            format!(
                "{}\n{}",
                l10n(Lang::En, MessageKey::LangChanged),
                l10n(Lang::En, MessageKey::Start)
            )
        );
        assert_eq!(kind(&changed[0]), Some(KeyboardKind::QuickActions(Lang::En)));

        let again = d.handle(text(1, "/start")).await;
        assert_eq!(again[0].text, l10n(Lang::En, MessageKey::Start));
        assert_eq!(kind(&again[0]), Some(KeyboardKind::QuickActions(Lang::En)));

        let help = d.handle(text(1, "/help")).await;
        assert_eq!(help[0].text, l10n(Lang::En, MessageKey::Help));

        let stats = d.analytics().snapshot().await;
        assert_eq!(stats.action_count("lang_change"), 1);
        assert_eq!(stats.language_count(Lang::Ua), 1);
        assert_eq!(stats.language_count(Lang::En), 3);

        // Another user still sees the fallback.
        let other = d.handle(text(2, "/start")).await;
        assert_eq!(kind(&other[0]), Some(KeyboardKind::LanguagePicker));
    }

    #[tokio::test]
    async fn top_list_sends_list_then_highlighted_card() {
        let catalog = Arc::new(FakeCatalog::new(Outcome::Records(vec![
            record("Frieren", Some("https://cdn/f.jpg")),
            record("Steins;Gate", None),
        ])));
        let d = dispatcher(catalog.clone());

        let replies = d.handle(callback(1, "action_top_season")).await;

        assert_eq!(catalog.calls(), vec!["top_season:5"]);
        assert_eq!(replies.len(), 2);
        assert_eq!(
            replies[0].text,
            format!(
                "{}\n\n1. Frieren - ⭐ 8.5\n2. Steins;Gate - ⭐ 8.5\n",
                l10n(Lang::Ua, MessageKey::TopSeason)
            )
        );
        assert!(replies[0].keyboard.is_none());
        assert!(replies[0].image_url.is_none());
        assert!(replies[1].text.starts_with("🎌 Frieren"));
        assert_eq!(replies[1].image_url.as_deref(), Some("https://cdn/f.jpg"));
        assert_eq!(kind(&replies[1]), Some(KeyboardKind::QuickActions(Lang::Ua)));
    }

    #[tokio::test]
    async fn empty_top_list_is_a_single_not_found_reply() {
        let d = dispatcher(Arc::new(FakeCatalog::new(Outcome::Records(vec![]))));
        let replies = d.handle(text(1, "/top")).await;
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].text, l10n(Lang::Ua, MessageKey::NotFound));
        assert_eq!(kind(&replies[0]), Some(KeyboardKind::QuickActions(Lang::Ua)));
    }

    #[tokio::test]
    async fn top_list_is_capped_to_limit() {
        let many = (0..8).map(|i| record(&format!("t{i}"), None)).collect();
        let d = dispatcher(Arc::new(FakeCatalog::new(Outcome::Records(many))));
        let list = d.top_list(Lang::En, TopFilter::CurrentSeason).await;
        assert!(list.succeeded);
        assert_eq!(list.items.len(), 5);
        assert_eq!(list.heading, l10n(Lang::En, MessageKey::TopSeason));
    }

    #[tokio::test]
    async fn unknown_command_and_callback_are_dropped_but_user_is_seen() {
        let catalog = Arc::new(FakeCatalog::new(Outcome::Records(vec![])));
        let d = dispatcher(catalog.clone());

        assert!(d.handle(text(1, "/settings")).await.is_empty());
        assert!(d.handle(callback(1, "lang_fr")).await.is_empty());
        assert!(d.handle(callback(1, "bogus")).await.is_empty());

        let stats = d.analytics().snapshot().await;
        assert_eq!(stats.total_distinct_users, 1);
        assert!(stats.action_counts.is_empty());
        assert!(catalog.calls().is_empty());
        assert!(d.sessions().is_empty().await);
    }

    #[tokio::test]
    async fn empty_text_asks_for_input_without_counting_or_calling_catalog() {
        let catalog = Arc::new(FakeCatalog::new(Outcome::Records(vec![])));
        let d = dispatcher(catalog.clone());

        for input in ["", "   "] {
            let replies = d.handle(text(1, input)).await;
            assert_eq!(replies.len(), 1);
            assert_eq!(replies[0].text, l10n(Lang::Ua, MessageKey::EmptyInput));
            assert!(replies[0].keyboard.is_none());
        }
        assert!(catalog.calls().is_empty());
        let stats = d.analytics().snapshot().await;
        assert_eq!(stats.total_distinct_users, 1);
        assert!(stats.action_counts.is_empty());
    }

    #[tokio::test]
    async fn distinct_users_increase_once_per_user() {
        let d = dispatcher(Arc::new(FakeCatalog::new(Outcome::Records(vec![]))));
        for (user, input) in [(1, "/start"), (1, "/help"), (2, ""), (1, "x"), (3, "/nope"), (2, "/stats")] {
            d.handle(text(user, input)).await;
        }
        d.handle(callback(3, "donate_thanks")).await;
        assert_eq!(d.analytics().snapshot().await.total_distinct_users, 3);
    }

    #[tokio::test]
    async fn stats_report_includes_its_own_invocation() {
        let d = dispatcher(Arc::new(FakeCatalog::new(Outcome::Records(vec![]))));
        d.handle(text(1, "/help")).await;
        d.handle(text(2, "/help")).await;

        let replies = d.handle(text(1, "/stats")).await;
        assert_eq!(replies.len(), 1);
        let r = &replies[0];
        assert!(r.keyboard.is_none());
        assert!(r.text.contains("👥 Всього користувачів: 2"));
        assert!(r.text.contains("• help: 2 разів"));
        assert!(r.text.contains("• stats: 1 разів"));
        assert!(r.text.contains("• ua: 3 разів"));
    }

    #[tokio::test]
    async fn donate_shows_picker_and_thanks_has_no_keyboard() {
        let d = dispatcher(Arc::new(FakeCatalog::new(Outcome::Records(vec![]))));

        let donate = d.handle(text(1, "/donate")).await;
        assert_eq!(donate[0].text, l10n(Lang::Ua, MessageKey::DonateMessage));
        assert_eq!(kind(&donate[0]), Some(KeyboardKind::DonatePicker));

        let thanks = d.handle(callback(1, "donate_thanks")).await;
        assert_eq!(thanks[0].text, l10n(Lang::Ua, MessageKey::DonateThanks));
        assert!(thanks[0].keyboard.is_none());

        let stats = d.analytics().snapshot().await;
        assert_eq!(stats.action_count("donate"), 1);
        assert_eq!(stats.action_count("donate_thanks"), 1);
    }

    #[tokio::test]
    async fn search_button_prompts_for_a_title() {
        let catalog = Arc::new(FakeCatalog::new(Outcome::Records(vec![])));
        let d = dispatcher(catalog.clone());
        let replies = d.handle(callback(1, "action_search")).await;
        assert_eq!(replies[0].text, l10n(Lang::Ua, MessageKey::SearchPrompt));
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn pending_catalog_call_does_not_block_other_events() {
        let gate = Arc::new(Notify::new());
        let mut slow = FakeCatalog::new(Outcome::Records(vec![record("Monster", None)]));
        slow.gate = Some(gate.clone());
        let d = Arc::new(dispatcher(Arc::new(slow)));

        let pending = {
            let d = d.clone();
            tokio::spawn(async move { d.handle(text(1, "monster")).await })
        };

        // While the search is in flight, other users are served and stats are readable.
        let other = tokio::time::timeout(Duration::from_secs(5), d.handle(text(2, "/stats")))
            .await
            .expect("stats must not wait for the catalog");
        assert_eq!(other.len(), 1);

        gate.notify_one();
        let replies = pending.await.unwrap();
        assert!(replies[0].text.starts_with("🎌 Monster"));
    }
}
