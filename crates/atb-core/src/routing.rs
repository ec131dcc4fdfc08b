//! Mapping from commands and callback payloads to actions.

use crate::{catalog::TopFilter, i18n::Lang};

pub const CB_RANDOM: &str = "action_random";
pub const CB_TOP: &str = "action_top";
pub const CB_TOP_POPULAR: &str = "action_top_popular";
pub const CB_TOP_SEASON: &str = "action_top_season";
pub const CB_TOP_YEAR: &str = "action_top_year";
pub const CB_SEARCH: &str = "action_search";
pub const CB_DONATE_THANKS: &str = "donate_thanks";

const LANG_PREFIX: &str = "lang_";

/// Callback payload that selects `lang`.
pub fn lang_payload(lang: Lang) -> String {
    format!("{LANG_PREFIX}{}", lang.code())
}

/// A named handler bound to a command or callback payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    Help,
    Random,
    Top(TopFilter),
    Donate,
    DonateThanks,
    Stats,
    Search(String),
    SearchPrompt,
    SelectLanguage(Lang),
}

impl Action {
    /// Key under which the action is counted, or `None` for UI-only prompts.
    pub fn analytics_name(&self) -> Option<&'static str> {
        Some(match self {
            Action::Start => "start",
            Action::Help => "help",
            Action::Random => "random",
            Action::Top(filter) => filter.operation(),
            Action::Donate => "donate",
            Action::DonateThanks => "donate_thanks",
            Action::Stats => "stats",
            Action::Search(_) => "search",
            Action::SelectLanguage(_) => "lang_change",
            Action::SearchPrompt => return None,
        })
    }

    /// Route a command name (already lowercased, without `/` or `@bot`).
    pub fn from_command(name: &str) -> Option<Self> {
        Some(match name {
            "start" => Action::Start,
            "help" => Action::Help,
            "random" => Action::Random,
            "top" => Action::Top(TopFilter::All),
            "top_popular" | "top-by-popularity" => Action::Top(TopFilter::ByPopularity),
            "top_season" => Action::Top(TopFilter::CurrentSeason),
            "top_year" => Action::Top(TopFilter::CurrentYear),
            "donate" => Action::Donate,
            "stats" => Action::Stats,
            _ => return None,
        })
    }

    /// Route a callback payload.
    pub fn from_callback(payload: &str) -> Option<Self> {
        if let Some(code) = payload.strip_prefix(LANG_PREFIX) {
            return Lang::from_code(code).map(Action::SelectLanguage);
        }
        Some(match payload {
            CB_RANDOM => Action::Random,
            CB_TOP => Action::Top(TopFilter::All),
            CB_TOP_POPULAR => Action::Top(TopFilter::ByPopularity),
            CB_TOP_SEASON => Action::Top(TopFilter::CurrentSeason),
            CB_TOP_YEAR => Action::Top(TopFilter::CurrentYear),
            CB_SEARCH => Action::SearchPrompt,
            CB_DONATE_THANKS => Action::DonateThanks,
            _ => return None,
        })
    }
}
