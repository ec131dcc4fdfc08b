//! Localized strings.
//!
//! Every lookup goes through a typed [`Lang`] and [`MessageKey`], and the
//! static table matches exhaustively on both: adding a key or a language
//! without its translations does not compile.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported interface languages.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Lang {
    /// Ukrainian. The fallback for users who never picked a language.
    #[default]
    Ua,
    En,
    Da,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Ua, Lang::En, Lang::Da];

    pub fn code(self) -> &'static str {
        match self {
            Lang::Ua => "ua",
            Lang::En => "en",
            Lang::Da => "da",
        }
    }

    /// Parse a language code (case-insensitive). Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ua" => Some(Lang::Ua),
            "en" => Some(Lang::En),
            "da" => Some(Lang::Da),
            _ => None,
        }
    }

    /// Button label shown in the language picker.
    pub fn picker_label(self) -> &'static str {
        match self {
            Lang::Ua => "🇺🇦 Українська",
            Lang::En => "🇺🇸 English",
            Lang::Da => "🇩🇰 Dansk",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Keys of every user-visible string the bot renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Start,
    Help,
    EmptyInput,
    ApiError,
    NotFound,
    SearchPrompt,
    TopAnime,
    TopPopular,
    TopSeason,
    TopYear,
    DonateMessage,
    DonateThanks,
    LangChanged,
    BtnRandom,
    BtnTop,
    BtnSearch,
    BtnTopPopular,
    BtnTopSeason,
    BtnTopYear,
    BtnDonateThanks,
    EpisodesUnit,
    StatsTitle,
    StatsUsers,
    StatsActions,
    StatsLanguages,
    StatsTimes,
}

/// Port for localized text.
pub trait Localizer: Send + Sync {
    fn text(&self, lang: Lang, key: MessageKey) -> &str;
}

/// Built-in string tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticLocalizer;

impl Localizer for StaticLocalizer {
    fn text(&self, lang: Lang, key: MessageKey) -> &str {
        match lang {
            Lang::Ua => ua(key),
            Lang::En => en(key),
            Lang::Da => da(key),
        }
    }
}

fn ua(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        Start => "👋 Привіт! Я допоможу знайти аніме.\nНапиши назву аніме або обери дію нижче.",
        Help => "ℹ️ Що я вмію:\n\n/random - випадкове аніме\n/top - топ аніме\n/top_popular - найпопулярніші\n/top_season - топ цього сезону\n/top_year - топ цього року\n/donate - підтримати проєкт\n\nАбо просто напиши назву аніме для пошуку.",
        EmptyInput => "✍️ Напиши назву аніме, щоб я його знайшов.",
        ApiError => "⚠️ Не вдалося отримати дані. Спробуй пізніше.",
        NotFound => "😔 Нічого не знайдено.",
        SearchPrompt => "🔍 Напиши назву аніме, яке хочеш знайти.",
        TopAnime => "🏆 Топ аніме:",
        TopPopular => "🔥 Найпопулярніші аніме:",
        TopSeason => "🌸 Топ аніме цього сезону:",
        TopYear => "📅 Топ аніме цього року:",
        DonateMessage => "💝 Якщо тобі подобається бот, можеш підтримати розробку:",
        DonateThanks => "❤️ Дякуємо за підтримку!",
        LangChanged => "✅ Мову змінено на українську.",
        BtnRandom => "🎲 Випадкове",
        BtnTop => "🏆 Топ",
        BtnSearch => "🔍 Пошук",
        BtnTopPopular => "🔥 Популярні",
        BtnTopSeason => "🌸 Сезон",
        BtnTopYear => "📅 Рік",
        BtnDonateThanks => "❤️ Дякую!",
        EpisodesUnit => "серій",
        StatsTitle => "📊 СТАТИСТИКА БОТА:",
        StatsUsers => "👥 Всього користувачів:",
        StatsActions => "📈 Популярні команди:",
        StatsLanguages => "🌍 Мови:",
        StatsTimes => "разів",
    }
}

fn en(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        Start => "👋 Hi! I will help you find anime.\nType an anime title or pick an action below.",
        Help => "ℹ️ What I can do:\n\n/random - random anime\n/top - top anime\n/top_popular - most popular\n/top_season - top of this season\n/top_year - top of this year\n/donate - support the project\n\nOr just type an anime title to search.",
        EmptyInput => "✍️ Type an anime title and I will find it.",
        ApiError => "⚠️ Could not fetch data. Please try again later.",
        NotFound => "😔 Nothing found.",
        SearchPrompt => "🔍 Type the title of the anime you are looking for.",
        TopAnime => "🏆 Top anime:",
        TopPopular => "🔥 Most popular anime:",
        TopSeason => "🌸 Top anime this season:",
        TopYear => "📅 Top anime this year:",
        DonateMessage => "💝 If you enjoy the bot, you can support its development:",
        DonateThanks => "❤️ Thank you for your support!",
        LangChanged => "✅ Language changed to English.",
        BtnRandom => "🎲 Random",
        BtnTop => "🏆 Top",
        BtnSearch => "🔍 Search",
        BtnTopPopular => "🔥 Popular",
        BtnTopSeason => "🌸 Season",
        BtnTopYear => "📅 Year",
        BtnDonateThanks => "❤️ Thanks!",
        EpisodesUnit => "episodes",
        StatsTitle => "📊 BOT STATISTICS:",
        StatsUsers => "👥 Total users:",
        StatsActions => "📈 Popular commands:",
        StatsLanguages => "🌍 Languages:",
        StatsTimes => "times",
    }
}

fn da(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        Start => "👋 Hej! Jeg hjælper dig med at finde anime.\nSkriv en anime-titel eller vælg en handling nedenfor.",
        Help => "ℹ️ Hvad jeg kan:\n\n/random - tilfældig anime\n/top - top anime\n/top_popular - mest populære\n/top_season - top denne sæson\n/top_year - top i år\n/donate - støt projektet\n\nEller skriv bare en anime-titel for at søge.",
        EmptyInput => "✍️ Skriv en anime-titel, så finder jeg den.",
        ApiError => "⚠️ Kunne ikke hente data. Prøv igen senere.",
        NotFound => "😔 Intet fundet.",
        SearchPrompt => "🔍 Skriv titlen på den anime, du leder efter.",
        TopAnime => "🏆 Top anime:",
        TopPopular => "🔥 Mest populære anime:",
        TopSeason => "🌸 Top anime denne sæson:",
        TopYear => "📅 Top anime i år:",
        DonateMessage => "💝 Hvis du kan lide botten, kan du støtte udviklingen:",
        DonateThanks => "❤️ Tak for din støtte!",
        LangChanged => "✅ Sproget er skiftet til dansk.",
        BtnRandom => "🎲 Tilfældig",
        BtnTop => "🏆 Top",
        BtnSearch => "🔍 Søg",
        BtnTopPopular => "🔥 Populære",
        BtnTopSeason => "🌸 Sæson",
        BtnTopYear => "📅 År",
        BtnDonateThanks => "❤️ Tak!",
        EpisodesUnit => "episoder",
        StatsTitle => "📊 BOT STATISTIK:",
        StatsUsers => "👥 Brugere i alt:",
        StatsActions => "📈 Populære kommandoer:",
        StatsLanguages => "🌍 Sprog:",
        StatsTimes => "gange",
    }
}
