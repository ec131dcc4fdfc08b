//! Plain-text rendering of catalog records, ranked lists and usage stats.

use std::fmt::Write as _;

use crate::{
    analytics::AnalyticsSnapshot,
    catalog::{CatalogRecord, ListResult},
    i18n::{Lang, Localizer, MessageKey},
};

/// Maximum synopsis length (in characters) shown in a record card.
pub const SYNOPSIS_LIMIT: usize = 200;

/// Render a single record card.
pub fn format_record(record: &CatalogRecord, lang: Lang, l10n: &dyn Localizer) -> String {
    let episodes = match record.episode_count {
        Some(n) if n > 0 => n.to_string(),
        _ => "?".to_string(),
    };

    format!(
        "🎌 {}\n⭐ {:.1}\n📺 {} {}\n📊 {}\n🎭 {}\n\n📝 {}",
        record.title,
        record.score,
        episodes,
        l10n.text(lang, MessageKey::EpisodesUnit),
        record.status,
        record.genres.join(", "),
        truncate_chars(&record.synopsis, SYNOPSIS_LIMIT),
    )
}

/// Render a ranked list: heading, blank line, then `"<rank>. <title> - ⭐ <score>"` lines.
///
/// Failed or empty lists render as a single message, never as a bare heading.
pub fn format_list(list: &ListResult, lang: Lang, l10n: &dyn Localizer) -> String {
    if !list.succeeded {
        return list.heading.clone();
    }
    if list.items.is_empty() {
        return l10n.text(lang, MessageKey::NotFound).to_string();
    }

    let mut out = format!("{}\n\n", list.heading);
    for (idx, item) in list.items.iter().enumerate() {
        let _ = writeln!(out, "{}. {} - ⭐ {:.1}", idx + 1, item.title, item.score);
    }
    out
}

/// Render the usage report. Pairs are sorted by key.
pub fn format_stats(stats: &AnalyticsSnapshot, lang: Lang, l10n: &dyn Localizer) -> String {
    let times = l10n.text(lang, MessageKey::StatsTimes);

    let mut out = format!(
        "{}\n\n{} {}\n\n{}\n",
        l10n.text(lang, MessageKey::StatsTitle),
        l10n.text(lang, MessageKey::StatsUsers),
        stats.total_distinct_users,
        l10n.text(lang, MessageKey::StatsActions),
    );
    for (action, count) in &stats.action_counts {
        let _ = writeln!(out, "• {action}: {count} {times}");
    }

    let _ = write!(out, "\n{}\n", l10n.text(lang, MessageKey::StatsLanguages));
    for (language, count) in &stats.language_counts {
        let _ = writeln!(out, "• {language}: {count} {times}");
    }
    out
}

/// Cut `text` to at most `max_chars` characters, appending `...` when cut.
///
/// Not word-boundary aware; never splits a UTF-8 code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
