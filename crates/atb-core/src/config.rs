use std::{env, fs, path::Path, time::Duration};

use crate::{
    dispatcher::DispatchSettings, errors::Error, i18n::Lang, keyboards::DonateLinks, Result,
};

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://api.jikan.moe/v4";
const MAX_TOP_LIST_LIMIT: usize = 25;

/// Typed configuration, read from the environment (and `.env` if present).
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    // Catalog
    pub catalog_base_url: String,
    pub catalog_timeout: Duration,

    // Behavior
    pub default_language: Lang,
    pub top_list_limit: usize,
    pub donate_links: DonateLinks,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);

        let telegram_bot_token = get("TELEGRAM_TOKEN")
            .or_else(|| get("TELEGRAM_BOT_TOKEN"))
            .ok_or_else(|| {
                Error::Config("TELEGRAM_TOKEN environment variable is required".to_string())
            })?;

        let catalog_base_url = get("CATALOG_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_CATALOG_BASE_URL.to_string());
        let catalog_timeout = Duration::from_millis(
            get("CATALOG_TIMEOUT_MS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(10_000),
        );

        let default_language = match get("DEFAULT_LANGUAGE") {
            Some(code) => Lang::from_code(&code).ok_or_else(|| {
                Error::Config(format!(
                    "DEFAULT_LANGUAGE must be one of ua, en, da (got {code:?})"
                ))
            })?,
            None => Lang::default(),
        };

        let top_list_limit = get("TOP_LIST_LIMIT")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(5)
            .clamp(1, MAX_TOP_LIST_LIMIT);

        let defaults = DonateLinks::default();
        let donate_links = DonateLinks {
            paypal: get("DONATE_PAYPAL_URL").unwrap_or(defaults.paypal),
            mobilepay: get("DONATE_MOBILEPAY_URL").unwrap_or(defaults.mobilepay),
        };

        Ok(Self {
            telegram_bot_token,
            catalog_base_url,
            catalog_timeout,
            default_language,
            top_list_limit,
            donate_links,
        })
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            top_limit: self.top_list_limit,
            donate_links: self.donate_links.clone(),
        }
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        env::set_var(key, strip_quotes(v.trim()));
    }
}

fn strip_quotes(val: &str) -> &str {
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        &val[1..val.len() - 1]
    } else {
        val
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
