//! Inline keyboard layouts offered with replies.

use crate::{
    i18n::{Lang, Localizer, MessageKey},
    messaging::types::{InlineButton, InlineKeyboard, KeyboardKind},
    routing,
};

/// External donation links shown by the donate picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DonateLinks {
    pub paypal: String,
    pub mobilepay: String,
}

impl Default for DonateLinks {
    fn default() -> Self {
        Self {
            paypal: "https://paypal.me/deusflowro".to_string(),
            mobilepay:
                "https://qr.mobilepay.dk/box/d017b43a-052e-4884-8fd6-851349b234a2/pay-in"
                    .to_string(),
        }
    }
}

/// Flag buttons for every supported language. Labels are never localized.
pub fn language_picker() -> InlineKeyboard {
    let button =
        |lang: Lang| InlineButton::callback(lang.picker_label(), routing::lang_payload(lang));
    InlineKeyboard {
        kind: KeyboardKind::LanguagePicker,
        rows: vec![
            vec![button(Lang::Ua), button(Lang::En)],
            vec![button(Lang::Da)],
        ],
    }
}

pub fn quick_actions(lang: Lang, l10n: &dyn Localizer) -> InlineKeyboard {
    let button =
        |key: MessageKey, payload: &str| InlineButton::callback(l10n.text(lang, key), payload);
    InlineKeyboard {
        kind: KeyboardKind::QuickActions(lang),
        rows: vec![
            vec![
                button(MessageKey::BtnRandom, routing::CB_RANDOM),
                button(MessageKey::BtnTop, routing::CB_TOP),
            ],
            vec![button(MessageKey::BtnSearch, routing::CB_SEARCH)],
            vec![
                button(MessageKey::BtnTopPopular, routing::CB_TOP_POPULAR),
                button(MessageKey::BtnTopSeason, routing::CB_TOP_SEASON),
            ],
            vec![button(MessageKey::BtnTopYear, routing::CB_TOP_YEAR)],
        ],
    }
}

pub fn donate_picker(lang: Lang, l10n: &dyn Localizer, links: &DonateLinks) -> InlineKeyboard {
    InlineKeyboard {
        kind: KeyboardKind::DonatePicker,
        rows: vec![
            vec![
                InlineButton::url("💳 PayPal", links.paypal.clone()),
                InlineButton::url("📱 MobilePay", links.mobilepay.clone()),
            ],
            vec![InlineButton::callback(
                l10n.text(lang, MessageKey::BtnDonateThanks),
                routing::CB_DONATE_THANKS,
            )],
        ],
    }
}
