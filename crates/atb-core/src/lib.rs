//! Core domain + application logic for the anime catalog Telegram bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and the Jikan
//! catalog API live behind ports (traits) implemented in adapter crates.

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod i18n;
pub mod keyboards;
pub mod logging;
pub mod messaging;
pub mod routing;
pub mod session;

pub use errors::{Error, Result};
