//! Messenger-agnostic abstractions (Telegram today).

pub mod outbox;
pub mod port;
pub mod throttled;
pub mod types;
