use std::sync::Arc;

use atb_jikan::JikanClient;

use atb_core::{
    analytics::AnalyticsCounter, config::Config, dispatcher::Dispatcher, i18n::StaticLocalizer,
    session::SessionStore,
};

#[tokio::main]
async fn main() -> Result<(), atb_core::Error> {
    atb_core::logging::init("atb")?;

    let cfg = Arc::new(Config::load()?);

    let catalog = Arc::new(JikanClient::new(
        cfg.catalog_base_url.clone(),
        cfg.catalog_timeout,
    )?);

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(SessionStore::new(cfg.default_language)),
        Arc::new(AnalyticsCounter::new()),
        catalog,
        Arc::new(StaticLocalizer),
        cfg.dispatch_settings(),
    ));

    tracing::info!("starting Telegram polling");
    atb_telegram::router::run_polling(cfg, dispatcher)
        .await
        .map_err(|e| atb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
