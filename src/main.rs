use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use turma_bot::{
    bot, config,
    core::store::RosterStore,
    errors::{Error, Result},
    health,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load settings and the course catalog
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    // 4. Open the roster document, creating it on first run
    let store = RosterStore::new(app_config.settings.roster_path.clone());
    let roster = store
        .read()
        .await
        .inspect_err(|e| error!("Failed to open roster document: {}", e))?;
    info!(
        "Roster loaded from {}: {} classes, {} students",
        store.path().display(),
        roster.classes.len(),
        roster.students.len()
    );

    // 5. Keep-alive endpoint for the hosting platform
    tokio::spawn(health::start_server(app_config.settings.port));

    // 6. Run the bot
    // DISCORD_BOT_TOKEN is loaded here, directly before use, not stored in AppConfig
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(|_| Error::MissingConfiguration {
            name: "DISCORD_BOT_TOKEN".to_string(),
        })?;

    bot::run_bot(token, Arc::new(app_config), store)
        .await
        .map_err(Error::from)?;

    Ok(())
}
