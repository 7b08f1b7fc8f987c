use clap::Parser;
use dotenvy::dotenv;
use idea_board::{
    cli::{Cli, TerminalClipboard, TerminalShareSheet, run_command},
    config::{self, database},
    core::{IdeaStore, evaluation::Evaluator},
    errors::Result,
    storage::SqliteStore,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    let cli = Cli::parse();

    // 3. Load the application configuration
    let app_config = config::load_app_config(&cli.config)
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    // 4. Open the on-device database
    let database_url = database::resolve_database_url(app_config.storage.database_url.as_deref());
    let db = database::create_connection(&database_url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Build and hydrate the store
    let mut store = IdeaStore::new(
        Arc::new(SqliteStore::new(db)),
        Evaluator::from_entropy(),
        app_config.store_options(),
    );
    let report = store.hydrate().await?;
    info!("Hydration finished: {:?}", report);

    // 6. Run the command, then wait for its writes before exiting
    let clipboard = TerminalClipboard::new();
    let outcome = run_command(
        &mut store,
        cli.command,
        app_config.leaderboard.size,
        &TerminalShareSheet,
        &clipboard,
    )
    .await;

    let failed = store.flush().await;
    if failed > 0 {
        warn!("{} writes failed; changes may not survive a restart", failed);
    }

    println!("{}", outcome?);
    Ok(())
}
