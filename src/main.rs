use ebook_frequency::config::{AppConfig, USAGE};
use ebook_frequency::ingestion::fetch::HttpFetcher;
use ebook_frequency::server::{AppState, build_router};
use ebook_frequency::storage::memory::MemoryFrequencyStore;
use ebook_frequency::storage::sqlite::SqliteFrequencyStore;
use ebook_frequency::storage::types::FrequencyStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match AppConfig::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    // 1. Frequency store:
    let store: Arc<dyn FrequencyStore> = if config.in_memory {
        tracing::info!("Using in-memory frequency store");
        Arc::new(MemoryFrequencyStore::new())
    } else {
        tracing::info!("Using frequency store at {}", config.db_path.display());
        Arc::new(SqliteFrequencyStore::new(config.db_path.clone()))
    };

    store.initialize()?;
    if config.reset_on_start {
        store.reset()?;
    }

    // 2. Fetch collaborator:
    let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout)?);

    // 3. HTTP router:
    let state = Arc::new(AppState {
        store,
        fetcher,
        default_display_count: config.default_display_count,
    });
    let app = build_router(state);

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
