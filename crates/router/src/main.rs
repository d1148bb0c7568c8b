use clap::{Parser, Subcommand};
use hermes_router::{
    AppState, Console, ExecutionService, InMemoryVenueStore, RouterConfig, SeedLoader,
    create_router,
};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Multi-venue execution router
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Load configuration from JSON file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Directory holding exchange-NN.json seed files (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Serve the REST API
    Serve,
    /// Interactive buy/sell console
    Repl,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("hermes_router=info"))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            RouterConfig::from_file(path)?
        }
        None => RouterConfig::default(),
    };
    config.apply_env_overrides()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    info!("{}", config.name);

    let store = InMemoryVenueStore::new();
    SeedLoader::new(&config.data_dir).seed_store(&store).await?;

    let store = Arc::new(store);
    let service = Arc::new(ExecutionService::new(
        Arc::clone(&store),
        store,
        config.max_conflict_retries,
    ));

    match cli.mode {
        Mode::Serve => serve(service, &config).await,
        Mode::Repl => {
            Console::new(service, config.assets.clone()).run().await?;
            Ok(())
        }
    }
}

async fn serve(
    service: Arc<hermes_router::presentation::VenueExecutionService>,
    config: &RouterConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let shutdown = CancellationToken::new();
    let router = create_router(Arc::new(AppState::new(service, shutdown.clone())));

    let addr = config.bind_address();
    info!("Execution router listening on {}", addr);
    info!("Available endpoints:");
    info!("  GET  /api/ping");
    info!("  GET  /api/venues");
    info!("  POST /api/order");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
