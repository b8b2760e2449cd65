use clap::Parser;
use platewise_api::{ApiState, RestApi};
use platewise_similarity::{Ranker, Recommender, DEFAULT_PARALLEL_THRESHOLD};
use platewise_storage::{CatalogStore, StoreConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// A content-based restaurant recommender
#[derive(Parser, Debug)]
#[command(name = "platewise")]
#[command(about = "Restaurant recommendations over a cleaned catalog", long_about = None)]
struct Args {
    /// Path to the cleaned restaurant catalog (CSV)
    #[arg(short, long, default_value = "cleaned_data.csv")]
    catalog: PathBuf,

    /// Path to the fitted category vocabulary (JSON)
    #[arg(short, long, default_value = "vocabulary.json")]
    vocabulary: PathBuf,

    /// HTTP API port
    #[arg(long, env = "PORT", default_value_t = 5500)]
    http_port: u16,

    /// Restaurants per similarity page
    #[arg(long, default_value_t = 4)]
    page_size: usize,

    /// Candidate count at which scoring switches to the rayon pool
    #[arg(long, default_value_t = DEFAULT_PARALLEL_THRESHOLD)]
    parallel_threshold: usize,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string().to_lowercase()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Platewise v{}", env!("CARGO_PKG_VERSION"));
    info!("Catalog: {:?}", args.catalog);
    info!("Vocabulary: {:?}", args.vocabulary);
    info!("HTTP API port: {}", args.http_port);

    let store = Arc::new(CatalogStore::open(&StoreConfig {
        catalog_path: args.catalog.clone(),
        vocabulary_path: args.vocabulary.clone(),
    })?);
    info!(
        restaurants = store.snapshot().len(),
        dim = store.encoder().dim(),
        "Catalog loaded"
    );

    let recommender = Recommender::new(store.encoder())
        .with_page_size(args.page_size)
        .with_ranker(Ranker::new().with_parallel_threshold(args.parallel_threshold));
    let state = ApiState::new(store, recommender);

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("Platewise started successfully");
    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
