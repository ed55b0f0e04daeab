use std::{
    fs::OpenOptions,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use grocer_rs::{
    AppState, Catalog, DEFAULT_DAILY_CALL_LIMIT, EdamamClient, EdamamConfig, StorageBackend,
    Stores, build_router, graceful_shutdown, logging_middleware,
};

/// The REST API server for grocer_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// File path to the application SQLite database. Saved lists are kept in
    /// memory and lost on restart if this is not set.
    #[arg(long, env = "DATABASE_PATH")]
    db_path: Option<PathBuf>,

    /// File path to a grocery catalog JSON file to use instead of the built-in one.
    #[arg(long, env = "CATALOG_PATH")]
    catalog_path: Option<PathBuf>,

    /// The Edamam food database application ID.
    #[arg(long, env = "EDAMAM_APP_ID", default_value = "")]
    edamam_app_id: String,

    /// The Edamam food database application key.
    #[arg(long, env = "EDAMAM_APP_KEY", default_value = "", hide_env_values = true)]
    edamam_app_key: String,

    /// How many times per day the food database may be tried.
    #[arg(long, env = "DAILY_CALL_LIMIT", default_value_t = DEFAULT_DAILY_CALL_LIMIT)]
    daily_call_limit: u32,

    /// How long to wait for a single food database lookup, in seconds.
    #[arg(long, env = "LOOKUP_TIMEOUT_SECS", default_value_t = 3)]
    lookup_timeout_secs: u64,

    /// File path for a debug level log file. Only stdout is logged to if not set.
    #[arg(long, env = "LOG_PATH")]
    log_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(args.log_path.as_deref());

    let catalog = match &args.catalog_path {
        Some(path) => Catalog::from_path(path),
        None => Catalog::builtin(),
    }
    .expect("Could not load the grocery catalog");
    tracing::info!("Loaded {} catalog items", catalog.len());

    if args.edamam_app_id.is_empty() || args.edamam_app_key.is_empty() {
        tracing::warn!(
            "Edamam credentials are not set, food database lookups will fail and lists will come from the local catalog"
        );
    }

    let food_lookup = EdamamClient::new(EdamamConfig {
        app_id: args.edamam_app_id,
        app_key: args.edamam_app_key,
        timeout: Duration::from_secs(args.lookup_timeout_secs),
        ..Default::default()
    })
    .expect("Could not create the Edamam client");

    let backend = StorageBackend::from_db_path(args.db_path);
    match &backend {
        StorageBackend::Sqlite(path) => tracing::info!("Using SQLite database {}", path.display()),
        StorageBackend::InMemory => tracing::info!("No database path set, using in-memory storage"),
    }
    let stores = Stores::open(&backend).expect("Could not open the database");

    let state = AppState::new(
        catalog,
        stores,
        Arc::new(food_lookup),
        args.daily_call_limit,
    );

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly");
}

fn setup_logging(log_path: Option<&Path>) {
    let stdout_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let debug_log = log_path.map(|path| {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("Could not create log file");

        tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(Arc::new(log_file))
            .with_filter(filter::LevelFilter::DEBUG)
    });

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
