use csr_portal::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    repository::{PostgresRepository, RepositoryState},
    storage::{S3StorageClient, StorageService, StorageState},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, sets up logging, connects Postgres and object
/// storage, then serves the router.
#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // RUST_LOG wins; otherwise verbose for this crate and the HTTP stack.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "csr_portal=debug,tower_http=info,axum=trace".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // JSON lines for the log aggregator.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.db_url)
        .await
        .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("FATAL: Failed to apply database migrations.");

    let repo = Arc::new(PostgresRepository::new(pool)) as RepositoryState;

    let s3_client = S3StorageClient::new(
        &config.s3_endpoint,
        &config.s3_region,
        &config.s3_key,
        &config.s3_secret,
        &config.s3_bucket,
    )
    .await;

    if config.env == Env::Local {
        s3_client.ensure_bucket_exists().await;
    }

    let storage = Arc::new(s3_client) as StorageState;
    let bind_addr = config.bind_addr.clone();

    let app = create_router(AppState {
        repo,
        storage,
        config,
    });

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind the HTTP listener.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}
