use launchpad_api::app::{app, AppState};
use launchpad_api::config;
use launchpad_api::database::{pool, schema};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Launchpad API in {:?} mode", config.environment);

    let db_pool = pool::open()
        .await
        .unwrap_or_else(|e| panic!("failed to open database pool: {}", e));

    schema::ensure_schema(&db_pool)
        .await
        .unwrap_or_else(|e| panic!("schema bootstrap failed: {}", e));

    let state = AppState { pool: db_pool.clone() };
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("LAUNCHPAD_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(5001);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Launchpad API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");

    pool::close(&db_pool).await;
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.expect("ctrl-c handler");
    tracing::info!("Shutdown signal received");
}
