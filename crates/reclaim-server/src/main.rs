use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use reclaim_server::config::ServerConfig;
use reclaim_server::handlers::{
    add_document, create_audit, get_audit, health_check, list_services, login, my_audits,
    register, update_status,
};
use reclaim_server::state::AppState;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reclaim_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = ServerConfig::from_env()?;

    info!("Starting Reclaim Server v{}", VERSION);
    info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        db_url = %config.db_url,
        "Configuration loaded"
    );

    // A reachable database is a hard startup requirement; failing here
    // beats serving requests that can only 500.
    let db = reclaim_db::DbManager::connect(&config.db_config()).await?;
    reclaim_db::run_migrations(db.client()).await?;
    info!("Database connected and schema initialized");

    let state = Arc::new(AppState::new(config.clone(), &db));

    let cors_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();
    info!(origins = ?config.cors_origins, "CORS configured");
    let cors = CorsLayer::new()
        .allow_origin(cors_origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true);

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/audits/services", get(list_services))
        .route("/api/audits/create", post(create_audit))
        .route("/api/audits", get(my_audits))
        .route("/api/audits/{audit_id}", get(get_audit))
        .route("/api/audits/{audit_id}/status", post(update_status))
        .route("/api/audits/{audit_id}/documents", post(add_document))
        .layer(RequestBodyLimitLayer::new(config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
