//! Dompet API Server
//!
//! Main entry point for the Dompet backend service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dompet_api::{AppState, AuthSettings, create_router};
use dompet_db::{connect_with, migrate};
use dompet_shared::{AppConfig, JwtConfig, JwtService};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dompet=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::load()?;

    let db = connect_with(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );
    migrate(&db).await?;
    info!("Migrations applied");

    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        token_expires_secs: i64::try_from(config.jwt.access_token_expiry_secs)
            .unwrap_or(i64::MAX),
    });

    let mut state = AppState::new(db, jwt_service, AuthSettings::from(config.auth.clone()));
    if let Some(dir) = &config.server.static_dir {
        info!(static_dir = %dir, "Serving front-end pages");
        state = state.with_static_dir(dir);
    }

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
