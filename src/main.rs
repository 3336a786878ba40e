use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use turnstile::server::{
    config::Config,
    error::Error,
    mailer::LogMailer,
    model::app::{AppState, SessionSettings},
    router, startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn serve(config: Config) -> Result<(), Error> {
    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&config).await?;

    let state = AppState::new(db, Arc::new(LogMailer))
        .with_settings(SessionSettings::from_config(&config));
    let app = router::routes(&state).with_state(state).layer(session);

    let listener = tokio::net::TcpListener::bind(config.server_addr)
        .await
        .map_err(|e| Error::InternalError(format!("Failed to bind {}: {}", config.server_addr, e)))?;

    tracing::info!("Starting server on {}", config.server_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::InternalError(format!("Server stopped unexpectedly: {}", e)))
}
