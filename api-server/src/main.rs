//! API Server for the taskboard backend
//!
//! Serves the task REST API. Run `taskboard-server issue-token <user-uuid>`
//! to print a bearer token for a user instead of starting the server.

mod auth;
mod config;
mod error;
mod routes;
mod state;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::state::AppState;

const TOKEN_TTL_HOURS: i64 = 8;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "taskboard_server=debug,taskboard_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        return match command.as_str() {
            "issue-token" => {
                let user_id: Uuid = args
                    .next()
                    .ok_or("usage: taskboard-server issue-token <user-uuid>")?
                    .parse()?;
                let (token, _) = auth::issue_user_jwt(&config.jwt_secret, user_id, TOKEN_TTL_HOURS)?;
                println!("{}", token);
                Ok(())
            }
            other => Err(format!("unknown command '{}'", other).into()),
        };
    }

    if config.uses_default_secret() {
        tracing::warn!("TASKS_JWT_SECRET is not set, using the development secret");
    }
    tracing::info!("Using data directory: {:?}", config.data_dir);

    let app_state = AppState::new(&config).await?;

    let app = routes::router()
        .with_state(app_state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("REST API listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
