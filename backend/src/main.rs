//! Service entry-point: loads configuration, connects the document store and
//! serves the user lookup API.

mod server;

use actix_web::web;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server, drain_on, settings_from_process_env};
use user_lookup::domain::UserLookupService;
use user_lookup::domain::ports::UserRepository;
use user_lookup::inbound::http::health::HealthState;
use user_lookup::outbound::persistence::{
    DisconnectedUserRepository, DocumentStore, StoreConfig,
};

/// Build the repository backing lookups.
///
/// The HTTP listener starts even when the store cannot be configured; lookups
/// then fail with an internal error. Readiness flips once the store answers
/// a ping.
async fn connect_users(
    config: StoreConfig,
    health_state: web::Data<HealthState>,
) -> Arc<dyn UserRepository> {
    match DocumentStore::connect(&config).await {
        Ok(store) => {
            let users = Arc::new(store.users());
            let database = store.database_name().to_owned();
            actix_web::rt::spawn(async move {
                match store.ping().await {
                    Ok(()) => {
                        info!(%database, "document store connected");
                        health_state.mark_ready();
                    }
                    Err(err) => error!(error = %err, %database, "document store unreachable"),
                }
            });
            users
        }
        Err(err) => {
            error!(error = %err, "document store unavailable; lookups will fail");
            Arc::new(DisconnectedUserRepository::new(err.to_string()))
        }
    }
}

/// Resolve on Ctrl-C. If the signal handler cannot be installed, never
/// resolve and leave shutdown to the server's own signal handling.
async fn shutdown_requested() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    let dotenv = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
    color_eyre::install()?;

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "failed to load environment file"),
    }

    let settings = settings_from_process_env()?;
    let config = ServerConfig::from_settings(&settings);
    let health_state = web::Data::new(HealthState::new());

    let users = connect_users(StoreConfig::new(settings.mongo_uri), health_state.clone()).await;
    let lookup = UserLookupService::new(users);

    info!(addr = %config.bind_addr(), "starting HTTP server");
    let server = create_server(health_state.clone(), config, Arc::new(lookup))?;
    actix_web::rt::spawn(drain_on(shutdown_requested(), health_state, server.handle()));
    server.await?;
    Ok(())
}
