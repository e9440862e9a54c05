mod cache;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod state;
mod store;

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    let address = (config.host.clone(), config.port);
    tracing::info!(
        "Starting with {} signup store, signups {}",
        config.store.kind(),
        if config.signups_open { "open" } else { "closed" }
    );

    let state = web::Data::new(AppState::new(config).await?);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes::init))
        .bind(&address)
        .with_context(|| format!("Failed to bind {}:{}", address.0, address.1))?
        .run()
        .await?;

    Ok(())
}
