use crate::api::HttpOperationsApi;
use crate::config::Config;
use crate::domain::mappers::validate_tables;
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use crate::sessions::SessionStore;
use anyhow::{Context, Result};
use astra::Server;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod domain;
mod errors;
mod handlers;
mod logging;
mod responses;
mod router;
mod sessions;
mod templates;

#[cfg(test)]
mod tests;

fn main() -> Result<()> {
    let config = Config::parse();

    logging::init(&config.log, &config.log_level)?;

    // Brand and column lookups must be reversible before anything is edited.
    validate_tables().context("lookup tables are inconsistent")?;

    let api = HttpOperationsApi::new(config.api_base_url())?;
    let state = AppState {
        api: Arc::new(api),
        sessions: SessionStore::new(),
        timezone: config.timezone,
    };

    info!(
        api = %config.api_base_url(),
        timezone = %config.timezone,
        "Starting server at http://{}",
        config.bind
    );
    println!("Starting server at http://{}", config.bind);

    let server = Server::bind(config.bind).max_workers(config.workers);

    server
        .serve(move |req, _info| match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => error_to_response(err),
        })
        .context("server ended with error")?;

    info!("Server shut down cleanly.");
    Ok(())
}
