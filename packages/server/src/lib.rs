#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTTP boundary of `Revassign`.

pub mod error;
pub mod handlers;
pub mod state;

use std::path::PathBuf;

use actix_web::{App, HttpServer, middleware, web};
use state::AppState;
use tokio::task::JoinHandle;

pub use revassign_server_models as models;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Persist state to this JSON file. `None` keeps everything in memory.
    pub state_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            state_file: None,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub const fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            state_file: None,
        }
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    #[must_use]
    pub fn with_state_file(mut self, state_file: Option<PathBuf>) -> Self {
        self.state_file = state_file;
        self
    }
}

/// # Errors
///
/// Returns an error if the state file cannot be loaded or the server fails
/// to bind or run
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let RunServerResponse { join_handle, .. } = run_server_with_handle(&config).await?;

    join_handle.await?
}

pub struct RunServerResponse {
    pub handle: actix_web::dev::ServerHandle,
    pub addrs: Vec<std::net::SocketAddr>,
    pub join_handle: JoinHandle<Result<(), std::io::Error>>,
}

/// # Errors
///
/// Returns an error if the state file cannot be loaded or the server fails
/// to bind
pub async fn run_server_with_handle(config: &ServerConfig) -> std::io::Result<RunServerResponse> {
    let state = AppState::from_config(config)
        .await
        .map_err(std::io::Error::other)?;

    serve(config, state)
}

/// Start serving an already built state.
///
/// # Errors
///
/// Returns an error if the server fails to bind
pub fn serve(config: &ServerConfig, state: AppState) -> std::io::Result<RunServerResponse> {
    log::info!("Starting revassign server on {}:{}", config.host, config.port);

    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().error_handler(error::json_error))
            .app_data(web::QueryConfig::default().error_handler(error::query_error))
            .wrap(middleware::Logger::default())
            .configure(handlers::routes)
            .route("/health", web::get().to(|| async { "OK" }))
            .default_service(web::to(error::unknown_route))
    })
    .bind((config.host.as_str(), config.port))?;

    let addrs = server.addrs();
    let server = server.run();
    let handle = server.handle();

    let join_handle = tokio::spawn(server);

    Ok(RunServerResponse {
        handle,
        addrs,
        join_handle,
    })
}
