#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

use std::path::PathBuf;

use clap::Parser;
use revassign_server::{ServerConfig, run_server};
use revassign_store::JsonFileStore;

#[derive(Parser)]
#[command(name = "revassign-server")]
#[command(about = "Assign and reassign pull request reviewers over HTTP", long_about = None)]
struct Args {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// JSON file to load state from and save it to
    #[arg(long, env = "REVASSIGN_STATE_FILE")]
    state_file: Option<PathBuf>,

    /// Persist to the platform data directory when no state file is given
    #[arg(long)]
    persist: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let state_file = match (args.state_file, args.persist) {
        (Some(path), _) => Some(path),
        (None, true) => Some(JsonFileStore::default_path().map_err(std::io::Error::other)?),
        (None, false) => None,
    };

    let config = ServerConfig::default()
        .with_host(args.host)
        .with_port(args.port)
        .with_state_file(state_file);

    run_server(config).await
}
