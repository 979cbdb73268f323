#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod cli;
mod config;
mod db;
mod utils;
mod web;

use cli::Cli;
use config::Config;
use db::PgRepository;
use web::WebServer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    utils::logging::init_tracing(&config.logging);
    info!("confdesk starting up");

    let repository = Arc::new(PgRepository::new(config.database_url()));
    let web_server = WebServer::new(Arc::new(config), repository);

    web_server.start().await
}
