//! Cross-domain SSO relay service.
//!
//! Propagates a login/logout signal across a configured chain of cooperating
//! sites by walking the browser through a sequence of 302 redirects, setting
//! a marker cookie on each site in turn. The traversal logic itself lives in
//! the `ssonet-relay` crate; this binary is the HTTP glue around it.

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use ssonet_relay::RelayConfig;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod api;
mod error;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "sso-relay-service")]
#[command(about = "Cross-domain SSO relay for the SSONet site network")]
struct Args {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Path to a JSON configuration file ({"network": [...]})
    #[arg(short, long)]
    config: Option<String>,

    /// Comma-separated site list, taking precedence over the config file
    #[arg(long, value_delimiter = ',')]
    network: Vec<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Application state shared across workers.
pub struct AppState {
    pub config: RelayConfig,
}

fn load_config(args: &Args) -> anyhow::Result<RelayConfig> {
    let config = if !args.network.is_empty() {
        RelayConfig::new(args.network.clone())
    } else if let Some(path) = &args.config {
        RelayConfig::from_file(path).with_context(|| format!("loading config from {path}"))?
    } else {
        anyhow::bail!("no network configured: pass --config or --network");
    };
    config.validate().context("invalid network configuration")?;
    Ok(config)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let config = load_config(&args)?;
    info!("Relay network has {} sites", config.network.len());

    let app_state = web::Data::new(AppState { config });

    info!("Starting SSO relay on {}:{}", args.bind, args.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .configure(api::configure)
    })
    .bind((args.bind.as_str(), args.port))?
    .run()
    .await?;

    Ok(())
}
