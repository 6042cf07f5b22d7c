use crate::banner;
use crate::demo::{CepController, CepRepository};
use crate::json::SerdeJsonCodec;
use crate::logging::{init_logging, LogConfig};
use crate::router::Router;
use crate::runtime_config::RuntimeConfig;
use crate::server::{HttpServer, ServerHandle};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Command-line interface for the CEP lookup service
#[derive(Parser, Debug)]
#[command(name = "restam", version)]
#[command(about = "Minimal JSON-over-HTTP framework serving Brazilian CEP lookups", long_about = None)]
pub struct Cli {
    /// TCP port to listen on
    #[arg(short, long, env = "RESTAM_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Semicolon-separated CEP dataset
    #[arg(short, long, env = "RESTAM_CEP_DATA", default_value = "data/cep.csv")]
    pub data: PathBuf,

    /// Indent JSON responses
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Pretty debug-level logs with source locations, ignoring `RESTAM_LOG_*`
    #[arg(long, default_value_t = false)]
    pub dev: bool,

    /// Skip the startup banner
    #[arg(long, default_value_t = false)]
    pub no_banner: bool,
}

impl Cli {
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        if self.dev {
            LogConfig::default_dev()
        } else {
            LogConfig::from_env()
        }
    }

    #[must_use]
    pub fn codec(&self) -> SerdeJsonCodec {
        if self.pretty {
            SerdeJsonCodec::pretty()
        } else {
            SerdeJsonCodec::new()
        }
    }
}

/// Route table for the CEP service: one controller mounted at `/cep`
#[must_use]
pub fn build_router(repository: Arc<CepRepository>, codec: SerdeJsonCodec) -> Router {
    let mut router = Router::new();
    router.add_route("/cep", Arc::new(CepController::new(repository, codec)));
    router
}

#[cfg(unix)]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals =
        Signals::new([SIGINT, SIGTERM]).context("Failed to install signal handlers")?;
    if let Some(signal) = signals.forever().next() {
        info!(signal, "Shutdown signal received");
    }
    handle.stop();
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("listener coroutine panicked"))
}

/// Run the service with the given arguments until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if logging cannot be initialised, the address cannot be
/// bound, or signal handlers cannot be installed.
pub fn run_cli(cli: Cli) -> Result<()> {
    init_logging(&cli.log_config())?;

    let runtime = RuntimeConfig::from_env();
    runtime.apply();
    info!(
        stack_size = runtime.stack_size,
        max_connections = ?runtime.max_connections,
        read_timeout = ?runtime.read_timeout,
        "Runtime configured"
    );

    if !cli.no_banner {
        banner::print();
    }

    let repository = Arc::new(CepRepository::load(&cli.data));
    let router = Arc::new(build_router(repository, cli.codec()));

    let addr = cli.addr();
    let handle = HttpServer::new(router)
        .with_config(runtime.server_config())
        .start(addr.as_str())
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %handle.local_addr(), "Listening");

    wait_for_shutdown(handle)
}
