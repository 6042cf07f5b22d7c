//! # CLI Module
//!
//! Command-line entry point for the CEP lookup service.
//!
//! ## Options
//!
//! - `--port <PORT>` - TCP port to listen on (env `RESTAM_PORT`, default 8080)
//! - `--host <HOST>` - Interface to bind (default `0.0.0.0`)
//! - `--data <FILE>` - CEP dataset, semicolon separated (env `RESTAM_CEP_DATA`)
//! - `--pretty` - Indent JSON responses
//! - `--dev` - Pretty debug-level logs with file:line locations
//! - `--no-banner` - Skip the startup banner
//!
//! Logging and runtime limits are configured through environment variables,
//! see [`crate::logging`] and [`crate::runtime_config`].
//!
//! ## Examples
//!
//! ```bash
//! restam --port 9090 --data data/cep.csv --pretty
//! RESTAM_LOG_FORMAT=pretty RESTAM_MAX_CONNECTIONS=512 restam
//! ```

mod commands;


pub use commands::{build_router, run_cli, Cli};
