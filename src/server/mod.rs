//! # Server Module
//!
//! TCP listener built on the `may` coroutine runtime.
//!
//! The listener coroutine accepts connections forever and spawns one
//! coroutine per connection. Each connection coroutine runs exactly one
//! request/response exchange through [`Router::handle_request`] and then
//! drops the socket, closing it whether the exchange succeeded or not.
//!
//! Inside a connection coroutine all I/O is written as plain blocking reads
//! and writes; `may` parks the coroutine instead of the OS thread, so a slow
//! client never holds up other connections.
//!
//! [`Router::handle_request`]: crate::router::Router::handle_request

mod http_server;

pub use http_server::{HttpServer, ServerConfig, ServerHandle};
