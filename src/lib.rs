//! # RESTam
//!
//! **RESTam** is a minimal, coroutine-powered JSON-over-HTTP framework. It
//! speaks just enough HTTP/1.1 to serve one JSON API call per connection:
//! parse the request, pick a controller by path prefix, call the operation for
//! the request method, write the response and close.
//!
//! ## Architecture
//!
//! - **[`http`]** - Request parser, request/response models, status table and serializer
//! - **[`json`]** - Pluggable JSON codec used by controllers
//! - **[`controller`]** - The controller contract: one operation per method, 501 by default
//! - **[`router`]** - Longest-prefix route table and the per-connection exchange
//! - **[`server`]** - TCP listener spawning one `may` coroutine per connection
//! - **[`runtime_config`]** / **[`logging`]** - Environment-driven configuration
//! - **[`cli`]** / **[`banner`]** - Process entry point
//! - **[`demo`]** - CEP lookup service built on the framework
//!
//! ### Request Handling Flow
//!
//! ```text
//! accept ─▶ coroutine ─▶ parse_request ─▶ Router::dispatch ─▶ Controller::handle_* ─▶ write ─▶ close
//!                             │                  │
//!                             └─ 400             └─ 404 / 501 / 500
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use restam::controller::Controller;
//! use restam::json::{JsonCodec, SerdeJsonCodec};
//! use restam::{HttpServer, Router};
//! use std::sync::Arc;
//!
//! struct Hello(SerdeJsonCodec);
//!
//! impl Controller for Hello {
//!     fn codec(&self) -> &dyn JsonCodec {
//!         &self.0
//!     }
//! }
//!
//! let mut router = Router::new();
//! router.add_route("/hello", Arc::new(Hello(SerdeJsonCodec::new())));
//! let handle = HttpServer::new(Arc::new(router)).start("0.0.0.0:8080")?;
//! handle.join().ok();
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ## Runtime Considerations
//!
//! RESTam uses the `may` coroutine runtime, not tokio. Connection handlers
//! block on socket reads inside coroutines; the stack size is configurable via
//! `RESTAM_STACK_SIZE`.

pub mod banner;
pub mod cli;
pub mod controller;
pub mod demo;
pub mod http;
pub mod json;
pub mod logging;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use controller::{Controller, ControllerExt};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpStatus};
pub use router::Router;
pub use server::{HttpServer, ServerConfig, ServerHandle};
