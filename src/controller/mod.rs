//! # Controller Module
//!
//! A controller owns one resource (one or more route prefixes) and answers the
//! five dispatchable methods: GET, POST, PATCH, PUT and DELETE. The
//! [`Router`](crate::router::Router) picks the controller and calls exactly one
//! of its operations per request.
//!
//! ## Writing a controller
//!
//! ```rust
//! use restam::controller::{Controller, ControllerExt};
//! use restam::http::{HttpRequest, HttpResponse, HttpStatus};
//! use restam::json::{JsonCodec, SerdeJsonCodec};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Pong {
//!     path: String,
//! }
//!
//! struct PingController {
//!     codec: SerdeJsonCodec,
//! }
//!
//! impl Controller for PingController {
//!     fn codec(&self) -> &dyn JsonCodec {
//!         &self.codec
//!     }
//!
//!     fn handle_get(&self, request: &HttpRequest) -> HttpResponse {
//!         let pong = Pong { path: request.path().to_string() };
//!         match self.serialize_to_text(&pong) {
//!             Some(body) => HttpResponse::new(body, HttpStatus::Ok),
//!             None => self.build_error(HttpStatus::InternalServerError),
//!         }
//!     }
//! }
//! ```
//!
//! Operations that are not overridden answer `501 Not Implemented`.
//!
//! ## Failure handling
//!
//! Codec failures never escape the helpers: they are logged and surface as
//! `None`, leaving the controller to choose the error response. A panic inside
//! an operation is caught by the router and answered with `500`.

mod core;

pub use self::core::{Controller, ControllerExt, SERIALIZATION_ERROR_BODY};
