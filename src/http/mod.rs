//! # HTTP Module
//!
//! Wire-level types for the minimal HTTP/1.1 subset the server speaks: one
//! request and one JSON response per TCP connection.
//!
//! - [`HttpMethod`] - the closed set of request methods
//! - [`HttpStatus`] - status codes with their canonical reason phrases
//! - [`HttpRequest`] / [`parse_request`] - request model and parser
//! - [`HttpResponse`] - response model and its serializer
//!
//! ## Wire format
//!
//! ```text
//! Request:  <METHOD> <PATH> [<VERSION>]\r\n
//!           Name: Value\r\n ...
//!           \r\n
//!           <Content-Length bytes of body>
//!
//! Response: HTTP/1.1 <code> <reason>\r\n
//!           Content-Type: application/json\r\n
//!           Content-Length: <byte length>\r\n
//!           \r\n
//!           <body>
//! ```
//!
//! Chunked encoding, keep-alive and header-name case folding are not supported.

mod method;
mod request;
mod response;
mod status;

pub use method::HttpMethod;
pub use request::{parse_request, HttpRequest, ParseError, DEFAULT_HTTP_VERSION};
pub use response::{error_body, HttpResponse, CONTENT_TYPE_JSON};
pub use status::HttpStatus;
