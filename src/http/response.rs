use std::collections::HashMap;
use std::io::{self, Write};

use super::HttpStatus;

/// Media type written on every response
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Build the fixed `{"error": "<text>"}` body used for status-only errors.
#[must_use]
pub fn error_body(text: &str) -> String {
    format!("{{\"error\": \"{text}\"}}")
}

fn default_headers() -> HashMap<String, String> {
    HashMap::from([("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string())])
}

/// Response produced by a controller operation (or by the router itself for
/// routing and protocol errors).
///
/// The body is expected to be JSON text; controllers are responsible for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    body: String,
    status: HttpStatus,
    headers: HashMap<String, String>,
}

impl HttpResponse {
    /// Response with the default `Content-Type: application/json` header
    #[must_use]
    pub fn new(body: impl Into<String>, status: HttpStatus) -> Self {
        Self::with_headers(body, status, default_headers())
    }

    /// Error response whose body is generated from the status reason phrase,
    /// e.g. `{"error": "Not Implemented"}`
    #[must_use]
    pub fn from_status(status: HttpStatus) -> Self {
        Self::new(error_body(status.reason()), status)
    }

    #[must_use]
    pub fn with_headers(
        body: impl Into<String>,
        status: HttpStatus,
        headers: HashMap<String, String>,
    ) -> Self {
        Self {
            body: body.into(),
            status,
            headers,
        }
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn status(&self) -> HttpStatus {
        self.status
    }

    /// Headers carried by the response.
    ///
    /// Only `Content-Type` reaches the wire, and it is always
    /// `application/json`; see [`HttpResponse::to_bytes`].
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Serialize to HTTP/1.1 wire bytes.
    ///
    /// `Content-Length` is always recomputed from the UTF-8 byte length of the
    /// body. Nothing follows the body.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
            self.status.code(),
            self.status.reason(),
            CONTENT_TYPE_JSON,
            self.body.len()
        );
        let mut out = Vec::with_capacity(head.len() + self.body.len());
        out.extend_from_slice(head.as_bytes());
        out.extend_from_slice(self.body.as_bytes());
        out
    }

    /// Write the serialized response and flush.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from the writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }
}
