use std::fmt;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, info_span, warn};

use crate::controller::Controller;
use crate::http::{parse_request, HttpMethod, HttpRequest, HttpResponse, HttpStatus};

type Operation = fn(&dyn Controller, &HttpRequest) -> HttpResponse;

/// Prefix route table mapping request paths to controllers.
///
/// Routes are kept in registration order. A request path resolves to the
/// controller of the **longest** registered prefix it starts with, so
/// `/v1/data` wins over `/v1` for `/v1/data/x` regardless of which was added
/// first. Matching is plain string prefix matching, not segment-aware:
/// `/cep` also matches `/cep1234`.
///
/// The table is built during startup and only read once serving begins, so it
/// is shared between connection coroutines as `Arc<Router>` without locking.
#[derive(Clone, Default)]
pub struct Router {
    routes: Vec<(String, Arc<dyn Controller>)>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `controller` under `prefix`.
    ///
    /// Registering a prefix that already exists replaces its controller.
    pub fn add_route(
        &mut self,
        prefix: impl Into<String>,
        controller: Arc<dyn Controller>,
    ) -> &mut Self {
        let prefix = prefix.into();
        if let Some(slot) = self.routes.iter_mut().find(|(p, _)| *p == prefix) {
            warn!(prefix = %prefix, "Route prefix registered twice, replacing controller");
            slot.1 = controller;
        } else {
            debug!(prefix = %prefix, "Route registered");
            self.routes.push((prefix, controller));
        }
        self
    }

    /// Register the same controller under several prefixes.
    pub fn add_routes<I, P>(&mut self, prefixes: I, controller: Arc<dyn Controller>) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        for prefix in prefixes {
            self.add_route(prefix, Arc::clone(&controller));
        }
        self
    }

    /// Registered prefixes in registration order
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(p, _)| p.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the controller for `path` by longest matching prefix.
    ///
    /// Returns the matched prefix together with its controller.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<(&str, &Arc<dyn Controller>)> {
        self.routes
            .iter()
            .filter(|(prefix, _)| path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(prefix, controller)| (prefix.as_str(), controller))
    }

    /// Route a parsed request to exactly one controller operation.
    ///
    /// - no matching prefix: `404` with `{"error": "Not Found"}`
    /// - HEAD, OPTIONS, TRACE, CONNECT: `501`, the controller is not called
    /// - a panicking operation: `500` with `{"error": "Internal Server Error"}`
    #[must_use]
    pub fn dispatch(&self, request: &HttpRequest) -> HttpResponse {
        let Some((prefix, controller)) = self.resolve(request.path()) else {
            debug!(path = %request.path(), "No route matched");
            return HttpResponse::from_status(HttpStatus::NotFound);
        };

        let operation: Operation = match request.method() {
            HttpMethod::Get => |c, r| c.handle_get(r),
            HttpMethod::Post => |c, r| c.handle_post(r),
            HttpMethod::Patch => |c, r| c.handle_patch(r),
            HttpMethod::Put => |c, r| c.handle_put(r),
            HttpMethod::Delete => |c, r| c.handle_delete(r),
            HttpMethod::Head | HttpMethod::Options | HttpMethod::Trace | HttpMethod::Connect => {
                debug!(method = %request.method(), "Method has no controller operation");
                return HttpResponse::from_status(HttpStatus::NotImplemented);
            }
        };

        debug!(prefix = %prefix, method = %request.method(), "Dispatching to controller");
        match catch_unwind(AssertUnwindSafe(|| operation(controller.as_ref(), request))) {
            Ok(response) => response,
            Err(panic) => {
                let detail = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                error!(
                    prefix = %prefix,
                    method = %request.method(),
                    path = %request.path(),
                    panic = %detail,
                    "Controller panicked"
                );
                HttpResponse::from_status(HttpStatus::InternalServerError)
            }
        }
    }

    /// Parse one request from `reader` and produce its response.
    ///
    /// Parse failures become `400 Bad Request` with the failure message in
    /// the body.
    #[must_use]
    pub fn respond<R: BufRead>(&self, reader: R) -> HttpResponse {
        let request = match parse_request(reader) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Malformed request");
                let message = serde_json::Value::String(e.to_string());
                return HttpResponse::new(format!("{{\"error\": {message}}}"), HttpStatus::BadRequest);
            }
        };

        let span = info_span!("request", method = %request.method(), path = %request.path());
        let _enter = span.enter();
        let start = Instant::now();
        let response = self.dispatch(&request);
        info!(
            status = response.status().code(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );
        response
    }

    /// Run one full exchange on a connection: read and parse the request,
    /// dispatch it, then write and flush the response.
    ///
    /// The connection itself is closed by whoever owns `stream` once this returns.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing the response fails; read failures are
    /// answered with `400`.
    pub fn handle_request<S: Read + Write>(&self, mut stream: S) -> io::Result<()> {
        let response = self.respond(BufReader::new(&mut stream));
        response.write_to(&mut stream)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes().collect::<Vec<_>>())
            .finish()
    }
}
