use may::coroutine::{self, JoinHandle};
use may::net::{TcpListener, TcpStream};
use std::io::{self, Read};
use std::net::{Shutdown, SocketAddr, ToSocketAddrs};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::http::{HttpResponse, HttpStatus};
use crate::router::Router;

/// How long a rejected connection is drained before it is dropped
const REJECT_DRAIN_TIMEOUT: Duration = Duration::from_millis(200);
/// Upper bound on bytes read from a rejected connection
const REJECT_DRAIN_LIMIT: u64 = 64 * 1024;

/// Listener settings.
///
/// The defaults impose no limits: every accepted connection gets its own
/// coroutine and reads block until the client sends or hangs up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerConfig {
    /// Maximum number of connections served at once. Connections beyond the
    /// cap are answered with `503 Service Unavailable` and closed.
    pub max_connections: Option<usize>,
    /// Per-connection socket read timeout
    pub read_timeout: Option<Duration>,
}

/// HTTP listener serving one request per TCP connection.
pub struct HttpServer {
    router: Arc<Router>,
    config: ServerConfig,
}

/// Handle to a running HTTP server
///
/// Provides methods for waiting until the server is ready, stopping it,
/// or joining the listener coroutine.
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
    active: Arc<AtomicUsize>,
}

impl ServerHandle {
    /// Address the listener is bound to (resolves port `0` to the real port)
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Number of connections currently being served
    #[must_use]
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Wait for the server to be ready to accept connections
    ///
    /// Polls the server address by attempting TCP connections until successful.
    /// Useful in tests to ensure the server is fully started before sending requests.
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` error if the server doesn't become ready within ~250ms (50 attempts × 5ms).
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..50 {
            if std::net::TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    /// Stop accepting connections.
    ///
    /// Cancels the listener coroutine and waits for it to finish. Connections
    /// already being served run to completion.
    pub fn stop(self) {
        // SAFETY: may marks cancellation unsafe because the cancelled coroutine
        // unwinds at its next blocking point. The listener only blocks in
        // `accept` and owns nothing that needs cleanup beyond its socket.
        unsafe {
            self.handle.coroutine().cancel();
        }
        let _ = self.handle.join();
        info!(address = %self.addr, "Server stopped");
    }

    /// Wait for the listener coroutine to complete
    ///
    /// The server runs until stopped, so this normally blocks forever.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener coroutine panicked.
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

/// Releases a connection slot when the connection coroutine exits, on every path.
struct ConnectionGuard {
    active: Arc<AtomicUsize>,
}

impl ConnectionGuard {
    /// Claim a slot, returning the guard and the number of live connections
    /// including this one.
    fn acquire(active: &Arc<AtomicUsize>) -> (Self, usize) {
        let current = active.fetch_add(1, Ordering::SeqCst) + 1;
        (
            Self {
                active: Arc::clone(active),
            },
            current,
        )
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl HttpServer {
    #[must_use]
    pub fn new(router: Arc<Router>) -> Self {
        Self {
            router,
            config: ServerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Bind `addr` and start accepting connections in a listener coroutine.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address to bind to (e.g., `"0.0.0.0:8080"` or `"127.0.0.1:0"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid, the port cannot be bound,
    /// or the listener coroutine cannot be spawned.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid address"))?;
        let listener = TcpListener::bind(addr)?;
        let addr = listener.local_addr()?;

        info!(
            address = %addr,
            routes = ?self.router.routes().collect::<Vec<_>>(),
            max_connections = ?self.config.max_connections,
            read_timeout_ms = ?self.config.read_timeout.map(|d| d.as_millis()),
            "Server started"
        );

        let active = Arc::new(AtomicUsize::new(0));
        let loop_active = Arc::clone(&active);
        let Self { router, config } = self;

        // SAFETY: spawning is unsafe in may because coroutines must not block
        // the worker thread on non-may primitives. The accept loop only uses
        // may sockets and spawns further coroutines.
        let handle = unsafe {
            coroutine::Builder::new()
                .name("restam-listener".to_string())
                .spawn(move || accept_loop(&listener, &router, config, &loop_active))?
        };

        Ok(ServerHandle {
            addr,
            handle,
            active,
        })
    }
}

fn accept_loop(
    listener: &TcpListener,
    router: &Arc<Router>,
    config: ServerConfig,
    active: &Arc<AtomicUsize>,
) {
    loop {
        let (stream, peer) = match listener.accept() {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        debug!(peer = %peer, "New client connected");

        let (guard, current) = ConnectionGuard::acquire(active);
        if config.max_connections.is_some_and(|max| current > max) {
            warn!(peer = %peer, active = current - 1, "Connection limit reached, rejecting");
            drop(guard);
            // SAFETY: the rejection coroutine only performs may socket I/O.
            unsafe {
                coroutine::spawn(move || reject(stream, peer));
            }
            continue;
        }

        let router = Arc::clone(router);
        // SAFETY: the connection coroutine only performs may socket I/O and
        // pure computation in the router.
        unsafe {
            coroutine::spawn(move || {
                let _guard = guard;
                serve_connection(&router, stream, peer, config.read_timeout);
            });
        }
    }
}

/// One exchange on one connection; the stream is closed when it goes out of scope.
fn serve_connection(
    router: &Router,
    mut stream: TcpStream,
    peer: SocketAddr,
    read_timeout: Option<Duration>,
) {
    if let Err(e) = stream.set_read_timeout(read_timeout) {
        warn!(peer = %peer, error = %e, "Failed to set read timeout");
    }
    match router.handle_request(&mut stream) {
        Ok(()) => debug!(peer = %peer, "Connection closed"),
        Err(e) => error!(peer = %peer, error = %e, "Error writing response"),
    }
}

/// Answer `503` and close without resetting the connection.
///
/// Dropping a socket with unread input makes the kernel send RST, which can
/// discard the response before the client reads it. The write side is shut
/// down first so the client sees the response followed by end of stream, then
/// whatever the client sent is drained for a bounded time.
fn reject(mut stream: TcpStream, peer: SocketAddr) {
    if let Err(e) = HttpResponse::from_status(HttpStatus::ServiceUnavailable).write_to(&mut stream) {
        debug!(peer = %peer, error = %e, "Failed to write 503 to rejected connection");
        return;
    }
    if let Err(e) = stream.shutdown(Shutdown::Write) {
        debug!(peer = %peer, error = %e, "Failed to shut down rejected connection");
        return;
    }
    if let Err(e) = stream.set_read_timeout(Some(REJECT_DRAIN_TIMEOUT)) {
        debug!(peer = %peer, error = %e, "Failed to set drain timeout");
    }
    let drained = io::copy(&mut stream.by_ref().take(REJECT_DRAIN_LIMIT), &mut io::sink());
    debug!(peer = %peer, drained = ?drained.ok(), "Rejected connection closed");
}
