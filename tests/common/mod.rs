#![allow(dead_code)]

pub mod test_server {
    use restam::{HttpServer, Router, ServerConfig, ServerHandle};
    use std::sync::{Arc, Once};

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// Start `router` on an ephemeral localhost port and wait until it accepts.
    pub fn start(router: Router, config: ServerConfig) -> ServerHandle {
        setup_may_runtime();
        let handle = HttpServer::new(Arc::new(router))
            .with_config(config)
            .start("127.0.0.1:0")
            .unwrap();
        handle.wait_ready().unwrap();
        handle
    }
}

pub mod http {
    use std::io::{Read, Write};
    use std::net::{Shutdown, SocketAddr, TcpStream};
    use std::time::Duration;

    /// Read until the server closes the connection.
    pub fn read_to_close(stream: &mut TcpStream) -> String {
        stream
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let mut buf = Vec::new();
        loop {
            let mut tmp = [0u8; 1024];
            match stream.read(&mut tmp) {
                Ok(0) => break,
                Ok(n) => buf.extend_from_slice(&tmp[..n]),
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut
                        || e.kind() == std::io::ErrorKind::ConnectionReset =>
                {
                    break
                }
                Err(e) => panic!("read error: {:?}", e),
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Send raw request bytes and return everything the server writes back.
    pub fn send_request(addr: SocketAddr, req: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        read_to_close(&mut stream)
    }

    /// Like [`send_request`] but half-closes the write side after sending,
    /// so the server sees end-of-stream.
    pub fn send_and_shutdown(addr: SocketAddr, req: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        stream.shutdown(Shutdown::Write).unwrap();
        read_to_close(&mut stream)
    }

    /// Split a raw response into status code, headers and body.
    pub fn parse_response(resp: &str) -> (u16, Vec<(String, String)>, String) {
        let (head, body) = resp.split_once("\r\n\r\n").unwrap_or((resp, ""));
        let mut lines = head.split("\r\n");
        let status = lines
            .next()
            .and_then(|l| l.split_whitespace().nth(1))
            .and_then(|c| c.parse().ok())
            .unwrap_or(0);
        let headers = lines
            .filter_map(|l| l.split_once(": "))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        (status, headers, body.to_string())
    }
}

pub mod stream {
    use std::io::{self, Cursor, Read, Write};

    /// In-memory duplex stream for driving `Router::handle_request` directly
    pub struct MemoryStream {
        input: Cursor<Vec<u8>>,
        pub output: Vec<u8>,
    }

    impl MemoryStream {
        pub fn new(input: &str) -> Self {
            Self {
                input: Cursor::new(input.as_bytes().to_vec()),
                output: Vec::new(),
            }
        }

        pub fn written_text(&self) -> String {
            String::from_utf8_lossy(&self.output).into_owned()
        }
    }

    impl Read for MemoryStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for MemoryStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

pub mod controllers {
    use restam::controller::{Controller, ControllerExt};
    use restam::json::{JsonCodec, SerdeJsonCodec};
    use restam::{HttpRequest, HttpResponse, HttpStatus};
    use serde::Serialize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Serialize)]
    struct Echo<'a> {
        controller: &'a str,
        method: &'a str,
        path: &'a str,
        body: &'a str,
    }

    /// Answers GET and POST with a JSON echo of the request; counts calls.
    pub struct EchoController {
        pub name: &'static str,
        pub calls: AtomicUsize,
        codec: SerdeJsonCodec,
    }

    impl EchoController {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                calls: AtomicUsize::new(0),
                codec: SerdeJsonCodec::new(),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn echo(&self, request: &HttpRequest) -> HttpResponse {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let echo = Echo {
                controller: self.name,
                method: request.method().as_str(),
                path: request.path(),
                body: request.body(),
            };
            match self.serialize_to_text(&echo) {
                Some(body) => HttpResponse::new(body, HttpStatus::Ok),
                None => self.build_error(HttpStatus::InternalServerError),
            }
        }
    }

    impl Controller for EchoController {
        fn codec(&self) -> &dyn JsonCodec {
            &self.codec
        }

        fn handle_get(&self, request: &HttpRequest) -> HttpResponse {
            self.echo(request)
        }

        fn handle_put(&self, request: &HttpRequest) -> HttpResponse {
            self.echo(request)
        }
    }

    /// Returns the request body unchanged as the response body.
    pub struct VerbatimController {
        codec: SerdeJsonCodec,
    }

    impl VerbatimController {
        pub fn new() -> Self {
            Self {
                codec: SerdeJsonCodec::new(),
            }
        }
    }

    impl Controller for VerbatimController {
        fn codec(&self) -> &dyn JsonCodec {
            &self.codec
        }

        fn handle_post(&self, request: &HttpRequest) -> HttpResponse {
            HttpResponse::new(request.body(), HttpStatus::Ok)
        }
    }
}
