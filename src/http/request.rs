use std::collections::HashMap;
use std::fmt;
use std::io::{self, BufRead, Read};

use tracing::debug;

use super::HttpMethod;

/// Protocol version assumed when the request line carries only method and path
pub const DEFAULT_HTTP_VERSION: &str = "HTTP/1.1";

/// Reason a request could not be parsed.
///
/// Every variant is reported to the client as `400 Bad Request`, with the
/// `Display` text carried in the JSON error body.
#[derive(Debug)]
pub enum ParseError {
    /// The stream ended, or the first line was blank, before a request line arrived
    EmptyRequestLine,
    /// The request line had fewer than two space-separated tokens
    InvalidRequestLine(String),
    /// The method token is not one of the nine known methods
    UnknownMethod(String),
    /// `Content-Length` is present but not a non-negative integer
    InvalidContentLength(String),
    /// Reading from the connection failed
    Io(io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyRequestLine => write!(f, "Invalid request: empty request line"),
            ParseError::InvalidRequestLine(line) => write!(f, "Invalid request line: {line}"),
            ParseError::UnknownMethod(token) => write!(f, "Unsupported HTTP method: {token}"),
            ParseError::InvalidContentLength(value) => {
                write!(f, "Invalid Content-Length: {value}")
            }
            ParseError::Io(e) => write!(f, "Error reading request: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        ParseError::Io(e)
    }
}

/// A parsed HTTP request.
///
/// Built once per connection by [`parse_request`] and never mutated afterwards.
/// Header names are stored exactly as received; lookups are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: HttpMethod,
    path: String,
    version: String,
    headers: HashMap<String, String>,
    body: String,
}

impl HttpRequest {
    #[must_use]
    pub fn new(
        method: HttpMethod,
        path: impl Into<String>,
        version: impl Into<String>,
        headers: HashMap<String, String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            version: version.into(),
            headers,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Request target exactly as it appeared on the request line (query string included)
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Header value by its literal name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Read one line, without its `\n` or `\r\n` terminator.
///
/// Returns `None` once the stream is exhausted.
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Parse one HTTP/1.1 request from `reader`.
///
/// The request line is split on single spaces: token 0 is the method, token 1
/// the path and token 2, when present, the protocol version. Header lines are
/// split on the first `": "`; lines without it are skipped. A repeated header
/// name keeps its last value.
///
/// When a `Content-Length` header is present, up to that many bytes are read
/// as the body. A client that closes early yields the shorter body rather
/// than an error. Without `Content-Length` the body is empty.
///
/// # Errors
///
/// Returns a [`ParseError`] for a missing or empty request line, fewer than
/// two request-line tokens, an unknown method, an unparseable
/// `Content-Length`, or an I/O failure on the underlying reader.
pub fn parse_request<R: BufRead>(mut reader: R) -> Result<HttpRequest, ParseError> {
    let request_line = match read_line(&mut reader)? {
        Some(line) if !line.is_empty() => line,
        _ => return Err(ParseError::EmptyRequestLine),
    };

    let mut tokens: Vec<&str> = request_line.split(' ').collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    if tokens.len() < 2 {
        return Err(ParseError::InvalidRequestLine(request_line.clone()));
    }
    let method: HttpMethod = tokens[0].parse()?;
    let path = tokens[1].to_string();
    let version = tokens
        .get(2)
        .map_or_else(|| DEFAULT_HTTP_VERSION.to_string(), |v| (*v).to_string());

    let mut headers = HashMap::new();
    while let Some(line) = read_line(&mut reader)? {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(": ") {
            headers.insert(name.to_string(), value.to_string());
        }
    }

    let body = match headers.get("Content-Length") {
        Some(raw) => {
            let length: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ParseError::InvalidContentLength(raw.clone()))?;
            let mut buf = Vec::new();
            let read = reader.by_ref().take(length).read_to_end(&mut buf)?;
            if (read as u64) < length {
                debug!(
                    expected = length,
                    received = read,
                    "Connection closed before full body arrived"
                );
            }
            String::from_utf8_lossy(&buf).into_owned()
        }
        None => String::new(),
    };

    debug!(
        method = %method,
        path = %path,
        http_version = %version,
        header_count = headers.len(),
        body_size_bytes = body.len(),
        "HTTP request parsed"
    );

    Ok(HttpRequest {
        method,
        path,
        version,
        headers,
        body,
    })
}
