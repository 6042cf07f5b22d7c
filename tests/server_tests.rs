//! Integration tests for the TCP listener
//!
//! Starts a real server on an ephemeral localhost port and speaks raw HTTP
//! over `std::net::TcpStream`. Every exchange is one request per connection:
//! the server closes the socket after writing, so clients read to EOF.

use restam::{Router, ServerConfig};
use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

mod common;
use common::controllers::EchoController;
use common::http::{parse_response, read_to_close, send_and_shutdown, send_request};
use common::test_server;

fn echo_router() -> (Router, Arc<EchoController>) {
    let controller = Arc::new(EchoController::new("echo"));
    let mut router = Router::new();
    router.add_route("/echo", controller.clone());
    (router, controller)
}

fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn test_get_over_tcp() {
    let (router, controller) = echo_router();
    let handle = test_server::start(router, ServerConfig::default());

    let resp = send_request(handle.local_addr(), "GET /echo/42 HTTP/1.1\r\nHost: localhost\r\n\r\n");
    let (status, headers, body) = parse_response(&resp);
    assert_eq!(status, 200);
    assert!(headers.contains(&("Content-Length".to_string(), body.len().to_string())));
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["path"], "/echo/42");
    assert_eq!(controller.calls(), 1);

    handle.stop();
}

#[test]
fn test_error_statuses_over_tcp() {
    let (router, _) = echo_router();
    let handle = test_server::start(router, ServerConfig::default());
    let addr = handle.local_addr();

    let (status, _, body) = parse_response(&send_request(addr, "GET /nope HTTP/1.1\r\n\r\n"));
    assert_eq!(status, 404);
    assert_eq!(body, "{\"error\": \"Not Found\"}");

    let (status, _, _) = parse_response(&send_request(addr, "DELETE /echo/1 HTTP/1.1\r\n\r\n"));
    assert_eq!(status, 501);

    let (status, _, _) = parse_response(&send_request(addr, "GET\r\n\r\n"));
    assert_eq!(status, 400);

    handle.stop();
}

#[test]
fn test_short_body_does_not_hang() {
    let (router, _) = echo_router();
    let handle = test_server::start(router, ServerConfig::default());

    let started = Instant::now();
    let resp = send_and_shutdown(
        handle.local_addr(),
        "PUT /echo HTTP/1.1\r\nContent-Length: 5\r\n\r\nabc",
    );
    assert!(started.elapsed() < Duration::from_secs(2));
    let (status, _, body) = parse_response(&resp);
    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["body"], "abc");

    handle.stop();
}

#[test]
fn test_multibyte_body_read_by_byte_count() {
    let (router, _) = echo_router();
    let handle = test_server::start(router, ServerConfig::default());

    let payload = "{\"cidade\":\"São Paulo\"}";
    let req = format!(
        "PUT /echo HTTP/1.1\r\nContent-Length: {}\r\n\r\n{payload}",
        payload.len()
    );
    let (status, _, body) = parse_response(&send_request(handle.local_addr(), &req));
    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["body"], payload);

    handle.stop();
}

#[test]
fn test_concurrent_clients() {
    let (router, controller) = echo_router();
    let handle = test_server::start(router, ServerConfig::default());
    let addr = handle.local_addr();

    let clients: Vec<_> = (0..16)
        .map(|i| {
            thread::spawn(move || {
                let resp = send_request(addr, &format!("GET /echo/{i} HTTP/1.1\r\n\r\n"));
                let (status, _, body) = parse_response(&resp);
                assert_eq!(status, 200);
                assert!(body.contains(&format!("\"/echo/{i}\"")));
            })
        })
        .collect();
    for client in clients {
        client.join().unwrap();
    }
    assert_eq!(controller.calls(), 16);

    handle.stop();
}

#[test]
fn test_slow_client_does_not_block_others() {
    let (router, _) = echo_router();
    let handle = test_server::start(router, ServerConfig::default());
    let addr = handle.local_addr();

    // Sends half a request line and then stalls
    let mut slow = TcpStream::connect(addr).unwrap();
    slow.write_all(b"GET /ec").unwrap();

    let (status, _, _) = parse_response(&send_request(addr, "GET /echo HTTP/1.1\r\n\r\n"));
    assert_eq!(status, 200);

    slow.write_all(b"ho HTTP/1.1\r\n\r\n").unwrap();
    let (status, _, _) = parse_response(&read_to_close(&mut slow));
    assert_eq!(status, 200);

    handle.stop();
}

#[test]
fn test_connection_cap_rejects_with_503() {
    let (router, _) = echo_router();
    let handle = test_server::start(
        router,
        ServerConfig {
            max_connections: Some(1),
            read_timeout: None,
        },
    );
    let addr = handle.local_addr();
    // The readiness probe connection drains first
    assert!(wait_until(|| handle.active_connections() == 0));

    let mut idle = TcpStream::connect(addr).unwrap();
    assert!(wait_until(|| handle.active_connections() == 1));

    let mut rejected = TcpStream::connect(addr).unwrap();
    let (status, _, body) = parse_response(&read_to_close(&mut rejected));
    assert_eq!(status, 503);
    assert_eq!(body, "{\"error\": \"Service Unavailable\"}");

    idle.write_all(b"GET /echo HTTP/1.1\r\n\r\n").unwrap();
    let (status, _, _) = parse_response(&read_to_close(&mut idle));
    assert_eq!(status, 200);
    assert!(wait_until(|| handle.active_connections() == 0));

    handle.stop();
}

#[test]
fn test_rejected_client_with_pending_request_reads_clean_close() {
    let (router, controller) = echo_router();
    let handle = test_server::start(
        router,
        ServerConfig {
            max_connections: Some(1),
            read_timeout: None,
        },
    );
    let addr = handle.local_addr();
    assert!(wait_until(|| handle.active_connections() == 0));

    let mut idle = TcpStream::connect(addr).unwrap();
    assert!(wait_until(|| handle.active_connections() == 1));

    for _ in 0..20 {
        let mut client = TcpStream::connect(addr).unwrap();
        client
            .write_all(b"PUT /echo HTTP/1.1\r\nContent-Length: 4\r\n\r\nabcd")
            .unwrap();
        client
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let mut buf = Vec::new();
        client
            .read_to_end(&mut buf)
            .expect("rejected connection should end with EOF, not a reset");
        let (status, _, body) = parse_response(&String::from_utf8_lossy(&buf));
        assert_eq!(status, 503);
        assert_eq!(body, "{\"error\": \"Service Unavailable\"}");
    }
    assert_eq!(controller.calls(), 0);

    idle.write_all(b"GET /echo HTTP/1.1\r\n\r\n").unwrap();
    let (status, _, _) = parse_response(&read_to_close(&mut idle));
    assert_eq!(status, 200);

    handle.stop();
}

#[test]
fn test_read_timeout_closes_idle_connection() {
    let (router, _) = echo_router();
    let handle = test_server::start(
        router,
        ServerConfig {
            max_connections: None,
            read_timeout: Some(Duration::from_millis(100)),
        },
    );
    assert!(wait_until(|| handle.active_connections() == 0));

    let _idle = TcpStream::connect(handle.local_addr()).unwrap();
    assert!(wait_until(|| handle.active_connections() == 1));
    assert!(wait_until(|| handle.active_connections() == 0));

    handle.stop();
}
