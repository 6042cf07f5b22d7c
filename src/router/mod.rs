//! # Router Module
//!
//! The router owns the route table and runs the request pipeline for one
//! connection:
//!
//! ```text
//! bytes ──parse_request──▶ HttpRequest ──resolve──▶ Controller ──handle_*──▶ HttpResponse ──to_bytes──▶ bytes
//! ```
//!
//! ## Resolution
//!
//! Routes are string prefixes. Among all prefixes the request path starts
//! with, the longest wins; with no match the answer is `404`. Registering the
//! same prefix again replaces the earlier controller.
//!
//! ## Dispatch
//!
//! | Method                       | Operation        |
//! |------------------------------|------------------|
//! | GET                          | `handle_get`     |
//! | POST                         | `handle_post`    |
//! | PATCH                        | `handle_patch`   |
//! | PUT                          | `handle_put`     |
//! | DELETE                       | `handle_delete`  |
//! | HEAD, OPTIONS, TRACE, CONNECT | none, `501`     |
//!
//! ## Errors
//!
//! | Failure                         | Response |
//! |---------------------------------|----------|
//! | malformed request               | `400`, `{"error": "<message>"}` |
//! | no matching prefix              | `404`, `{"error": "Not Found"}` |
//! | method without an operation     | `501`, `{"error": "Not Implemented"}` |
//! | controller panic                | `500`, `{"error": "Internal Server Error"}` |
//!
//! ## Example
//!
//! ```rust,ignore
//! use restam::router::Router;
//! use std::sync::Arc;
//!
//! let mut router = Router::new();
//! router.add_route("/cep", Arc::new(cep_controller));
//! router.add_routes(["/v1/items", "/items"], Arc::new(items_controller));
//!
//! let response = router.respond(&b"GET /cep/01001000 HTTP/1.1\r\n\r\n"[..]);
//! ```

mod core;

pub use self::core::Router;
