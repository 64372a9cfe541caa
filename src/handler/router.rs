//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Classifies each request as an
//! API call, a static page, or an unmatched route, and guarantees exactly
//! one response per request (the return type makes double-sends impossible).

use crate::api;
use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path();

    if state.config.logging.access_log {
        logger::log_request(&method, &uri, req.version());
    }
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    if let Some(response) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(response);
    }

    // API routes take priority over page serving
    if path == "/api" || path.starts_with("/api/") {
        return Ok(api::handle_api(req, &state).await);
    }

    let is_head = method == Method::HEAD;
    if method == Method::GET || is_head {
        if let Some(file_name) = static_files::resolve_page(path, &state.config.pages) {
            return Ok(
                static_files::serve_page(&state.config.pages.dir, &file_name, is_head).await,
            );
        }
    }

    Ok(api::route_not_found())
}

/// Validate Content-Length and reject oversized bodies up front
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}
