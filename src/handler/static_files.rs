//! Static page serving module
//!
//! The service ships a small fixed set of HTML pages. A request path either
//! maps onto a configured page file or it does not; there is no directory
//! walking, so traversal is impossible by construction.

use crate::config::PagesConfig;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Map a request path onto a configured page file name
///
/// `/` resolves to the index page; any other path matches only when its
/// single segment equals a configured file name exactly.
pub fn resolve_page(path: &str, pages: &PagesConfig) -> Option<String> {
    if path == "/" {
        return Some(pages.index.clone());
    }
    let name = path.trim_start_matches('/');
    if !name.contains('/') && pages.files.iter().any(|file| file == name) {
        Some(name.to_string())
    } else {
        None
    }
}

/// Serve a resolved page file
pub async fn serve_page(dir: &str, file_name: &str, is_head: bool) -> Response<Full<Bytes>> {
    let file_path = Path::new(dir).join(file_name);
    match fs::read(&file_path).await {
        Ok(content) => {
            logger::log_response(content.len());
            let content_type =
                mime::get_content_type(file_path.extension().and_then(|ext| ext.to_str()));
            http::build_file_response(content, content_type, is_head)
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read page '{}': {e}",
                file_path.display()
            ));
            http::build_404_page()
        }
    }
}
