// API module entry
// Items CRUD API over the file-backed store

mod handlers;
mod response;

pub use response::route_not_found;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::sync::Arc;

use crate::config::AppState;
use crate::logger;

/// Classified API route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRoute {
    ListItems,
    GetItem(String),
    CreateItem,
    UpdateItem(String),
    DeleteItem(String),
    Unknown,
}

/// Classify a request by method and path segments
///
/// Segments come from splitting the path on `/` and dropping empties, so
/// trailing slashes do not change the match.
pub fn classify(method: &Method, path: &str) -> ApiRoute {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match (method, segments.as_slice()) {
        (&Method::GET, ["api", "items"]) => ApiRoute::ListItems,
        (&Method::GET, ["api", "items", id]) => ApiRoute::GetItem((*id).to_string()),
        (&Method::POST, ["api", "items"]) => ApiRoute::CreateItem,
        (&Method::PUT, ["api", "items", id]) => ApiRoute::UpdateItem((*id).to_string()),
        (&Method::DELETE, ["api", "items", id]) => ApiRoute::DeleteItem((*id).to_string()),
        _ => ApiRoute::Unknown,
    }
}

/// API route handler
///
/// Dispatches to handler functions based on the classified route. Body-bearing
/// routes buffer the whole body before parsing.
pub async fn handle_api(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = match classify(&method, &path) {
        ApiRoute::ListItems => handlers::list_items(&state.store).await,
        ApiRoute::GetItem(id) => handlers::get_item(&state.store, &id).await,
        ApiRoute::CreateItem => match collect_body(req).await {
            Ok(body) => handlers::create_item(&state.store, &body).await,
            Err(response) => response,
        },
        ApiRoute::UpdateItem(id) => match collect_body(req).await {
            Ok(body) => handlers::update_item(&state.store, &id, &body).await,
            Err(response) => response,
        },
        ApiRoute::DeleteItem(id) => handlers::delete_item(&state.store, &id).await,
        ApiRoute::Unknown => response::route_not_found(),
    };

    logger::log_api_request(method.as_str(), &path, response.status().as_u16());
    response
}

/// Buffer the full request body
async fn collect_body(
    req: Request<hyper::body::Incoming>,
) -> Result<Bytes, Response<Full<Bytes>>> {
    match req.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(response::bad_request("Failed to read request body"))
        }
    }
}
