//! Items API handler functions
//!
//! One function per routed operation. Each takes the store (and, for
//! body-bearing routes, the buffered body) and produces a complete
//! envelope response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::response::{self, json_response, Envelope};
use crate::store::{ItemDraft, ItemStore, StoreError};

pub async fn list_items(store: &ItemStore) -> Response<Full<Bytes>> {
    match store.load_all().await {
        Ok(items) => json_response(StatusCode::OK, &Envelope::data(items)),
        Err(e) => store_failure(&e, "Failed to read items"),
    }
}

pub async fn get_item(store: &ItemStore, id: &str) -> Response<Full<Bytes>> {
    match store.find_by_id(id).await {
        Ok(Some(item)) => json_response(StatusCode::OK, &Envelope::data(item)),
        Ok(None) => item_not_found(id),
        Err(e) => store_failure(&e, "Failed to read items"),
    }
}

pub async fn create_item(store: &ItemStore, body: &Bytes) -> Response<Full<Bytes>> {
    let Ok(draft) = serde_json::from_slice::<ItemDraft>(body) else {
        return response::bad_request("Invalid JSON");
    };
    match store.create(draft).await {
        Ok(item) => json_response(StatusCode::CREATED, &Envelope::data(item)),
        Err(e) => store_failure(&e, "Failed to save items"),
    }
}

pub async fn update_item(store: &ItemStore, id: &str, body: &Bytes) -> Response<Full<Bytes>> {
    let Ok(draft) = serde_json::from_slice::<ItemDraft>(body) else {
        return response::bad_request("Invalid JSON");
    };
    match store.update(id, draft).await {
        Ok(item) => json_response(StatusCode::OK, &Envelope::data(item)),
        Err(e) => store_failure(&e, "Failed to save items"),
    }
}

pub async fn delete_item(store: &ItemStore, id: &str) -> Response<Full<Bytes>> {
    match store.delete(id).await {
        Ok(()) => json_response(StatusCode::OK, &Envelope::message("Item deleted")),
        Err(e) => store_failure(&e, "Failed to save items"),
    }
}

fn item_not_found(id: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &Envelope::failure(format!("Item with id {id} not found")),
    )
}

/// Map a store error onto the status and envelope it surfaces as
fn store_failure(err: &StoreError, io_message: &str) -> Response<Full<Bytes>> {
    match err {
        StoreError::Validation(msg) => response::bad_request(msg),
        StoreError::NotFound(id) => item_not_found(id),
        StoreError::Io(_) | StoreError::Corrupt(_) => json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &Envelope::failure(io_message),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::sync::atomic::{AtomicU32, Ordering};

    static TEST_FILE_SEQ: AtomicU32 = AtomicU32::new(0);

    fn temp_store() -> ItemStore {
        let seq = TEST_FILE_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "items-api-test-{}-{}-{seq}.json",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default(),
        ));
        ItemStore::new(path)
    }

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("body is JSON")
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let store = temp_store();

        let body = Bytes::from_static(br#"{"name":"Tee","price":20,"size":"m"}"#);
        let response = create_item(&store, &body).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = body_json(response).await;
        assert_eq!(created["success"], true);
        assert!(created["data"]["id"].is_string());
        assert_eq!(created["data"]["size"], "m");

        let response = list_items(&store).await;
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed["success"], true);
        let items = listed["data"].as_array().expect("data is an array");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Tee");

        let _ = tokio::fs::remove_file(store.data_path()).await;
    }

    #[tokio::test]
    async fn test_list_empty_store_succeeds() {
        let store = temp_store();
        let response = list_items(&store).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let store = temp_store();
        let body = Bytes::from_static(b"not-json");
        let response = create_item(&store, &body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid JSON");
    }

    #[tokio::test]
    async fn test_invalid_attributes_are_rejected() {
        let store = temp_store();
        let body = Bytes::from_static(br#"{"name":"Tee","price":20,"size":"xl"}"#);
        let response = create_item(&store, &body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Invalid item attributes");

        // nothing was persisted
        let listed = body_json(list_items(&store).await).await;
        assert_eq!(listed["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = temp_store();
        let body = Bytes::from_static(br#"{"price":5}"#);
        let response = update_item(&store, "doesnotexist", &body).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Item with id doesnotexist not found");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let store = temp_store();
        let response = get_item(&store, "12345").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Item with id 12345 not found");
    }

    #[tokio::test]
    async fn test_delete_reports_success_message() {
        let store = temp_store();
        let body = Bytes::from_static(br#"{"name":"Tee","price":20,"size":"m"}"#);
        let created = body_json(create_item(&store, &body).await).await;
        let id = created["data"]["id"].as_str().expect("id").to_string();

        let response = delete_item(&store, &id).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Item deleted");

        let _ = tokio::fs::remove_file(store.data_path()).await;
    }

    #[tokio::test]
    async fn test_corrupt_backing_file_surfaces_as_500() {
        let store = temp_store();
        tokio::fs::write(store.data_path(), "{broken")
            .await
            .expect("write");
        let response = list_items(&store).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Failed to read items");

        let _ = tokio::fs::remove_file(store.data_path()).await;
    }
}
