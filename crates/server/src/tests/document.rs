use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;

use crate::error::StorageError;
use crate::models::tutorial::Tutorial;
use crate::models::video::Video;
use crate::storage::Storage;
use crate::tests::{file_store_config, init_tracing};

const DOCUMENTS: &str = "/v1/projects/demo/databases/(default)/documents";
const DOCUMENT_NAMES: &str = "projects/demo/databases/(default)/documents";

#[derive(Debug, Clone)]
struct SeenRequest {
    method: Method,
    path: String,
    authorization: Option<String>,
    body: Value,
}

type Seen = Arc<Mutex<Vec<SeenRequest>>>;

/// Answers the handful of document API calls the store makes and records
/// every request it receives.
async fn fake_documents_api(
    State(seen): State<Seen>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let path = uri.path().to_string();
    seen.lock().unwrap().push(SeenRequest {
        method: method.clone(),
        path: path.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    });

    if method == Method::POST && path == format!("{DOCUMENTS}:runQuery") {
        let query = &body["structuredQuery"];
        let collection = query["from"][0]["collectionId"].as_str().unwrap_or_default();
        let rows = if query.get("where").is_none() {
            json!([
                {
                    "document": {
                        "name": format!("{DOCUMENT_NAMES}/{collection}/x0"),
                        "fields": {
                            "id": { "integerValue": "0" },
                            "title": { "stringValue": "First" },
                            "video_embed": { "nullValue": null },
                        },
                    },
                    "readTime": "2024-05-01T10:00:00Z",
                },
                {
                    "document": {
                        "name": format!("{DOCUMENT_NAMES}/{collection}/x3"),
                        "fields": {
                            "id": { "integerValue": "3" },
                            "title": { "stringValue": "Second" },
                            "video_embed": { "stringValue": "https://www.youtube.com/embed/q" },
                        },
                    },
                },
                { "readTime": "2024-05-01T10:00:00Z" },
            ])
        } else if collection == "tutorials" {
            json!([
                { "document": { "name": format!("{DOCUMENT_NAMES}/tutorials/a1") } },
                { "document": { "name": format!("{DOCUMENT_NAMES}/tutorials/b2") } },
                { "readTime": "2024-05-01T10:00:00Z" },
            ])
        } else {
            json!([{ "document": { "name": format!("{DOCUMENT_NAMES}/{collection}/gone") } }])
        };
        return Json(rows).into_response();
    }

    match method {
        Method::POST => Json(json!({
            "name": format!("{DOCUMENT_NAMES}/latest_videos/created"),
            "fields": body["fields"],
        }))
        .into_response(),
        Method::DELETE if path.ends_with("/gone") => StatusCode::NOT_FOUND.into_response(),
        Method::DELETE => Json(json!({})).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

struct FakeDocumentsApi {
    _dir: TempDir,
    seen: Seen,
    storage: Storage,
}

impl FakeDocumentsApi {
    async fn start() -> Self {
        init_tracing();
        let seen = Seen::default();
        let app = Router::new()
            .fallback(fake_documents_api)
            .with_state(seen.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let dir = TempDir::new().unwrap();
        let mut config = file_store_config(dir.path());
        config.firestore_emulator_host = Some(addr.to_string());
        config.firebase_project_id = Some("demo".to_string());
        let storage = Storage::select(&config);
        assert_eq!(storage.backend_name(), "document");
        Self {
            _dir: dir,
            seen,
            storage,
        }
    }

    fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[tokio::test]
async fn document_load_queries_by_id_and_keeps_query_order() {
    let api = FakeDocumentsApi::start().await;

    let videos: Vec<Video> = api.storage.load().await.unwrap();
    assert_eq!(
        videos,
        vec![
            Video {
                id: 0,
                title: Some("First".to_string()),
                video_embed: None,
            },
            Video {
                id: 3,
                title: Some("Second".to_string()),
                video_embed: Some("https://www.youtube.com/embed/q".to_string()),
            },
        ]
    );

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path, format!("{DOCUMENTS}:runQuery"));
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer owner"));
    assert_eq!(
        requests[0].body,
        json!({
            "structuredQuery": {
                "from": [{ "collectionId": "latest_videos" }],
                "orderBy": [{ "field": { "fieldPath": "id" }, "direction": "ASCENDING" }],
            }
        })
    );
}

#[tokio::test]
async fn document_save_creates_one_typed_document() {
    let api = FakeDocumentsApi::start().await;

    api.storage
        .save(&Video {
            id: 7,
            title: Some("Clip".to_string()),
            video_embed: None,
        })
        .await
        .unwrap();

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path, format!("{DOCUMENTS}/latest_videos"));
    assert_eq!(
        requests[0].body,
        json!({
            "fields": {
                "id": { "integerValue": "7" },
                "title": { "stringValue": "Clip" },
                "video_embed": { "nullValue": null },
            }
        })
    );
}

#[tokio::test]
async fn document_delete_removes_every_match_by_name() {
    let api = FakeDocumentsApi::start().await;

    let removed = api.storage.delete::<Tutorial>(4).await.unwrap();
    assert_eq!(removed, 2);

    let requests = api.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(
        requests[0].body,
        json!({
            "structuredQuery": {
                "from": [{ "collectionId": "tutorials" }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "id" },
                        "op": "EQUAL",
                        "value": { "integerValue": "4" },
                    }
                },
            }
        })
    );

    let mut deleted: Vec<&str> = requests[1..]
        .iter()
        .inspect(|request| {
            assert_eq!(request.method, Method::DELETE);
            assert_eq!(request.authorization.as_deref(), Some("Bearer owner"));
        })
        .map(|request| request.path.as_str())
        .collect();
    deleted.sort_unstable();
    assert_eq!(
        deleted,
        vec![
            format!("{DOCUMENTS}/tutorials/a1"),
            format!("{DOCUMENTS}/tutorials/b2"),
        ]
    );
}

#[tokio::test]
async fn document_delete_reports_rejected_requests() {
    let api = FakeDocumentsApi::start().await;

    let result = api.storage.delete::<Video>(9).await;
    assert!(matches!(result, Err(StorageError::Http(_))));
}
