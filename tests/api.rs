//! JSON API tests

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use docshare_server::config::Config;
use docshare_server::identity::USER_HEADER;
use docshare_server::routes;
use docshare_server::service::{sample::sample_documents, DocumentService, InMemoryDocumentService};
use docshare_server::state::AppState;

fn setup() -> (TestServer, InMemoryDocumentService) {
    let service = InMemoryDocumentService::with_documents(sample_documents());
    let state = AppState::new(Config::default(), Arc::new(service.clone()));
    let server = TestServer::new(routes::app(state)).unwrap();
    (server, service)
}

fn user(id: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(USER_HEADER),
        HeaderValue::from_str(id).unwrap(),
    )
}

async fn create(server: &TestServer, owner: &str, body: Value) -> Value {
    let (name, value) = user(owner);
    let response = server
        .post("/api/v1/documents")
        .add_header(name, value)
        .json(&body)
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_health() {
    let (server, _) = setup();

    for path in ["/health", "/api/v1/health"] {
        let response = server.get(path).await;
        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "docshare-server");
    }
}

#[tokio::test]
async fn test_list_and_search() {
    let (server, _) = setup();

    let body = server.get("/api/v1/documents").await.json::<Value>();
    assert_eq!(body["total"], 7);
    assert_eq!(body["documents"][0]["id"], "1");

    let body = server
        .get("/api/v1/documents")
        .add_query_param("q", "SLIDES")
        .await
        .json::<Value>();
    assert_eq!(body["total"], 1);
    assert_eq!(body["documents"][0]["title"], "Conference Keynote Slides");
}

#[tokio::test]
async fn test_viewer_for_loopback_pdf() {
    let (server, _) = setup();

    let created = create(
        &server,
        "alice",
        json!({
            "title": "Scratch",
            "filetype": "application/pdf",
            "fileurl": "http://localhost:3000/f.pdf"
        }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = server.get(&format!("/api/v1/documents/{}/viewer", id)).await;
    response.assert_status_ok();
    let body = response.json::<Value>();

    assert_eq!(body["strategy"]["kind"], "bridgedPdf");
    assert_eq!(
        body["strategy"]["displayUrl"],
        "https://mozilla.github.io/pdf.js/web/viewer.html?file=http%3A%2F%2Flocalhost%3A3000%2Ff.pdf"
    );
    assert_eq!(body["fileKind"], "PDF");
    assert_eq!(body["fileName"], "f.pdf");
    assert_eq!(body["failureMessage"], "Document could not load, download to view.");
    assert!(body["sandbox"].as_str().unwrap().contains("allow-downloads"));
    assert_eq!(body["recoveryActions"][0]["url"], "http://localhost:3000/f.pdf");
}

#[tokio::test]
async fn test_viewer_for_image_has_no_sandbox() {
    let (server, _) = setup();

    let body = server.get("/api/v1/documents/6/viewer").await.json::<Value>();
    assert_eq!(body["strategy"]["kind"], "directImage");
    assert!(body.get("sandbox").is_none());
    assert_eq!(body["failureMessage"], "Image could not load, download to view.");
}

#[tokio::test]
async fn test_missing_document() {
    let (server, _) = setup();

    let response = server.get("/api/v1/documents/missing/viewer").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "not_found");
}

#[tokio::test]
async fn test_create_requires_user() {
    let (server, _) = setup();

    let response = server
        .post("/api/v1/documents")
        .json(&json!({ "title": "x", "filetype": "text/plain", "fileurl": "https://x.org/a.txt" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_rejects_empty_url() {
    let (server, _) = setup();
    let (name, value) = user("alice");

    let response = server
        .post("/api/v1/documents")
        .add_header(name, value)
        .json(&json!({ "title": "x", "filetype": "text/plain", "fileurl": "" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_script_url() {
    let (server, _) = setup();
    let (name, value) = user("alice");

    let response = server
        .post("/api/v1/documents")
        .add_header(name, value)
        .json(&json!({
            "title": "x",
            "filetype": "application/pdf",
            "fileurl": "javascript:parent.document.body.innerHTML='owned'"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "bad_request");

    let list = server.get("/api/v1/documents").await.json::<Value>();
    assert_eq!(list["total"], 7);
}

#[tokio::test]
async fn test_update_is_validated() {
    let (server, _) = setup();
    let created = create(
        &server,
        "alice",
        json!({ "title": "Notes", "filetype": "text/plain", "fileurl": "https://x.org/n.txt" }),
    )
    .await;
    let path = format!("/api/v1/documents/{}", created["id"].as_str().unwrap());

    for body in [
        json!({}),
        json!({ "title": "" }),
        json!({ "fileurl": "javascript:alert(1)" }),
    ] {
        let (name, value) = user("alice");
        let response = server.patch(&path).add_header(name, value).json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{body}");
    }

    let document = server.get(&path).await.json::<Value>();
    assert_eq!(document["title"], "Notes");
    assert_eq!(document["fileurl"], "https://x.org/n.txt");
}

#[tokio::test]
async fn test_only_owner_can_modify() {
    let (server, _) = setup();
    let created = create(
        &server,
        "alice",
        json!({ "title": "Notes", "filetype": "text/plain", "fileurl": "https://x.org/n.txt" }),
    )
    .await;
    let path = format!("/api/v1/documents/{}", created["id"].as_str().unwrap());

    let (name, value) = user("mallory");
    let response = server
        .patch(&path)
        .add_header(name, value)
        .json(&json!({ "title": "Mine now" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let (name, value) = user("alice");
    let response = server
        .patch(&path)
        .add_header(name, value)
        .json(&json!({ "title": "Renamed" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["title"], "Renamed");

    let (name, value) = user("alice");
    let response = server.delete(&path).add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get(&path).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bookmarks() {
    let (server, _) = setup();

    let (name, value) = user("bob");
    server
        .put("/api/v1/documents/3/bookmark")
        .add_header(name, value)
        .await
        .assert_status_ok();

    let (name, value) = user("bob");
    let status = server
        .get("/api/v1/documents/3/bookmark")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(status["bookmarked"], true);

    let (name, value) = user("bob");
    let list = server
        .get("/api/v1/me/bookmarks")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(list["total"], 1);
    assert_eq!(list["documents"][0]["id"], "3");

    let (name, value) = user("bob");
    let response = server
        .delete("/api/v1/documents/3/bookmark")
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_save_into_folder() {
    let (server, _) = setup();

    let (name, value) = user("bob");
    let response = server
        .post("/api/v1/folders")
        .add_header(name, value)
        .json(&json!({ "name": "Reading" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let folder_id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let (name, value) = user("bob");
    let saved = server
        .put("/api/v1/documents/1/saved")
        .add_header(name, value)
        .json(&json!({ "folderId": folder_id }))
        .await
        .json::<Value>();
    assert_eq!(saved["folderId"], folder_id.as_str());

    let (name, value) = user("bob");
    let list = server
        .get("/api/v1/me/saved")
        .add_header(name, value)
        .add_query_param("folderId", &folder_id)
        .await
        .json::<Value>();
    assert_eq!(list["total"], 1);
    assert_eq!(list["saved"][0]["documentId"], "1");
}

#[tokio::test]
async fn test_save_with_invalid_folder_id_saves_without_folder() {
    let (server, _) = setup();

    let (name, value) = user("bob");
    let response = server
        .put("/api/v1/documents/1/saved")
        .add_header(name, value)
        .json(&json!({ "folderId": "reading-list" }))
        .await;
    response.assert_status_ok();
    assert!(response.json::<Value>().get("folderId").is_none());

    let (name, value) = user("bob");
    let status = server
        .get("/api/v1/documents/1/saved")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(status["saved"], true);
}

#[tokio::test]
async fn test_save_into_unknown_folder() {
    let (server, _) = setup();

    let (name, value) = user("bob");
    let response = server
        .put("/api/v1/documents/1/saved")
        .add_header(name, value)
        .json(&json!({ "folderId": uuid::Uuid::new_v4().to_string() }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_folder_conflicts() {
    let (server, _) = setup();

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let (name, value) = user("bob");
        let response = server
            .post("/api/v1/folders")
            .add_header(name, value)
            .json(&json!({ "name": "Reading" }))
            .await;
        assert_eq!(response.status_code(), expected);
    }
}

#[tokio::test]
async fn test_share_document() {
    let (server, _) = setup();

    let (name, value) = user("alice");
    let response = server
        .post("/api/v1/documents/5/shares")
        .add_header(name, value)
        .json(&json!({ "sharedWith": "bob" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let share = response.json::<Value>();
    assert_eq!(share["sharedBy"], "alice");
    assert_eq!(share["permission"], "view");
    assert_eq!(share["link"], "http://localhost:3000/documents/5");

    let (name, value) = user("bob");
    let list = server
        .get("/api/v1/me/shared")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(list["documents"][0]["id"], "5");
}

#[tokio::test]
async fn test_record_view_is_accepted() {
    let (server, service) = setup();

    let (name, value) = user("bob");
    let response = server
        .post("/api/v1/documents/2/views")
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::ACCEPTED);

    let mut count = 0;
    for _ in 0..50 {
        count = service.view_count("2").await.unwrap();
        if count > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_service_unavailable() {
    let (server, service) = setup();
    service.set_available(false);

    let response = server.get("/api/v1/documents").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["error"], "service_unavailable");
}
