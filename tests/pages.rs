//! HTML page tests driven through the router

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use docshare_server::config::Config;
use docshare_server::routes;
use docshare_server::service::{sample::sample_documents, DocumentService, InMemoryDocumentService};
use docshare_server::state::AppState;

fn sample_service() -> InMemoryDocumentService {
    InMemoryDocumentService::with_documents(sample_documents())
}

fn app(service: &InMemoryDocumentService) -> Router {
    routes::app(AppState::new(Config::default(), Arc::new(service.clone())))
}

async fn get(app: Router, uri: &str, user: Option<&str>) -> (StatusCode, String) {
    let mut request = Request::builder().uri(uri);
    if let Some(user) = user {
        request = request.header("x-user-id", user);
    }

    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn wait_for_views(service: &InMemoryDocumentService, id: &str, expected: u64) -> u64 {
    for _ in 0..50 {
        let count = service.view_count(id).await.unwrap();
        if count >= expected {
            return count;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    service.view_count(id).await.unwrap()
}

#[tokio::test]
async fn test_root_redirects_to_documents() {
    let service = sample_service();
    let response = app(&service)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(response.headers()["location"], "/documents");
}

#[tokio::test]
async fn test_list_page_shows_public_documents() {
    let service = sample_service();
    let (status, html) = get(app(&service), "/documents", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("All public documents"));
    assert!(html.contains("Campus Map"));
    assert!(!html.contains("Private Meeting Notes"));
}

#[tokio::test]
async fn test_search_page() {
    let service = sample_service();

    let (status, html) = get(app(&service), "/documents?q=budget", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Quarterly Budget"));
    assert!(!html.contains("Campus Map"));

    let (_, html) = get(app(&service), "/documents?q=zebra", None).await;
    assert!(html.contains("No results found for \"zebra\""));
}

#[tokio::test]
async fn test_empty_library_message() {
    let service = InMemoryDocumentService::new();
    let (status, html) = get(app(&service), "/documents", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No documents have been uploaded yet"));
}

#[tokio::test]
async fn test_list_page_when_service_is_down() {
    let service = sample_service();
    service.set_available(false);

    let (status, html) = get(app(&service), "/documents", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(html.contains("could not be loaded"));
}

#[tokio::test]
async fn test_viewer_page_for_local_pdf() {
    let service = sample_service();
    let (status, html) = get(app(&service), "/documents/2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(
        "https://mozilla.github.io/pdf.js/web/viewer.html?file=http%3A%2F%2Flocalhost%3A3000%2Ffiles%2Fdraft.pdf"
    ));
    assert!(html.contains(
        r#"sandbox="allow-scripts allow-same-origin allow-forms allow-popups allow-downloads allow-presentation""#
    ));
    assert!(html.contains(r#"data-surface="inline" data-state="loading""#));
    assert!(html.contains(r#"data-overlay role="dialog" aria-modal="true" hidden>"#));
}

#[tokio::test]
async fn test_viewer_page_for_image() {
    let service = sample_service();
    let (status, html) = get(app(&service), "/documents/6", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<img src=\"https://upload.wikimedia.org/"));
    assert!(html.contains("Image could not load, download to view."));
    assert!(!html.contains("<iframe"));
}

#[tokio::test]
async fn test_viewer_page_fullscreen_overlay_is_in_page() {
    let service = sample_service();
    let (_, html) = get(app(&service), "/documents/4", None).await;

    assert!(html.contains(r#"data-surface="fullscreen" data-state="loading""#));
    assert_eq!(html.matches("<iframe src=").count(), 1);
    assert_eq!(html.matches("<iframe data-src=").count(), 1);
    assert_eq!(html.matches(r#"data-toggle="fullscreen""#).count(), 2);
    assert!(!html.contains("?fullscreen"));
}

#[tokio::test]
async fn test_fullscreen_round_trip_records_one_view() {
    let service = sample_service();

    // Opening and closing fullscreen happens inside this one page
    let (status, html) = get(app(&service), "/documents/1", Some("bob")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<button class="button" type="button" data-toggle="fullscreen">Fullscreen</button>"#));
    assert!(html.contains(r#"<button class="button ghost" type="button" data-toggle="fullscreen">Close</button>"#));
    assert!(!html.contains("location."));

    assert_eq!(wait_for_views(&service, "1", 1).await, 1);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(service.view_count("1").await.unwrap(), 1);
}

#[tokio::test]
async fn test_viewer_page_not_found() {
    let service = sample_service();
    let (status, html) = get(app(&service), "/documents/does-not-exist", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Document not found"));
}

#[tokio::test]
async fn test_viewer_page_when_service_is_down() {
    let service = sample_service();
    service.set_available(false);

    let (status, html) = get(app(&service), "/documents/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(html.contains("<h1>Something went wrong</h1>"));
}

#[tokio::test]
async fn test_viewer_page_records_view_for_signed_in_user() {
    let service = sample_service();

    let (status, html) = get(app(&service), "/documents/1", Some("bob")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"data-action="save""#));
    assert_eq!(wait_for_views(&service, "1", 1).await, 1);
}

#[tokio::test]
async fn test_viewer_page_anonymous_records_nothing() {
    let service = sample_service();

    let (status, html) = get(app(&service), "/documents/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains(r#"data-action="save""#));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(service.view_count("1").await.unwrap(), 0);
}

#[tokio::test]
async fn test_viewer_page_shows_saved_state() {
    let service = sample_service();
    let folder = service.create_folder("bob", "Lectures").await.unwrap();
    service
        .save_document("bob", "1", Some(folder.id.as_str()))
        .await
        .unwrap();

    let (_, html) = get(app(&service), "/documents/1", Some("bob")).await;
    assert!(html.contains(r#"data-action="save" data-active="true""#));
    assert!(html.contains("Lectures"));
}
