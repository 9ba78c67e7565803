//! Document API endpoints
//!
//! Provides REST API for documents:
//! - List, search, create, update and delete documents
//! - Resolve the viewer strategy for a document
//! - Record views
//! - Bookmarks, saved documents and shares

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::document::{
    Bookmark, Document, DocumentShare, DocumentUpdate, NewDocument, NewShare, SavedDocument,
};
use crate::error::{AppError, Result};
use crate::identity::RequiredUser;
use crate::state::AppState;
use crate::viewer::{RecoveryAction, RenderStrategy, ViewerSession, FRAME_SANDBOX};

/// Response for document list
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<Document>,
    pub total: usize,
}

impl From<Vec<Document>> for DocumentListResponse {
    fn from(documents: Vec<Document>) -> Self {
        let total = documents.len();
        Self { documents, total }
    }
}

/// How the viewer will display a document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerResponse {
    pub document_id: String,
    pub title: String,
    pub strategy: RenderStrategy,
    pub file_kind: &'static str,
    pub file_name: String,
    /// Frame sandbox; absent for images
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<&'static str>,
    pub failure_message: &'static str,
    pub recovery_actions: [RecoveryAction; 2],
}

/// A created share with an absolute link to the viewer page
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    #[serde(flatten)]
    pub share: DocumentShare,
    pub link: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookmarkStatus {
    pub bookmarked: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SavedStatus {
    pub saved: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub folder_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Create the documents router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_documents).post(create_document))
        .route(
            "/:id",
            get(get_document)
                .patch(update_document)
                .delete(delete_document),
        )
        .route("/:id/viewer", get(get_viewer))
        .route("/:id/views", post(record_view))
        .route(
            "/:id/bookmark",
            get(get_bookmark).put(add_bookmark).delete(remove_bookmark),
        )
        .route(
            "/:id/saved",
            get(get_saved).put(save_document).delete(remove_saved),
        )
        .route("/:id/shares", post(share_document))
}

/// Folder selection from the save dialog
///
/// Empty, "none" and non-UUID values all mean "no folder".
pub fn normalize_folder_id(folder_id: Option<&str>) -> Option<String> {
    let folder_id = folder_id.map(str::trim).filter(|id| !id.is_empty())?;
    if folder_id.eq_ignore_ascii_case("none") {
        return None;
    }

    match uuid::Uuid::parse_str(folder_id) {
        Ok(_) => Some(folder_id.to_string()),
        Err(_) => {
            tracing::warn!("Ignoring folder id that is not a UUID: {}", folder_id);
            None
        }
    }
}

async fn load_document(state: &AppState, id: &str) -> Result<Document> {
    state
        .documents()
        .fetch_document(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document not found: {}", id)))
}

async fn load_owned_document(state: &AppState, id: &str, user: &RequiredUser) -> Result<Document> {
    let document = load_document(state, id).await?;
    if document.owner_id != user.id() {
        return Err(AppError::Forbidden(
            "Only the owner can modify this document".to_string(),
        ));
    }
    Ok(document)
}

/// List public documents, or search them with `?q=`
async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<DocumentListResponse>> {
    let documents = match query.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => state.documents().search_documents(q).await?,
        _ => state.documents().list_public_documents().await?,
    };
    Ok(Json(documents.into()))
}

async fn create_document(
    State(state): State<AppState>,
    user: RequiredUser,
    Json(mut input): Json<NewDocument>,
) -> Result<(StatusCode, Json<Document>)> {
    input.owner_id = user.id().to_string();
    let document = state.documents().create_document(input).await?;
    tracing::info!("User {} uploaded document {}", user.id(), document.id);
    Ok((StatusCode::CREATED, Json(document)))
}

async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>> {
    Ok(Json(load_document(&state, &id).await?))
}

async fn update_document(
    State(state): State<AppState>,
    user: RequiredUser,
    Path(id): Path<String>,
    Json(update): Json<DocumentUpdate>,
) -> Result<Json<Document>> {
    if update.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }
    load_owned_document(&state, &id, &user).await?;
    let document = state.documents().update_document(&id, update).await?;
    Ok(Json(document))
}

async fn delete_document(
    State(state): State<AppState>,
    user: RequiredUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    load_owned_document(&state, &id, &user).await?;
    state.documents().delete_document(&id).await?;
    tracing::info!("User {} deleted document {}", user.id(), id);
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve how a document will be displayed
async fn get_viewer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ViewerResponse>> {
    let document = load_document(&state, &id).await?;
    let session = ViewerSession::new(document, state.endpoints());
    let strategy = session.strategy().clone();

    Ok(Json(ViewerResponse {
        document_id: session.document().id.clone(),
        title: session.document().title.clone(),
        sandbox: (!strategy.is_image()).then_some(FRAME_SANDBOX),
        file_kind: session.file_kind(),
        file_name: session.file_name().to_string(),
        failure_message: session.failure_message(),
        recovery_actions: session.recovery_actions(),
        strategy,
    }))
}

/// Record a view without waiting for the service
async fn record_view(
    State(state): State<AppState>,
    user: RequiredUser,
    Path(id): Path<String>,
) -> StatusCode {
    let service = state.documents_handle();
    let user_id = user.0;

    tokio::spawn(async move {
        if let Err(e) = service.record_view(&user_id, &id).await {
            tracing::warn!("Failed to record view of {} by {}: {}", id, user_id, e);
        }
    });

    StatusCode::ACCEPTED
}

async fn get_bookmark(
    State(state): State<AppState>,
    user: RequiredUser,
    Path(id): Path<String>,
) -> Result<Json<BookmarkStatus>> {
    let bookmarked = state.documents().is_bookmarked(user.id(), &id).await?;
    Ok(Json(BookmarkStatus { bookmarked }))
}

async fn add_bookmark(
    State(state): State<AppState>,
    user: RequiredUser,
    Path(id): Path<String>,
) -> Result<Json<Bookmark>> {
    let bookmark = state.documents().bookmark_document(user.id(), &id).await?;
    Ok(Json(bookmark))
}

async fn remove_bookmark(
    State(state): State<AppState>,
    user: RequiredUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.documents().remove_bookmark(user.id(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_saved(
    State(state): State<AppState>,
    user: RequiredUser,
    Path(id): Path<String>,
) -> Result<Json<SavedStatus>> {
    let saved = state.documents().is_document_saved(user.id(), &id).await?;
    Ok(Json(SavedStatus { saved }))
}

/// Save a document, optionally into a folder
async fn save_document(
    State(state): State<AppState>,
    user: RequiredUser,
    Path(id): Path<String>,
    body: Option<Json<SaveRequest>>,
) -> Result<Json<SavedDocument>> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let folder_id = normalize_folder_id(request.folder_id.as_deref());

    let saved = state
        .documents()
        .save_document(user.id(), &id, folder_id.as_deref())
        .await?;
    Ok(Json(saved))
}

async fn remove_saved(
    State(state): State<AppState>,
    user: RequiredUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.documents().remove_saved_document(user.id(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn share_document(
    State(state): State<AppState>,
    user: RequiredUser,
    Path(id): Path<String>,
    Json(mut input): Json<NewShare>,
) -> Result<(StatusCode, Json<ShareResponse>)> {
    input.document_id = id;
    input.shared_by = user.0;
    let share = state.documents().share_document(input).await?;
    tracing::info!(
        "Document {} shared by {} with {}",
        share.document_id,
        share.shared_by,
        share.shared_with
    );
    let link = share_link(&state.config().server.public_base_url, &share.document_id);
    Ok((StatusCode::CREATED, Json(ShareResponse { share, link })))
}

/// Absolute URL of a document's viewer page
pub fn share_link(public_base_url: &str, document_id: &str) -> String {
    format!(
        "{}/documents/{}",
        public_base_url.trim_end_matches('/'),
        urlencoding::encode(document_id)
    )
}
