//! Per-user library endpoints
//!
//! Folders, and the caller's own, bookmarked, saved and shared documents.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::documents::{normalize_folder_id, DocumentListResponse};
use crate::document::{Folder, SavedDocument};
use crate::error::Result;
use crate::identity::RequiredUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewFolderRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FolderListResponse {
    pub folders: Vec<Folder>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuery {
    pub folder_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SavedListResponse {
    pub saved: Vec<SavedDocument>,
    pub total: usize,
}

/// Create the folders router
pub fn folders_router() -> Router<AppState> {
    Router::new().route("/", get(list_folders).post(create_folder))
}

/// Create the router for the caller's own collections
pub fn me_router() -> Router<AppState> {
    Router::new()
        .route("/documents", get(my_documents))
        .route("/bookmarks", get(my_bookmarks))
        .route("/saved", get(my_saved))
        .route("/shared", get(shared_with_me))
}

async fn list_folders(
    State(state): State<AppState>,
    user: RequiredUser,
) -> Result<Json<FolderListResponse>> {
    let folders = state.documents().list_folders(user.id()).await?;
    Ok(Json(FolderListResponse { folders }))
}

async fn create_folder(
    State(state): State<AppState>,
    user: RequiredUser,
    Json(request): Json<NewFolderRequest>,
) -> Result<(StatusCode, Json<Folder>)> {
    let folder = state
        .documents()
        .create_folder(user.id(), &request.name)
        .await?;
    Ok((StatusCode::CREATED, Json(folder)))
}

async fn my_documents(
    State(state): State<AppState>,
    user: RequiredUser,
) -> Result<Json<DocumentListResponse>> {
    let documents = state.documents().list_user_documents(user.id()).await?;
    Ok(Json(documents.into()))
}

async fn my_bookmarks(
    State(state): State<AppState>,
    user: RequiredUser,
) -> Result<Json<DocumentListResponse>> {
    let documents = state.documents().list_bookmarks(user.id()).await?;
    Ok(Json(documents.into()))
}

async fn my_saved(
    State(state): State<AppState>,
    user: RequiredUser,
    Query(query): Query<SavedQuery>,
) -> Result<Json<SavedListResponse>> {
    let folder_id = normalize_folder_id(query.folder_id.as_deref());
    let saved = state
        .documents()
        .list_saved_documents(user.id(), folder_id.as_deref())
        .await?;
    let total = saved.len();
    Ok(Json(SavedListResponse { saved, total }))
}

async fn shared_with_me(
    State(state): State<AppState>,
    user: RequiredUser,
) -> Result<Json<DocumentListResponse>> {
    let documents = state.documents().list_shared_with(user.id()).await?;
    Ok(Json(documents.into()))
}
