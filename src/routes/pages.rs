//! HTML pages
//!
//! - `/documents`: browse and search public documents
//! - `/documents/:id`: the document viewer; fullscreen is toggled in the
//!   page, never by navigation

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::error::PageError;
use crate::html::{page, render_catalog, Listing};
use crate::identity::CurrentUser;
use crate::state::AppState;
use crate::viewer::{render_viewer, ViewerContext, ViewerSession};

/// Create the pages router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/documents") }))
        .route("/documents", get(list_page))
        .route("/documents/:id", get(viewer_page))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

/// Browse or search documents
async fn list_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> (StatusCode, Html<String>) {
    let search = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let result = match search {
        Some(q) => state.documents().search_documents(q).await,
        None => state.documents().list_public_documents().await,
    };

    let (status, body) = match &result {
        Ok(documents) => (
            StatusCode::OK,
            render_catalog(search, Listing::Documents(documents)),
        ),
        Err(e) => {
            tracing::error!("Failed to load document list: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                render_catalog(search, Listing::Failed),
            )
        }
    };

    (status, Html(page("Documents", user.id(), &body)))
}

/// Show a document in the viewer
async fn viewer_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let user_id = user.id();

    let document = state
        .documents()
        .fetch_document(&id)
        .await
        .map_err(|e| PageError::service(e, user_id))?
        .ok_or_else(|| PageError::NotFound {
            user_id: user_id.map(str::to_string),
        })?;

    let mut session = ViewerSession::new(document, state.endpoints());
    // Detached; the page never waits on it
    let _ = session.record_view(state.documents_handle(), user_id);

    let context = viewer_context(&state, &id, user_id).await;
    let body = render_viewer(&session, &context);

    Ok(Html(page(&session.document().title, user_id, &body)))
}

/// Account state shown in the toolbar; failures degrade to defaults
async fn viewer_context(state: &AppState, document_id: &str, user_id: Option<&str>) -> ViewerContext {
    let mut context = ViewerContext {
        user_id: user_id.map(str::to_string),
        ..Default::default()
    };

    let Some(user_id) = user_id else {
        return context;
    };
    let documents = state.documents();

    context.saved = documents
        .is_document_saved(user_id, document_id)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to check saved state of {}: {}", document_id, e);
            false
        });
    context.bookmarked = documents
        .is_bookmarked(user_id, document_id)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to check bookmark of {}: {}", document_id, e);
            false
        });
    context.folders = documents.list_folders(user_id).await.unwrap_or_else(|e| {
        tracing::warn!("Failed to load folders for {}: {}", user_id, e);
        Vec::new()
    });

    context
}
