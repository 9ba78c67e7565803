//! In-memory document service
//!
//! Keeps every table behind a single `RwLock`. Used for development,
//! the bundled sample library and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::traits::{DocumentService, ServiceResult};
use crate::document::{
    Bookmark, Document, DocumentShare, DocumentUpdate, Folder, NewDocument, NewShare,
    SavedDocument,
};
use crate::error::ServiceError;
use crate::viewer::is_http_url;

#[derive(Default)]
struct Tables {
    documents: HashMap<String, Document>,
    views: HashMap<String, u64>,
    bookmarks: Vec<Bookmark>,
    saved: Vec<SavedDocument>,
    folders: Vec<Folder>,
    shares: Vec<DocumentShare>,
}

/// Thread-safe in-memory document service
#[derive(Clone)]
pub struct InMemoryDocumentService {
    tables: Arc<RwLock<Tables>>,
    available: Arc<AtomicBool>,
}

impl Default for InMemoryDocumentService {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentService {
    /// Create an empty service
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Create a service pre-populated with documents
    pub fn with_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let documents = documents
            .into_iter()
            .map(|doc| (doc.id.clone(), doc))
            .collect();

        Self {
            tables: Arc::new(RwLock::new(Tables {
                documents,
                ..Default::default()
            })),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulate an outage: every call fails with `Unavailable` while false
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> ServiceResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ServiceError::Unavailable(
                "document service is offline".to_string(),
            ))
        }
    }
}

fn newest_first(mut documents: Vec<Document>) -> Vec<Document> {
    documents.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.title.cmp(&b.title))
    });
    documents
}

fn validate_title(title: &str) -> ServiceResult<()> {
    if title.trim().is_empty() {
        return Err(ServiceError::InvalidInput("title must not be empty".to_string()));
    }
    Ok(())
}

/// The viewer embeds and links `fileurl` as-is, so only http(s) is accepted
fn validate_fileurl(fileurl: &str) -> ServiceResult<()> {
    if !is_http_url(fileurl) {
        return Err(ServiceError::InvalidInput(
            "fileurl must be an absolute http or https URL".to_string(),
        ));
    }
    Ok(())
}

fn require_document(tables: &Tables, id: &str) -> ServiceResult<()> {
    if tables.documents.contains_key(id) {
        Ok(())
    } else {
        Err(ServiceError::DocumentNotFound(id.to_string()))
    }
}

fn collect_documents<'a>(
    tables: &Tables,
    ids: impl Iterator<Item = &'a String>,
) -> Vec<Document> {
    ids.filter_map(|id| tables.documents.get(id).cloned())
        .collect()
}

#[async_trait]
impl DocumentService for InMemoryDocumentService {
    async fn fetch_document(&self, id: &str) -> ServiceResult<Option<Document>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.documents.get(id).cloned())
    }

    async fn search_documents(&self, query: &str) -> ServiceResult<Vec<Document>> {
        self.check_available()?;
        let needle = query.trim().to_lowercase();
        let tables = self.tables.read().await;

        let found = tables
            .documents
            .values()
            .filter(|doc| doc.is_public && (needle.is_empty() || doc.matches(&needle)))
            .cloned()
            .collect();

        Ok(newest_first(found))
    }

    async fn list_public_documents(&self) -> ServiceResult<Vec<Document>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let public = tables
            .documents
            .values()
            .filter(|doc| doc.is_public)
            .cloned()
            .collect();
        Ok(newest_first(public))
    }

    async fn list_user_documents(&self, user_id: &str) -> ServiceResult<Vec<Document>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let owned = tables
            .documents
            .values()
            .filter(|doc| doc.owner_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(owned))
    }

    async fn create_document(&self, input: NewDocument) -> ServiceResult<Document> {
        self.check_available()?;
        validate_title(&input.title)?;
        validate_fileurl(&input.fileurl)?;

        let document = Document::from_new(input);
        let mut tables = self.tables.write().await;
        tables
            .documents
            .insert(document.id.clone(), document.clone());

        tracing::debug!("Created document {} ({})", document.id, document.title);
        Ok(document)
    }

    async fn update_document(&self, id: &str, update: DocumentUpdate) -> ServiceResult<Document> {
        self.check_available()?;
        if let Some(title) = update.title.as_deref() {
            validate_title(title)?;
        }
        if let Some(fileurl) = update.fileurl.as_deref() {
            validate_fileurl(fileurl)?;
        }

        let mut tables = self.tables.write().await;
        let document = tables
            .documents
            .get_mut(id)
            .ok_or_else(|| ServiceError::DocumentNotFound(id.to_string()))?;
        document.apply(update);
        Ok(document.clone())
    }

    async fn delete_document(&self, id: &str) -> ServiceResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.documents.remove(id).is_none() {
            return Err(ServiceError::DocumentNotFound(id.to_string()));
        }

        tables.views.remove(id);
        tables.bookmarks.retain(|b| b.document_id != id);
        tables.saved.retain(|s| s.document_id != id);
        tables.shares.retain(|s| s.document_id != id);

        tracing::debug!("Deleted document {}", id);
        Ok(())
    }

    async fn record_view(&self, user_id: &str, document_id: &str) -> ServiceResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        require_document(&tables, document_id)?;
        *tables.views.entry(document_id.to_string()).or_insert(0) += 1;

        tracing::debug!("Recorded view of {} by {}", document_id, user_id);
        Ok(())
    }

    async fn view_count(&self, document_id: &str) -> ServiceResult<u64> {
        self.check_available()?;
        let tables = self.tables.read().await;
        require_document(&tables, document_id)?;
        Ok(tables.views.get(document_id).copied().unwrap_or(0))
    }

    async fn bookmark_document(
        &self,
        user_id: &str,
        document_id: &str,
    ) -> ServiceResult<Bookmark> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        require_document(&tables, document_id)?;

        if let Some(existing) = tables
            .bookmarks
            .iter()
            .find(|b| b.user_id == user_id && b.document_id == document_id)
        {
            return Ok(existing.clone());
        }

        let bookmark = Bookmark::new(user_id, document_id);
        tables.bookmarks.push(bookmark.clone());
        Ok(bookmark)
    }

    async fn remove_bookmark(&self, user_id: &str, document_id: &str) -> ServiceResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        tables
            .bookmarks
            .retain(|b| !(b.user_id == user_id && b.document_id == document_id));
        Ok(())
    }

    async fn is_bookmarked(&self, user_id: &str, document_id: &str) -> ServiceResult<bool> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .bookmarks
            .iter()
            .any(|b| b.user_id == user_id && b.document_id == document_id))
    }

    async fn list_bookmarks(&self, user_id: &str) -> ServiceResult<Vec<Document>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut bookmarks: Vec<&Bookmark> = tables
            .bookmarks
            .iter()
            .filter(|b| b.user_id == user_id)
            .collect();
        bookmarks.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(collect_documents(
            &tables,
            bookmarks.into_iter().map(|b| &b.document_id),
        ))
    }

    async fn is_document_saved(&self, user_id: &str, document_id: &str) -> ServiceResult<bool> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .saved
            .iter()
            .any(|s| s.user_id == user_id && s.document_id == document_id))
    }

    async fn save_document(
        &self,
        user_id: &str,
        document_id: &str,
        folder_id: Option<&str>,
    ) -> ServiceResult<SavedDocument> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        require_document(&tables, document_id)?;

        if let Some(folder_id) = folder_id {
            let owns_folder = tables
                .folders
                .iter()
                .any(|f| f.id == folder_id && f.owner_id == user_id);
            if !owns_folder {
                return Err(ServiceError::FolderNotFound(folder_id.to_string()));
            }
        }

        let folder_id = folder_id.map(str::to_string);
        if let Some(existing) = tables
            .saved
            .iter_mut()
            .find(|s| s.user_id == user_id && s.document_id == document_id)
        {
            existing.folder_id = folder_id;
            return Ok(existing.clone());
        }

        let saved = SavedDocument::new(user_id, document_id, folder_id);
        tables.saved.push(saved.clone());
        Ok(saved)
    }

    async fn remove_saved_document(&self, user_id: &str, document_id: &str) -> ServiceResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        tables
            .saved
            .retain(|s| !(s.user_id == user_id && s.document_id == document_id));
        Ok(())
    }

    async fn list_saved_documents(
        &self,
        user_id: &str,
        folder_id: Option<&str>,
    ) -> ServiceResult<Vec<SavedDocument>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut saved: Vec<SavedDocument> = tables
            .saved
            .iter()
            .filter(|s| s.user_id == user_id)
            .filter(|s| folder_id.is_none() || s.folder_id.as_deref() == folder_id)
            .cloned()
            .collect();
        saved.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(saved)
    }

    async fn list_folders(&self, user_id: &str) -> ServiceResult<Vec<Folder>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut folders: Vec<Folder> = tables
            .folders
            .iter()
            .filter(|f| f.owner_id == user_id)
            .cloned()
            .collect();
        folders.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(folders)
    }

    async fn create_folder(&self, user_id: &str, name: &str) -> ServiceResult<Folder> {
        self.check_available()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::InvalidInput("folder name must not be empty".to_string()));
        }

        let mut tables = self.tables.write().await;
        let duplicate = tables
            .folders
            .iter()
            .any(|f| f.owner_id == user_id && f.name.eq_ignore_ascii_case(name));
        if duplicate {
            return Err(ServiceError::Conflict(format!("folder '{}' already exists", name)));
        }

        let folder = Folder::new(user_id, name);
        tables.folders.push(folder.clone());
        Ok(folder)
    }

    async fn share_document(&self, input: NewShare) -> ServiceResult<DocumentShare> {
        self.check_available()?;
        if input.shared_with.trim().is_empty() {
            return Err(ServiceError::InvalidInput("recipient must not be empty".to_string()));
        }
        if input.shared_with == input.shared_by {
            return Err(ServiceError::InvalidInput(
                "cannot share a document with yourself".to_string(),
            ));
        }

        let mut tables = self.tables.write().await;
        require_document(&tables, &input.document_id)?;

        let share = DocumentShare::from_new(input);
        tables.shares.push(share.clone());
        Ok(share)
    }

    async fn list_shared_with(&self, user_id: &str) -> ServiceResult<Vec<Document>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut ids: Vec<&String> = Vec::new();
        for share in tables.shares.iter().filter(|s| s.shared_with == user_id) {
            if !ids.contains(&&share.document_id) {
                ids.push(&share.document_id);
            }
        }
        Ok(collect_documents(&tables, ids.into_iter()))
    }
}
