//! Document service contract

use async_trait::async_trait;

use crate::document::{
    Bookmark, Document, DocumentShare, DocumentUpdate, Folder, NewDocument, NewShare,
    SavedDocument,
};
use crate::error::ServiceError;

/// Result type for document service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Backing repository for documents and per-user records
///
/// Listing operations return documents newest first.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Look up a document by id
    async fn fetch_document(&self, id: &str) -> ServiceResult<Option<Document>>;

    /// Public documents whose title or description contains `query`
    async fn search_documents(&self, query: &str) -> ServiceResult<Vec<Document>>;

    /// All public documents
    async fn list_public_documents(&self) -> ServiceResult<Vec<Document>>;

    /// Documents uploaded by a user, public or not
    async fn list_user_documents(&self, user_id: &str) -> ServiceResult<Vec<Document>>;

    async fn create_document(&self, input: NewDocument) -> ServiceResult<Document>;

    async fn update_document(&self, id: &str, update: DocumentUpdate) -> ServiceResult<Document>;

    async fn delete_document(&self, id: &str) -> ServiceResult<()>;

    /// Record that a user opened a document
    async fn record_view(&self, user_id: &str, document_id: &str) -> ServiceResult<()>;

    /// Number of recorded views for a document
    async fn view_count(&self, document_id: &str) -> ServiceResult<u64>;

    async fn bookmark_document(&self, user_id: &str, document_id: &str)
        -> ServiceResult<Bookmark>;

    async fn remove_bookmark(&self, user_id: &str, document_id: &str) -> ServiceResult<()>;

    async fn is_bookmarked(&self, user_id: &str, document_id: &str) -> ServiceResult<bool>;

    async fn list_bookmarks(&self, user_id: &str) -> ServiceResult<Vec<Document>>;

    async fn is_document_saved(&self, user_id: &str, document_id: &str) -> ServiceResult<bool>;

    /// Save a document to the user's account
    ///
    /// `folder_id` must name one of the user's folders when present.
    /// Saving an already saved document moves it to the given folder.
    async fn save_document(
        &self,
        user_id: &str,
        document_id: &str,
        folder_id: Option<&str>,
    ) -> ServiceResult<SavedDocument>;

    async fn remove_saved_document(&self, user_id: &str, document_id: &str) -> ServiceResult<()>;

    /// Saved entries for a user, optionally restricted to one folder
    async fn list_saved_documents(
        &self,
        user_id: &str,
        folder_id: Option<&str>,
    ) -> ServiceResult<Vec<SavedDocument>>;

    async fn list_folders(&self, user_id: &str) -> ServiceResult<Vec<Folder>>;

    async fn create_folder(&self, user_id: &str, name: &str) -> ServiceResult<Folder>;

    async fn share_document(&self, input: NewShare) -> ServiceResult<DocumentShare>;

    /// Documents other users have shared with `user_id`
    async fn list_shared_with(&self, user_id: &str) -> ServiceResult<Vec<Document>>;
}
