//! Document data model
//!
//! Documents and the per-user records around them (bookmarks, saved
//! documents, folders, shares). The document service owns all of these;
//! the viewer only reads `Document`.

mod types;

pub use types::{
    Bookmark, Document, DocumentShare, DocumentUpdate, Folder, NewDocument, NewShare,
    SavedDocument, SharePermission,
};
