//! Document data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared document
///
/// `filetype` is a loose MIME-like string; it is never normalised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub filetype: String,
    pub fileurl: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    pub owner_id: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Build a document from creation input with a fresh id
    pub fn from_new(input: NewDocument) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            filetype: input.filetype,
            fileurl: input.fileurl,
            filesize: input.filesize,
            owner_id: input.owner_id,
            is_public: input.is_public,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update, bumping `updated_at`
    pub fn apply(&mut self, update: DocumentUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(filetype) = update.filetype {
            self.filetype = filetype;
        }
        if let Some(fileurl) = update.fileurl {
            self.fileurl = fileurl;
        }
        if let Some(is_public) = update.is_public {
            self.is_public = is_public;
        }
        self.updated_at = Utc::now();
    }

    /// Case-insensitive match against title and description
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(needle))
                .unwrap_or(false)
    }
}

/// Input for creating a document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub filetype: String,
    pub fileurl: String,
    #[serde(default)]
    pub filesize: Option<u64>,
    /// Filled from the caller identity, never from the body
    #[serde(skip)]
    pub owner_id: String,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

/// Partial document update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub filetype: Option<String>,
    pub fileurl: Option<String>,
    pub is_public: Option<bool>,
}

impl DocumentUpdate {
    /// Whether the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.filetype.is_none()
            && self.fileurl.is_none()
            && self.is_public.is_none()
    }
}

/// A user-defined folder for saved documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Folder {
    pub fn new(owner_id: &str, name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// A bookmark on a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub user_id: String,
    pub document_id: String,
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    pub fn new(user_id: &str, document_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            document_id: document_id.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// A document saved to a user's account, optionally inside a folder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDocument {
    pub id: String,
    pub user_id: String,
    pub document_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SavedDocument {
    pub fn new(user_id: &str, document_id: &str, folder_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            document_id: document_id.to_string(),
            folder_id,
            created_at: Utc::now(),
        }
    }
}

/// Access granted by a share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePermission {
    #[default]
    View,
    Edit,
}

/// A document shared from one user to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentShare {
    pub id: String,
    pub document_id: String,
    pub shared_by: String,
    pub shared_with: String,
    pub permission: SharePermission,
    pub created_at: DateTime<Utc>,
}

/// Input for sharing a document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShare {
    #[serde(skip)]
    pub document_id: String,
    #[serde(skip)]
    pub shared_by: String,
    pub shared_with: String,
    #[serde(default)]
    pub permission: SharePermission,
}

impl DocumentShare {
    pub fn from_new(input: NewShare) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            document_id: input.document_id,
            shared_by: input.shared_by,
            shared_with: input.shared_with,
            permission: input.permission,
            created_at: Utc::now(),
        }
    }
}
