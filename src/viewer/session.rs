//! Viewer session state
//!
//! One `ViewerSession` backs one opened document. It owns the resolved
//! strategy and the load state of each embedding surface. The inline
//! surface and the fullscreen overlay are separate embeds, so they fail
//! independently.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;

use super::resolver::{file_kind, file_name, is_http_url, RenderStrategy, ViewerEndpoints};
use crate::document::Document;
use crate::service::DocumentService;

pub const IMAGE_LOAD_FAILED: &str = "Image could not load, download to view.";
pub const DOCUMENT_LOAD_FAILED: &str = "Document could not load, download to view.";

/// Embedding surfaces of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Inline,
    Fullscreen,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Inline => "inline",
            Surface::Fullscreen => "fullscreen",
        }
    }
}

/// Load failure reported by an embedding surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub message: &'static str,
}

/// Load state of one surface
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SurfaceState {
    #[default]
    Loading,
    Failed(LoadFailure),
}

impl SurfaceState {
    pub fn is_failed(&self) -> bool {
        matches!(self, SurfaceState::Failed(_))
    }

    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            SurfaceState::Failed(failure) => Some(failure.message),
            SurfaceState::Loading => None,
        }
    }
}

/// Ways out of a failed surface, each opening a new browsing context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RecoveryAction {
    /// Fetch the file bytes directly
    Download { url: String },
    /// Open the resolved viewer outside the embed
    OpenExternal { url: String },
}

impl RecoveryAction {
    pub fn url(&self) -> &str {
        match self {
            RecoveryAction::Download { url } | RecoveryAction::OpenExternal { url } => url,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecoveryAction::Download { .. } => "Download",
            RecoveryAction::OpenExternal { .. } => "Open in new tab",
        }
    }

    /// `rel` attribute for the link that performs the action
    pub fn rel(&self) -> &'static str {
        match self {
            RecoveryAction::Download { .. } => "noopener",
            RecoveryAction::OpenExternal { .. } => "noopener noreferrer",
        }
    }
}

/// State of one opened document
#[derive(Debug, Clone)]
pub struct ViewerSession {
    document: Document,
    strategy: RenderStrategy,
    inline: SurfaceState,
    fullscreen: Option<SurfaceState>,
    view_recorded: bool,
}

impl ViewerSession {
    /// Open a document, resolving its strategy once
    pub fn new(document: Document, endpoints: &ViewerEndpoints) -> Self {
        let strategy = endpoints.resolve(&document.filetype, &document.fileurl);
        tracing::debug!(
            "Resolved document {} ({}) to {}",
            document.id,
            document.filetype,
            strategy.name()
        );

        let mut session = Self {
            document,
            strategy,
            inline: SurfaceState::Loading,
            fullscreen: None,
            view_recorded: false,
        };
        session.inline = session.initial_state();
        if session.inline.is_failed() {
            tracing::warn!(
                "Document {} has an unusable file URL, not embedding it",
                session.document.id
            );
        }
        session
    }

    /// State a freshly created surface starts in
    ///
    /// A file URL that is not http(s) fails before anything is embedded.
    pub fn initial_state(&self) -> SurfaceState {
        if is_http_url(&self.document.fileurl) {
            SurfaceState::Loading
        } else {
            SurfaceState::Failed(LoadFailure {
                message: self.failure_message(),
            })
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn strategy(&self) -> &RenderStrategy {
        &self.strategy
    }

    pub fn display_url(&self) -> &str {
        self.strategy.display_url()
    }

    pub fn file_name(&self) -> &str {
        file_name(&self.document.fileurl)
    }

    pub fn file_kind(&self) -> &'static str {
        file_kind(&self.document.filetype)
    }

    /// State of a surface; `None` when the fullscreen overlay is closed
    pub fn surface_state(&self, surface: Surface) -> Option<&SurfaceState> {
        match surface {
            Surface::Inline => Some(&self.inline),
            Surface::Fullscreen => self.fullscreen.as_ref(),
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_some()
    }

    /// Message shown when this session's surfaces fail to load
    pub fn failure_message(&self) -> &'static str {
        if self.strategy.is_image() {
            IMAGE_LOAD_FAILED
        } else {
            DOCUMENT_LOAD_FAILED
        }
    }

    /// Handle the native load-error signal of a surface
    ///
    /// Reports for a closed fullscreen overlay are dropped.
    pub fn report_load_error(&mut self, surface: Surface) {
        let failed = SurfaceState::Failed(LoadFailure {
            message: self.failure_message(),
        });

        match surface {
            Surface::Inline => self.inline = failed,
            Surface::Fullscreen => match self.fullscreen.as_mut() {
                Some(state) => *state = failed,
                None => {
                    tracing::debug!(
                        "Ignoring load error for closed fullscreen view of {}",
                        self.document.id
                    );
                    return;
                }
            },
        }

        tracing::warn!(
            "Document {} failed to load on {} surface via {}",
            self.document.id,
            surface.as_str(),
            self.strategy.name()
        );
    }

    /// Show the overlay with a fresh embed of the same strategy
    pub fn open_fullscreen(&mut self) {
        if self.fullscreen.is_none() {
            self.fullscreen = Some(self.initial_state());
        }
    }

    pub fn close_fullscreen(&mut self) {
        self.fullscreen = None;
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.is_fullscreen() {
            self.close_fullscreen();
        } else {
            self.open_fullscreen();
        }
    }

    /// Recovery actions offered by a failed surface
    ///
    /// Taking an action leaves the failed state in place.
    pub fn recovery_actions(&self) -> [RecoveryAction; 2] {
        [
            RecoveryAction::Download {
                url: self.document.fileurl.clone(),
            },
            RecoveryAction::OpenExternal {
                url: self.display_url().to_string(),
            },
        ]
    }

    /// Record the view once per session, without waiting for the result
    ///
    /// Anonymous viewers record nothing. A failure is logged and never
    /// affects rendering. Returns the spawned task on the first call.
    pub fn record_view(
        &mut self,
        service: Arc<dyn DocumentService>,
        user_id: Option<&str>,
    ) -> Option<JoinHandle<()>> {
        let user_id = user_id?.to_string();
        if self.view_recorded {
            return None;
        }
        self.view_recorded = true;

        let document_id = self.document.id.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = service.record_view(&user_id, &document_id).await {
                tracing::warn!("Failed to record view of {} by {}: {}", document_id, user_id, e);
            }
        }))
    }
}
