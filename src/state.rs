//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::service::DocumentService;
use crate::viewer::ViewerEndpoints;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    endpoints: ViewerEndpoints,
    documents: Arc<dyn DocumentService>,
}

impl AppState {
    /// Create a new application state around a document service
    pub fn new(config: Config, documents: Arc<dyn DocumentService>) -> Self {
        let endpoints = config.viewer_endpoints();
        Self {
            inner: Arc::new(AppStateInner {
                config,
                endpoints,
                documents,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the viewer endpoints used for resolution
    pub fn endpoints(&self) -> &ViewerEndpoints {
        &self.inner.endpoints
    }

    /// Get the document service
    pub fn documents(&self) -> &dyn DocumentService {
        self.inner.documents.as_ref()
    }

    /// Get an owned handle to the document service, for background tasks
    pub fn documents_handle(&self) -> Arc<dyn DocumentService> {
        Arc::clone(&self.inner.documents)
    }
}
