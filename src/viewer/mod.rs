//! Document viewer
//!
//! Decides how a document is displayed and tracks the load state of its
//! embedding surfaces:
//!
//! - `resolver`: filetype + file URL to a `RenderStrategy`
//! - `session`: per-document `Loading`/`Failed` state, fullscreen overlay,
//!   recovery actions and view recording
//! - `render`: HTML for a session

mod render;
mod resolver;
mod session;

pub use render::{render_surface, render_viewer, ViewerContext, FRAME_ALLOW, FRAME_SANDBOX};
pub use resolver::{
    file_kind, file_name, is_http_url, is_loopback_url, resolve, RenderStrategy, ViewerEndpoints,
    DEFAULT_OFFICE_VIEWER_URL, DEFAULT_PDF_BRIDGE_URL,
};
pub use session::{
    LoadFailure, RecoveryAction, Surface, SurfaceState, ViewerSession, DOCUMENT_LOAD_FAILED,
    IMAGE_LOAD_FAILED,
};
