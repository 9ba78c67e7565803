//! HTML rendering of a viewer session
//!
//! Every surface is rendered together with its fallback panel. The
//! surface's native `onerror` flips its own container to the failed state
//! in the browser; a surface already failed server-side renders only the
//! fallback. No check is made that a third-party viewer showed anything
//! meaningful.
//!
//! The fullscreen overlay is part of the same page. While closed it is
//! `hidden` and its embed carries only `data-src`; the page script opens
//! and closes it in place, so toggling never reloads the page, re-resolves
//! the strategy or touches the inline surface.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::resolver::is_http_url;
use super::session::{RecoveryAction, Surface, SurfaceState, ViewerSession};
use crate::document::Folder;

/// Frame permissions; nothing broader is ever granted
pub const FRAME_SANDBOX: &str =
    "allow-scripts allow-same-origin allow-forms allow-popups allow-downloads allow-presentation";

/// Feature policy for embedded viewers
pub const FRAME_ALLOW: &str = "autoplay; fullscreen; encrypted-media; picture-in-picture";

const ON_ERROR: &str = "this.closest('[data-surface]').dataset.state='failed'";

/// Per-request context around the session
#[derive(Debug, Clone, Default)]
pub struct ViewerContext {
    pub user_id: Option<String>,
    pub saved: bool,
    pub bookmarked: bool,
    pub folders: Vec<Folder>,
}

/// Render the full viewer: header, toolbar, inline surface and overlay
pub fn render_viewer(session: &ViewerSession, context: &ViewerContext) -> String {
    let document = session.document();
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<section class="viewer" data-document-id="{id}" data-strategy="{strategy}">"#,
        id = attr(&document.id),
        strategy = session.strategy().name(),
    );

    render_header(&mut html, session, context);

    html.push_str(r#"<div class="viewer-body">"#);
    render_surface(&mut html, session, Surface::Inline);
    html.push_str("</div>");

    let _ = write!(
        html,
        r#"<div class="fullscreen-overlay" data-overlay role="dialog" aria-modal="true"{hidden}><div class="overlay-bar"><h3>{title}</h3><button class="button ghost" type="button" data-toggle="fullscreen">Close</button></div>"#,
        hidden = if session.is_fullscreen() { "" } else { " hidden" },
        title = text(&document.title),
    );
    render_surface(&mut html, session, Surface::Fullscreen);
    html.push_str("</div>");

    html.push_str("</section>");
    html
}

fn render_header(html: &mut String, session: &ViewerSession, context: &ViewerContext) {
    let document = session.document();
    let [download, open] = session.recovery_actions();

    let _ = write!(
        html,
        r#"<header class="viewer-header"><div class="viewer-title"><h2>{title}</h2><p>{kind} &bull; {file}</p></div><nav class="toolbar">"#,
        title = text(&document.title),
        kind = session.file_kind(),
        file = text(session.file_name()),
    );

    html.push_str(
        r#"<button class="button" type="button" data-toggle="fullscreen">Fullscreen</button>"#,
    );
    for action in [&open, &download] {
        render_action(html, action);
    }

    if context.user_id.is_some() {
        render_account_actions(html, &document.id, context);
    }

    let _ = write!(
        html,
        r#"<button class="button" data-action="share" data-endpoint="/api/v1/documents/{id}/shares">Share</button>"#,
        id = attr(&document.id),
    );

    html.push_str("</nav></header>");
}

fn render_account_actions(html: &mut String, document_id: &str, context: &ViewerContext) {
    let id = attr(document_id);

    let _ = write!(
        html,
        r#"<span class="save-control"><select name="folderId" aria-label="Folder"><option value="none">No folder</option>"#
    );
    for folder in &context.folders {
        let _ = write!(
            html,
            r#"<option value="{id}">{name}</option>"#,
            id = attr(&folder.id),
            name = text(&folder.name),
        );
    }
    let _ = write!(
        html,
        r#"</select><button class="button" data-action="save" data-active="{saved}" data-endpoint="/api/v1/documents/{id}/saved">{label}</button></span>"#,
        saved = context.saved,
        label = if context.saved { "Saved" } else { "Save" },
    );

    let _ = write!(
        html,
        r#"<button class="button" data-action="bookmark" data-active="{active}" data-endpoint="/api/v1/documents/{id}/bookmark">{label}</button>"#,
        active = context.bookmarked,
        label = if context.bookmarked {
            "Bookmarked"
        } else {
            "Bookmark"
        },
    );
}

/// Render one surface with its fallback panel
///
/// A closed fullscreen surface is rendered in the state a fresh embed
/// would start in, with its embed deferred until the overlay opens.
pub fn render_surface(html: &mut String, session: &ViewerSession, surface: Surface) {
    let closed = session.initial_state();
    let state = session.surface_state(surface).unwrap_or(&closed);
    let deferred = session.surface_state(surface).is_none();
    let state_name = match state {
        SurfaceState::Loading => "loading",
        SurfaceState::Failed(_) => "failed",
    };

    let _ = write!(
        html,
        r#"<div class="surface" data-surface="{surface}" data-state="{state_name}">"#,
        surface = surface.as_str(),
    );

    if !state.is_failed() {
        html.push_str(r#"<div class="surface-content">"#);
        render_embed(html, session, surface, deferred);
        html.push_str("</div>");
    }

    let message = state
        .failure_message()
        .unwrap_or_else(|| session.failure_message());
    let _ = write!(
        html,
        r#"<div class="fallback" role="alert"><div class="fallback-title">Unable to load document</div><p>{message}</p><div class="fallback-actions">"#,
    );
    for action in session.recovery_actions() {
        render_action(html, &action);
    }
    html.push_str("</div></div></div>");
}

/// Link performing a recovery action; URLs that are not http(s) get none
fn render_action(html: &mut String, action: &RecoveryAction) {
    if !is_http_url(action.url()) {
        return;
    }
    let _ = write!(
        html,
        r#"<a class="button" href="{url}" target="_blank" rel="{rel}">{label}</a>"#,
        url = attr(action.url()),
        rel = action.rel(),
        label = action.label(),
    );
}

fn render_embed(html: &mut String, session: &ViewerSession, surface: Surface, deferred: bool) {
    let url = attr(session.display_url());
    // The page script copies data-src into src when the overlay opens
    let src = if deferred {
        format!(r#"data-src="{url}""#)
    } else {
        format!(r#"src="{url}" data-src="{url}""#)
    };

    if session.strategy().is_image() {
        let _ = write!(
            html,
            r#"<img {src} alt="{alt}" loading="lazy" onerror="{ON_ERROR}">"#,
            alt = attr(&session.document().title),
        );
    } else {
        let loading = match surface {
            Surface::Inline => "eager",
            Surface::Fullscreen => "lazy",
        };
        let _ = write!(
            html,
            r#"<iframe {src} title="{title}" sandbox="{FRAME_SANDBOX}" allow="{FRAME_ALLOW}" loading="{loading}" onerror="{ON_ERROR}"></iframe>"#,
            title = attr(&session.document().title),
        );
    }
}
