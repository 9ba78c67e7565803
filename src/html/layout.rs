//! Page shell and status pages

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

const STYLE: &str = r#"
body{margin:0;font-family:system-ui,sans-serif;background:#0b0f17;color:#e5e7eb}
a{color:inherit}
.site-nav{display:flex;gap:1rem;align-items:center;padding:1rem 2rem;background:#111827}
.site-nav .brand{font-weight:700;text-decoration:none}
main{padding:1.5rem 2rem}
.button{display:inline-block;padding:.4rem .8rem;border:1px solid #374151;border-radius:.5rem;background:transparent;color:inherit;text-decoration:none;cursor:pointer}
.viewer{display:flex;flex-direction:column;height:80vh;border:1px solid #1f2937;border-radius:.75rem;overflow:hidden}
.viewer-header{display:flex;flex-wrap:wrap;justify-content:space-between;gap:1rem;padding:1rem;background:#111827}
.viewer-title h2{margin:0;font-size:1.1rem}
.viewer-title p{margin:.25rem 0 0;color:#9ca3af;font-size:.85rem}
.toolbar{display:flex;flex-wrap:wrap;gap:.5rem}
.viewer-body{flex:1;background:#111827}
.surface{width:100%;height:100%;position:relative}
.surface-content{width:100%;height:100%;display:flex;align-items:center;justify-content:center}
.surface-content iframe{width:100%;height:100%;border:0}
.surface-content img{max-width:100%;max-height:100%;object-fit:contain}
.surface[data-state=loading] .fallback{display:none}
.surface[data-state=failed] .surface-content{display:none}
.fallback{display:flex;flex-direction:column;align-items:center;justify-content:center;height:100%;gap:.75rem}
.fallback-title{color:#f87171;font-size:1.1rem}
.fullscreen-overlay{position:fixed;inset:0;z-index:50;display:flex;flex-direction:column;background:rgba(0,0,0,.9)}
.overlay-bar{display:flex;justify-content:space-between;align-items:center;padding:.5rem 1rem;background:#111827}
.overlay-bar h3{margin:0}
.fullscreen-overlay[hidden]{display:none}
.fullscreen-overlay .surface{flex:1}
.document-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(16rem,1fr));gap:1rem}
.document-card{padding:1rem;border:1px solid #1f2937;border-radius:.75rem;text-decoration:none}
.document-card h3{margin:0 0 .5rem}
.document-card p{margin:0;color:#9ca3af;font-size:.85rem}
.empty-state,.error-state{padding:2rem;text-align:center;color:#9ca3af}
.error-state{color:#f87171}
"#;

const SCRIPT: &str = r#"
function setFullscreen(open) {
  const overlay = document.querySelector('[data-overlay]');
  if (!overlay || overlay.hidden === !open) return;
  const surface = overlay.querySelector('[data-surface]');
  const embed = overlay.querySelector('[data-src]');
  if (open) {
    if (embed) { surface.dataset.state = 'loading'; embed.src = embed.dataset.src; }
    overlay.hidden = false;
  } else {
    overlay.hidden = true;
    if (embed) embed.removeAttribute('src');
  }
}
document.addEventListener('click', (event) => {
  if (!event.target.closest('[data-toggle=fullscreen]')) return;
  const overlay = document.querySelector('[data-overlay]');
  setFullscreen(overlay ? overlay.hidden : false);
});
document.addEventListener('keydown', (event) => {
  if (event.key === 'Escape') setFullscreen(false);
});
document.addEventListener('click', async (event) => {
  const button = event.target.closest('button[data-action]');
  if (!button) return;
  const user = document.body.dataset.user;
  if (!user) { alert('Sign in to continue.'); return; }
  const headers = { 'content-type': 'application/json', 'x-user-id': user };
  const action = button.dataset.action;
  const active = button.dataset.active === 'true';
  let response;
  if (action === 'share') {
    const recipient = prompt('Share with user id:');
    if (!recipient) return;
    response = await fetch(button.dataset.endpoint, { method: 'POST', headers, body: JSON.stringify({ sharedWith: recipient }) });
  } else if (action === 'save' && !active) {
    const folder = button.parentElement.querySelector('select').value;
    response = await fetch(button.dataset.endpoint, { method: 'PUT', headers, body: JSON.stringify({ folderId: folder }) });
  } else {
    response = await fetch(button.dataset.endpoint, { method: active ? 'DELETE' : 'PUT', headers });
  }
  if (!response.ok) { alert('Something went wrong. Please try again.'); return; }
  if (action === 'share') {
    const share = await response.json();
    prompt('Shared. Link:', share.link);
    return;
  }
  const now = !active;
  button.dataset.active = String(now);
  if (action === 'save') button.textContent = now ? 'Saved' : 'Save';
  else button.textContent = now ? 'Bookmarked' : 'Bookmark';
});
"#;

/// Wrap page content in the site shell
pub fn page(title: &str, user_id: Option<&str>, content: &str) -> String {
    let mut html = String::with_capacity(content.len() + STYLE.len() + SCRIPT.len() + 512);

    let _ = write!(
        html,
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title} | DocShare</title><style>{STYLE}</style></head>"#,
        title = text(title),
    );

    match user_id {
        Some(user) => {
            let _ = write!(html, r#"<body data-user="{}">"#, attr(user));
        }
        None => html.push_str("<body>"),
    }

    html.push_str(
        r#"<nav class="site-nav"><a class="brand" href="/documents">DocShare</a><a href="/documents">Documents</a></nav><main>"#,
    );
    html.push_str(content);
    let _ = write!(html, "</main><script>{SCRIPT}</script></body></html>");
    html
}

/// Page shown for a document that does not exist
pub fn not_found_page(user_id: Option<&str>) -> String {
    page(
        "Document not found",
        user_id,
        r#"<div class="empty-state"><h1>Document not found</h1><p>This document does not exist or has been deleted.</p><a class="button" href="/documents">Back to documents</a></div>"#,
    )
}

/// Generic failure page
pub fn error_page(user_id: Option<&str>) -> String {
    page(
        "Something went wrong",
        user_id,
        r#"<div class="error-state"><h1>Something went wrong</h1><p>The document could not be loaded. Please try again later.</p></div>"#,
    )
}
