//! Document listing pages

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::document::Document;
use crate::viewer::file_kind;

/// Outcome of loading the listing
pub enum Listing<'a> {
    Documents(&'a [Document]),
    Failed,
}

/// Render the browse/search page body
pub fn render_catalog(query: Option<&str>, listing: Listing<'_>) -> String {
    let query = query.map(str::trim).filter(|q| !q.is_empty());
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<div class="catalog-header"><h1>Document library</h1><form method="get" action="/documents"><input type="search" name="q" placeholder="Search documents" value="{value}"><button class="button" type="submit">Search</button></form></div>"#,
        value = attr(query.unwrap_or("")),
    );

    let heading = match query {
        Some(q) => format!("Search results for \"{}\"", text(q)),
        None => "All public documents".to_string(),
    };
    let _ = write!(html, r#"<p class="catalog-scope">{}</p>"#, heading);

    match listing {
        Listing::Failed => {
            html.push_str(
                r#"<div class="error-state">The document list could not be loaded. Please try again later.</div>"#,
            );
        }
        Listing::Documents([]) => {
            let message = match query {
                Some(q) => format!("No results found for \"{}\"", text(q)),
                None => "No documents have been uploaded yet".to_string(),
            };
            let _ = write!(html, r#"<div class="empty-state">{}</div>"#, message);
        }
        Listing::Documents(documents) => {
            html.push_str(r#"<div class="document-grid">"#);
            for document in documents {
                render_card(&mut html, document);
            }
            html.push_str("</div>");
        }
    }

    html
}

fn render_card(html: &mut String, document: &Document) {
    let _ = write!(
        html,
        r#"<a class="document-card" href="/documents/{href}"><h3>{title}</h3><p>{kind} &bull; {date}</p>"#,
        href = attr(&urlencoding::encode(&document.id)),
        title = text(&document.title),
        kind = file_kind(&document.filetype),
        date = document.created_at.format("%Y-%m-%d"),
    );
    if let Some(description) = &document.description {
        let _ = write!(html, "<p>{}</p>", text(description));
    }
    html.push_str("</a>");
}
