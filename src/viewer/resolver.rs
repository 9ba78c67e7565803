//! Viewer URL resolution
//!
//! Picks how a document is displayed from its loosely formatted `filetype`
//! and builds the URL the embedding surface should load.

use serde::Serialize;

/// PDF.js hosted viewer, used for PDFs that third-party viewers cannot reach
pub const DEFAULT_PDF_BRIDGE_URL: &str = "https://mozilla.github.io/pdf.js/web/viewer.html?file=";

/// Office Online embed viewer
pub const DEFAULT_OFFICE_VIEWER_URL: &str = "https://view.officeapps.live.com/op/embed.aspx?src=";

/// Substrings that mark a Word, Excel or PowerPoint document
const OFFICE_MARKERS: &[&str] = &["word", "doc", "xls", "excel", "ppt", "powerpoint"];

const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1"];

/// How a document is displayed, with the URL the surface loads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "displayUrl", rename_all = "camelCase")]
pub enum RenderStrategy {
    /// Rendered natively by an image element
    DirectImage(String),
    /// Local PDF routed through the PDF.js bridge
    BridgedPdf(String),
    /// PDF loaded straight into the frame
    DirectPdf(String),
    /// Office document rendered by Office Online
    OfficeEmbed(String),
    /// Unknown type, best-effort Office Online embed
    GenericEmbed(String),
}

impl RenderStrategy {
    /// URL the embedding surface loads
    pub fn display_url(&self) -> &str {
        match self {
            RenderStrategy::DirectImage(url)
            | RenderStrategy::BridgedPdf(url)
            | RenderStrategy::DirectPdf(url)
            | RenderStrategy::OfficeEmbed(url)
            | RenderStrategy::GenericEmbed(url) => url,
        }
    }

    /// Whether the strategy renders as an image element rather than a frame
    pub fn is_image(&self) -> bool {
        matches!(self, RenderStrategy::DirectImage(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            RenderStrategy::DirectImage(_) => "directImage",
            RenderStrategy::BridgedPdf(_) => "bridgedPdf",
            RenderStrategy::DirectPdf(_) => "directPdf",
            RenderStrategy::OfficeEmbed(_) => "officeEmbed",
            RenderStrategy::GenericEmbed(_) => "genericEmbed",
        }
    }
}

/// Third-party viewer endpoints, addressed by URL prefix
///
/// The file URL is percent-encoded and appended to the prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerEndpoints {
    pub pdf_bridge: String,
    pub office_viewer: String,
}

impl Default for ViewerEndpoints {
    fn default() -> Self {
        Self {
            pdf_bridge: DEFAULT_PDF_BRIDGE_URL.to_string(),
            office_viewer: DEFAULT_OFFICE_VIEWER_URL.to_string(),
        }
    }
}

impl ViewerEndpoints {
    /// Resolve a render strategy against these endpoints
    ///
    /// Never fails: anything unrecognised falls through to `GenericEmbed`.
    pub fn resolve(&self, filetype: &str, fileurl: &str) -> RenderStrategy {
        let kind = filetype.to_lowercase();

        if kind.contains("pdf") {
            if is_loopback_url(fileurl) {
                RenderStrategy::BridgedPdf(self.bridge(fileurl))
            } else {
                RenderStrategy::DirectPdf(fileurl.to_string())
            }
        } else if contains_any(&kind, OFFICE_MARKERS) {
            RenderStrategy::OfficeEmbed(self.office(fileurl))
        } else if kind.contains("image") {
            RenderStrategy::DirectImage(fileurl.to_string())
        } else {
            RenderStrategy::GenericEmbed(self.office(fileurl))
        }
    }

    fn bridge(&self, fileurl: &str) -> String {
        format!("{}{}", self.pdf_bridge, urlencoding::encode(fileurl))
    }

    fn office(&self, fileurl: &str) -> String {
        format!("{}{}", self.office_viewer, urlencoding::encode(fileurl))
    }
}

/// Resolve a render strategy using the default viewer endpoints
pub fn resolve(filetype: &str, fileurl: &str) -> RenderStrategy {
    ViewerEndpoints::default().resolve(filetype, fileurl)
}

/// Whether the URL's host is a loopback address
///
/// Local and development URLs are unreachable from cloud-hosted viewers.
pub fn is_loopback_url(url: &str) -> bool {
    url_host(url)
        .map(|host| {
            LOOPBACK_HOSTS
                .iter()
                .any(|loopback| host.eq_ignore_ascii_case(loopback))
        })
        .unwrap_or(false)
}

/// Whether the URL is an absolute `http` or `https` URL with a host
///
/// Anything else (`javascript:`, `data:`, relative paths) must never reach
/// an embed or a link.
pub fn is_http_url(url: &str) -> bool {
    let Some((scheme, _)) = url.trim().split_once("://") else {
        return false;
    };
    (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
        && url_host(url).is_some()
}

/// Extract the host from an absolute URL, without userinfo or port
fn url_host(url: &str) -> Option<&str> {
    let (_, rest) = url.trim().split_once("://")?;
    let authority = rest
        .split(&['/', '?', '#'][..])
        .next()
        .unwrap_or(rest);
    let host_port = authority.rsplit('@').next().unwrap_or(authority);

    let host = if host_port.starts_with('[') {
        // IPv6 literal
        host_port.split(']').next().map(|h| &h[1..])?
    } else {
        host_port.split(':').next().unwrap_or(host_port)
    };

    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Human-readable kind label shown in the viewer header
pub fn file_kind(filetype: &str) -> &'static str {
    let kind = filetype.to_lowercase();

    if kind.contains("pdf") {
        "PDF"
    } else if contains_any(&kind, &["word", "doc"]) {
        "Word"
    } else if contains_any(&kind, &["excel", "sheet", "xls"]) {
        "Excel"
    } else if contains_any(&kind, &["powerpoint", "presentation", "ppt"]) {
        "PowerPoint"
    } else if contains_any(&kind, &["image", "jpg", "png"]) {
        "Image"
    } else if contains_any(&kind, &["text", "txt"]) {
        "Text"
    } else {
        "Document"
    }
}

fn contains_any(haystack: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| haystack.contains(marker))
}

/// Last path segment of the file URL
pub fn file_name(fileurl: &str) -> &str {
    if fileurl.is_empty() {
        return "";
    }
    fileurl.rsplit('/').next().unwrap_or(fileurl)
}
