//! HTML page rendering
//!
//! Pages are built as strings; every interpolated value goes through
//! `html_escape`.

mod catalog;
mod layout;

pub use catalog::{render_catalog, Listing};
pub use layout::{error_page, not_found_page, page};
