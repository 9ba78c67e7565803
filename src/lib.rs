//! DocShare Server Library
//!
//! A document-sharing web server. Documents are displayed through the
//! renderer that suits their type: native images, a PDF.js bridge for
//! local PDFs, direct PDFs, or Office Online for everything else.
//!
//! # Modules
//!
//! - `viewer`: render strategy resolution and viewer session state
//! - `service`: document service contract and in-memory implementation
//! - `routes`: HTML pages and the JSON API

pub mod config;
pub mod document;
pub mod error;
pub mod html;
pub mod identity;
pub mod routes;
pub mod service;
pub mod state;
pub mod viewer;
