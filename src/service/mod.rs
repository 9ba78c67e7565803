//! Document service
//!
//! The viewer and routes talk to documents only through the
//! `DocumentService` trait. `InMemoryDocumentService` is the bundled
//! implementation; `sample` seeds it with a demo library.

mod memory;
pub mod sample;
mod traits;

pub use memory::InMemoryDocumentService;
pub use traits::{DocumentService, ServiceResult};
