//! Documents module - composes and renders the three loan documents.
//!
//! - `Contract` - loan contract with terms, conditions and signatures
//! - `GuaranteeLetter` - guarantee confirmation, needs only the client name
//! - `CardLetter` - credit account and card issuance letter

pub mod application;
pub mod common;
pub mod composer;
pub mod finance;
pub mod geometry;
pub mod model;
pub mod renderer;
pub mod request;
pub mod service;
pub mod traits;
pub mod validation;

pub use application::{ApplicationError, DocumentKind, LoanApplication, LoanTerms};
pub use composer::Composer;
pub use renderer::{RenderError, Renderer};
pub use request::DocumentRequest;
pub use service::DocumentService;
pub use traits::{Generator, Validator};

use thiserror::Error;

/// Errors that can occur while producing a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Application(#[from] ApplicationError),
    #[error("failed to render PDF: {0}")]
    Render(#[from] RenderError),
}

/// Result of a successful document generation.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
    pub kind: DocumentKind,
    pub page_count: usize,
    /// Long Italian form of the date printed on the document.
    pub date: String,
}
