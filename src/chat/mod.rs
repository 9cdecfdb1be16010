//! Chat module - HTTP adapter around the document core.
//!
//! A transport (a messenger bot, a web form) posts each user message to
//! `/api/chat/{chat_id}/messages` and relays the reply and any document.
//! Sessions live in memory only and expire after a period of inactivity.

pub mod handlers;
pub mod models;
pub mod sessions;

use std::sync::Arc;

use crate::config::{DocumentConfig, SessionLimits};
use crate::documents::DocumentService;

pub use sessions::SessionStore;

/// Shared application state.
pub struct AppState {
    pub documents: Arc<DocumentService>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: DocumentConfig) -> Self {
        Self::with_limits(config, SessionLimits::default())
    }

    pub fn with_limits(config: DocumentConfig, limits: SessionLimits) -> Self {
        Self {
            documents: Arc::new(DocumentService::new(config)),
            sessions: SessionStore::with_limits(limits),
        }
    }

    pub fn with_service(documents: Arc<DocumentService>) -> Self {
        Self {
            documents,
            sessions: SessionStore::new(),
        }
    }
}
