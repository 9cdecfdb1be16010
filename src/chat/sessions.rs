//! In-memory chat sessions, one collector per chat id.
//!
//! Sessions idle for longer than the configured limit are evicted, and the
//! store never holds more than its capacity.

use std::sync::Arc;

use moka::sync::Cache;
use parking_lot::Mutex;

use crate::config::SessionLimits;
use crate::conversation::InputCollector;

pub type SharedCollector = Arc<Mutex<InputCollector>>;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, SharedCollector>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(SessionLimits::default())
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        let sessions = Cache::builder()
            .time_to_idle(limits.idle)
            .max_capacity(limits.capacity)
            .build();
        Self { sessions }
    }

    /// Existing collector for `chat_id`, or a fresh one from `create`.
    pub fn get_or_create(
        &self,
        chat_id: &str,
        create: impl FnOnce() -> InputCollector,
    ) -> SharedCollector {
        self.sessions.get_with(chat_id.to_string(), || {
            log::debug!("Opening chat session {}", chat_id);
            Arc::new(Mutex::new(create()))
        })
    }

    pub fn contains(&self, chat_id: &str) -> bool {
        self.sessions.contains_key(chat_id)
    }

    /// Drop a session. Returns whether it existed.
    pub fn remove(&self, chat_id: &str) -> bool {
        self.sessions.remove(chat_id).is_some()
    }

    pub fn len(&self) -> u64 {
        self.sessions.run_pending_tasks();
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
