//! Session store: the ordered history of committed shopping sessions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{format_modified_timestamp, Id, ProductLine, ShoppingSession};

/// Most-recent-first list of sessions. Sessions are appended or updated,
/// never deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionStore {
    sessions: Vec<ShoppingSession>,
}

impl SessionStore {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a brand-new session at the front.
    pub fn append(&mut self, session: ShoppingSession) {
        self.sessions.insert(0, session);
    }

    /// Replace the items and total of the session with `id`, keeping its id
    /// and position, and stamp it as modified at `at`.
    ///
    /// Returns false (and changes nothing) if no such session exists.
    pub fn update_in_place(
        &mut self,
        id: &Id,
        items: Vec<ProductLine>,
        total: f64,
        at: NaiveDateTime,
    ) -> bool {
        match self.sessions.iter_mut().find(|s| &s.id == id) {
            Some(session) => {
                session.items = items;
                session.total = total;
                session.date = format_modified_timestamp(at);
                true
            }
            None => false,
        }
    }

    /// Look up a session; `None` if the id is unknown.
    pub fn find_by_id(&self, id: &Id) -> Option<&ShoppingSession> {
        self.sessions.iter().find(|s| &s.id == id)
    }

    /// Sessions, most recent first
    pub fn sessions(&self) -> &[ShoppingSession] {
        &self.sessions
    }

    /// Iterate sessions, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &ShoppingSession> {
        self.sessions.iter()
    }

    /// Number of saved sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
