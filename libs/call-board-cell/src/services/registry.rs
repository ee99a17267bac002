use std::collections::HashMap;
use uuid::Uuid;

use crate::{CallBoardError, Professional};

/// Maps each live connection to its authenticated professional identity.
///
/// Sessions exist only for the lifetime of the connection; they are never
/// persisted. Logging in twice on the same connection overwrites the
/// previous identity.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<Uuid, Professional>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    pub fn login(
        &mut self,
        connection_id: Uuid,
        name: String,
        role: String,
    ) -> Result<Professional, CallBoardError> {
        if name.trim().is_empty() || role.trim().is_empty() {
            return Err(CallBoardError::InvalidLogin);
        }

        let professional = Professional { name, role };
        self.sessions.insert(connection_id, professional.clone());
        Ok(professional)
    }

    /// Removes the session for a connection, returning the identity that
    /// was logged in, if any. Used by both explicit logout and disconnect.
    pub fn remove(&mut self, connection_id: Uuid) -> Option<Professional> {
        self.sessions.remove(&connection_id)
    }

    /// Gate check used by every mutating board action.
    pub fn require_session(&self, connection_id: Uuid) -> Result<&Professional, CallBoardError> {
        self.sessions
            .get(&connection_id)
            .ok_or(CallBoardError::NotAuthenticated)
    }

    pub fn professionals(&self) -> Vec<Professional> {
        self.sessions.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
