// src/sessions/store.rs
use crate::errors::ServerError;
use crate::sessions::context::SessionContext;
use crate::sessions::token::generate_token_default;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7; // 7 days

/// One user's context. Locked for the duration of a request, so actions of
/// the same session run one at a time while sessions stay independent.
pub type SharedContext = Arc<Mutex<SessionContext>>;

struct Entry {
    context: SharedContext,
    expires_at: i64,
}

pub struct OpenedSession {
    pub token: String,
    /// Not stored yet: `keep` it once the request succeeded and send the cookie.
    pub is_new: bool,
    pub context: SharedContext,
}

impl OpenedSession {
    pub fn lock(&self) -> Result<MutexGuard<'_, SessionContext>, ServerError> {
        self.context.lock().map_err(|_| ServerError::InternalError)
    }
}

#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Entry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live session named by `raw_token`, or a brand new one that
    /// is only stored by `keep`.
    pub fn open(&self, raw_token: Option<&str>, now: i64) -> Result<OpenedSession, ServerError> {
        let mut sessions = self.sessions.lock().map_err(|_| ServerError::InternalError)?;

        sessions.retain(|_, entry| entry.expires_at > now);

        if let Some(token) = raw_token {
            if let Some(entry) = sessions.get(token) {
                return Ok(OpenedSession {
                    token: token.to_string(),
                    is_new: false,
                    context: Arc::clone(&entry.context),
                });
            }
        }

        Ok(OpenedSession {
            token: generate_token_default(),
            is_new: true,
            context: SharedContext::default(),
        })
    }

    /// Stores a new session so its cookie can find it again.
    pub fn keep(&self, session: &OpenedSession, now: i64) -> Result<(), ServerError> {
        if !session.is_new {
            return Ok(());
        }

        let mut sessions = self.sessions.lock().map_err(|_| ServerError::InternalError)?;
        sessions.insert(
            session.token.clone(),
            Entry {
                context: Arc::clone(&session.context),
                expires_at: now + SESSION_TTL_SECS,
            },
        );
        debug!(live_sessions = sessions.len(), "session created");

        Ok(())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }
}

pub fn session_cookie(token: &str) -> String {
    format!("session={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECS}")
}
