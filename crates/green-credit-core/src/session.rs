//! Explicit session state for the client and admin front ends.
//!
//! A [`SessionContext`] is owned by whoever drives the UI and passed to the
//! code that needs it; there is no process-wide session.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{GreenCreditError, GreenCreditResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Principal {
    Client { id: i64, name: String },
    Admin { id: i64, name: String },
}

impl Principal {
    pub fn id(&self) -> i64 {
        match self {
            Self::Client { id, .. } | Self::Admin { id, .. } => *id,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub principal: Principal,
    pub started_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionContext {
    current: Option<Session>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a session persisted by the front end.
    pub fn restore(session: Option<Session>) -> Self {
        Self { current: session }
    }

    /// Start a session, replacing any existing one.
    pub fn login(&mut self, principal: Principal, at: NaiveDateTime) -> &Session {
        if let Some(previous) = &self.current {
            log::debug!("replacing session for principal {}", previous.principal.id());
        }
        self.current.insert(Session {
            principal,
            started_at: at,
        })
    }

    /// End the current session, returning it.
    pub fn logout(&mut self) -> Option<Session> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The current session, if it belongs to an administrator.
    pub fn require_admin(&self) -> GreenCreditResult<&Session> {
        match &self.current {
            Some(s) if s.principal.is_admin() => Ok(s),
            Some(s) => Err(GreenCreditError::AccessDenied(format!(
                "principal {} is not an administrator",
                s.principal.id()
            ))),
            None => Err(GreenCreditError::AccessDenied("no active session".into())),
        }
    }

    /// The id of the logged-in client, if the session belongs to one.
    pub fn client_id(&self) -> Option<i64> {
        match self.current.as_ref().map(|s| &s.principal) {
            Some(Principal::Client { id, .. }) => Some(*id),
            _ => None,
        }
    }
}
