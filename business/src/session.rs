//! Process-wide authenticated session.
//!
//! The store is written by login/logout only and read by every API call, which
//! resolves the bearer token right before sending.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use livebet_states::{Clock, SystemClock};
use log::info;
use serde::{Deserialize, Serialize};

/// The admin user returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "userName", default)]
    pub user_name: String,
    /// Any other profile fields the backend sends.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SessionUser {
    pub fn new(id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_name: user_name.into(),
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: SessionUser,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Shared, cloneable handle to the current session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
    /// Bumped on every login/logout so caches keyed on the old session can be dropped.
    epoch: Arc<AtomicU64>,
    clock: Arc<dyn Clock>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl SessionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            epoch: Arc::new(AtomicU64::new(0)),
            clock,
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn set(&self, session: Session) {
        info!("Session started for {}", session.user.user_name);
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        let previous = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(session) = previous {
            info!("Session ended for {}", session.user.user_name);
            self.epoch.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// The live session. An expired session is destroyed and `None` returned.
    pub fn current(&self) -> Option<Session> {
        let now = self.clock.now();
        let session = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()?;
        if !session.is_expired(now) {
            return Some(session);
        }
        self.clear_expired(now)
    }

    /// Clears the stored session only if it is still expired under the write lock,
    /// returning whatever live session replaced it in the meantime.
    fn clear_expired(&self, now: DateTime<Utc>) -> Option<Session> {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(stored) if stored.is_expired(now) => {
                if let Some(expired) = slot.take() {
                    info!("Session for {} expired", expired.user.user_name);
                    self.epoch.fetch_add(1, Ordering::SeqCst);
                }
                None
            }
            stored => stored.cloned(),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.access_token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }
}
