use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};

use stockwatch_core::SessionId;
use stockwatch_inventory::{SeedSource, SessionDataset};

use crate::context::SessionContext;

/// Bounds on how many sessions are kept and for how long.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionLimits {
    /// Sessions not seen for this long are dropped.
    pub idle_ttl: Duration,
    /// Hard cap; the least recently seen session is dropped to make room.
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::minutes(30),
            max_sessions: 10_000,
        }
    }
}

#[derive(Debug)]
struct Entry {
    dataset: Arc<SessionDataset>,
    last_seen: DateTime<Utc>,
}

/// In-memory map of live sessions to their cached datasets.
///
/// A session is only stored once a request has actually generated its
/// dataset (see [`SessionStore::commit`]); requests that never read data
/// leave no trace.
#[derive(Debug)]
pub struct SessionStore {
    seed: SeedSource,
    limits: SessionLimits,
    inner: RwLock<HashMap<SessionId, Entry>>,
}

impl SessionStore {
    pub fn new(seed: SeedSource, limits: SessionLimits) -> Self {
        Self {
            seed,
            limits,
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Look up the session for a presented id, or prepare an unstored one.
    ///
    /// Returns `true` in the second position when a fresh id was minted and
    /// the caller must hand it back to the client. An unknown (or expired)
    /// well-formed id is adopted as-is, e.g. after a restart.
    pub fn resolve(&self, presented: Option<SessionId>, now: DateTime<Utc>) -> (SessionContext, bool) {
        let (session_id, issued) = match presented {
            Some(id) => (id, false),
            None => (SessionId::new(), true),
        };

        if let Some(ds) = self.live(session_id, now) {
            return (SessionContext::new(ds), issued);
        }

        let ds = Arc::new(SessionDataset::new(session_id, self.seed));
        (SessionContext::new(ds), issued)
    }

    /// Record the session after its request ran.
    ///
    /// Known sessions are touched. New ones are stored only if their dataset
    /// was generated, after pruning idle entries and enforcing the cap.
    /// Returns whether the session is now stored.
    pub fn commit(&self, ctx: &SessionContext, now: DateTime<Utc>) -> bool {
        let session_id = ctx.session_id();
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(entry) = map.get_mut(&session_id) {
            // An expired entry under the same id is replaced below.
            if Arc::ptr_eq(&entry.dataset, &ctx.dataset_arc()) {
                entry.last_seen = now;
                return true;
            }
        }

        if !ctx.dataset().is_generated() {
            return false;
        }

        self.prune(&mut map, now);
        while map.len() >= self.limits.max_sessions.max(1) {
            let oldest = map
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    map.remove(&id);
                    tracing::debug!(session = %id, "evicted session at capacity");
                }
                None => break,
            }
        }

        tracing::debug!(session = %session_id, "opened session");
        map.insert(
            session_id,
            Entry {
                dataset: ctx.dataset_arc(),
                last_seen: now,
            },
        );
        true
    }

    pub fn get(&self, session_id: SessionId) -> Option<Arc<SessionDataset>> {
        let map = self.inner.read().ok()?;
        map.get(&session_id).map(|e| Arc::clone(&e.dataset))
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live(&self, session_id: SessionId, now: DateTime<Utc>) -> Option<Arc<SessionDataset>> {
        let map = self.inner.read().ok()?;
        map.get(&session_id)
            .filter(|e| now - e.last_seen <= self.limits.idle_ttl)
            .map(|e| Arc::clone(&e.dataset))
    }

    fn prune(&self, map: &mut HashMap<SessionId, Entry>, now: DateTime<Utc>) {
        let before = map.len();
        map.retain(|_, e| now - e.last_seen <= self.limits.idle_ttl);
        let pruned = before - map.len();
        if pruned > 0 {
            tracing::debug!(pruned, "pruned idle sessions");
        }
    }
}
