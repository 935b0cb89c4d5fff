//! In-memory session store that evicts expired sessions.
//!
//! Records live in a `moka` cache whose per-entry lifetime follows the
//! record's expiry date, so sessions abandoned without a logout are dropped
//! instead of accumulating for the life of the process.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};

/// Session store backed by a `moka` cache.
#[derive(Debug, Clone)]
pub struct MokaStore {
    cache: Cache<Id, Record>,
}

impl MokaStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().expire_after(RecordExpiry).build(),
        }
    }
}

impl Default for MokaStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps each record until its expiry date.
struct RecordExpiry;

impl RecordExpiry {
    fn remaining(record: &Record) -> Duration {
        Duration::try_from(record.expiry_date - OffsetDateTime::now_utc())
            .unwrap_or(Duration::ZERO)
    }
}

impl Expiry<Id, Record> for RecordExpiry {
    fn expire_after_create(
        &self,
        _id: &Id,
        record: &Record,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(Self::remaining(record))
    }

    // Saving a session moves its expiry date on inactivity expiry.
    fn expire_after_update(
        &self,
        _id: &Id,
        record: &Record,
        _updated_at: Instant,
        _remaining: Option<Duration>,
    ) -> Option<Duration> {
        Some(Self::remaining(record))
    }
}

#[async_trait]
impl SessionStore for MokaStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.cache.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .cache
            .get(id)
            .await
            .filter(|record| record.expiry_date > OffsetDateTime::now_utc()))
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        self.cache.invalidate(id).await;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_sessions::cookie::time::Duration as TimeDuration;

    use super::*;

    fn record(expires_in: TimeDuration) -> Record {
        Record {
            id: Id::default(),
            data: Default::default(),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_live_record_round_trips() {
        let store = MokaStore::new();
        let mut live = record(TimeDuration::hours(1));
        store.create(&mut live).await.unwrap();

        assert_eq!(store.load(&live.id).await.unwrap().unwrap().id, live.id);

        store.delete(&live.id).await.unwrap();
        assert!(store.load(&live.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_record_is_not_loaded() {
        let store = MokaStore::new();
        let mut stale = record(TimeDuration::seconds(-5));
        store.create(&mut stale).await.unwrap();

        assert!(store.load(&stale.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_avoids_id_collisions() {
        let store = MokaStore::new();
        let mut first = record(TimeDuration::hours(1));
        store.create(&mut first).await.unwrap();

        let mut second = record(TimeDuration::hours(1));
        second.id = first.id;
        store.create(&mut second).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(store.load(&first.id).await.unwrap().is_some());
    }
}
