//! The tracker ties a storage medium to aggregation and reporting.

use serde::Serialize;
use time::PrimitiveDateTime;
use tracing::warn;

use sitetrack_store::{KeyValueStorage, VisitorStore};
use sitetrack_types::{DeviceCategory, EnvSignals};

use crate::aggregate;
use crate::identity::{self, IdSource, VisitorId};
use crate::report::{self, StatsSnapshot};

/// What happened during one [`Tracker::record_visit`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitOutcome {
    pub visitor_id: VisitorId,
    /// The identity token was generated during this call.
    pub identity_created: bool,
    /// The visitor was added to the unique set during this call.
    pub new_visitor: bool,
    pub device: DeviceCategory,
    /// Visits today, including this one.
    pub today: u64,
    /// The updated store reached the storage medium. When `false` the
    /// visit is lost; nothing else is affected.
    pub persisted: bool,
}

/// Records visits into, and reads snapshots from, one storage medium.
///
/// The caller owns the tracker's lifetime: build it once per session, call
/// [`record_visit`](Self::record_visit) once per page load and
/// [`snapshot`](Self::snapshot) whenever a report is wanted. Neither
/// operation returns an error; storage failures degrade to "this visit was
/// not recorded".
///
/// # Example
///
/// ```
/// use sitetrack_core::Tracker;
/// use sitetrack_store::MemoryStorage;
/// use sitetrack_types::EnvSignals;
/// use time::macros::datetime;
///
/// let mut tracker = Tracker::new(MemoryStorage::new());
/// let env = EnvSignals::new("Mozilla/5.0 (Windows NT 10.0; Win64; x64)", "Win32", false);
///
/// let outcome = tracker.record_visit(datetime!(2026-10-19 12:00), &env);
/// assert!(outcome.persisted);
///
/// let stats = tracker.snapshot(datetime!(2026-10-19 12:30), &env);
/// assert_eq!(stats.today, 1);
/// assert_eq!(stats.total_visitors, 1);
/// ```
pub struct Tracker<S> {
    storage: S,
    ids: Box<dyn IdSource>,
}

impl<S: KeyValueStorage> Tracker<S> {
    /// Create a tracker that generates identities with the thread RNG.
    #[cfg(feature = "rand")]
    pub fn new(storage: S) -> Self {
        Self::with_id_source(storage, identity::RandomIdSource)
    }

    /// Create a tracker with a custom identity source.
    pub fn with_id_source(storage: S, ids: impl IdSource + 'static) -> Self {
        Self {
            storage,
            ids: Box::new(ids),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// The stored visitor identity, if one exists. Never creates one.
    pub fn visitor_id(&self) -> Option<VisitorId> {
        identity::stored_identity(&self.storage)
    }

    /// Load the current aggregate (empty if absent or corrupt).
    pub fn load(&self) -> VisitorStore {
        VisitorStore::load(&self.storage)
    }

    /// Record one visit at `now_local` from the environment `env`.
    pub fn record_visit(&mut self, now_local: PrimitiveDateTime, env: &EnvSignals) -> VisitOutcome {
        let mut store = VisitorStore::load(&self.storage);
        let resolved = identity::resolve_identity(&mut self.storage, &mut *self.ids);
        let applied = aggregate::record_visit(&mut store, &resolved.id, now_local, env);

        let persisted = match store.save(&mut self.storage) {
            Ok(()) => true,
            Err(e) => {
                warn!("Error saving visitor data: {}", e);
                false
            }
        };

        VisitOutcome {
            visitor_id: resolved.id,
            identity_created: resolved.created,
            new_visitor: applied.new_visitor,
            device: applied.device,
            today: applied.today,
            persisted,
        }
    }

    /// Build a read-only statistics snapshot.
    pub fn snapshot(&self, now_local: PrimitiveDateTime, env: &EnvSignals) -> StatsSnapshot {
        report::snapshot(&self.load(), now_local, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitetrack_store::{MemoryStorage, STORE_KEY, VISITOR_ID_KEY};
    use sitetrack_types::DeviceType;
    use time::macros::datetime;

    const NOW: PrimitiveDateTime = datetime!(2026-10-19 10:00);

    fn tracker(storage: MemoryStorage) -> Tracker<MemoryStorage> {
        let mut n = 0u32;
        Tracker::with_id_source(storage, move || {
            n += 1;
            VisitorId::new(format!("visitor_test_{n}"))
        })
    }

    fn iphone() -> EnvSignals {
        EnvSignals::new("mozilla/5.0 (iphone; cpu iphone os 17_0)", "iphone", true)
    }

    #[test]
    fn test_first_visit() {
        let mut tracker = tracker(MemoryStorage::new());
        let outcome = tracker.record_visit(NOW, &iphone());

        assert!(outcome.persisted);
        assert!(outcome.identity_created);
        assert!(outcome.new_visitor);
        assert_eq!(outcome.today, 1);
        assert_eq!(outcome.device.device_type(), DeviceType::IPhone);

        let store = tracker.load();
        assert_eq!(store.unique_visitors, ["visitor_test_1"]);
        assert_eq!(store.daily_visits["2026-10-19"], 1);
        assert_eq!(store.monthly_visits["2026-10"], 1);
        assert_eq!(store.device_visits.len(), 1);
        assert_eq!(store.device_visits["iPhone"].count, 1);
    }

    #[test]
    fn test_identity_is_stable_across_visits() {
        let mut tracker = tracker(MemoryStorage::new());
        let first = tracker.record_visit(NOW, &iphone());
        let before = tracker.visitor_id();

        for _ in 0..4 {
            let outcome = tracker.record_visit(NOW, &iphone());
            assert!(!outcome.identity_created);
            assert!(!outcome.new_visitor);
            assert_eq!(outcome.visitor_id, first.visitor_id);
        }

        assert_eq!(tracker.visitor_id(), before);
        let stats = tracker.snapshot(NOW, &iphone());
        assert_eq!(stats.today, 5);
        assert_eq!(stats.total_visitors, 1);
    }

    #[test]
    fn test_visitor_id_is_none_before_first_visit() {
        let tracker = tracker(MemoryStorage::new());
        assert!(tracker.visitor_id().is_none());
        // Snapshots never create an identity.
        tracker.snapshot(NOW, &iphone());
        assert!(tracker.visitor_id().is_none());
    }

    #[test]
    fn test_existing_identity_is_reused() {
        let storage = MemoryStorage::new().with_item(VISITOR_ID_KEY, "visitor_existing");
        let mut tracker = tracker(storage);

        let outcome = tracker.record_visit(NOW, &iphone());
        assert!(!outcome.identity_created);
        assert!(outcome.new_visitor);
        assert_eq!(outcome.visitor_id.as_str(), "visitor_existing");
    }

    #[test]
    fn test_corrupt_store_starts_over() {
        let storage = MemoryStorage::new().with_item(STORE_KEY, "{{{ definitely not json");
        let mut tracker = tracker(storage);

        let outcome = tracker.record_visit(NOW, &iphone());
        assert!(outcome.persisted);
        assert_eq!(outcome.today, 1);
        assert_eq!(tracker.load().total_visitors(), 1);
    }

    #[test]
    fn test_write_failure_is_reported_not_raised() {
        let mut storage = MemoryStorage::new();
        storage.fail_writes(true);
        let mut tracker = tracker(storage);

        let outcome = tracker.record_visit(NOW, &iphone());
        assert!(!outcome.persisted);
        assert_eq!(outcome.today, 1);

        // Nothing reached the medium.
        assert_eq!(tracker.snapshot(NOW, &iphone()).today, 0);
        assert!(tracker.visitor_id().is_none());
    }

    #[test]
    fn test_read_failure_counts_from_empty() {
        let mut storage = MemoryStorage::new().with_item(VISITOR_ID_KEY, "visitor_hidden");
        storage.fail_reads(true);
        let mut tracker = tracker(storage);

        let outcome = tracker.record_visit(NOW, &iphone());
        assert!(outcome.identity_created);
        assert_eq!(outcome.today, 1);
    }

    #[test]
    fn test_duplicate_stored_visitors_count_once() {
        let storage = MemoryStorage::new()
            .with_item(VISITOR_ID_KEY, "a")
            .with_item(STORE_KEY, r#"{"uniqueVisitors":["a","a"]}"#);
        let mut tracker = tracker(storage);

        let outcome = tracker.record_visit(NOW, &iphone());
        assert!(!outcome.new_visitor);
        assert_eq!(tracker.snapshot(NOW, &iphone()).total_visitors, 1);
        assert_eq!(tracker.load().unique_visitors, ["a"]);
    }

    #[test]
    fn test_snapshot_does_not_write() {
        let mut tracker = tracker(MemoryStorage::new());
        tracker.record_visit(NOW, &iphone());
        let before = tracker.storage().get_item(STORE_KEY).unwrap();

        tracker.snapshot(datetime!(2026-10-20 10:00), &iphone());

        assert_eq!(tracker.storage().get_item(STORE_KEY).unwrap(), before);
    }

    #[test]
    fn test_stats_next_day() {
        let mut tracker = tracker(MemoryStorage::new());
        tracker.record_visit(NOW, &iphone());
        tracker.record_visit(NOW, &iphone());

        let stats = tracker.snapshot(datetime!(2026-10-20 08:00), &iphone());
        assert_eq!(stats.today, 0);
        assert_eq!(stats.yesterday, 2);
        assert_eq!(stats.this_month, 2);
        assert_eq!(stats.last_month, 0);
    }
}
