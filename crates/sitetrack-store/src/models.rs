//! The persisted visit aggregate.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use sitetrack_types::DeviceCategory;

use crate::error::Result;
use crate::storage::KeyValueStorage;

/// Storage key for the aggregate document.
pub const STORE_KEY: &str = "siteVisitorData";

/// Storage key for the visitor identity token.
pub const VISITOR_ID_KEY: &str = "visitorId";

/// Per-device-type counter.
///
/// `icon` and `category` are captured from the first visit of the type and
/// never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceVisits {
    pub count: u64,
    pub icon: String,
    pub category: String,
}

/// All visit counters for one browser, as persisted under [`STORE_KEY`].
///
/// The JSON layout is:
///
/// ```json
/// {
///   "uniqueVisitors": ["visitor_..."],
///   "dailyVisits":   {"2026-10-19": 3},
///   "monthlyVisits": {"2026-10": 12},
///   "deviceVisits":  {"Mac": {"count": 12, "icon": "🍏", "category": "Apple"}}
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorStore {
    /// Identity tokens seen at least once, without duplicates.
    #[serde(default)]
    pub unique_visitors: Vec<String>,
    /// `YYYY-MM-DD` -> visits.
    #[serde(default)]
    pub daily_visits: BTreeMap<String, u64>,
    /// `YYYY-MM` -> visits.
    #[serde(default)]
    pub monthly_visits: BTreeMap<String, u64>,
    /// Device type label -> counter.
    #[serde(default)]
    pub device_visits: BTreeMap<String, DeviceVisits>,
}

impl VisitorStore {
    /// Parse a persisted document.
    ///
    /// Repeated visitor tokens are collapsed to their first occurrence.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut store: Self = serde_json::from_str(json)?;
        store.dedup_visitors();
        Ok(store)
    }

    fn dedup_visitors(&mut self) {
        let before = self.unique_visitors.len();
        let mut seen = BTreeSet::new();
        self.unique_visitors.retain(|v| seen.insert(v.clone()));
        if self.unique_visitors.len() != before {
            warn!(
                "Dropped {} duplicate visitor ids from stored data",
                before - self.unique_visitors.len()
            );
        }
    }

    /// Serialize to the persisted document format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load the aggregate from a storage medium.
    ///
    /// Never fails: an absent value, an unreadable medium, or a document
    /// that does not parse all produce an empty store.
    pub fn load<S: KeyValueStorage + ?Sized>(storage: &S) -> Self {
        match storage.get_item(STORE_KEY) {
            Ok(Some(json)) => Self::from_json(&json).unwrap_or_else(|e| {
                warn!("Error parsing visitor data, starting empty: {}", e);
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Error reading visitor data, starting empty: {}", e);
                Self::default()
            }
        }
    }

    /// Write the aggregate to a storage medium.
    pub fn save<S: KeyValueStorage + ?Sized>(&self, storage: &mut S) -> Result<()> {
        let json = self.to_json()?;
        storage.set_item(STORE_KEY, &json)
    }

    /// Add a visitor token. Returns `false` if it was already present.
    pub fn insert_visitor(&mut self, visitor_id: &str) -> bool {
        if self.unique_visitors.iter().any(|v| v == visitor_id) {
            return false;
        }
        self.unique_visitors.push(visitor_id.to_string());
        true
    }

    /// Number of distinct visitors.
    pub fn total_visitors(&self) -> usize {
        self.unique_visitors.len()
    }

    /// Visits recorded for a day key, 0 if none.
    pub fn daily(&self, day_key: &str) -> u64 {
        self.daily_visits.get(day_key).copied().unwrap_or(0)
    }

    /// Visits recorded for a month key, 0 if none.
    pub fn monthly(&self, month_key: &str) -> u64 {
        self.monthly_visits.get(month_key).copied().unwrap_or(0)
    }

    /// Increment a day bucket and return the new count.
    pub fn increment_daily(&mut self, day_key: &str) -> u64 {
        increment(&mut self.daily_visits, day_key)
    }

    /// Increment a month bucket and return the new count.
    pub fn increment_monthly(&mut self, month_key: &str) -> u64 {
        increment(&mut self.monthly_visits, month_key)
    }

    /// Count a visit from `device`, creating its entry on first sight.
    ///
    /// An existing entry keeps the icon and category it was created with.
    pub fn increment_device(&mut self, device: &DeviceCategory) -> u64 {
        let entry = self
            .device_visits
            .entry(device.label().to_string())
            .or_insert_with(|| DeviceVisits {
                count: 0,
                icon: device.icon().to_string(),
                category: device.category().label().to_string(),
            });
        entry.count = entry.count.saturating_add(1);
        entry.count
    }
}

fn increment(buckets: &mut BTreeMap<String, u64>, key: &str) -> u64 {
    let count = buckets.entry(key.to_string()).or_insert(0);
    *count = count.saturating_add(1);
    *count
}
