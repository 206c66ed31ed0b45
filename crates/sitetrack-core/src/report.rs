//! Read-only statistics snapshots.

use std::collections::BTreeMap;

use serde::Serialize;
use time::PrimitiveDateTime;

use sitetrack_store::{DeviceVisits, VisitorStore};
use sitetrack_types::{DeviceCategory, EnvSignals, classify};

use crate::calendar::BucketKeys;

/// Point-in-time view of the store plus the viewer's current device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub today: u64,
    pub yesterday: u64,
    pub this_month: u64,
    pub last_month: u64,
    pub total_visitors: usize,
    /// Classified fresh from the live environment, never read from the store.
    pub current_device: DeviceCategory,
    pub device_breakdown: BTreeMap<String, DeviceVisits>,
}

impl StatsSnapshot {
    /// Device breakdown ordered for display: count descending, then label.
    pub fn sorted_devices(&self) -> Vec<(&str, &DeviceVisits)> {
        let mut devices: Vec<(&str, &DeviceVisits)> = self
            .device_breakdown
            .iter()
            .map(|(label, visits)| (label.as_str(), visits))
            .collect();
        devices.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(b.0)));
        devices
    }

    /// Total visits across all device types.
    pub fn total_device_visits(&self) -> u64 {
        self.device_breakdown.values().map(|v| v.count).sum()
    }
}

/// Project `store` into a snapshot. Does not modify the store.
pub fn snapshot(
    store: &VisitorStore,
    now_local: PrimitiveDateTime,
    env: &EnvSignals,
) -> StatsSnapshot {
    let keys = BucketKeys::at(now_local);

    StatsSnapshot {
        today: store.daily(&keys.today),
        yesterday: store.daily(&keys.yesterday),
        this_month: store.monthly(&keys.this_month),
        last_month: store.monthly(&keys.last_month),
        total_visitors: store.total_visitors(),
        current_device: classify(env),
        device_breakdown: store.device_visits.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::record_visit;
    use crate::identity::VisitorId;
    use sitetrack_types::DeviceType;
    use time::macros::datetime;

    fn android() -> EnvSignals {
        EnvSignals::new("Mozilla/5.0 (Linux; Android 14; Pixel 8)", "Linux armv8l", true)
    }

    fn windows() -> EnvSignals {
        EnvSignals::new("Mozilla/5.0 (Windows NT 10.0; Win64; x64)", "Win32", false)
    }

    #[test]
    fn test_empty_store_reports_zeros() {
        let snap = snapshot(&VisitorStore::default(), datetime!(2026-10-19 9:00), &windows());

        assert_eq!(snap.today, 0);
        assert_eq!(snap.yesterday, 0);
        assert_eq!(snap.this_month, 0);
        assert_eq!(snap.last_month, 0);
        assert_eq!(snap.total_visitors, 0);
        assert!(snap.device_breakdown.is_empty());
        assert_eq!(snap.current_device.device_type(), DeviceType::Windows);
    }

    #[test]
    fn test_android_and_windows_same_day() {
        let now = datetime!(2026-10-19 9:00);
        let mut store = VisitorStore::default();
        record_visit(&mut store, &VisitorId::new("a"), now, &android());
        record_visit(&mut store, &VisitorId::new("b"), now, &windows());

        let snap = snapshot(&store, now, &android());

        assert_eq!(snap.today, 2);
        assert_eq!(snap.total_visitors, 2);
        let labels: Vec<&String> = snap.device_breakdown.keys().collect();
        assert_eq!(labels, ["Android", "Windows"]);
        assert_eq!(snap.device_breakdown["Android"].count, 1);
        assert_eq!(snap.device_breakdown["Windows"].count, 1);
    }

    #[test]
    fn test_yesterday_and_last_month() {
        let mut store = VisitorStore::default();
        let v = VisitorId::new("v");
        record_visit(&mut store, &v, datetime!(2026-09-30 22:00), &windows());
        record_visit(&mut store, &v, datetime!(2026-10-01 08:00), &windows());
        record_visit(&mut store, &v, datetime!(2026-10-01 09:00), &windows());

        let snap = snapshot(&store, datetime!(2026-10-01 12:00), &windows());
        assert_eq!(snap.today, 2);
        assert_eq!(snap.yesterday, 1);
        assert_eq!(snap.this_month, 2);
        assert_eq!(snap.last_month, 1);
    }

    #[test]
    fn test_current_device_is_live_not_stored() {
        let now = datetime!(2026-10-19 9:00);
        let mut store = VisitorStore::default();
        record_visit(&mut store, &VisitorId::new("a"), now, &windows());

        let snap = snapshot(&store, now, &android());
        assert_eq!(snap.current_device.device_type(), DeviceType::Android);
        assert!(!snap.device_breakdown.contains_key("Android"));
    }

    #[test]
    fn test_sorted_devices_by_count_then_label() {
        let now = datetime!(2026-10-19 9:00);
        let mut store = VisitorStore::default();
        let v = VisitorId::new("v");
        record_visit(&mut store, &v, now, &windows());
        record_visit(&mut store, &v, now, &android());
        record_visit(&mut store, &v, now, &android());
        record_visit(&mut store, &v, now, &EnvSignals::new("", "Linux x86_64", false));

        let snap = snapshot(&store, now, &windows());
        let order: Vec<&str> = snap.sorted_devices().into_iter().map(|(l, _)| l).collect();
        assert_eq!(order, ["Android", "Linux", "Windows"]);
        assert_eq!(snap.total_device_visits(), 4);
    }

    #[test]
    fn test_snapshot_json_keys() {
        let snap = snapshot(&VisitorStore::default(), datetime!(2026-10-19 9:00), &windows());
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "today": 0,
                "yesterday": 0,
                "thisMonth": 0,
                "lastMonth": 0,
                "totalVisitors": 0,
                "currentDevice": {"type": "Windows", "icon": "🪟", "category": "Windows"},
                "deviceBreakdown": {}
            })
        );
    }
}
