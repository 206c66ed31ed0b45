//! Visit aggregation over an in-memory [`VisitorStore`].

use time::PrimitiveDateTime;
use tracing::debug;

use sitetrack_store::VisitorStore;
use sitetrack_types::{DeviceCategory, EnvSignals, classify};

use crate::calendar::{day_key, month_key};
use crate::identity::VisitorId;

/// Counter values right after one visit was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedVisit {
    pub device: DeviceCategory,
    /// Whether the visitor was added to the unique set by this visit.
    pub new_visitor: bool,
    pub today: u64,
    pub this_month: u64,
    pub device_count: u64,
}

/// Apply one visit to `store`.
///
/// Not idempotent: every call counts as a separate visit. Only the unique
/// visitor set ignores repeats.
pub fn record_visit(
    store: &mut VisitorStore,
    visitor: &VisitorId,
    now_local: PrimitiveDateTime,
    env: &EnvSignals,
) -> AppliedVisit {
    let date = now_local.date();
    let today_key = day_key(date);
    let month = month_key(date);
    let device = classify(env);

    let new_visitor = store.insert_visitor(visitor.as_str());
    let today = store.increment_daily(&today_key);
    let this_month = store.increment_monthly(&month);
    let device_count = store.increment_device(&device);

    debug!(
        "Recorded visit: day {}={}, month {}={}, device {}={}",
        today_key,
        today,
        month,
        this_month,
        device.label(),
        device_count
    );

    AppliedVisit {
        device,
        new_visitor,
        today,
        this_month,
        device_count,
    }
}
