//! Visit aggregation and statistics for sitetrack.
//!
//! This crate implements the counting logic behind the tracker: it resolves
//! a pseudonymous visitor identity, buckets visits by local day, month and
//! device type, and projects the counters into a display-ready snapshot.
//!
//! # Features
//!
//! - [`Tracker`]: load, mutate and save over any [`KeyValueStorage`]
//! - [`aggregate::record_visit`]: the pure in-memory mutation
//! - [`report::snapshot`]: read-only [`StatsSnapshot`] projection
//! - [`calendar`]: `YYYY-MM-DD` / `YYYY-MM` bucket keys
//! - [`identity`]: `visitor_<millis>_<random>` tokens
//!
//! # Error handling
//!
//! Nothing in this crate returns an error. Unreadable or corrupt data is
//! treated as an empty store, and a failed write is reported through
//! [`VisitOutcome::persisted`] and a `warn!` log line.
//!
//! [`KeyValueStorage`]: sitetrack_store::KeyValueStorage

pub mod aggregate;
pub mod calendar;
pub mod identity;
pub mod report;
mod tracker;

pub use calendar::BucketKeys;
#[cfg(feature = "rand")]
pub use identity::RandomIdSource;
pub use identity::{IdSource, VisitorId};
pub use report::StatsSnapshot;
pub use tracker::{Tracker, VisitOutcome};

// Re-export sibling crates for convenience
pub use sitetrack_store;
pub use sitetrack_types;
