//! Local persistence for sitetrack visit counters.
//!
//! This crate holds the single persisted aggregate ([`VisitorStore`]) and the
//! storage media it can live in.
//!
//! # Features
//!
//! - JSON document layout compatible with the browser tracker
//! - Load that never fails (absent or corrupt data means an empty store)
//! - [`KeyValueStorage`] trait over get/set-by-key media
//! - [`MemoryStorage`] with read/write failure injection
//! - [`FileStorage`] for native hosts
//!
//! # Example
//!
//! ```no_run
//! use sitetrack_store::{FileStorage, VisitorStore};
//!
//! let mut storage = FileStorage::open_default();
//! let mut store = VisitorStore::load(&storage);
//! store.increment_daily("2026-10-19");
//! store.save(&mut storage)?;
//! # Ok::<(), sitetrack_store::Error>(())
//! ```

mod error;
mod file;
mod models;
mod storage;

pub use error::{Error, Result};
pub use file::FileStorage;
pub use models::{DeviceVisits, STORE_KEY, VISITOR_ID_KEY, VisitorStore};
pub use storage::{KeyValueStorage, MemoryStorage};

/// Default storage path following platform conventions.
///
/// - Linux: `~/.local/share/sitetrack/storage.json`
/// - macOS: `~/Library/Application Support/sitetrack/storage.json`
/// - Windows: `C:\Users\<user>\AppData\Local\sitetrack\storage.json`
pub fn default_data_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("sitetrack")
        .join("storage.json")
}
