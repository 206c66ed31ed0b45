//! Command implementations for the CLI.

mod classify;
mod config;
mod export;
mod identity;
mod record;
mod stats;

pub use classify::cmd_classify;
pub use config::cmd_config;
pub use export::cmd_export;
pub use identity::cmd_identity;
pub use record::{RecordArgs, cmd_record};
pub use stats::{StatsArgs, cmd_stats};
