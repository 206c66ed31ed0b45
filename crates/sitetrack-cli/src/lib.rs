//! Command-line interface for sitetrack visit counters.
//!
//! The `sitetrack` binary records visits into a local JSON storage file and
//! reports the same statistics the browser panel shows.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `record` | Record one visit from the given environment |
//! | `stats` | Show today/yesterday/month counters and the device breakdown |
//! | `classify` | Classify a user agent without recording |
//! | `identity` | Print the stored visitor identity |
//! | `export` | Export daily, monthly or device counters as CSV |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//!
//! # Configuration
//!
//! The CLI reads `~/.config/sitetrack/config.toml` (or platform equivalent,
//! or the path in `SITETRACK_CONFIG`):
//!
//! ```toml
//! data_file = "/home/me/.local/share/sitetrack/storage.json"
//! format = "json"
//! no_color = false
//!
//! [environment]
//! user_agent = "Mozilla/5.0 (X11; Linux x86_64)"
//! platform = "Linux x86_64"
//! touch = false
//! ```
//!
//! # Environment Variables
//!
//! - `SITETRACK_DATA_FILE`: storage file (overridden by `--data-file`)
//! - `SITETRACK_USER_AGENT`, `SITETRACK_PLATFORM`: environment signals
//! - `SITETRACK_CONFIG`: config file location
//! - `NO_COLOR`: disable colored output when set
//!
//! # Examples
//!
//! ```bash
//! sitetrack record --user-agent "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)" --platform iPhone --touch
//! sitetrack stats --format json
//! sitetrack export --period monthly --output months.csv
//! ```

pub use sitetrack_core;
pub use sitetrack_types;
