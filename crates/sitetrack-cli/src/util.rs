//! Utility functions for CLI operations.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use sitetrack_types::EnvSignals;

use crate::cli::{EnvArgs, OutputArgs, OutputFormat};
use crate::config::Config;

/// Current local wall-clock time, or UTC when the local offset is unknown.
pub fn now_local() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|e| {
        tracing::debug!("Local offset unavailable ({}), using UTC", e);
        OffsetDateTime::now_utc()
    });
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` or `YYYY-MM-DDTHH:MM:SS`.
/// A space may stand in for the `T`.
pub fn parse_local_datetime(input: &str) -> Result<PrimitiveDateTime> {
    let input = input.trim();
    let normalized = input.replacen(' ', "T", 1);

    if let Ok(dt) = PrimitiveDateTime::parse(
        &normalized,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Ok(dt);
    }
    if let Ok(dt) = PrimitiveDateTime::parse(
        &normalized,
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    ) {
        return Ok(dt);
    }
    if let Ok(date) = Date::parse(&normalized, format_description!("[year]-[month]-[day]")) {
        return Ok(date.midnight());
    }

    bail!(
        "Invalid date/time '{}'. Expected YYYY-MM-DD, YYYY-MM-DDTHH:MM or YYYY-MM-DDTHH:MM:SS",
        input
    )
}

/// Resolve `--at`, falling back to the current local time.
pub fn resolve_now(at: Option<&str>) -> Result<PrimitiveDateTime> {
    match at {
        Some(s) => parse_local_datetime(s),
        None => Ok(now_local()),
    }
}

/// Approximation of `navigator.platform` for the host OS.
pub fn host_platform() -> String {
    match std::env::consts::OS {
        "macos" => "MacIntel".to_string(),
        "windows" => "Win32".to_string(),
        "ios" => "iPhone".to_string(),
        "linux" | "android" | "freebsd" | "netbsd" | "openbsd" => {
            format!("Linux {}", std::env::consts::ARCH)
        }
        other => other.to_string(),
    }
}

/// Build environment signals from flags, then config, then host defaults.
pub fn resolve_env(args: &EnvArgs, config: &Config) -> EnvSignals {
    let user_agent = args
        .user_agent
        .clone()
        .or_else(|| config.environment.user_agent.clone())
        .unwrap_or_default();
    let platform = args
        .platform
        .clone()
        .or_else(|| config.environment.platform.clone())
        .unwrap_or_else(host_platform);
    let has_touch_support = args.resolve_touch(config.environment.touch);

    EnvSignals::new(user_agent, platform, has_touch_support)
}

/// Storage file from flag/env, then config, then the platform default.
pub fn resolve_data_file(data_file: Option<&Path>, config: &Config) -> PathBuf {
    data_file
        .map(Path::to_path_buf)
        .or_else(|| config.data_file.clone())
        .unwrap_or_else(sitetrack_store::default_data_path)
}

/// Output format from flag, then config, then text.
pub fn resolve_format(args: &OutputArgs, config: &Config) -> OutputFormat {
    args.format
        .or_else(|| config.output_format())
        .unwrap_or_default()
}

/// Write output to file or stdout
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}
