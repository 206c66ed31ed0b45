//! Classify command implementation.

use std::path::PathBuf;

use anyhow::Result;
use sitetrack_types::{EnvSignals, classify};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_device_text};
use crate::util::write_output;

pub fn cmd_classify(
    env: &EnvSignals,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let device = classify(env);
    tracing::debug!(
        "Classified user agent {:?} on platform {:?} (touch: {}) as {}",
        env.user_agent,
        env.platform,
        env.has_touch_support,
        device
    );

    let content = match format {
        OutputFormat::Json => opts.as_json(&device)?,
        OutputFormat::Text => format_device_text(&device, opts),
    };

    write_output(output, &content)?;
    Ok(())
}
