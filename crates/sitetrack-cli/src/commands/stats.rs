//! Stats command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use sitetrack_core::report;
use sitetrack_store::{FileStorage, VisitorStore};
use sitetrack_types::EnvSignals;
use time::PrimitiveDateTime;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_stats_text};
use crate::util::write_output;

/// Arguments for the stats command.
pub struct StatsArgs<'a> {
    pub data_file: &'a Path,
    pub env: EnvSignals,
    pub now: PrimitiveDateTime,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub opts: &'a FormatOptions,
}

/// Show a statistics snapshot. Never writes to the storage file.
pub fn cmd_stats(args: StatsArgs<'_>) -> Result<()> {
    let StatsArgs {
        data_file,
        env,
        now,
        format,
        output,
        opts,
    } = args;

    let store = VisitorStore::load(&FileStorage::open(data_file));
    let stats = report::snapshot(&store, now, &env);

    let content = match format {
        OutputFormat::Json => opts.as_json(&stats)?,
        OutputFormat::Text => format_stats_text(&stats, opts),
    };

    write_output(output, &content)?;
    Ok(())
}
