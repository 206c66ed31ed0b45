//! Record command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use sitetrack_core::Tracker;
use sitetrack_store::FileStorage;
use sitetrack_types::EnvSignals;
use time::PrimitiveDateTime;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_outcome_text};
use crate::util::write_output;

/// Arguments for the record command.
pub struct RecordArgs<'a> {
    pub data_file: &'a Path,
    pub env: EnvSignals,
    pub now: PrimitiveDateTime,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub opts: &'a FormatOptions,
}

/// Record one visit. A failed write is reported but does not fail the command.
pub fn cmd_record(args: RecordArgs<'_>) -> Result<()> {
    let RecordArgs {
        data_file,
        env,
        now,
        format,
        output,
        opts,
    } = args;

    let mut tracker = Tracker::new(FileStorage::open(data_file));
    let outcome = tracker.record_visit(now, &env);

    if !outcome.persisted {
        eprintln!(
            "Warning: visit was not saved to {} (storage unavailable)",
            data_file.display()
        );
    }

    let content = match format {
        OutputFormat::Json => opts.as_json(&outcome)?,
        OutputFormat::Text => format_outcome_text(&outcome, opts),
    };

    write_output(output, &content)?;
    Ok(())
}
