//! Identity command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use sitetrack_core::Tracker;
use sitetrack_store::FileStorage;

use crate::format::{FormatOptions, format_identity_text};
use crate::util::write_output;

/// Print the stored identity without creating one.
pub fn cmd_identity(data_file: &Path, output: Option<&PathBuf>, opts: &FormatOptions) -> Result<()> {
    let tracker = Tracker::new(FileStorage::open(data_file));
    let id = tracker.visitor_id();

    write_output(output, &format_identity_text(id.as_ref(), opts))?;
    Ok(())
}
