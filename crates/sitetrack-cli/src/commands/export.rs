//! Export command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use sitetrack_store::{FileStorage, VisitorStore};

use crate::cli::Period;
use crate::format::format_export_csv;
use crate::util::write_output;

pub fn cmd_export(
    data_file: &Path,
    period: Period,
    no_header: bool,
    output: Option<&PathBuf>,
) -> Result<()> {
    let store = VisitorStore::load(&FileStorage::open(data_file));
    let content = format_export_csv(&store, period, no_header)?;

    write_output(output, &content)?;
    Ok(())
}
