//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

use sitetrack_core::{StatsSnapshot, VisitOutcome, VisitorId};
use sitetrack_store::VisitorStore;
use sitetrack_types::DeviceCategory;

use crate::cli::Period;

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self {
            no_color,
            compact: false,
        }
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }

    fn heading(&self, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.bold().to_string()
        }
    }

    fn value(&self, n: impl std::fmt::Display) -> String {
        if self.no_color {
            n.to_string()
        } else {
            n.cyan().to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.dimmed().to_string()
        }
    }
}

fn device_line(device: &DeviceCategory) -> String {
    format!("{} {}", device.icon(), device.label())
}

/// Render a snapshot the way the statistics panel lays it out.
pub fn format_stats_text(stats: &StatsSnapshot, opts: &FormatOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n\n", opts.heading("📊 Site Analytics")));

    output.push_str(&format!("{}\n", opts.heading("Visitor Statistics")));
    let rows: [(&str, String); 5] = [
        ("Today", stats.today.to_string()),
        ("Yesterday", stats.yesterday.to_string()),
        ("This Month", stats.this_month.to_string()),
        ("Last Month", stats.last_month.to_string()),
        ("Unique Visitors", stats.total_visitors.to_string()),
    ];
    for (label, value) in rows {
        output.push_str(&format!("  {:<16} {}\n", label, opts.value(value)));
    }
    output.push('\n');

    output.push_str(&format!("{}\n", opts.heading("Your Device")));
    output.push_str(&format!("  {}\n\n", device_line(&stats.current_device)));

    output.push_str(&format!("{}\n", opts.heading("Device Breakdown")));
    let devices = stats.sorted_devices();
    if devices.is_empty() {
        output.push_str(&format!("  {}\n", opts.dim("No device data yet")));
    } else {
        for (label, visits) in devices {
            let name = format!("{} {}", visits.icon, label);
            output.push_str(&format!("  {:<16} {}\n", name, opts.value(visits.count)));
        }
    }

    output
}

/// One-line summary of a recorded visit.
pub fn format_outcome_text(outcome: &VisitOutcome, opts: &FormatOptions) -> String {
    let mut out = format!(
        "Recorded visit #{} today from {}",
        opts.value(outcome.today),
        device_line(&outcome.device)
    );
    if outcome.new_visitor {
        out.push_str(" (new visitor)");
    }
    if !outcome.persisted {
        out.push_str(&format!(" {}", opts.dim("[not saved]")));
    }
    out.push('\n');
    out
}

pub fn format_device_text(device: &DeviceCategory, opts: &FormatOptions) -> String {
    format!(
        "{}  {}\n",
        device_line(device),
        opts.dim(&format!("({})", device.category()))
    )
}

pub fn format_identity_text(id: Option<&VisitorId>, opts: &FormatOptions) -> String {
    match id {
        Some(id) => format!("{}\n", id),
        None => format!(
            "{}\n",
            opts.dim("No visitor identity yet. Run 'sitetrack record' to create one.")
        ),
    }
}

/// CSV export of one counter series.
pub fn format_export_csv(store: &VisitorStore, period: Period, no_header: bool) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    match period {
        Period::Daily => {
            if !no_header {
                wtr.write_record(["day", "visits"])?;
            }
            for (day, count) in &store.daily_visits {
                wtr.write_record([day.as_str(), count.to_string().as_str()])?;
            }
        }
        Period::Monthly => {
            if !no_header {
                wtr.write_record(["month", "visits"])?;
            }
            for (month, count) in &store.monthly_visits {
                wtr.write_record([month.as_str(), count.to_string().as_str()])?;
            }
        }
        Period::Devices => {
            if !no_header {
                wtr.write_record(["device", "icon", "category", "visits"])?;
            }
            for (label, visits) in &store.device_visits {
                wtr.write_record([
                    label.as_str(),
                    visits.icon.as_str(),
                    visits.category.as_str(),
                    visits.count.to_string().as_str(),
                ])?;
            }
        }
    }

    let bytes = wtr.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}
