//! Output formatting for callmap results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output, internal calls in blue and external
//!   calls in yellow
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::scan::{CallEntry, ClassifiedReport};

// =============================================================================
// JSON Format
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_scanned: usize,
    pub declarations: usize,
    pub total: usize,
    pub internal_count: usize,
    pub external_count: usize,
    pub internal: Vec<JsonCall>,
    pub external: Vec<JsonCall>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonCall {
    pub name: String,
    pub locations: Vec<JsonLocation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLocation {
    pub file: String,
    pub line: usize,
}

pub fn build_json(path: &str, report: &ClassifiedReport) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        files_scanned: report.files_scanned,
        declarations: report.declarations,
        total: report.total(),
        internal_count: report.internal_count(),
        external_count: report.external_count(),
        internal: report.internal.iter().map(call_to_json).collect(),
        external: report.external.iter().map(call_to_json).collect(),
    }
}

fn call_to_json(entry: &CallEntry) -> JsonCall {
    JsonCall {
        name: entry.name.clone(),
        locations: entry
            .locations
            .iter()
            .map(|l| JsonLocation {
                file: l.file.clone(),
                line: l.line,
            })
            .collect(),
    }
}

/// Write results in JSON format to stdout.
pub fn write_json(path: &str, report: &ClassifiedReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&build_json(path, report))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Section colors.
#[derive(Clone, Copy)]
enum Section {
    Internal,
    External,
}

impl Section {
    fn paint(self, text: &str) -> ColoredString {
        match self {
            Section::Internal => text.blue(),
            Section::External => text.yellow(),
        }
    }
}

/// Render the report in pretty format.
pub fn render_pretty<W: Write>(out: &mut W, report: &ClassifiedReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Function call locations:")?;

    write_section(
        out,
        Section::Internal,
        "Internal function calls:",
        &report.internal,
    )?;
    write_section(
        out,
        Section::External,
        "External function calls:",
        &report.external,
    )?;

    writeln!(out)?;
    writeln!(out, "Summary:")?;
    writeln!(out, "Total function calls: {}", report.total())?;
    writeln!(
        out,
        "{}",
        Section::Internal.paint(&format!("Internal function calls: {}", report.internal_count()))
    )?;
    writeln!(
        out,
        "{}",
        Section::External.paint(&format!("External function calls: {}", report.external_count()))
    )?;
    Ok(())
}

fn write_section<W: Write>(
    out: &mut W,
    section: Section,
    title: &str,
    calls: &[CallEntry],
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", section.paint(title))?;

    for call in calls {
        writeln!(out)?;
        writeln!(out, "{}", section.paint(&format!("{}:", call.name)))?;
        for location in &call.locations {
            writeln!(out, "  {}", location)?;
        }
    }
    Ok(())
}

/// Write results in pretty format to stdout.
pub fn write_pretty(report: &ClassifiedReport) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_pretty(&mut out, report)?;
    out.flush()?;
    Ok(())
}
