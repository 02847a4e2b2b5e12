use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::types::{AggregateResult, FailureReport};

/// Indented JSON; non-ASCII text is written as-is, never `\u` escaped.
pub fn render_success(report: &AggregateResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Compact JSON for the top-level failure shape.
pub fn render_failure(report: &FailureReport) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}

/// Write the document to `path`, or to stdout when no path is configured.
pub fn emit(document: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => std::fs::write(p, format!("{document}\n"))?,
        None => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{document}")?;
            out.flush()?;
        }
    }
    Ok(())
}
