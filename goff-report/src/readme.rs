//! Idempotent README patching under fixed region markers
//!
//! The managed block lives between two marker lines; everything outside it
//! is hand-written prose that must survive regeneration byte-for-byte.

use crate::error::ReportError;
use crate::summary::{YearSummary, render_summary};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Start marker of the managed region, alone on its own line
pub const POINTERS_START: &str = "<!-- GOFF:POINTERS:START -->";
/// End marker of the managed region, alone on its own line
pub const POINTERS_END: &str = "<!-- GOFF:POINTERS:END -->";

/// Render `summary` and write it into the managed region of the README at
/// `path`. Creates the document when it is missing and appends a fresh
/// region when the markers are absent or malformed. Re-running with the
/// same summary leaves the file byte-identical.
pub fn update_readme(path: &Path, summary: &YearSummary) -> Result<(), ReportError> {
    let content = render_summary(summary);

    let existing = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            fs::write(path, new_readme(summary.year, &content))?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    fs::write(path, patch(&existing, &content))?;
    Ok(())
}

/// Replace the marker-delimited region of `existing` with `content`,
/// appending a fresh region when the markers are absent or out of order.
/// Bytes outside the region are copied unchanged.
pub fn patch(existing: &str, content: &str) -> String {
    match (
        find_marker_line(existing, POINTERS_START),
        find_marker_line(existing, POINTERS_END),
    ) {
        (Some((start, _)), Some((end, end_stop))) if start < end => {
            let mut out = String::with_capacity(existing.len() + content.len());
            out.push_str(&existing[..start]);
            out.push_str(POINTERS_START);
            out.push('\n');
            out.push_str(content);
            out.push('\n');
            out.push_str(POINTERS_END);
            out.push_str(&existing[end_stop..]);
            out
        }
        _ => append_region(existing, content),
    }
}

/// Content currently inside the managed region, if both markers are present
/// in order
pub fn region(text: &str) -> Option<&str> {
    let (_, start_stop) = find_marker_line(text, POINTERS_START)?;
    let (end, _) = find_marker_line(text, POINTERS_END)?;
    if end <= start_stop {
        return None;
    }

    let inner = &text[start_stop + 1..end];
    Some(inner.strip_suffix('\n').unwrap_or(inner))
}

/// Find a marker occupying a whole line; returns its byte range.
/// Mid-line occurrences do not count.
fn find_marker_line(text: &str, marker: &str) -> Option<(usize, usize)> {
    for (index, _) in text.match_indices(marker) {
        let stop = index + marker.len();
        let at_line_start = index == 0 || text.as_bytes()[index - 1] == b'\n';
        let at_line_end = stop == text.len() || text.as_bytes()[stop] == b'\n';
        if at_line_start && at_line_end {
            return Some((index, stop));
        }
    }
    None
}

fn append_region(existing: &str, content: &str) -> String {
    let trimmed = existing.trim_end_matches('\n');
    format!("{trimmed}\n\n{POINTERS_START}\n{content}\n{POINTERS_END}\n")
}

fn new_readme(year: u16, content: &str) -> String {
    format!("# FlipFlop {year}\n\n{POINTERS_START}\n{content}\n{POINTERS_END}\n")
}
