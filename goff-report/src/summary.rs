//! Year summary assembly and rendering
//!
//! Pulls the year score, per-puzzle part availability, and benchmark
//! timings together into one [`YearSummary`], strictly sequentially, and
//! renders it as the managed README block.

use crate::bench::{self, BenchResult, BenchRunner};
use crate::error::ReportError;
use goff_http_client::GoffClient;
use std::fs;
use std::path::Path;

/// Which parts of a puzzle are published
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzlePointers {
    /// Two-digit puzzle identifier
    pub puzzle_id: u8,
    pub part1: bool,
    pub part2: bool,
    pub part3: bool,
}

/// One year's progress report, the unit of work between building and
/// rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSummary {
    pub year: u16,
    /// Pointers scored this year
    pub score: u32,
    /// Total parts available, 0 when unknown
    pub total: u32,
    /// Per-puzzle availability, ascending by puzzle id
    pub puzzles: Vec<PuzzlePointers>,
    /// Per-puzzle benchmark timings, ascending by puzzle id
    pub bench: Vec<BenchResult>,
}

/// Build a year's summary: fetch the score, benchmark every puzzle
/// directory under `root/{year}`, and scan each puzzle's page for published
/// parts. Any single failure aborts the whole build; no partial summaries.
pub fn build(
    client: &GoffClient,
    runner: &dyn BenchRunner,
    year: u16,
    token: Option<&str>,
    root: &Path,
) -> Result<YearSummary, ReportError> {
    let info = client.fetch_score(year, token)?;

    let year_dir = root.join(year.to_string());
    let bench = bench::collect(&year_dir, runner)?;
    let puzzles = collect_pointers(client, year, token, &year_dir)?;

    Ok(YearSummary {
        year,
        score: info.score,
        total: info.total,
        puzzles,
        bench,
    })
}

fn collect_pointers(
    client: &GoffClient,
    year: u16,
    token: Option<&str>,
    year_dir: &Path,
) -> Result<Vec<PuzzlePointers>, ReportError> {
    let mut puzzles = Vec::new();
    for entry in fs::read_dir(year_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(puzzle_id) = name.to_str().and_then(parse_puzzle_id) else {
            continue;
        };

        let parts = client.available_parts(year, puzzle_id, token)?;
        let mut row = PuzzlePointers {
            puzzle_id,
            part1: false,
            part2: false,
            part3: false,
        };
        for part in parts {
            match part {
                1 => row.part1 = true,
                2 => row.part2 = true,
                3 => row.part3 = true,
                _ => {}
            }
        }
        puzzles.push(row);
    }

    puzzles.sort_by_key(|row| row.puzzle_id);
    Ok(puzzles)
}

/// Parse a `puzzleNN` directory name; anything else is `None`
pub(crate) fn parse_puzzle_id(name: &str) -> Option<u8> {
    let digits = name.strip_prefix("puzzle")?;
    if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// List the year directories under `root`, ascending
pub fn years(root: &Path) -> Result<Vec<u16>, ReportError> {
    let mut years = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(year) = entry.file_name().to_str().and_then(|name| name.parse::<u16>().ok())
            && year >= 1000
        {
            years.push(year);
        }
    }

    years.sort_unstable();
    Ok(years)
}

/// Render the summary as the managed README block content: a pointer line,
/// an availability table, and a benchmark table
pub fn render_summary(summary: &YearSummary) -> String {
    let mut lines: Vec<String> = vec![
        "# Flip Flop".to_string(),
        String::new(),
        format!("## Year : {}", summary.year),
        String::new(),
        "### Pointers".to_string(),
        String::new(),
        format!(
            "Pointers ({}): {}/{}",
            summary.year,
            summary.score,
            total_text(summary.total)
        ),
    ];

    if !summary.puzzles.is_empty() {
        lines.push(String::new());
        push_table_head(&mut lines);
        for row in &summary.puzzles {
            lines.push(format!(
                "| {:02} | {} | {} | {} |",
                row.puzzle_id,
                marker(row.part1),
                marker(row.part2),
                marker(row.part3)
            ));
        }
    }

    lines.push(String::new());
    lines.push("### Benchmarks".to_string());
    lines.push(String::new());
    if summary.bench.is_empty() {
        lines.push("No benchmarks yet.".to_string());
    } else {
        push_table_head(&mut lines);
        for row in &summary.bench {
            lines.push(format!(
                "| {:02} | {} | {} | {} |",
                row.puzzle_id,
                cell(&row.part1),
                cell(&row.part2),
                cell(&row.part3)
            ));
        }
    }

    lines.join("\n")
}

fn push_table_head(lines: &mut Vec<String>) {
    lines.push("| Puzzle | Part 1 | Part 2 | Part 3 |".to_string());
    lines.push("| --- | --- | --- | --- |".to_string());
}

fn total_text(total: u32) -> String {
    if total > 0 {
        total.to_string()
    } else {
        "?".to_string()
    }
}

fn marker(present: bool) -> &'static str {
    if present { "Y" } else { "-" }
}

fn cell(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}
