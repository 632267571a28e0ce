//! Benchmark collection: running the measurement tool per puzzle directory
//! and parsing its output into per-part timings

use crate::error::ReportError;
use crate::summary::parse_puzzle_id;
use regex::Regex;
use std::cell::OnceCell;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Formatted per-part timings for one puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchResult {
    /// Two-digit puzzle identifier
    pub puzzle_id: u8,
    /// Formatted duration for part 1, `None` if no benchmark line matched
    pub part1: Option<String>,
    /// Formatted duration for part 2
    pub part2: Option<String>,
    /// Formatted duration for part 3
    pub part3: Option<String>,
}

impl BenchResult {
    fn new(puzzle_id: u8) -> Self {
        Self {
            puzzle_id,
            part1: None,
            part2: None,
            part3: None,
        }
    }
}

/// Runs the external measurement tool for one puzzle directory and returns
/// its combined output text
pub trait BenchRunner {
    /// Run the benchmark in `dir`, blocking until it completes
    fn run(&self, dir: &Path) -> Result<String, ReportError>;
}

/// [`BenchRunner`] that shells out to a fixed command in the puzzle
/// directory. The default invocation is `go test -bench . -run ^$`, which
/// is what the puzzle scaffolds are built for.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: String,
    args: Vec<String>,
}

impl CommandRunner {
    /// Create a runner for an arbitrary program and arguments
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new(
            "go",
            ["test", "-bench", ".", "-run", "^$"]
                .map(String::from)
                .to_vec(),
        )
    }
}

impl BenchRunner for CommandRunner {
    fn run(&self, dir: &Path) -> Result<String, ReportError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .output()
            .map_err(|source| ReportError::BenchSpawn {
                dir: dir.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            return Err(ReportError::BenchStatus {
                dir: dir.to_path_buf(),
                status: output.status,
            });
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}

/// Parser for benchmark-tool output with a cached line pattern
#[derive(Debug)]
pub(crate) struct BenchParser {
    line_regex: OnceCell<Regex>,
}

impl BenchParser {
    pub fn new() -> Self {
        Self {
            line_regex: OnceCell::new(),
        }
    }

    /// Get or compile the benchmark line regex. Only nanosecond-denominated
    /// lines are recognized.
    fn line_regex(&self) -> &Regex {
        self.line_regex.get_or_init(|| {
            Regex::new(r"^BenchmarkSolve/part([1-3])-[0-9]+\s+\d+\s+([0-9.]+)\s+ns/op$").unwrap()
        })
    }

    /// Scan raw benchmark output line by line. Lines that do not match the
    /// pattern are ignored; later matches for the same part overwrite
    /// earlier ones.
    pub fn parse_output(&self, puzzle_id: u8, output: &str) -> Result<BenchResult, ReportError> {
        let mut row = BenchResult::new(puzzle_id);
        for line in output.lines() {
            let Some(captures) = self.line_regex().captures(line) else {
                continue;
            };

            let value = parse_and_format(&captures[2])?;
            match &captures[1] {
                "1" => row.part1 = Some(value),
                "2" => row.part2 = Some(value),
                _ => row.part3 = Some(value),
            }
        }

        Ok(row)
    }
}

/// Run the benchmark in every `puzzleNN` subdirectory of `year_dir` and
/// parse the outputs, ascending by puzzle id. Any single failure aborts the
/// whole collection.
pub fn collect(year_dir: &Path, runner: &dyn BenchRunner) -> Result<Vec<BenchResult>, ReportError> {
    let parser = BenchParser::new();
    let mut entries: Vec<_> = fs::read_dir(year_dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut results = Vec::new();
    for entry in entries {
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(puzzle_id) = name.to_str().and_then(parse_puzzle_id) else {
            continue;
        };

        let output = runner.run(&entry.path())?;
        results.push(parser.parse_output(puzzle_id, &output)?);
    }

    results.sort_by_key(|row| row.puzzle_id);
    Ok(results)
}

fn parse_and_format(digits: &str) -> Result<String, ReportError> {
    let nanos = digits
        .parse::<f64>()
        .map_err(|_| ReportError::DurationParse(digits.to_string()))?;
    Ok(format_duration(nanos))
}

/// Format a nanosecond count with automatic unit scaling.
///
/// The scaled value is printed with two decimals, then trailing zeros and a
/// bare trailing decimal point are stripped: `1.5 ms`, `250 ns`, `3 s`.
pub fn format_duration(nanos: f64) -> String {
    let (value, unit) = if nanos >= 1e9 {
        (nanos / 1e9, "s")
    } else if nanos >= 1e6 {
        (nanos / 1e6, "ms")
    } else if nanos >= 1e3 {
        (nanos / 1e3, "us")
    } else {
        (nanos, "ns")
    };

    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text} {unit}")
}
