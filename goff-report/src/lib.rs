//! Year progress reports for FlipFlop puzzle repositories
//!
//! Builds a per-year summary (pointers scored, part availability scraped
//! from the puzzle site, benchmark timings from the measurement tool) and
//! writes it into the repository README under fixed region markers, so the
//! hand-written parts of the document survive regeneration.
//!
//! # Example
//!
//! ```no_run
//! use goff_http_client::GoffClient;
//! use goff_report::{CommandRunner, build, update_readme};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GoffClient::new()?;
//! let runner = CommandRunner::default();
//! let root = Path::new(".");
//!
//! let summary = build(&client, &runner, 2025, Some("session_token"), root)?;
//! update_readme(&root.join("README.md"), &summary)?;
//! # Ok(())
//! # }
//! ```

mod bench;
mod error;
mod readme;
mod summary;

pub use bench::{BenchResult, BenchRunner, CommandRunner, collect, format_duration};
pub use error::ReportError;
pub use readme::{POINTERS_END, POINTERS_START, patch, region, update_readme};
pub use summary::{PuzzlePointers, YearSummary, build, render_summary, years};
