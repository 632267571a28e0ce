//! Error types for report building and patching

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or writing a year report
#[derive(Error, Debug)]
pub enum ReportError {
    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] goff_http_client::GoffError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The benchmark command could not be spawned
    #[error("bench run failed in {}: {source}", dir.display())]
    BenchSpawn {
        /// Directory the command ran in
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The benchmark command exited with a failure status
    #[error("bench command exited with {status} in {}", dir.display())]
    BenchStatus {
        /// Directory the command ran in
        dir: PathBuf,
        /// The exit status
        status: std::process::ExitStatus,
    },

    /// A benchmark line's duration capture did not parse as a number
    #[error("failed to parse bench duration: {0}")]
    DurationParse(String),
}
