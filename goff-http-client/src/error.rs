//! Error types for the FlipFlop HTTP client

use itertools::Itertools;
use thiserror::Error;

/// Errors that can occur when using the FlipFlop HTTP client
#[derive(Error, Debug)]
pub enum GoffError {
    /// HTTP request failed (transport-level)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status code received
    #[error("unexpected HTTP status: {status}")]
    InvalidStatus {
        /// The status code that was received
        status: reqwest::StatusCode,
    },

    /// Failed to decode response as UTF-8
    #[error("failed to decode response as UTF-8")]
    Encoding,

    /// The year page did not contain the score assignment, which means
    /// the session cookie was missing or stale
    #[error("score not found; are you logged in?")]
    NotAuthenticated,

    /// The requested part has no heading in the fetched puzzle page
    #[error("part {part} not found{}", format_available(.available))]
    PartNotFound {
        /// The part that was requested
        part: u8,
        /// Parts that do exist on the page, ascending
        available: Vec<u8>,
    },

    /// The part's article renders to no text at all
    #[error("part {part} is empty")]
    EmptySection {
        /// The part that was requested
        part: u8,
    },

    /// Part numbers start at 1
    #[error("invalid part: {part}")]
    InvalidPart { part: u8 },

    /// Years below 1000 are never valid puzzle years
    #[error("invalid year: {year}")]
    InvalidYear { year: u16 },

    /// The score capture did not parse as a number
    #[error("failed to parse score value: {0}")]
    ScoreParse(String),

    /// Client initialization failed
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

fn format_available(parts: &[u8]) -> String {
    if parts.is_empty() {
        String::new()
    } else {
        format!("; available parts: {}", parts.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_not_found_lists_available_parts() {
        let err = GoffError::PartNotFound {
            part: 3,
            available: vec![1, 2],
        };
        assert_eq!(err.to_string(), "part 3 not found; available parts: 1, 2");
    }

    #[test]
    fn part_not_found_without_available_parts() {
        let err = GoffError::PartNotFound {
            part: 1,
            available: vec![],
        };
        assert_eq!(err.to_string(), "part 1 not found");
    }
}
