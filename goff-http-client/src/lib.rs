//! FlipFlop HTTP Client Library
//!
//! Utilities for talking to the FlipFlop puzzle site: year-score scraping,
//! puzzle-part text extraction, part-availability scanning, and puzzle
//! input download.
//!
//! # Features
//!
//! - Blocking synchronous API
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Session token attached per call as a `PHPSESSID` cookie
//! - Puzzle pages rendered to normalized plain text
//! - Well-typed errors using thiserror
//!
//! # Example
//!
//! ```no_run
//! use goff_http_client::GoffClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GoffClient::new()?;
//! let token = Some("your_session_token");
//!
//! // Scrape this year's pointers
//! let info = client.fetch_score(2025, token)?;
//! println!("Pointers: {}/{}", info.score, info.total);
//!
//! // Which parts of puzzle 3 are published?
//! let parts = client.available_parts(2025, 3, token)?;
//! println!("available: {parts:?}");
//!
//! // Read part 2's problem text
//! let text = client.fetch_part(2025, 3, 2, token)?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod extract;
mod parser;

pub use client::{GoffClient, GoffClientBuilder};
pub use error::GoffError;
pub use extract::{available_parts, extract_part_text};
pub use parser::ScoreInfo;
