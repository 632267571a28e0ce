//! Status-page scraping with cached regex patterns

use crate::error::GoffError;
use regex::Regex;
use std::cell::OnceCell;

/// Score and total parts scraped from a year page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreInfo {
    /// Pointers scored so far this year
    pub score: u32,
    /// Total parts available, 0 when the page does not say
    pub total: u32,
}

/// Parser for FlipFlop year pages with cached regex patterns
#[derive(Clone, Debug)]
pub(crate) struct PageParser {
    score_regex: OnceCell<Regex>,
    total_regex: OnceCell<Regex>,
}

impl PageParser {
    /// Create a new parser with uninitialized caches
    pub fn new() -> Self {
        Self {
            score_regex: OnceCell::new(),
            total_regex: OnceCell::new(),
        }
    }

    /// Get or compile the score assignment regex
    fn score_regex(&self) -> &Regex {
        self.score_regex
            .get_or_init(|| Regex::new(r"const score = ([0-9]+);").unwrap())
    }

    /// Get or compile the completed-parts total regex
    fn total_regex(&self) -> &Regex {
        self.total_regex.get_or_init(|| {
            Regex::new(r#"completed <span class="score">\?</span>/([0-9]+) parts"#).unwrap()
        })
    }

    /// Scrape `(score, total)` from a year-page body.
    ///
    /// The score assignment only appears for logged-in sessions, so a
    /// missing match means [`GoffError::NotAuthenticated`]. The total is
    /// best-effort and defaults to 0 (unknown).
    pub fn scrape_score(&self, body: &str) -> Result<ScoreInfo, GoffError> {
        let captures = self
            .score_regex()
            .captures(body)
            .ok_or(GoffError::NotAuthenticated)?;
        let digits = &captures[1];
        let score = digits
            .parse::<u32>()
            .map_err(|_| GoffError::ScoreParse(digits.to_string()))?;

        let total = self
            .total_regex()
            .captures(body)
            .and_then(|captures| captures[1].parse::<u32>().ok())
            .unwrap_or(0);

        Ok(ScoreInfo { score, total })
    }

    /// The input endpoint serves a plain-text notice instead of an error
    /// status when the session is stale
    pub fn input_logged_out(&self, body: &str) -> bool {
        body.contains("You must be logged in")
    }
}

impl Default for PageParser {
    fn default() -> Self {
        Self::new()
    }
}
