//! Data models for the search run and its extracted articles.
//!
//! This module defines the core data structures used throughout the application:
//! - [`SearchParameters`]: validated inputs for one run
//! - [`DateWindow`]: the inclusive calendar window searched
//! - [`RawArticleBlock`]: one unparsed result entry as read off the page
//! - [`ArticleRecord`]: the structured, enriched record that gets persisted

use crate::error::{HarvestError, Result};
use chrono::NaiveDate;

/// Validated search inputs, owned by the orchestrator for the run's lifetime.
#[derive(Debug, Clone)]
pub struct SearchParameters {
    /// The phrase typed into the site's search box.
    pub phrase: String,
    /// Free-text section name, matched against the site's section filter.
    pub category: String,
    /// How many months back to search, current month included.
    pub period_months: u32,
}

impl SearchParameters {
    /// Build parameters, rejecting an empty phrase or a zero period.
    pub fn new(phrase: String, category: String, period_months: u32) -> Result<Self> {
        if phrase.trim().is_empty() {
            return Err(HarvestError::Params("search phrase must not be empty".into()));
        }
        if period_months < 1 {
            return Err(HarvestError::Params("period must be at least 1 month".into()));
        }
        Ok(Self {
            phrase,
            category,
            period_months,
        })
    }
}

/// An inclusive `[start, end]` calendar window.
///
/// `start` is always the first day of a month; `end` is the day the run
/// happens. Derived once per run and never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window start in the site's `mm/dd/yyyy` input format.
    pub fn start_string(&self) -> String {
        self.start.format("%m/%d/%Y").to_string()
    }

    /// Window end in the site's `mm/dd/yyyy` input format.
    pub fn end_string(&self) -> String {
        self.end.format("%m/%d/%Y").to_string()
    }
}

/// One visible result entry, before parsing.
///
/// `text` holds the entry's rendered lines joined by `'\n'`. The figure
/// fields come from a position-keyed lookup against the entry's `img`
/// element; a failed lookup leaves both `None`.
#[derive(Debug, Clone)]
pub struct RawArticleBlock {
    pub text: String,
    pub figure_name: Option<String>,
    pub figure_url: Option<String>,
}

/// A structured, enriched article as it is persisted.
///
/// Equality is full structural equality, derived fields included; the
/// deduplication step relies on it. `figure_url` is stripped (set to `None`)
/// right before workbook export and is not recoverable afterward.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleRecord {
    pub title: String,
    pub date: String,
    pub description: Option<String>,
    pub figure_name: Option<String>,
    pub figure_url: Option<String>,
    /// Case-insensitive occurrences of the search phrase in the title.
    pub title_phrase_count: usize,
    /// Whether the title or description mentions a dollar amount.
    pub money: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_parameters_accepts_valid_input() {
        let params = SearchParameters::new("climate".into(), "Business".into(), 3).unwrap();
        assert_eq!(params.phrase, "climate");
        assert_eq!(params.category, "Business");
        assert_eq!(params.period_months, 3);
    }

    #[test]
    fn test_search_parameters_rejects_empty_phrase() {
        assert!(SearchParameters::new("   ".into(), "Business".into(), 1).is_err());
    }

    #[test]
    fn test_search_parameters_rejects_zero_period() {
        assert!(SearchParameters::new("climate".into(), "Business".into(), 0).is_err());
    }

    #[test]
    fn test_date_window_site_format() {
        let window = DateWindow {
            start: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        };
        assert_eq!(window.start_string(), "04/01/2024");
        assert_eq!(window.end_string(), "06/15/2024");
    }

    #[test]
    fn test_article_record_structural_equality() {
        let record = ArticleRecord {
            title: "Markets rally".into(),
            date: "June 1".into(),
            description: Some("Stocks climbed.".into()),
            figure_name: Some("traders".into()),
            figure_url: Some("https://example.com/a.jpg".into()),
            title_phrase_count: 1,
            money: false,
        };
        let twin = record.clone();
        assert_eq!(record, twin);

        let mut other = record.clone();
        other.money = true;
        assert_ne!(record, other);
    }
}
