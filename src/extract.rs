//! Article parsing and enrichment.
//!
//! Converts the raw per-entry text blocks collected from the result list into
//! structured [`ArticleRecord`]s: non-article entries (advertisements) are
//! discarded, derived signals are computed, and structural duplicates are
//! collapsed while preserving insertion order.

use crate::error::{HarvestError, Result};
use crate::models::{ArticleRecord, RawArticleBlock};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Dollar amounts with standard thousands grouping and optional cents:
/// `$5`, `$123`, `$111,111.11`. Worded currency ("11 dollars", "11 USD")
/// is intentionally not recognized.
static MONEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\d{1,3}(,\d{3})*(\.\d{2})?").unwrap());

/// Case-insensitive count of non-overlapping occurrences of `phrase` in `title`.
pub fn title_phrase_count(title: &str, phrase: &str) -> usize {
    if phrase.is_empty() {
        return 0;
    }
    title
        .to_lowercase()
        .matches(&phrase.to_lowercase())
        .count()
}

/// Whether `text` contains a dollar amount.
pub fn mentions_money(text: &str) -> bool {
    MONEY.is_match(text)
}

/// Parse the collected result blocks into deduplicated article records.
///
/// Per block: the first line is the date, the third the title, the fourth
/// (when present) the description. A block whose first line reads
/// "advertisement" (any case) is discarded. A block with fewer than three
/// lines means the page shape changed and the run cannot be trusted, so
/// parsing fails.
///
/// Deduplication is full structural equality, derived fields included; two
/// genuinely distinct articles that render identically collapse into one.
pub fn parse_articles(blocks: &[RawArticleBlock], phrase: &str) -> Result<Vec<ArticleRecord>> {
    let mut records = Vec::new();

    for (position, block) in blocks.iter().enumerate() {
        let lines: Vec<&str> = block.text.split('\n').collect();

        if lines[0].eq_ignore_ascii_case("advertisement") {
            debug!(position = position + 1, "Skipping advertisement entry");
            continue;
        }
        if lines.len() < 3 {
            return Err(HarvestError::PageShape(format!(
                "result entry {} has {} text lines, expected at least 3",
                position + 1,
                lines.len()
            )));
        }

        let title = lines[2].to_string();
        let description = lines.get(3).map(|s| s.to_string());
        let searchable = format!("{} {}", title, description.as_deref().unwrap_or_default());

        records.push(ArticleRecord {
            title_phrase_count: title_phrase_count(&title, phrase),
            money: mentions_money(&searchable),
            title,
            date: lines[0].to_string(),
            description,
            figure_name: block.figure_name.clone(),
            figure_url: block.figure_url.clone(),
        });
    }

    Ok(records.into_iter().unique().collect())
}
