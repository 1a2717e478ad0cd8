//! Search session against the news site.
//!
//! Owns the interaction flow for one run: opening the site, submitting the
//! search phrase, applying the "Specific Dates" range and section filters,
//! expanding the paginated result list to exhaustion, and reading the raw
//! per-entry blocks back out. Everything goes through the [`Browser`]
//! capability set; the XPath locators for the site's search UI live here.

use crate::browser::Browser;
use crate::error::{HarvestError, Result};
use crate::models::{DateWindow, RawArticleBlock};
use crate::utils::truncate_for_log;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const SITE_URL: &str = "https://www.nytimes.com/";

/// Safety cap on "show more" expansions; the site has no hard page limit, so
/// an unexpectedly large result set is cut off here instead of spinning for
/// hours.
pub const MAX_EXPANSIONS: usize = 500;

/// Wait budget for the "show more" control; its absence ends expansion.
const EXPAND_WAIT: Duration = Duration::from_secs(10);

/// The result list re-renders after the section filter is applied.
const SECTION_SETTLE: Duration = Duration::from_secs(3);

mod locators {
    pub const SEARCH_BUTTON: &str =
        "/html/body/div[1]/div[2]/div[2]/header/section[1]/div[1]/div[2]/button";
    pub const SEARCH_INPUT: &str =
        "/html/body/div[1]/div[2]/div[2]/header/section[1]/div[1]/div[2]/div/form/div/input";
    pub const SEARCH_SUBMIT: &str =
        "/html/body/div[1]/div[2]/div[2]/header/section[1]/div[1]/div[2]/div/form/button";
    pub const DATE_DROPDOWN: &str =
        "/html/body/div/div[2]/main/div/div[1]/div[2]/div/div/div[1]/div/div/button";
    pub const DATE_OPTIONS: &str =
        "/html/body/div/div[2]/main/div/div[1]/div[2]/div/div/div[1]/div/div/div/ul/li";
    pub const DATE_START_INPUT: &str =
        "/html/body/div/div[2]/main/div/div[1]/div[2]/div/div/div[1]/div/div/div/div[2]/div/label[1]/input";
    pub const DATE_END_INPUT: &str =
        "/html/body/div/div[2]/main/div/div[1]/div[2]/div/div/div[1]/div/div/div/div[2]/div/label[2]/input";
    pub const SECTION_DROPDOWN: &str =
        "/html/body/div/div[2]/main/div/div[1]/div[2]/div/div/div[2]/div/div/button";
    pub const SECTION_OPTIONS: &str =
        "/html/body/div/div[2]/main/div/div[1]/div[2]/div/div/div[2]/div/div/div/ul/li";
    pub const SHOW_MORE_BUTTON: &str =
        "/html/body/div/div[2]/main/div/div[2]/div[3]/div/button";
    pub const RESULT_ITEMS: &str =
        "/html/body/div/div[2]/main/div/div[2]/div[2]/ol/li";
}

/// Outcome of matching the requested category against the site's sections.
///
/// `position` is 1-indexed because that is what the site's option list
/// expects when clicking `li[position]`; internal matching is 0-indexed and
/// the reported position is always `match index + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionChoice {
    pub position: usize,
    pub matched: bool,
}

/// Match `category` case-insensitively as a substring of each label, in
/// order, first match wins. No match falls back to position 1, the site's
/// implicit "all sections" entry.
pub fn resolve_section(labels: &[String], category: &str) -> SectionChoice {
    let needle = category.to_lowercase();
    for (index, label) in labels.iter().enumerate() {
        if label.to_lowercase().contains(&needle) {
            return SectionChoice {
                position: index + 1,
                matched: true,
            };
        }
    }
    SectionChoice {
        position: 1,
        matched: false,
    }
}

/// One run's interaction flow, in call order: [`open`](Self::open),
/// [`search`](Self::search), [`apply_date_filter`](Self::apply_date_filter),
/// [`apply_section_filter`](Self::apply_section_filter),
/// [`expand_all_results`](Self::expand_all_results),
/// [`collect_blocks`](Self::collect_blocks).
pub struct SearchSession<'a> {
    browser: &'a dyn Browser,
}

impl<'a> SearchSession<'a> {
    pub fn new(browser: &'a dyn Browser) -> Self {
        Self { browser }
    }

    pub async fn open(&self, url: &str) -> Result<()> {
        info!(%url, "Opening site");
        self.browser.navigate(url).await
    }

    /// Type the phrase into the site's search box and submit.
    pub async fn search(&self, phrase: &str) -> Result<()> {
        self.browser.click(locators::SEARCH_BUTTON).await?;
        self.browser.type_text(locators::SEARCH_INPUT, phrase).await?;
        self.browser.click(locators::SEARCH_SUBMIT).await?;
        Ok(())
    }

    /// Switch the date filter to "Specific Dates" mode and enter the window.
    pub async fn apply_date_filter(&self, window: &DateWindow) -> Result<()> {
        info!(
            start = %window.start_string(),
            end = %window.end_string(),
            "Searching for news in date window"
        );
        self.browser.click(locators::DATE_DROPDOWN).await?;

        let options = self.browser.texts_of_all(locators::DATE_OPTIONS).await?;
        let specific = options
            .iter()
            .position(|text| text == "Specific Dates")
            .ok_or_else(|| {
                HarvestError::ElementMissing("'Specific Dates' option not in date filter".into())
            })?;
        self.browser
            .click(&format!("{}[{}]", locators::DATE_OPTIONS, specific + 1))
            .await?;

        self.browser
            .type_text(locators::DATE_START_INPUT, &window.start_string())
            .await?;
        self.browser
            .type_text(locators::DATE_END_INPUT, &window.end_string())
            .await?;
        self.browser.send_key(locators::DATE_END_INPUT, "ENTER").await?;
        Ok(())
    }

    /// Resolve `category` against the rendered section options and apply it.
    ///
    /// An unmatched category is reported, not fatal: the run falls back to
    /// the first option and continues across all sections.
    pub async fn apply_section_filter(&self, category: &str) -> Result<SectionChoice> {
        self.browser.click(locators::SECTION_DROPDOWN).await?;
        let labels = self.browser.texts_of_all(locators::SECTION_OPTIONS).await?;
        for label in &labels {
            debug!(%label, "Section option");
        }

        let choice = resolve_section(&labels, category);
        if !choice.matched {
            warn!(
                %category,
                "Section not found. Searching all sections instead."
            );
        }

        self.browser
            .click(&format!("{}[{}]", locators::SECTION_OPTIONS, choice.position))
            .await?;
        self.browser.click(locators::SECTION_DROPDOWN).await?;
        tokio::time::sleep(SECTION_SETTLE).await;
        Ok(choice)
    }

    /// Click "show more" until the control stops appearing.
    ///
    /// Absence of the control within [`EXPAND_WAIT`] is the termination
    /// condition; never seeing it at all just means there was nothing to
    /// expand. [`MAX_EXPANSIONS`] bounds the loop on runaway result sets.
    pub async fn expand_all_results(&self) -> Result<usize> {
        let mut expansions = 0;
        while expansions < MAX_EXPANSIONS {
            if self
                .browser
                .wait_for_visible(locators::SHOW_MORE_BUTTON, EXPAND_WAIT)
                .await
                .is_err()
            {
                break;
            }
            if self.browser.click(locators::SHOW_MORE_BUTTON).await.is_err() {
                break;
            }
            expansions += 1;
        }
        if expansions >= MAX_EXPANSIONS {
            warn!(
                expansions,
                "Hit the expansion cap; extracting what is visible"
            );
        }
        debug!(expansions, "Result expansion finished");
        Ok(expansions)
    }

    /// Read every visible result entry into a [`RawArticleBlock`].
    pub async fn collect_blocks(&self) -> Result<Vec<RawArticleBlock>> {
        let texts = self.browser.texts_of_all(locators::RESULT_ITEMS).await?;
        let mut blocks = Vec::with_capacity(texts.len());

        for (index, text) in texts.into_iter().enumerate() {
            let position = index + 1;
            debug!(position, text = %truncate_for_log(&text, 120), "Result entry");
            let (figure_name, figure_url) = self.figure_info(position).await;
            blocks.push(RawArticleBlock {
                text,
                figure_name,
                figure_url,
            });
        }
        Ok(blocks)
    }

    /// Figure metadata for the entry at 1-based `position`; any lookup
    /// failure nulls both fields rather than failing the block.
    async fn figure_info(&self, position: usize) -> (Option<String>, Option<String>) {
        let img = format!(
            "{}[{}]/div/div/figure/div/img",
            locators::RESULT_ITEMS,
            position
        );
        let alt = self.browser.attr(&img, "alt").await;
        let src = self.browser.attr(&img, "src").await;
        match (alt, src) {
            (Ok(name), Ok(url)) => (name, url),
            _ => {
                debug!(position, "No figure for result entry");
                (None, None)
            }
        }
    }
}
