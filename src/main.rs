//! # News Harvester
//!
//! Drives an automated browser session against a news site's search page,
//! extracts and normalizes the matching article metadata, downloads each
//! article's figure image, and appends the run's records as a new sheet in a
//! persistent multi-sheet workbook.
//!
//! ## Usage
//!
//! ```sh
//! PHRASE=climate CATEGORY=Business PERIOD=3 news_harvester
//! ```
//!
//! A WebDriver server (e.g. chromedriver) must be reachable at
//! `WEBDRIVER_URL` (default `http://localhost:9515`).
//!
//! ## Architecture
//!
//! The pipeline is strictly sequential:
//! 1. **Window**: compute the `[start, end]` search date window
//! 2. **Search**: open the site, submit the phrase, apply date and section filters
//! 3. **Expand**: click "show more" until the result list is exhausted
//! 4. **Extract**: parse the raw result blocks into deduplicated records
//! 5. **Output**: download figure images, append a sheet to `output/news.xlsx`
//!
//! The browser session is closed on every exit path, failures included.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod browser;
mod cli;
mod dates;
mod error;
mod extract;
mod fetch;
mod models;
mod outputs;
mod session;
mod utils;

use browser::{Browser, WebDriverBrowser};
use cli::Cli;
use dates::date_window;
use extract::parse_articles;
use fetch::{HttpImageFetcher, ImageFetcher};
use models::{DateWindow, SearchParameters};
use outputs::{images, workbook};
use session::{SearchSession, SITE_URL};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    let params = SearchParameters::new(args.phrase, args.category, args.period)?;
    let window = date_window(params.period_months, Local::now().date_naive());
    info!(
        site = SITE_URL,
        phrase = %params.phrase,
        category = %params.category,
        start = %window.start_string(),
        end = %window.end_string(),
        "Initialized news harvester"
    );

    let mut browser = match WebDriverBrowser::connect(&args.webdriver_url).await {
        Ok(browser) => browser,
        Err(e) => {
            error!(url = %args.webdriver_url, error = %e, "Could not start a browser session");
            return Err(e.into());
        }
    };
    let fetcher = HttpImageFetcher::new();

    // Failures of any kind funnel here: log once, then always tear the
    // session down before the process concludes.
    if let Err(e) = run(&browser, &fetcher, &params, &window, &args.output_dir).await {
        error!(error = %e, "Run failed");
    }
    if let Err(e) = browser.close().await {
        warn!(error = %e, "Failed to close the browser session");
    }

    let elapsed = start_time.elapsed();
    info!(secs = elapsed.as_secs(), millis = elapsed.subsec_millis(), "Execution complete");
    Ok(())
}

/// The full extraction pipeline for one run.
async fn run(
    browser: &dyn Browser,
    fetcher: &dyn ImageFetcher,
    params: &SearchParameters,
    window: &DateWindow,
    output_dir: &str,
) -> error::Result<()> {
    let session = SearchSession::new(browser);
    session.open(SITE_URL).await?;
    session.search(&params.phrase).await?;
    session.apply_date_filter(window).await?;
    session.apply_section_filter(&params.category).await?;
    session.expand_all_results().await?;
    let blocks = session.collect_blocks().await?;

    let mut records = parse_articles(&blocks, &params.phrase)?;
    info!(count = records.len(), "Found news articles");

    images::download_images(&records, fetcher, &format!("{output_dir}/images")).await?;

    let sheet_name =
        workbook::run_sheet_name(&params.phrase, &params.category, Local::now().naive_local());
    workbook::append_run_sheet(&format!("{output_dir}/news.xlsx"), &sheet_name, &mut records)?;

    Ok(())
}
