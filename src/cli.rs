//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The search inputs can be provided via command-line flags or the `PHRASE`,
//! `CATEGORY`, `PERIOD`, and `WEBDRIVER_URL` environment variables.

use clap::Parser;

/// Command-line arguments for the news harvester.
///
/// # Examples
///
/// ```sh
/// # Flags
/// news_harvester --phrase climate --category Business --period 3
///
/// # Environment
/// PHRASE=climate CATEGORY=Business PERIOD=3 news_harvester
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search phrase typed into the site's search box
    #[arg(long, env = "PHRASE")]
    pub phrase: String,

    /// Section name to filter results by (e.g. "Business")
    #[arg(long, env = "CATEGORY")]
    pub category: String,

    /// Number of months back to search, current month included
    #[arg(long, env = "PERIOD", value_parser = clap::value_parser!(u32).range(1..))]
    pub period: u32,

    /// WebDriver server endpoint to drive the browser through
    #[arg(long, env = "WEBDRIVER_URL", default_value = "http://localhost:9515")]
    pub webdriver_url: String,

    /// Directory receiving the workbook and downloaded images
    #[arg(short, long, default_value = "output")]
    pub output_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "news_harvester",
            "--phrase",
            "climate",
            "--category",
            "Business",
            "--period",
            "3",
        ]);

        assert_eq!(cli.phrase, "climate");
        assert_eq!(cli.category, "Business");
        assert_eq!(cli.period, 3);
        assert_eq!(cli.output_dir, "output");
        assert_eq!(cli.webdriver_url, "http://localhost:9515");
    }

    #[test]
    fn test_cli_rejects_zero_period() {
        let result = Cli::try_parse_from([
            "news_harvester",
            "--phrase",
            "climate",
            "--category",
            "Business",
            "--period",
            "0",
        ]);
        assert!(result.is_err());
    }
}
