//! Browser automation boundary.
//!
//! The pipeline drives the site through the [`Browser`] capability set and
//! never touches the automation library directly, so the concrete client can
//! change (or be faked in tests) without touching extraction logic. Locators
//! are opaque XPath strings; how they resolve is this module's business.

use crate::error::{HarvestError, Result};
use async_trait::async_trait;
use std::time::Duration;
use thirtyfour::prelude::*;
use tracing::debug;

/// How long interaction steps wait for their target element.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// WebDriver code for the Enter key; other names pass through as literal text.
fn key_code(key: &str) -> &str {
    match key {
        "ENTER" | "RETURN" => "\u{e007}",
        other => other,
    }
}

/// The capability set the pipeline consumes.
///
/// Every waiting method blocks until its target element shows up or the
/// timeout elapses; a timeout surfaces as an error for the caller's own
/// failure handling (the result expander treats it as "nothing left to
/// expand", everything else as terminal).
#[async_trait]
pub trait Browser: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Wait up to `timeout` for the element to be present, without touching it.
    async fn wait_for_visible(&self, locator: &str, timeout: Duration) -> Result<()>;

    async fn click(&self, locator: &str) -> Result<()>;

    async fn type_text(&self, locator: &str, text: &str) -> Result<()>;

    /// Send a named key ("ENTER"/"RETURN") to the element.
    async fn send_key(&self, locator: &str, key: &str) -> Result<()>;

    /// Rendered text of every element matching `locator`, in document order.
    async fn texts_of_all(&self, locator: &str) -> Result<Vec<String>>;

    /// An attribute of the first matching element; `None` when the attribute
    /// is absent.
    async fn attr(&self, locator: &str, name: &str) -> Result<Option<String>>;

    /// Tear the session down. Safe to call once; the session is unusable after.
    async fn close(&mut self) -> Result<()>;
}

/// [`Browser`] backed by a WebDriver endpoint via `thirtyfour`.
pub struct WebDriverBrowser {
    driver: Option<WebDriver>,
}

impl WebDriverBrowser {
    /// Connect to a running WebDriver server and open a maximized window.
    pub async fn connect(server_url: &str) -> Result<Self> {
        let caps = DesiredCapabilities::chrome();
        let driver = WebDriver::new(server_url, caps).await?;
        driver.maximize_window().await?;
        Ok(Self {
            driver: Some(driver),
        })
    }

    fn driver(&self) -> Result<&WebDriver> {
        self.driver.as_ref().ok_or(HarvestError::SessionClosed)
    }

    async fn wait_for(&self, locator: &str, timeout: Duration) -> Result<WebElement> {
        let element = self
            .driver()?
            .query(By::XPath(locator))
            .wait(timeout, POLL_INTERVAL)
            .first()
            .await?;
        Ok(element)
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!(%url, "Navigating");
        self.driver()?.goto(url).await?;
        Ok(())
    }

    async fn wait_for_visible(&self, locator: &str, timeout: Duration) -> Result<()> {
        self.wait_for(locator, timeout).await?;
        Ok(())
    }

    async fn click(&self, locator: &str) -> Result<()> {
        self.wait_for(locator, DEFAULT_WAIT).await?.click().await?;
        Ok(())
    }

    async fn type_text(&self, locator: &str, text: &str) -> Result<()> {
        self.wait_for(locator, DEFAULT_WAIT)
            .await?
            .send_keys(text)
            .await?;
        Ok(())
    }

    async fn send_key(&self, locator: &str, key: &str) -> Result<()> {
        self.wait_for(locator, DEFAULT_WAIT)
            .await?
            .send_keys(key_code(key))
            .await?;
        Ok(())
    }

    async fn texts_of_all(&self, locator: &str) -> Result<Vec<String>> {
        let elements = self.driver()?.find_all(By::XPath(locator)).await?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            texts.push(element.text().await?);
        }
        Ok(texts)
    }

    async fn attr(&self, locator: &str, name: &str) -> Result<Option<String>> {
        let element = self.driver()?.find(By::XPath(locator)).await?;
        Ok(element.attr(name).await?)
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(driver) = self.driver.take() {
            driver.quit().await?;
        }
        Ok(())
    }
}
