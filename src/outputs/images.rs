//! Figure image export.
//!
//! Downloads the figure of every record that has one into the images
//! directory. Fetch failures skip the record; a record without a figure URL
//! is skipped silently. Filenames come from the sanitized figure name, and
//! two records sanitizing to the same name overwrite each other, later write
//! wins.

use crate::error::Result;
use crate::fetch::ImageFetcher;
use crate::models::ArticleRecord;
use crate::utils::sanitize_file_name;
use tokio::fs;
use tracing::{debug, info, warn};

/// Download every record's figure into `images_dir`, creating it if needed.
///
/// Returns the number of images written.
pub async fn download_images(
    records: &[ArticleRecord],
    fetcher: &dyn ImageFetcher,
    images_dir: &str,
) -> Result<usize> {
    fs::create_dir_all(images_dir).await?;

    let mut written = 0;
    for record in records {
        let Some(url) = record.figure_url.as_deref() else {
            continue;
        };
        let Some(name) = record.figure_name.as_deref() else {
            debug!(%url, "Figure has no name; skipping");
            continue;
        };

        let payload = match fetcher.get(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(%url, error = %e, "Failed to fetch figure; skipping");
                continue;
            }
        };

        let path = format!("{}/{}.jpg", images_dir, sanitize_file_name(name));
        fs::write(&path, payload).await?;
        debug!(%path, "Wrote figure image");
        written += 1;
    }

    info!(count = written, %images_dir, "Downloaded figure images");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarvestError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    #[derive(Default)]
    struct CannedFetcher {
        payloads: HashMap<String, Vec<u8>>,
    }

    impl CannedFetcher {
        fn with(mut self, url: &str, payload: &[u8]) -> Self {
            self.payloads.insert(url.to_string(), payload.to_vec());
            self
        }
    }

    #[async_trait]
    impl ImageFetcher for CannedFetcher {
        async fn get(&self, url: &str) -> Result<Vec<u8>> {
            self.payloads
                .get(url)
                .cloned()
                .ok_or_else(|| HarvestError::ElementMissing(url.to_string()))
        }
    }

    fn record(name: Option<&str>, url: Option<&str>) -> ArticleRecord {
        ArticleRecord {
            title: "t".into(),
            date: "June 1".into(),
            description: None,
            figure_name: name.map(String::from),
            figure_url: url.map(String::from),
            title_phrase_count: 0,
            money: false,
        }
    }

    #[tokio::test]
    async fn test_downloads_named_figures() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = CannedFetcher::default().with("https://example.com/a.jpg", b"abc");
        let records = [record(Some("a chart"), Some("https://example.com/a.jpg"))];

        let written = download_images(&records, &fetcher, dir.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(written, 1);
        let bytes = std::fs::read(dir.path().join("a_chart.jpg")).unwrap();
        assert_eq!(bytes, b"abc");
    }

    #[tokio::test]
    async fn test_records_without_url_are_skipped_silently() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = CannedFetcher::default();
        let written = download_images(&[record(Some("x"), None)], &fetcher, dir.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(written, 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_record_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = CannedFetcher::default().with("https://example.com/ok.jpg", b"ok");
        let records = [
            record(Some("broken"), Some("https://example.com/missing.jpg")),
            record(Some("fine"), Some("https://example.com/ok.jpg")),
        ];

        let written = download_images(&records, &fetcher, dir.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(written, 1);
        assert!(dir.path().join("fine.jpg").exists());
        assert!(!dir.path().join("broken.jpg").exists());
    }

    #[tokio::test]
    async fn test_name_collision_keeps_later_payload() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = CannedFetcher::default()
            .with("https://example.com/1.jpg", b"first")
            .with("https://example.com/2.jpg", b"second");
        let records = [
            record(Some("same name"), Some("https://example.com/1.jpg")),
            record(Some("same-name"), Some("https://example.com/2.jpg")),
        ];

        let written = download_images(&records, &fetcher, dir.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(written, 2);

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
        let bytes = std::fs::read(dir.path().join("same_name.jpg")).unwrap();
        assert_eq!(bytes, b"second");
    }
}
