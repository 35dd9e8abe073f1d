//! Image discovery and download
//!
//! Every `<img>` on a page is resolved against the page URL and reduced to a
//! file name (query dropped, basename of the path). Each file name is fetched
//! at most once per page. A failed download only means the asset is missing;
//! the validator reports questions that reference it.

use crate::scrape::fetcher::fetch_bytes;
use reqwest::Client;
use scraper::{Html, Selector};
use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// An image selected for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCandidate {
    pub url: Url,
    pub file_name: String,
}

/// What happened to the candidates of one page
#[derive(Debug, Clone, Default)]
pub struct AssetReport {
    pub downloaded: Vec<String>,
    /// File name and failure description
    pub failed: Vec<(String, String)>,
}

/// File name for an image source: basename of the path without query or fragment
///
/// Percent-escapes are decoded, so a raw `src` attribute and the path of the
/// resolved [`Url`] give the same name.
///
/// ```
/// use sbf_questions::scrape::asset_file_name;
///
/// assert_eq!(
///     asset_file_name("/SharedDocs/Bilder/Schallsignal_1.png?__blob=normal"),
///     Some("Schallsignal_1.png".to_string())
/// );
/// assert_eq!(
///     asset_file_name("/Bilder/Schallsignal_%C3%9Cberholen%201.png"),
///     Some("Schallsignal_Überholen 1.png".to_string())
/// );
/// assert_eq!(asset_file_name("/images/"), None);
/// ```
pub fn asset_file_name(src: &str) -> Option<String> {
    let path = src.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    let raw = path.rsplit('/').next().unwrap_or_default();
    let decoded = decode_lossy(raw);
    let name = decoded.trim();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        None
    } else {
        Some(name.to_string())
    }
}

/// Percent-decodes `s`, keeping it unchanged if the result is not UTF-8
fn decode_lossy(s: &str) -> Cow<'_, str> {
    urlencoding::decode(s).unwrap_or(Cow::Borrowed(s))
}

/// Collects the images of a page that should be downloaded
///
/// With a `marker`, only URLs containing it are kept; this keeps logos and
/// other site chrome out of the assets directory.
pub fn collect_asset_candidates(html: &str, page_url: &Url, marker: Option<&str>) -> Vec<AssetCandidate> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();
    let mut seen = HashSet::new();

    let Ok(img_selector) = Selector::parse("img[src]") else {
        return candidates;
    };

    for element in document.select(&img_selector) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };

        let url = match page_url.join(src.trim()) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("  Ignoring image '{}': {}", src, e);
                continue;
            }
        };

        if let Some(marker) = marker {
            if !decode_lossy(url.as_str()).contains(marker) {
                continue;
            }
        }

        let Some(file_name) = asset_file_name(url.path()) else {
            continue;
        };

        if seen.insert(file_name.clone()) {
            candidates.push(AssetCandidate { url, file_name });
        }
    }

    candidates
}

/// Downloads candidates sequentially into `assets_dir`
///
/// Existing files with the same name are overwritten.
pub async fn download_assets(
    client: &Client,
    candidates: &[AssetCandidate],
    assets_dir: &Path,
    timeout: Duration,
) -> AssetReport {
    let mut report = AssetReport::default();

    for candidate in candidates {
        let result = match fetch_bytes(client, candidate.url.as_str(), timeout).await {
            Ok(bytes) => tokio::fs::write(assets_dir.join(&candidate.file_name), bytes)
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(()) => {
                tracing::info!("  Downloaded asset: {}", candidate.file_name);
                report.downloaded.push(candidate.file_name.clone());
            }
            Err(error) => {
                tracing::warn!("Error downloading asset {}: {}", candidate.url, error);
                report.failed.push((candidate.file_name.clone(), error));
            }
        }
    }

    report
}
