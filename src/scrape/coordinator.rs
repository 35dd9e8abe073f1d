//! Scrape run coordination
//!
//! Categories are processed one after another:
//! fetch page → extract questions → download assets → write document →
//! inline validation. A failed page fetch is logged and the category simply
//! contributes no questions. A pause is inserted between categories.

use crate::config::{CategoryConfig, Config};
use crate::document::{write_document, Document, QuestionRecord};
use crate::scrape::assets::{collect_asset_candidates, download_assets, AssetReport};
use crate::scrape::extractor::{extract_questions, ExtractOptions};
use crate::scrape::fetcher::{build_http_client, fetch_page};
use crate::validate::{validate_file, Schema};
use crate::ScrapeError;
use reqwest::Client;
use std::path::{Path, PathBuf};
use url::Url;

/// How many validation errors are echoed after writing a file
const SHOWN_ERRORS: usize = 5;

/// Result of the check that runs right after a document is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineValidation {
    /// No schema next to the output; not an error
    Skipped(String),
    Passed,
    Failed(Vec<String>),
}

impl InlineValidation {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Outcome for one category
#[derive(Debug, Clone)]
pub struct CategoryOutcome {
    pub name: String,
    /// Set when the page could not be fetched
    pub fetch_error: Option<String>,
    pub questions: usize,
    pub discarded: usize,
    pub assets: AssetReport,
    pub file: Option<PathBuf>,
    pub validation: Option<InlineValidation>,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default)]
pub struct ScrapeSummary {
    pub categories: Vec<CategoryOutcome>,
    pub combined_file: Option<PathBuf>,
    pub combined_validation: Option<InlineValidation>,
    pub total_questions: usize,
}

impl ScrapeSummary {
    /// Prints a short overview to stdout
    pub fn print(&self, output_dir: &Path) {
        println!("\n=== Scrape Summary ===\n");
        for category in &self.categories {
            match &category.fetch_error {
                Some(error) => println!("  {}: FAILED ({})", category.name, error),
                None => println!(
                    "  {}: {} questions, {} skipped, {} assets downloaded, {} assets failed",
                    category.name,
                    category.questions,
                    category.discarded,
                    category.assets.downloaded.len(),
                    category.assets.failed.len()
                ),
            }
        }
        println!("\nTotal questions scraped: {}", self.total_questions);
        println!("Output directory: {}", output_dir.display());
    }
}

/// Drives a scrape run
pub struct Coordinator<'a> {
    config: &'a Config,
    client: Client,
}

impl<'a> Coordinator<'a> {
    pub fn new(config: &'a Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.fetch)?;
        Ok(Self { config, client })
    }

    /// Runs every configured category and writes the combined document
    pub async fn run(&self) -> Result<ScrapeSummary, ScrapeError> {
        self.ensure_directories()?;

        let mut summary = ScrapeSummary::default();
        let mut all_questions: Vec<QuestionRecord> = Vec::new();

        for (idx, category) in self.config.categories.iter().enumerate() {
            if idx > 0 && !self.config.fetch.polite_delay().is_zero() {
                tokio::time::sleep(self.config.fetch.polite_delay()).await;
            }

            let (outcome, questions) = self.scrape_category(category).await?;
            all_questions.extend(questions);
            summary.categories.push(outcome);
        }

        summary.total_questions = all_questions.len();

        if !all_questions.is_empty() {
            let path = self.config.output.directory.join(&self.config.output.combined_file);
            let document = Document::new(&self.config.document, all_questions);
            write_document(&document, &path)?;
            summary.combined_validation = Some(self.inline_validate(&path));
            summary.combined_file = Some(path);
        }

        tracing::info!("Total questions scraped: {}", summary.total_questions);
        Ok(summary)
    }

    /// Scrapes one category; only output-file failures are errors
    async fn scrape_category(
        &self,
        category: &CategoryConfig,
    ) -> Result<(CategoryOutcome, Vec<QuestionRecord>), ScrapeError> {
        tracing::info!("Scraping {} from {}", category.name, category.url);

        let mut outcome = CategoryOutcome {
            name: category.name.clone(),
            fetch_error: None,
            questions: 0,
            discarded: 0,
            assets: AssetReport::default(),
            file: None,
            validation: None,
        };

        let html = match fetch_page(&self.client, &category.url, self.config.fetch.page_timeout()).await {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Error scraping {}: {}", category.url, e);
                outcome.fetch_error = Some(e.to_string());
                return Ok((outcome, Vec::new()));
            }
        };

        let report = extract_questions(&html, &ExtractOptions::new(self.config, category));
        tracing::info!(
            "  Parsed {} questions ({} candidates skipped)",
            report.questions.len(),
            report.discarded.len()
        );
        outcome.questions = report.questions.len();
        outcome.discarded = report.discarded.len();

        let page_url = Url::parse(&category.url)?;
        let candidates =
            collect_asset_candidates(&html, &page_url, self.config.assets.url_marker.as_deref());
        outcome.assets = download_assets(
            &self.client,
            &candidates,
            &self.config.output.assets_path(),
            self.config.fetch.asset_timeout(),
        )
        .await;

        if !report.questions.is_empty() {
            let path = self.config.output.directory.join(category.file_name());
            let document = Document::new(&self.config.document, report.questions.clone());
            write_document(&document, &path)?;
            outcome.validation = Some(self.inline_validate(&path));
            outcome.file = Some(path);
        }

        Ok((outcome, report.questions))
    }

    fn ensure_directories(&self) -> Result<(), ScrapeError> {
        std::fs::create_dir_all(&self.config.output.directory)?;
        std::fs::create_dir_all(self.config.output.assets_path())?;
        Ok(())
    }

    /// Validates a freshly written file if a schema sits next to it
    fn inline_validate(&self, path: &Path) -> InlineValidation {
        let schema_path = self.config.output.schema_path();
        let result = if !schema_path.exists() {
            InlineValidation::Skipped("Schema file not found - skipping validation".to_string())
        } else {
            match Schema::load(&schema_path).and_then(|schema| validate_file(path, Some(&schema))) {
                Ok(report) if report.is_valid() => InlineValidation::Passed,
                Ok(report) => InlineValidation::Failed(report.errors),
                Err(e) => InlineValidation::Failed(vec![format!("Validation error: {}", e)]),
            }
        };

        log_inline_validation(path, &result);
        result
    }
}

fn log_inline_validation(path: &Path, result: &InlineValidation) {
    match result {
        InlineValidation::Skipped(reason) => {
            tracing::info!("  Validation of {}: SKIPPED ({})", path.display(), reason)
        }
        InlineValidation::Passed => tracing::info!("  ✅ Validation of {}: PASSED", path.display()),
        InlineValidation::Failed(errors) => {
            tracing::warn!("  ❌ Validation of {}: FAILED", path.display());
            for error in errors.iter().take(SHOWN_ERRORS) {
                tracing::warn!("    {}", error);
            }
            if errors.len() > SHOWN_ERRORS {
                tracing::warn!("    ... and {} more errors", errors.len() - SHOWN_ERRORS);
            }
        }
    }
}

/// Runs a complete scrape with the given configuration
pub async fn run_scrape(config: &Config) -> Result<ScrapeSummary, ScrapeError> {
    Coordinator::new(config)?.run().await
}
