//! Question extraction from ELWIS catalogue pages
//!
//! The catalogue pages list each question as a numbered paragraph, optionally
//! followed by `p.picture` paragraphs holding images, followed by an
//! `ol.elwisOL-lowerLiteral` with the answers. The first answer is always the
//! correct one.
//!
//! Extraction is best-effort: a candidate paragraph that does not form a
//! complete question is recorded as a [`Discard`] and the scan continues.

use crate::config::{CategoryConfig, Config};
use crate::document::{AnswerOption, QuestionRecord};
use crate::scrape::assets::asset_file_name;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use std::sync::OnceLock;

const ANSWER_LIST_CLASS: &str = "elwisOL-lowerLiteral";
const PICTURE_CLASS: &str = "picture";

/// Paragraph classes that only ever hold separators and notes
const SKIPPED_CLASSES: [&str; 2] = ["line", "wsv-red"];

/// Per-category settings that shape the produced records
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub category: String,
    pub code: String,
    pub id_prefix: String,
    pub assets_dir: String,
}

impl ExtractOptions {
    pub fn new(config: &Config, category: &CategoryConfig) -> Self {
        Self {
            category: category.name.clone(),
            code: category.id_code(),
            id_prefix: config.document.id_prefix.clone(),
            assets_dir: config.output.assets_dir.clone(),
        }
    }
}

/// Why a question candidate was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    /// The paragraph is not followed by a lower-alpha answer list
    NoAnswerList,
    /// Nothing is left after removing the question number
    EmptyQuestion,
    /// The answer list has no non-empty items
    NoOptions,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAnswerList => write!(f, "no answer list follows the question"),
            Self::EmptyQuestion => write!(f, "question text is empty"),
            Self::NoOptions => write!(f, "answer list has no items"),
        }
    }
}

/// A dropped candidate, kept for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discard {
    /// Leading text of the candidate paragraph
    pub candidate: String,
    pub reason: DiscardReason,
}

/// Outcome of scanning one page
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    pub questions: Vec<QuestionRecord>,
    pub discarded: Vec<Discard>,
}

/// Extracts all questions from a catalogue page
///
/// Questions are numbered from 1 in page order; discarded candidates do not
/// consume a number.
///
/// # Example
///
/// ```
/// use sbf_questions::scrape::{extract_questions, ExtractOptions};
///
/// let html = r#"<div id="content">
///   <p>1. Was ist ein Sportboot?</p>
///   <ol class="elwisOL-lowerLiteral"><li>Ein Wasserfahrzeug</li><li>Ein Floß</li></ol>
/// </div>"#;
/// let options = ExtractOptions {
///     category: "basisfragen".to_string(),
///     code: "bas".to_string(),
///     id_prefix: "sbf-see".to_string(),
///     assets_dir: "assets".to_string(),
/// };
///
/// let report = extract_questions(html, &options);
/// assert_eq!(report.questions[0].id, "sbf-see-bas-001");
/// assert!(report.questions[0].options[0].is_correct);
/// ```
pub fn extract_questions(html: &str, options: &ExtractOptions) -> ExtractionReport {
    let document = Html::parse_document(html);
    let mut report = ExtractionReport::default();

    let (Ok(p_selector), Ok(img_selector)) = (Selector::parse("p"), Selector::parse("img")) else {
        return report;
    };

    let root = content_root(&document);
    let mut number = 0u32;

    for paragraph in root.select(&p_selector) {
        if is_skipped(paragraph) {
            continue;
        }

        let text = collapse_text(paragraph.text());
        if text.is_empty() || !question_start().is_match(&text) {
            continue;
        }

        match parse_question(paragraph, &text, number + 1, options, &img_selector) {
            Ok(record) => {
                number = record.number;
                tracing::debug!(
                    "  Parsed question {}: {}...",
                    record.number,
                    preview(&record.question)
                );
                report.questions.push(record);
            }
            Err(reason) => {
                tracing::debug!("  Skipped candidate '{}': {}", preview(&text), reason);
                report.discarded.push(Discard {
                    candidate: preview(&text),
                    reason,
                });
            }
        }
    }

    report
}

/// Builds one record from a question paragraph and the siblings after it
fn parse_question(
    paragraph: ElementRef<'_>,
    text: &str,
    number: u32,
    options: &ExtractOptions,
    img_selector: &Selector,
) -> Result<QuestionRecord, DiscardReason> {
    let mut images: Vec<ElementRef<'_>> = paragraph.select(img_selector).collect();

    let mut sibling = next_element(paragraph);
    while let Some(element) = sibling.filter(|e| is_picture(*e)) {
        images.extend(element.select(img_selector));
        sibling = next_element(element);
    }

    let list = sibling
        .filter(|e| is_answer_list(*e))
        .ok_or(DiscardReason::NoAnswerList)?;

    let stem = strip_number(text);
    if stem.is_empty() {
        return Err(DiscardReason::EmptyQuestion);
    }

    let mut parts = vec![stem.to_string()];
    parts.extend(
        images
            .iter()
            .filter_map(|img| img.value().attr("alt"))
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .map(|alt| format!("[{}]", alt)),
    );
    let question = parts.join(" ");

    let answers = answer_texts(list);
    if answers.is_empty() {
        return Err(DiscardReason::NoOptions);
    }

    let mut assets: Vec<String> = Vec::new();
    for src in images.iter().filter_map(|img| img.value().attr("src")) {
        if let Some(file_name) = asset_file_name(src) {
            let path = format!("{}/{}", options.assets_dir, file_name);
            if !assets.contains(&path) {
                assets.push(path);
            }
        }
    }

    Ok(QuestionRecord {
        id: QuestionRecord::make_id(&options.id_prefix, &options.code, number),
        number,
        question,
        options: answers
            .into_iter()
            .enumerate()
            .map(|(idx, text)| AnswerOption {
                text,
                is_correct: idx == 0,
            })
            .collect(),
        category: options.category.clone(),
        assets,
    })
}

/// Direct `li` children only; nested lists stay inside their item's text
fn answer_texts(list: ElementRef<'_>) -> Vec<String> {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "li")
        .map(|li| collapse_text(li.text()))
        .filter(|text| !text.is_empty())
        .collect()
}

fn content_root(document: &Html) -> ElementRef<'_> {
    Selector::parse("div#content")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element())
}

fn next_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

fn is_skipped(paragraph: ElementRef<'_>) -> bool {
    let classes: Vec<&str> = paragraph.value().classes().collect();
    classes.len() == 1 && SKIPPED_CLASSES.contains(&classes[0])
}

fn is_picture(element: ElementRef<'_>) -> bool {
    element.value().name() == "p" && element.value().classes().any(|c| c == PICTURE_CLASS)
}

fn is_answer_list(element: ElementRef<'_>) -> bool {
    element.value().name() == "ol" && element.value().classes().any(|c| c == ANSWER_LIST_CLASS)
}

fn question_start() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+\.\s+\w").expect("question pattern is valid"))
}

fn number_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+\.\s*").expect("number pattern is valid"))
}

fn strip_number(text: &str) -> &str {
    match number_prefix().find(text) {
        Some(m) => text[m.end()..].trim(),
        None => text.trim(),
    }
}

/// Joins text nodes and collapses runs of whitespace
fn collapse_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}
