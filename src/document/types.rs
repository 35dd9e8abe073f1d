use crate::config::DocumentConfig;
use serde::{Deserialize, Serialize};

/// One answer choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

/// A single exam question as scraped from a category page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,

    /// 1-based position within the category
    pub number: u32,
    pub question: String,

    /// Position 0 holds the correct answer on the source pages
    pub options: Vec<AnswerOption>,
    pub category: String,

    /// Image paths relative to the document's directory
    #[serde(default)]
    pub assets: Vec<String>,
}

impl QuestionRecord {
    /// Builds the deterministic id for a question
    ///
    /// ```
    /// use sbf_questions::QuestionRecord;
    ///
    /// assert_eq!(QuestionRecord::make_id("sbf-see", "bas", 7), "sbf-see-bas-007");
    /// ```
    pub fn make_id(prefix: &str, code: &str, number: u32) -> String {
        format!("{}-{}-{:03}", prefix, code, number)
    }

    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }
}

/// A serialized question set: metadata plus questions, in this key order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub course: String,
    pub version: String,
    pub source: String,
    pub questions: Vec<QuestionRecord>,
}

impl Document {
    pub fn new(meta: &DocumentConfig, questions: Vec<QuestionRecord>) -> Self {
        Self {
            schema: meta.schema_ref.clone(),
            course: meta.course.clone(),
            version: meta.version.clone(),
            source: meta.source.clone(),
            questions,
        }
    }
}
