//! Question documents
//!
//! The data model shared by the scraper and the validator, and its YAML form.

mod serialize;
mod types;

pub use serialize::{load_document, to_yaml, write_document};
pub use types::{AnswerOption, Document, QuestionRecord};
