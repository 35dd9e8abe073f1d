//! Domain rules checked on top of the schema
//!
//! These run on the raw document value, never on the typed model, so that a
//! document with broken structure still gets every rule it can be checked
//! against. Each question is checked in index order for:
//!
//! 1. exactly one option with `isCorrect: true`
//! 2. no repeated option text
//! 3. every asset path exists relative to the document's directory

use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Checks all questions in `document`
pub fn check_invariants(document: &Value, doc_dir: &Path) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(questions) = document.get("questions").and_then(Value::as_array) else {
        return errors;
    };

    for (idx, question) in questions.iter().enumerate() {
        if let Some(options) = question.get("options").and_then(Value::as_array) {
            check_correct_count(idx, options, &mut errors);
            check_duplicate_texts(idx, options, &mut errors);
        }

        if let Some(assets) = question.get("assets").and_then(Value::as_array) {
            check_assets_exist(idx, assets, doc_dir, &mut errors);
        }
    }

    errors
}

fn check_correct_count(idx: usize, options: &[Value], errors: &mut Vec<String>) {
    let correct = options
        .iter()
        .filter(|option| option.get("isCorrect").and_then(Value::as_bool) == Some(true))
        .count();

    match correct {
        0 => errors.push(format!("questions[{}].options: no correct answer", idx)),
        1 => {}
        n => errors.push(format!(
            "questions[{}].options: multiple correct answers ({})",
            idx, n
        )),
    }
}

/// Flags every repeat after the first occurrence of a text
fn check_duplicate_texts(idx: usize, options: &[Value], errors: &mut Vec<String>) {
    let mut seen = HashSet::new();

    for (opt_idx, option) in options.iter().enumerate() {
        let Some(text) = option.get("text").and_then(Value::as_str) else {
            continue;
        };
        if !seen.insert(text) {
            errors.push(format!(
                "questions[{}].options[{}]: duplicate answer text {:?}",
                idx, opt_idx, text
            ));
        }
    }
}

fn check_assets_exist(idx: usize, assets: &[Value], doc_dir: &Path, errors: &mut Vec<String>) {
    for asset in assets.iter().filter_map(Value::as_str) {
        if !doc_dir.join(asset).exists() {
            errors.push(format!(
                "questions[{}].assets: asset file not found: {}",
                idx, asset
            ));
        }
    }
}
