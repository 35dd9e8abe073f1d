//! Integration tests for the validator
//!
//! Documents are written with the library's own serializer, then checked the
//! way the `validate` command checks an output directory.

use sbf_questions::config::DocumentConfig;
use sbf_questions::document::{write_document, AnswerOption, Document, QuestionRecord};
use sbf_questions::validate::{validate_directory, validate_file, write_bundled_schema, Schema};
use sbf_questions::ValidateError;
use std::path::Path;
use tempfile::TempDir;

fn option(text: &str, is_correct: bool) -> AnswerOption {
    AnswerOption {
        text: text.to_string(),
        is_correct,
    }
}

fn question(number: u32, options: Vec<AnswerOption>, assets: Vec<&str>) -> QuestionRecord {
    QuestionRecord {
        id: QuestionRecord::make_id("sbf-see", "bas", number),
        number,
        question: format!("Frage {}?", number),
        options,
        category: "basisfragen".to_string(),
        assets: assets.into_iter().map(String::from).collect(),
    }
}

fn write(dir: &Path, name: &str, questions: Vec<QuestionRecord>) {
    let document = Document::new(&DocumentConfig::default(), questions);
    write_document(&document, &dir.join(name)).expect("Failed to write document");
}

fn setup_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_bundled_schema(&dir.path().join("schema.json")).expect("Failed to write schema");
    dir
}

#[test]
fn test_valid_directory() {
    let dir = setup_dir();
    std::fs::create_dir(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets/Schallsignal.png"), b"img").unwrap();

    write(
        dir.path(),
        "basisfragen.yaml",
        vec![
            question(1, vec![option("a", true), option("b", false)], vec![]),
            question(
                2,
                vec![option("c", true), option("d", false)],
                vec!["assets/Schallsignal.png"],
            ),
        ],
    );

    let report = validate_directory(dir.path(), "schema.json").expect("Validation run failed");
    assert_eq!(report.total_files(), 1);
    assert!(report.all_valid(), "{:?}", report.results);
}

#[test]
fn test_missing_asset_invalidates_document() {
    let dir = setup_dir();
    write(
        dir.path(),
        "basisfragen.yaml",
        vec![question(
            1,
            vec![option("a", true), option("b", false)],
            vec!["assets/missing.png"],
        )],
    );

    let schema = Schema::load(&dir.path().join("schema.json")).unwrap();
    let report = validate_file(&dir.path().join("basisfragen.yaml"), Some(&schema)).unwrap();

    assert!(!report.is_valid());
    assert_eq!(
        report.errors,
        vec!["questions[0].assets: asset file not found: assets/missing.png".to_string()]
    );
}

#[test]
fn test_rule_violations_across_questions() {
    let dir = setup_dir();
    write(
        dir.path(),
        "broken.yaml",
        vec![
            question(1, vec![option("a", false), option("b", false)], vec![]),
            question(
                2,
                vec![option("a", true), option("b", true), option("c", false)],
                vec![],
            ),
            question(
                3,
                vec![option("a", true), option("b", false), option("a", false)],
                vec![],
            ),
        ],
    );

    let schema = Schema::load(&dir.path().join("schema.json")).unwrap();
    let report = validate_file(&dir.path().join("broken.yaml"), Some(&schema)).unwrap();

    assert_eq!(report.errors.len(), 3, "{:?}", report.errors);
    assert_eq!(report.errors[0], "questions[0].options: no correct answer");
    assert_eq!(report.errors[1], "questions[1].options: multiple correct answers (2)");
    assert!(report.errors[2].starts_with("questions[2].options[2]: duplicate answer text"));
}

#[test]
fn test_validation_is_idempotent() {
    let dir = setup_dir();
    write(
        dir.path(),
        "basisfragen.yaml",
        vec![question(1, vec![option("a", true), option("a", true)], vec!["assets/x.png"])],
    );

    let first = validate_directory(dir.path(), "schema.json").unwrap();
    let second = validate_directory(dir.path(), "schema.json").unwrap();
    assert_eq!(first.results, second.results);
    assert_eq!(first.results[0].1.errors.len(), 3);
}

#[test]
fn test_missing_schema_is_fatal() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "basisfragen.yaml",
        vec![question(1, vec![option("a", true)], vec![])],
    );

    let result = validate_directory(dir.path(), "schema.json");
    assert!(matches!(result, Err(ValidateError::SchemaNotFound(_))));
}

#[test]
fn test_empty_directory_is_fatal() {
    let dir = setup_dir();
    let result = validate_directory(dir.path(), "schema.json");
    assert!(matches!(result, Err(ValidateError::NoDocuments(_))));
}

#[test]
fn test_malformed_document_is_fatal() {
    let dir = setup_dir();
    std::fs::write(dir.path().join("bad.yaml"), "questions: [\n  - {text: ").unwrap();

    let result = validate_directory(dir.path(), "schema.json");
    assert!(matches!(result, Err(ValidateError::DocumentYaml { .. })));
}

#[test]
fn test_structural_errors_are_all_reported() {
    let dir = setup_dir();
    std::fs::write(
        dir.path().join("loose.yaml"),
        r#"course: SBF-See
version: '2024'
source: ELWIS
questions:
- id: sbf-see-bas-001
  number: 0
  question: ''
  options:
  - text: a
    isCorrect: true
  category: basisfragen
"#,
    )
    .unwrap();

    let schema = Schema::load(&dir.path().join("schema.json")).unwrap();
    let report = validate_file(&dir.path().join("loose.yaml"), Some(&schema)).unwrap();

    assert_eq!(report.errors.len(), 2, "{:?}", report.errors);
    assert!(report.errors.iter().any(|e| e.starts_with("questions.0.number: ")));
    assert!(report.errors.iter().any(|e| e.starts_with("questions.0.question: ")));
}

#[test]
fn test_documents_from_any_accepted_config_pass_the_schema() {
    let config = sbf_questions::config::parse_config(
        r#"
[document]
course = "SBF-Binnen"
source = "ELWIS-Binnen"
id-prefix = "sbf-binnen2"

[[category]]
name = "spezifische-binnen"
url = "https://example.com/binnen.html"
code = "sp-b"
"#,
    )
    .expect("Config should be accepted");

    let category = &config.categories[0];
    let record = QuestionRecord {
        id: QuestionRecord::make_id(&config.document.id_prefix, &category.id_code(), 1),
        number: 1,
        question: "Frage 1?".to_string(),
        options: vec![option("a", true), option("b", false)],
        category: category.name.clone(),
        assets: vec![],
    };
    assert_eq!(record.id, "sbf-binnen2-sp-b-001");

    let dir = setup_dir();
    let document = Document::new(&config.document, vec![record]);
    write_document(&document, &dir.path().join(category.file_name())).unwrap();

    let report = validate_directory(dir.path(), "schema.json").unwrap();
    assert!(report.all_valid(), "{:?}", report.results);
}
