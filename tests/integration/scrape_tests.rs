//! Integration tests for a full scrape run
//!
//! These tests use wiremock to serve catalogue pages and images, then check the
//! written documents, assets, and their validation.

use sbf_questions::config::{CategoryConfig, Config};
use sbf_questions::document::load_document;
use sbf_questions::scrape::{run_scrape, InlineValidation};
use sbf_questions::validate::{validate_directory, write_bundled_schema};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASIS_PAGE: &str = r#"<html><head><title>Basisfragen</title></head><body>
<div id="header"><img src="/static/logo.png" alt="ELWIS"></div>
<div id="content">
  <p class="wsv-red">Die jeweils erste Antwort ist die richtige.</p>
  <p>1. Welche Fahrzeuge gelten als Sportboote?</p>
  <ol class="elwisOL-lowerLiteral">
    <li>Alle Fahrzeuge, die für Sport- oder Erholungszwecke verwendet werden.</li>
    <li>Nur Segelboote.</li>
    <li>Nur Motorboote.</li>
  </ol>
  <p class="line"></p>
  <p>2. Was bedeutet folgendes Schallsignal?</p>
  <p class="picture"><img src="/SharedDocs/Bilder/Schallsignal_lang.png?__blob=normal" alt="ein langer Ton"></p>
  <ol class="elwisOL-lowerLiteral">
    <li>Achtung</li>
    <li>Ich ändere meinen Kurs nach Steuerbord</li>
  </ol>
  <p>3. Was bedeutet dieses Schallsignal?</p>
  <p class="picture"><img src="/SharedDocs/Bilder/Schallsignal_fehlt.png" alt="zwei kurze Töne"></p>
  <ol class="elwisOL-lowerLiteral">
    <li>Ich ändere meinen Kurs nach Backbord</li>
    <li>Ich arbeite rückwärts</li>
  </ol>
  <p>4. Unvollständige Frage ohne Antworten?</p>
  <ol class="elwisOL-lowerLiteral"></ol>
</div>
</body></html>"#;

const SPEZIFISCH_PAGE: &str = r#"<html><body><div id="content">
  <p>1. Was ist bei Nebel zu beachten?</p>
  <ol class="elwisOL-lowerLiteral">
    <li>Geschwindigkeit anpassen und Schallsignale geben</li>
    <li>Schneller fahren</li>
  </ol>
</div></body></html>"#;

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

fn create_test_config(server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.output.directory = dir.path().to_path_buf();
    config.fetch.polite_delay_ms = 10;
    config.fetch.page_timeout_secs = 5;
    config.fetch.asset_timeout_secs = 5;
    config.categories = vec![
        CategoryConfig {
            name: "basisfragen".to_string(),
            url: format!("{}/basis.html", server.uri()),
            code: None,
        },
        CategoryConfig {
            name: "spezifische-see".to_string(),
            url: format!("{}/spezifisch.html", server.uri()),
            code: None,
        },
    ];
    config
}

#[tokio::test]
async fn test_full_scrape_two_categories() {
    let server = MockServer::start().await;
    mount_page(&server, "/basis.html", BASIS_PAGE).await;
    mount_page(&server, "/spezifisch.html", SPEZIFISCH_PAGE).await;

    Mock::given(method("GET"))
        .and(path("/SharedDocs/Bilder/Schallsignal_lang.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x89PNG-lang".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/SharedDocs/Bilder/Schallsignal_fehlt.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/static/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"logo".to_vec()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server, &dir);
    write_bundled_schema(&config.output.schema_path()).expect("Failed to write schema");

    let summary = run_scrape(&config).await.expect("Scrape failed");

    assert_eq!(summary.total_questions, 4);
    assert_eq!(summary.categories[0].questions, 3);
    assert_eq!(summary.categories[0].discarded, 1);
    assert_eq!(summary.categories[0].assets.downloaded, vec!["Schallsignal_lang.png".to_string()]);
    assert_eq!(summary.categories[0].assets.failed.len(), 1);
    assert_eq!(summary.categories[1].questions, 1);

    // Per-category document
    let basis = load_document(&dir.path().join("basisfragen.yaml")).expect("Failed to load basisfragen");
    assert_eq!(basis.schema, "./schema.json");
    assert_eq!(basis.course, "SBF-See");
    let ids: Vec<&str> = basis.questions.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["sbf-see-bas-001", "sbf-see-bas-002", "sbf-see-bas-003"]);
    assert!(basis.questions.iter().all(|q| q.correct_count() == 1 && q.options[0].is_correct));
    assert_eq!(
        basis.questions[1].question,
        "Was bedeutet folgendes Schallsignal? [ein langer Ton]"
    );
    assert_eq!(basis.questions[1].assets, vec!["assets/Schallsignal_lang.png".to_string()]);

    // Downloaded image is where the record points
    assert_eq!(
        std::fs::read(dir.path().join("assets/Schallsignal_lang.png")).unwrap(),
        b"\x89PNG-lang"
    );
    assert!(!dir.path().join("assets/logo.png").exists());

    // Combined document keeps category order
    let all = load_document(&dir.path().join("all_questions.yaml")).expect("Failed to load combined");
    assert_eq!(all.questions.len(), 4);
    assert_eq!(all.questions[3].id, "sbf-see-spe-001");
    assert_eq!(all.questions[3].category, "spezifische-see");

    // Question 3 references an image that failed to download
    let expected_error = "questions[2].assets: asset file not found: assets/Schallsignal_fehlt.png".to_string();
    assert_eq!(
        summary.categories[0].validation,
        Some(InlineValidation::Failed(vec![expected_error.clone()]))
    );
    assert_eq!(summary.categories[1].validation, Some(InlineValidation::Passed));

    let report = validate_directory(dir.path(), "schema.json").expect("Validation run failed");
    assert_eq!(report.total_files(), 3);
    assert_eq!(report.invalid_files(), 2);
    assert!(!report.all_valid());
}

#[tokio::test]
async fn test_failed_page_does_not_stop_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/basis.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mount_page(&server, "/spezifisch.html", SPEZIFISCH_PAGE).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server, &dir);

    let summary = run_scrape(&config).await.expect("Scrape failed");

    assert!(summary.categories[0].fetch_error.is_some());
    assert_eq!(summary.categories[0].questions, 0);
    assert!(!dir.path().join("basisfragen.yaml").exists());

    assert_eq!(summary.categories[1].questions, 1);
    assert!(dir.path().join("spezifische-see.yaml").exists());
    assert_eq!(summary.total_questions, 1);

    // No schema next to the output: inline validation is skipped, not failed
    assert!(matches!(
        summary.categories[1].validation,
        Some(InlineValidation::Skipped(_))
    ));

    let report = sbf_questions::validate::validate_file(&dir.path().join("all_questions.yaml"), None)
        .expect("Failed to validate combined document");
    assert!(report.is_valid(), "{:?}", report.errors);
}

#[tokio::test]
async fn test_second_run_overwrites_documents() {
    let server = MockServer::start().await;
    mount_page(&server, "/basis.html", SPEZIFISCH_PAGE).await;
    mount_page(&server, "/spezifisch.html", SPEZIFISCH_PAGE).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server, &dir);

    let first = run_scrape(&config).await.expect("First scrape failed");
    let second = run_scrape(&config).await.expect("Second scrape failed");
    assert_eq!(first.total_questions, second.total_questions);

    let all = load_document(&dir.path().join("all_questions.yaml")).expect("Failed to load combined");
    assert_eq!(all.questions.len(), 2);
}
