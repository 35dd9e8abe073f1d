use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const BASISFRAGEN_URL: &str = "https://www.elwis.de/DE/Sportschifffahrt/Sportbootfuehrerscheine/Fragenkatalog-See/Basisfragen/Basisfragen-node.html";
const SPEZIFISCHE_SEE_URL: &str = "https://www.elwis.de/DE/Sportschifffahrt/Sportbootfuehrerscheine/Fragenkatalog-See/Spezifische-Fragen-See/Spezifische-Fragen-See-node.html";

/// Main configuration structure
///
/// Every section has a default, so an empty TOML file yields the built-in
/// ELWIS setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub output: OutputConfig,
    pub document: DocumentConfig,
    pub assets: AssetConfig,
    #[serde(rename = "category")]
    pub categories: Vec<CategoryConfig>,
}

/// HTTP behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Timeout for question pages (seconds)
    #[serde(rename = "page-timeout-secs")]
    pub page_timeout_secs: u64,

    /// Timeout for image downloads (seconds)
    #[serde(rename = "asset-timeout-secs")]
    pub asset_timeout_secs: u64,

    /// Pause between categories (milliseconds)
    #[serde(rename = "polite-delay-ms")]
    pub polite_delay_ms: u64,
}

/// Where documents and assets are written
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,

    /// Assets subdirectory, relative to `directory`
    #[serde(rename = "assets-dir")]
    pub assets_dir: String,

    /// Schema file name, relative to `directory`
    #[serde(rename = "schema-file")]
    pub schema_file: String,

    #[serde(rename = "combined-file")]
    pub combined_file: String,
}

/// Static metadata written into every document
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    #[serde(rename = "schema-ref")]
    pub schema_ref: String,
    pub course: String,
    pub version: String,
    pub source: String,

    /// Leading part of every question id
    #[serde(rename = "id-prefix")]
    pub id_prefix: String,
}

/// Asset download filtering
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetConfig {
    /// Only images whose URL contains this marker are downloaded
    #[serde(rename = "url-marker")]
    pub url_marker: Option<String>,
}

/// One question category and the page it is scraped from
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub url: String,

    /// Code used in question ids; defaults to the first three characters of `name`
    #[serde(default)]
    pub code: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            output: OutputConfig::default(),
            document: DocumentConfig::default(),
            assets: AssetConfig {
                url_marker: Some("Schallsignal".to_string()),
            },
            categories: vec![
                CategoryConfig {
                    name: "basisfragen".to_string(),
                    url: BASISFRAGEN_URL.to_string(),
                    code: None,
                },
                CategoryConfig {
                    name: "spezifische-see".to_string(),
                    url: SPEZIFISCHE_SEE_URL.to_string(),
                    code: None,
                },
            ],
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("sbf-questions/{}", env!("CARGO_PKG_VERSION")),
            page_timeout_secs: 30,
            asset_timeout_secs: 10,
            polite_delay_ms: 2000,
        }
    }
}

impl FetchConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn asset_timeout(&self) -> Duration {
        Duration::from_secs(self.asset_timeout_secs)
    }

    pub fn polite_delay(&self) -> Duration {
        Duration::from_millis(self.polite_delay_ms)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".data/courses/sbf-see"),
            assets_dir: "assets".to_string(),
            schema_file: "schema.json".to_string(),
            combined_file: "all_questions.yaml".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn assets_path(&self) -> PathBuf {
        self.directory.join(&self.assets_dir)
    }

    pub fn schema_path(&self) -> PathBuf {
        self.directory.join(&self.schema_file)
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            schema_ref: "./schema.json".to_string(),
            course: "SBF-See".to_string(),
            version: "2024".to_string(),
            source: "ELWIS".to_string(),
            id_prefix: "sbf-see".to_string(),
        }
    }
}

impl CategoryConfig {
    /// The code that goes into question ids
    pub fn id_code(&self) -> String {
        match &self.code {
            Some(code) => code.clone(),
            None => self.name.chars().take(3).collect(),
        }
    }

    /// File name of the per-category document
    pub fn file_name(&self) -> String {
        format!("{}.yaml", self.name)
    }
}
