//! TOML configuration.
//!
//! Every section has serde defaults, so an empty file yields a working
//! configuration that reads CSVs from `./data` and binds `127.0.0.1:8000`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::DatasetKind;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub encyclopedia: EncyclopediaConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    #[serde(default = "default_data_root")]
    pub root: PathBuf,
    #[serde(default)]
    pub files: DatasetFiles,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: default_data_root(),
            files: DatasetFiles::default(),
        }
    }
}

impl DataConfig {
    /// Full path of the CSV backing `kind`.
    pub fn path_for(&self, kind: DatasetKind) -> PathBuf {
        self.root.join(self.files.file_name(kind))
    }
}

fn default_data_root() -> PathBuf {
    PathBuf::from("./data")
}

/// File names of the six tables, relative to `data.root`.
#[derive(Debug, Deserialize, Clone)]
pub struct DatasetFiles {
    #[serde(default = "default_basic_file")]
    pub basic: String,
    #[serde(default = "default_classification_file")]
    pub classification: String,
    #[serde(default = "default_genome_file")]
    pub genome: String,
    #[serde(default = "default_proteome_file")]
    pub proteome: String,
    #[serde(default = "default_transcript_file")]
    pub transcript: String,
    #[serde(default = "default_phyto_file")]
    pub phyto: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            basic: default_basic_file(),
            classification: default_classification_file(),
            genome: default_genome_file(),
            proteome: default_proteome_file(),
            transcript: default_transcript_file(),
            phyto: default_phyto_file(),
        }
    }
}

impl DatasetFiles {
    pub fn file_name(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Basic => &self.basic,
            DatasetKind::Classification => &self.classification,
            DatasetKind::Genome => &self.genome,
            DatasetKind::Proteome => &self.proteome,
            DatasetKind::Transcript => &self.transcript,
            DatasetKind::Phyto => &self.phyto,
        }
    }
}

fn default_basic_file() -> String {
    "basic_info.csv".to_string()
}
fn default_classification_file() -> String {
    "class.csv".to_string()
}
fn default_genome_file() -> String {
    "genome.csv".to_string()
}
fn default_proteome_file() -> String {
    "proteome.csv".to_string()
}
fn default_transcript_file() -> String {
    "trans.csv".to_string()
}
fn default_phyto_file() -> String {
    "phyto.csv".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct EncyclopediaConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_summary_url")]
    pub summary_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for EncyclopediaConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            search_url: default_search_url(),
            summary_url: default_summary_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_enabled() -> bool {
    true
}
fn default_search_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}
fn default_summary_url() -> String {
    "https://en.wikipedia.org/api/rest_v1/page/summary".to_string()
}
fn default_timeout_secs() -> u64 {
    6
}
fn default_user_agent() -> String {
    format!("mpmdb/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    for kind in DatasetKind::ALL {
        if config.data.files.file_name(kind).trim().is_empty() {
            anyhow::bail!("data.files.{} must not be empty", kind);
        }
    }

    let encyclopedia = &config.encyclopedia;
    if encyclopedia.timeout_secs == 0 {
        anyhow::bail!("encyclopedia.timeout_secs must be > 0");
    }
    if encyclopedia.enabled {
        if encyclopedia.search_url.trim().is_empty() {
            anyhow::bail!("encyclopedia.search_url must be set when the fallback is enabled");
        }
        if encyclopedia.summary_url.trim().is_empty() {
            anyhow::bail!("encyclopedia.summary_url must be set when the fallback is enabled");
        }
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        validate(&config)?;
        Ok(config)
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.data.root, PathBuf::from("./data"));
        assert_eq!(config.data.files.transcript, "trans.csv");
        assert!(config.encyclopedia.enabled);
        assert_eq!(config.encyclopedia.timeout_secs, 6);
        assert_eq!(config.server.bind, "127.0.0.1:8000");
    }

    #[test]
    fn test_file_override_and_path_for() {
        let config = parse(
            r#"
[data]
root = "/srv/mpmdb"

[data.files]
phyto = "metabolites.csv"
"#,
        )
        .unwrap();
        assert_eq!(
            config.data.path_for(DatasetKind::Phyto),
            PathBuf::from("/srv/mpmdb/metabolites.csv")
        );
        assert_eq!(
            config.data.path_for(DatasetKind::Classification),
            PathBuf::from("/srv/mpmdb/class.csv")
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = parse("[encyclopedia]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_blank_url_only_rejected_when_enabled() {
        assert!(parse("[encyclopedia]\nsearch_url = \"\"\n").is_err());
        assert!(parse("[encyclopedia]\nenabled = false\nsearch_url = \"\"\n").is_ok());
    }

    #[test]
    fn test_blank_file_name_rejected() {
        let err = parse("[data.files]\ngenome = \" \"\n").unwrap_err();
        assert!(err.to_string().contains("data.files.genome"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
