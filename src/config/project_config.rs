//! Corpus-level configuration file support
//!
//! Loads per-corpus configuration from `cefr-pos.toml` or `.cefr-posrc.json`
//! in the input directory, or from an explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! # cefr-pos.toml
//!
//! [input]
//! extensions = ["txt"]
//!
//! [pipeline]
//! unknown_level = "bucket"  # or "fail"
//! on_error = "skip"         # or "abort"
//!
//! [freq_dist]
//! scope = "all"             # or "first"
//! top = 50
//!
//! [output]
//! emit_matrix_json = true
//!
//! [tagger]
//! model_dir = "/usr/local/share/cefr-pos"
//! ```

use super::{FreqScope, OnError, UnknownLevelPolicy};
use crate::error::{PipelineError, PipelineResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file names searched in the input directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["cefr-pos.toml", ".cefr-posrc.json"];

/// Settings read from a config file; every field is optional
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub pipeline: PipelineSection,

    #[serde(default)]
    pub freq_dist: FreqDistSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub tagger: TaggerSection,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct InputConfig {
    /// File extensions treated as documents (without the dot)
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct PipelineSection {
    #[serde(default)]
    pub unknown_level: Option<UnknownLevelPolicy>,

    #[serde(default)]
    pub on_error: Option<OnError>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct FreqDistSection {
    #[serde(default)]
    pub scope: Option<FreqScope>,

    /// Rows kept per level in the report
    #[serde(default)]
    pub top: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct OutputSection {
    /// Also write `pos_matrix.json` next to `pos_matrix.csv`
    #[serde(default)]
    pub emit_matrix_json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct TaggerSection {
    #[serde(default)]
    pub model_dir: Option<PathBuf>,
}

/// Load configuration from an explicit path. Any failure is a config error.
pub fn load_config_file(path: &Path) -> PipelineResult<ProjectConfig> {
    parse_config_file(path).map_err(|e| {
        PipelineError::Config(format!("failed to load {}: {}", path.display(), e))
    })
}

/// Load configuration discovered in the input directory.
///
/// A broken discovered file is logged and ignored; no file means defaults.
pub fn load_project_config(dir_in: &Path) -> ProjectConfig {
    for name in CONFIG_FILE_NAMES {
        let path = dir_in.join(name);
        if !path.exists() {
            continue;
        }
        match parse_config_file(&path) {
            Ok(config) => {
                debug!("Loaded corpus config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No corpus config found, using defaults");
    ProjectConfig::default()
}

fn parse_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_toml() {
        let config: ProjectConfig = toml::from_str(
            r#"
[input]
extensions = ["txt", "text"]

[pipeline]
unknown_level = "bucket"
on_error = "skip"

[freq_dist]
scope = "first"
top = 10

[output]
emit_matrix_json = true

[tagger]
model_dir = "/opt/model"
"#,
        )
        .unwrap();

        assert_eq!(
            config.input.extensions,
            Some(vec!["txt".to_string(), "text".to_string()])
        );
        assert_eq!(config.pipeline.unknown_level, Some(UnknownLevelPolicy::Bucket));
        assert_eq!(config.pipeline.on_error, Some(OnError::Skip));
        assert_eq!(config.freq_dist.scope, Some(FreqScope::First));
        assert_eq!(config.freq_dist.top, Some(10));
        assert_eq!(config.output.emit_matrix_json, Some(true));
        assert_eq!(config.tagger.model_dir, Some(PathBuf::from("/opt/model")));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_project_config(dir.path()), ProjectConfig::default());
    }

    #[test]
    fn test_broken_discovered_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cefr-pos.toml"), "[pipeline\nbroken").unwrap();
        assert_eq!(load_project_config(dir.path()), ProjectConfig::default());
    }

    #[test]
    fn test_json_config_discovered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".cefr-posrc.json"),
            r#"{"pipeline": {"unknown_level": "bucket"}}"#,
        )
        .unwrap();
        let config = load_project_config(dir.path());
        assert_eq!(config.pipeline.unknown_level, Some(UnknownLevelPolicy::Bucket));
    }

    #[test]
    fn test_explicit_broken_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[freq_dist]\nscope = \"sideways\"\n").unwrap();
        assert!(matches!(
            load_config_file(&path),
            Err(PipelineError::Config(_))
        ));
        assert!(matches!(
            load_config_file(&dir.path().join("absent.toml")),
            Err(PipelineError::Config(_))
        ));
    }
}
