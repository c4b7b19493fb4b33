//! Configuration for a cefr-pos run
//!
//! This module handles:
//! - Output mode selection (per-document tags, POS matrix, frequency tables)
//! - Policies for unclassified documents and per-document failures
//! - Corpus-level config files (cefr-pos.toml)
//!
//! Precedence: built-in defaults < config file < CLI flags. The resolved
//! `RunConfig` is built once and passed explicitly to the pipeline.

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, FreqDistSection, InputConfig, OutputSection,
    PipelineSection, ProjectConfig, TaggerSection, CONFIG_FILE_NAMES,
};

use crate::error::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable pointing at the tagging model data directory
pub const MODEL_DIR_ENV: &str = "CEFR_POS_DATA";

/// Model data location used when neither flag, env nor config sets one
pub const DEFAULT_MODEL_DIR: &str = "/usr/local/share/cefr-pos";

/// Default document extensions
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt"];

/// Default number of rows per level in frequency reports
pub const DEFAULT_TOP_N: usize = 50;

/// What a frequency distribution counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreqKind {
    Words,
    Pos,
}

impl FromStr for FreqKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "words" => Ok(FreqKind::Words),
            "pos" => Ok(FreqKind::Pos),
            _ => Err(format!(
                "Unknown frequency distribution '{}'. Valid values: words, pos",
                s
            )),
        }
    }
}

impl fmt::Display for FreqKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreqKind::Words => write!(f, "words"),
            FreqKind::Pos => write!(f, "pos"),
        }
    }
}

/// Parse the `--freq_dist` value; an empty string switches it off
pub fn parse_freq_dist(s: &str) -> Result<Option<FreqKind>, String> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("none") || s == "0" {
        return Ok(None);
    }
    s.parse().map(Some)
}

/// Aggregation modes; independent and additive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateModes {
    /// Accumulate one tag list per sentence for the POS matrix
    pub pos_stats: bool,
    /// Accumulate flat words or tags for frequency distributions
    pub freq_dist: Option<FreqKind>,
}

impl AggregateModes {
    /// Whether any mode needs a level key per document
    pub fn any(&self) -> bool {
        self.pos_stats || self.freq_dist.is_some()
    }
}

/// How documents without a level token are aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownLevelPolicy {
    /// Raise `MissingLevelKey`
    #[default]
    Fail,
    /// Aggregate under an `UNKNOWN` key
    Bucket,
}

/// What to do when a single document fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Stop the run; nothing is written
    #[default]
    Abort,
    /// Log a warning and leave the document out
    Skip,
}

/// Which levels get a frequency report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreqScope {
    /// Every level, in level order
    #[default]
    All,
    /// Only the lowest level, in level order, that has data
    First,
}

macro_rules! lowercase_from_str {
    ($ty:ty, $($name:literal => $variant:expr),+ $(,)?) => {
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    _ => Err(format!(
                        "Unknown value '{}'. Valid values: {}",
                        s,
                        [$($name),+].join(", ")
                    )),
                }
            }
        }
    };
}

lowercase_from_str!(UnknownLevelPolicy, "fail" => UnknownLevelPolicy::Fail, "bucket" => UnknownLevelPolicy::Bucket);
lowercase_from_str!(OnError, "abort" => OnError::Abort, "skip" => OnError::Skip);
lowercase_from_str!(FreqScope, "all" => FreqScope::All, "first" => FreqScope::First);

/// Tagging backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Library {
    /// Built-in rule-based Penn Treebank tagger
    #[default]
    Nltk,
    /// Not available in this build
    Spacy,
}

lowercase_from_str!(Library, "nltk" => Library::Nltk, "spacy" => Library::Spacy);

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub dir_in: PathBuf,
    pub dir_out: PathBuf,
    pub library: Library,
    /// Write per-document JSON with tagged sentences
    pub pos_tags: bool,
    pub modes: AggregateModes,
    pub unknown_level: UnknownLevelPolicy,
    pub on_error: OnError,
    pub freq_scope: FreqScope,
    pub top_n: usize,
    pub extensions: Vec<String>,
    pub model_dir: PathBuf,
    pub emit_matrix_json: bool,
}

impl RunConfig {
    /// Defaults for the given directories
    pub fn new(dir_in: impl Into<PathBuf>, dir_out: impl Into<PathBuf>) -> Self {
        Self {
            dir_in: dir_in.into(),
            dir_out: dir_out.into(),
            library: Library::default(),
            pos_tags: true,
            modes: AggregateModes::default(),
            unknown_level: UnknownLevelPolicy::default(),
            on_error: OnError::default(),
            freq_scope: FreqScope::default(),
            top_n: DEFAULT_TOP_N,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            emit_matrix_json: false,
        }
    }

    /// Apply values from a config file (CLI flags are applied afterwards)
    pub fn apply_project_config(&mut self, project: &ProjectConfig) {
        if let Some(ext) = &project.input.extensions {
            self.extensions = ext
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect();
        }
        if let Some(policy) = project.pipeline.unknown_level {
            self.unknown_level = policy;
        }
        if let Some(on_error) = project.pipeline.on_error {
            self.on_error = on_error;
        }
        if let Some(scope) = project.freq_dist.scope {
            self.freq_scope = scope;
        }
        if let Some(top) = project.freq_dist.top {
            self.top_n = top;
        }
        if let Some(emit) = project.output.emit_matrix_json {
            self.emit_matrix_json = emit;
        }
        if let Some(dir) = &project.tagger.model_dir {
            self.model_dir = dir.clone();
        }
    }

    /// Reject settings that cannot produce a run
    pub fn validate(&self) -> PipelineResult<()> {
        if !self.dir_in.is_dir() {
            return Err(PipelineError::Config(format!(
                "input directory does not exist: {}",
                self.dir_in.display()
            )));
        }
        if self.dir_out.exists() && !self.dir_out.is_dir() {
            return Err(PipelineError::Config(format!(
                "output path is not a directory: {}",
                self.dir_out.display()
            )));
        }
        if self.library == Library::Spacy {
            return Err(PipelineError::Config(
                "the spacy backend is not available; use --library nltk".into(),
            ));
        }
        if !self.pos_tags && !self.modes.any() {
            return Err(PipelineError::Config(
                "nothing to do: enable --pos_tags, --pos_stats or --freq_dist".into(),
            ));
        }
        if self.modes.freq_dist.is_some() && self.top_n == 0 {
            return Err(PipelineError::Config("--top must be at least 1".into()));
        }
        if self.extensions.is_empty() {
            return Err(PipelineError::Config(
                "no input file extensions configured".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> (tempfile::TempDir, RunConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::new(dir.path(), dir.path().join("out"));
        (dir, config)
    }

    #[test]
    fn test_freq_dist_parsing() {
        assert_eq!(parse_freq_dist("words"), Ok(Some(FreqKind::Words)));
        assert_eq!(parse_freq_dist("POS"), Ok(Some(FreqKind::Pos)));
        assert_eq!(parse_freq_dist(""), Ok(None));
        assert!(parse_freq_dist("letters").is_err());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("bucket".parse::<UnknownLevelPolicy>(), Ok(UnknownLevelPolicy::Bucket));
        assert_eq!("SKIP".parse::<OnError>(), Ok(OnError::Skip));
        assert_eq!("first".parse::<FreqScope>(), Ok(FreqScope::First));
        assert_eq!("nltk".parse::<Library>(), Ok(Library::Nltk));
        let err = "maybe".parse::<OnError>().unwrap_err();
        assert!(err.contains("abort, skip"));
    }

    #[test]
    fn test_defaults_validate() {
        let (_dir, config) = valid_config();
        assert!(config.pos_tags);
        assert!(!config.modes.any());
        config.validate().unwrap();
    }

    #[test]
    fn test_missing_input_dir_is_config_error() {
        let (dir, mut config) = valid_config();
        config.dir_in = dir.path().join("missing");
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_no_output_mode_is_config_error() {
        let (_dir, mut config) = valid_config();
        config.pos_tags = false;
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
        config.modes.pos_stats = true;
        config.validate().unwrap();
    }

    #[test]
    fn test_spacy_is_rejected() {
        let (_dir, mut config) = valid_config();
        config.library = Library::Spacy;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("spacy"));
    }

    #[test]
    fn test_project_config_applied() {
        let (_dir, mut config) = valid_config();
        let project: ProjectConfig = toml::from_str(
            "[input]\nextensions = [\".TXT\"]\n[freq_dist]\ntop = 5\nscope = \"first\"\n",
        )
        .unwrap();
        config.apply_project_config(&project);
        assert_eq!(config.extensions, vec!["txt"]);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.freq_scope, FreqScope::First);
        assert_eq!(config.unknown_level, UnknownLevelPolicy::Fail);
    }
}
