//! Word -> candidate tag lexicon
//!
//! The built-in table covers closed-class words and punctuation. Open-class
//! vocabulary comes from the model data directory (`lexicon.tsv`):
//!
//! ```text
//! # word <TAB> default tag [other tags...]
//! run	VB	VBP	NN
//! cat	NN
//! ```

use crate::error::{PipelineError, PipelineResult};
use rustc_hash::FxHashMap;
use std::path::Path;

/// File expected inside the model data directory
pub const LEXICON_FILE_NAME: &str = "lexicon.tsv";

/// Closed-class words and punctuation, Penn Treebank tags
const BUILTIN: &[(&str, &[&str])] = &[
    // Determiners
    ("the", &["DT"]),
    ("a", &["DT"]),
    ("an", &["DT"]),
    ("this", &["DT"]),
    ("that", &["IN", "DT", "WDT"]),
    ("these", &["DT"]),
    ("those", &["DT"]),
    ("every", &["DT"]),
    ("each", &["DT"]),
    ("some", &["DT"]),
    ("any", &["DT"]),
    ("no", &["DT"]),
    ("all", &["DT"]),
    ("both", &["DT"]),
    ("another", &["DT"]),
    // Prepositions / subordinators
    ("in", &["IN"]),
    ("on", &["IN"]),
    ("at", &["IN"]),
    ("of", &["IN"]),
    ("for", &["IN"]),
    ("with", &["IN"]),
    ("from", &["IN"]),
    ("by", &["IN"]),
    ("about", &["IN"]),
    ("into", &["IN"]),
    ("over", &["IN"]),
    ("under", &["IN"]),
    ("after", &["IN"]),
    ("before", &["IN"]),
    ("because", &["IN"]),
    ("if", &["IN"]),
    ("while", &["IN"]),
    ("during", &["IN"]),
    ("without", &["IN"]),
    ("between", &["IN"]),
    ("through", &["IN"]),
    ("like", &["IN", "VBP", "VB"]),
    ("than", &["IN"]),
    ("although", &["IN"]),
    ("since", &["IN"]),
    ("until", &["IN"]),
    ("as", &["IN"]),
    ("to", &["TO"]),
    // Conjunctions
    ("and", &["CC"]),
    ("or", &["CC"]),
    ("but", &["CC"]),
    ("nor", &["CC"]),
    ("yet", &["CC", "RB"]),
    // Pronouns
    ("i", &["PRP"]),
    ("you", &["PRP"]),
    ("he", &["PRP"]),
    ("she", &["PRP"]),
    ("it", &["PRP"]),
    ("we", &["PRP"]),
    ("they", &["PRP"]),
    ("me", &["PRP"]),
    ("him", &["PRP"]),
    ("us", &["PRP"]),
    ("them", &["PRP"]),
    ("myself", &["PRP"]),
    ("yourself", &["PRP"]),
    ("himself", &["PRP"]),
    ("herself", &["PRP"]),
    ("itself", &["PRP"]),
    ("themselves", &["PRP"]),
    ("my", &["PRP$"]),
    ("your", &["PRP$"]),
    ("his", &["PRP$"]),
    ("her", &["PRP$", "PRP"]),
    ("its", &["PRP$"]),
    ("our", &["PRP$"]),
    ("their", &["PRP$"]),
    ("there", &["EX", "RB"]),
    // Wh-words
    ("what", &["WP"]),
    ("who", &["WP"]),
    ("whom", &["WP"]),
    ("whose", &["WP$"]),
    ("which", &["WDT"]),
    ("where", &["WRB"]),
    ("when", &["WRB"]),
    ("why", &["WRB"]),
    ("how", &["WRB"]),
    // Modals
    ("can", &["MD"]),
    ("could", &["MD"]),
    ("will", &["MD"]),
    ("would", &["MD"]),
    ("shall", &["MD"]),
    ("should", &["MD"]),
    ("may", &["MD"]),
    ("might", &["MD"]),
    ("must", &["MD"]),
    ("ca", &["MD"]),
    ("wo", &["MD"]),
    ("'ll", &["MD"]),
    ("'d", &["MD"]),
    // Auxiliaries
    ("be", &["VB"]),
    ("am", &["VBP"]),
    ("is", &["VBZ"]),
    ("are", &["VBP"]),
    ("'m", &["VBP"]),
    ("'re", &["VBP"]),
    ("was", &["VBD"]),
    ("were", &["VBD"]),
    ("been", &["VBN"]),
    ("being", &["VBG"]),
    ("have", &["VBP", "VB"]),
    ("has", &["VBZ"]),
    ("had", &["VBD", "VBN"]),
    ("'ve", &["VBP"]),
    ("do", &["VBP", "VB"]),
    ("does", &["VBZ"]),
    ("did", &["VBD"]),
    // Adverbs and particles
    ("not", &["RB"]),
    ("n't", &["RB"]),
    ("very", &["RB"]),
    ("too", &["RB"]),
    ("also", &["RB"]),
    ("often", &["RB"]),
    ("never", &["RB"]),
    ("always", &["RB"]),
    ("here", &["RB"]),
    ("now", &["RB"]),
    ("then", &["RB"]),
    ("so", &["RB", "IN"]),
    ("up", &["RP", "IN"]),
    ("out", &["RP", "IN"]),
    ("'s", &["POS", "VBZ"]),
    // Punctuation
    (".", &["."]),
    ("!", &["."]),
    ("?", &["."]),
    (",", &[","]),
    (":", &[":"]),
    (";", &[":"]),
    ("-", &[":"]),
    ("...", &[":"]),
    ("(", &["("]),
    ("[", &["("]),
    (")", &[")"]),
    ("]", &[")"]),
    ("\"", &["''"]),
    ("'", &["''"]),
    ("$", &["$"]),
    ("%", &["NN"]),
    ("#", &["#"]),
];

/// Candidate tags per lowercased word; the first candidate is the default
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: FxHashMap<String, Vec<String>>,
}

impl Lexicon {
    /// Empty lexicon
    pub fn empty() -> Self {
        Self::default()
    }

    /// Closed-class lexicon compiled into the binary
    pub fn builtin() -> Self {
        let mut lexicon = Self::empty();
        for (word, tags) in BUILTIN {
            lexicon.insert(word, tags.iter().map(|t| t.to_string()).collect());
        }
        lexicon
    }

    /// Built-in lexicon merged with `lexicon.tsv` from a model data directory
    pub fn from_model_dir(dir: &Path) -> PipelineResult<Self> {
        if !dir.is_dir() {
            return Err(PipelineError::ModelData {
                path: dir.to_path_buf(),
                reason: "directory does not exist".into(),
            });
        }
        let path = dir.join(LEXICON_FILE_NAME);
        let content = std::fs::read_to_string(&path).map_err(|e| PipelineError::ModelData {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let mut lexicon = Self::builtin();
        lexicon
            .merge_tsv(&content)
            .map_err(|reason| PipelineError::ModelData { path, reason })?;
        Ok(lexicon)
    }

    /// Merge `word<TAB>tag...` lines; later entries replace earlier ones
    pub fn merge_tsv(&mut self, content: &str) -> Result<(), String> {
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let word = fields.next().unwrap_or_default();
            let tags: Vec<String> = fields.map(str::to_string).collect();
            if tags.is_empty() {
                return Err(format!("line {}: '{}' has no tag", idx + 1, word));
            }
            self.insert(word, tags);
        }
        Ok(())
    }

    pub fn insert(&mut self, word: &str, tags: Vec<String>) {
        self.entries.insert(word.to_lowercase(), tags);
    }

    /// Candidate tags for a word (case-insensitive)
    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.entries
            .get(word)
            .or_else(|| self.entries.get(&word.to_lowercase()))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
