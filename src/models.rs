//! Core data models for cefr-pos
//!
//! These models are shared by the tagger, the aggregator and the
//! reporters.

use crate::level::{classify, Level};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// A single (word, tag) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaggedToken {
    pub word: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

// Serialized as `[word, tag]`
impl Serialize for TaggedToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.word, &self.tag).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TaggedToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (word, tag) = <(String, String)>::deserialize(deserializer)?;
        Ok(Self { word, tag })
    }
}

/// A sentence after tagging, with its derived counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSentence {
    pub text: String,
    pub tokens: Vec<TaggedToken>,
    pub word_count: usize,
    pub verb_count: usize,
}

impl TaggedSentence {
    /// Tags in token order
    pub fn tags(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.tag.clone()).collect()
    }

    /// Words in token order
    pub fn words(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.word.clone()).collect()
    }

    pub fn to_record(&self) -> SentenceRecord {
        SentenceRecord {
            wordcount: self.word_count,
            verb_count: self.verb_count,
            pos: self.tokens.clone(),
        }
    }
}

/// Per-sentence entry of the per-document JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub wordcount: usize,
    pub verb_count: usize,
    pub pos: Vec<TaggedToken>,
}

/// Per-document JSON output, keyed by sentence text in sentence order.
///
/// A sentence that occurs twice keeps its first position and the last value.
pub type DocumentTags = IndexMap<String, SentenceRecord>;

/// A source document and the level derived from its filename
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    /// File name without extension
    pub stem: String,
    pub text: String,
    pub level: Option<Level>,
}

impl Document {
    /// Build a document from its path and contents; the level is decided here, once.
    pub fn new(path: &Path, text: String) -> Self {
        let stem = file_stem(path);
        let level = classify(&stem);
        Self {
            path: path.to_path_buf(),
            stem,
            text,
            level,
        }
    }

    /// Name of the per-document JSON output file
    pub fn output_file_name(&self) -> String {
        output_file_name(&self.stem)
    }

    /// Output file name for a path, without reading the document
    pub fn output_file_name_for(path: &Path) -> String {
        output_file_name(&file_stem(path))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn output_file_name(stem: &str) -> String {
    format!("{}.json", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_token_serializes_as_pair() {
        let token = TaggedToken::new("cat", "NN");
        assert_eq!(serde_json::to_string(&token).unwrap(), r#"["cat","NN"]"#);
        let back: TaggedToken = serde_json::from_str(r#"["cat","NN"]"#).unwrap();
        assert_eq!(back, token);
    }

    #[test]
    fn test_document_level_from_stem() {
        let doc = Document::new(Path::new("/in/doc_B1Plus_2.txt"), "Hi.".into());
        assert_eq!(doc.stem, "doc_B1Plus_2");
        assert_eq!(doc.level, Some(Level::B1Plus));
        assert_eq!(doc.output_file_name(), "doc_B1Plus_2.json");

        let none = Document::new(Path::new("/in/readme.txt"), String::new());
        assert_eq!(none.level, None);
    }

    #[test]
    fn test_document_tags_keep_first_position() {
        let rec = |n| SentenceRecord {
            wordcount: n,
            verb_count: 0,
            pos: Vec::new(),
        };
        let mut tags = DocumentTags::new();
        tags.insert("One.".into(), rec(1));
        tags.insert("Two.".into(), rec(2));
        tags.insert("One.".into(), rec(3));
        let keys: Vec<_> = tags.keys().cloned().collect();
        assert_eq!(keys, vec!["One.", "Two."]);
        assert_eq!(tags["One."].wordcount, 3);
    }
}
