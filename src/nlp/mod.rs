//! Sentence segmentation and part-of-speech tagging
//!
//! The pipeline only depends on the two capability traits defined here.
//! The default backends are rule based:
//! - `RuleSegmenter` - punctuation/abbreviation aware sentence splitting
//! - `RuleTagger` - lexicon + suffix + context Penn Treebank tagger

mod lexicon;
mod segmenter;
mod tagger;
mod tokenizer;

pub use lexicon::{Lexicon, LEXICON_FILE_NAME};
pub use segmenter::RuleSegmenter;
pub use tagger::RuleTagger;
pub use tokenizer::tokenize;

use crate::error::{PipelineError, PipelineResult};
use crate::models::{TaggedSentence, TaggedToken};

/// Splits raw document text into sentences
pub trait Segmenter {
    /// Sentences in document order. Must be deterministic and must not
    /// drop or duplicate non-whitespace content.
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Assigns a POS tag to every token of a sentence
pub trait Tagger {
    /// Backend name (for logging)
    fn name(&self) -> &str;

    /// Tokenize and tag a sentence, in token order
    fn tag_tokens(&self, sentence: &str) -> PipelineResult<Vec<TaggedToken>>;

    /// Whether a tag belongs to the verb class of this tagset
    fn is_verb(&self, tag: &str) -> bool {
        is_penn_verb(tag)
    }

    /// Tag a sentence and derive its word and verb counts
    fn tag(&self, sentence: &str) -> PipelineResult<TaggedSentence> {
        let tokens = self.tag_tokens(sentence)?;
        if tokens.is_empty() {
            return Err(PipelineError::Tagging {
                sentence: sentence.to_string(),
                reason: "sentence produced no tokens".into(),
            });
        }
        let verb_count = tokens.iter().filter(|t| self.is_verb(&t.tag)).count();
        Ok(TaggedSentence {
            text: sentence.to_string(),
            word_count: tokens.len(),
            verb_count,
            tokens,
        })
    }
}

/// Penn Treebank verb tags: VB, VBD, VBG, VBN, VBP, VBZ
pub fn is_penn_verb(tag: &str) -> bool {
    tag.starts_with("VB")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTagger(Vec<(&'static str, &'static str)>);

    impl Tagger for FixedTagger {
        fn name(&self) -> &str {
            "fixed"
        }

        fn tag_tokens(&self, _sentence: &str) -> PipelineResult<Vec<TaggedToken>> {
            Ok(self
                .0
                .iter()
                .map(|(w, t)| TaggedToken::new(*w, *t))
                .collect())
        }
    }

    #[test]
    fn test_counts_derived_from_tokens() {
        let tagger = FixedTagger(vec![("The", "DT"), ("cat", "NN"), ("sleeps", "VBZ"), (".", ".")]);
        let tagged = tagger.tag("The cat sleeps.").unwrap();
        assert_eq!(tagged.word_count, tagged.tokens.len());
        assert_eq!(tagged.word_count, 4);
        assert_eq!(tagged.verb_count, 1);
    }

    #[test]
    fn test_empty_token_list_is_tagging_error() {
        let tagger = FixedTagger(Vec::new());
        let err = tagger.tag("   ").unwrap_err();
        assert!(matches!(err, PipelineError::Tagging { .. }));
    }

    #[test]
    fn test_penn_verb_predicate() {
        for tag in ["VB", "VBD", "VBG", "VBN", "VBP", "VBZ"] {
            assert!(is_penn_verb(tag));
        }
        for tag in ["MD", "NN", "RB", "V"] {
            assert!(!is_penn_verb(tag));
        }
    }
}
