//! Rule-based Penn Treebank tagger
//!
//! Tagging runs in two passes over the tokens of a sentence:
//! 1. Candidate tags from the lexicon, or from word shape and suffix for
//!    unknown words.
//! 2. Left-to-right disambiguation using the previous content token.

use super::lexicon::Lexicon;
use super::tokenizer::tokenize;
use super::Tagger;
use crate::error::PipelineResult;
use crate::models::TaggedToken;
use tracing::trace;

const HAVE_FORMS: &[&str] = &["have", "has", "had", "'ve", "having"];
const BE_FORMS: &[&str] = &["be", "am", "is", "are", "was", "were", "been", "being", "'m", "'re"];
const DO_FORMS: &[&str] = &["do", "does", "did"];
const THIRD_PERSON: &[&str] = &["he", "she", "it", "this", "that"];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ism", "ance", "ence", "ship", "hood", "ist",
];
const ADJ_SUFFIXES: &[&str] = &[
    "able", "ible", "ful", "ous", "ive", "al", "ic", "less", "ish", "ary",
];

/// Deterministic tagger over a word lexicon
#[derive(Debug, Clone)]
pub struct RuleTagger {
    lexicon: Lexicon,
}

impl RuleTagger {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    fn candidates(&self, word: &str, sentence_initial: bool) -> Vec<String> {
        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        if let Some(tags) = self.lexicon.get(word) {
            return tags.to_vec();
        }
        if capitalized && !sentence_initial && word.chars().any(char::is_alphabetic) {
            return vec!["NNP".to_string()];
        }
        guess_unknown(&word.to_lowercase())
            .iter()
            .map(|t| t.to_string())
            .collect()
    }
}

impl Tagger for RuleTagger {
    fn name(&self) -> &str {
        "rule-based (Penn Treebank)"
    }

    fn tag_tokens(&self, sentence: &str) -> PipelineResult<Vec<TaggedToken>> {
        let words = tokenize(sentence);
        let mut tagged: Vec<TaggedToken> = Vec::with_capacity(words.len());

        for (i, word) in words.iter().enumerate() {
            let sentence_initial = i == 0
                || tagged
                    .last()
                    .is_some_and(|t| matches!(t.tag.as_str(), "(" | "''" | "``" | ":" | "."));
            let candidates = self.candidates(word, sentence_initial);
            let context = tagged.iter().rev().find(|t| t.tag != "RB");
            let tag = choose(word, &candidates, context);
            trace!(word = %word, tag = %tag, "tagged");
            tagged.push(TaggedToken::new(word.clone(), tag));
        }
        Ok(tagged)
    }
}

/// Shape and suffix candidates for a lowercased word missing from the lexicon
fn guess_unknown(lower: &str) -> &'static [&'static str] {
    let len = lower.chars().count();
    if lower.chars().next().is_some_and(|c| c.is_ascii_digit())
        && lower.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return &["CD"];
    }
    if !lower.chars().any(char::is_alphanumeric) {
        return &["SYM"];
    }
    if lower.contains('-') {
        return &["JJ", "NN"];
    }
    if len > 4 && lower.ends_with("ing") {
        return &["VBG", "NN", "JJ"];
    }
    if len > 3 && lower.ends_with("ed") {
        return &["VBD", "VBN", "JJ"];
    }
    if len > 3 && lower.ends_with("ly") {
        return &["RB", "JJ"];
    }
    if NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return &["NN"];
    }
    if NOUN_SUFFIXES
        .iter()
        .any(|s| lower.strip_suffix('s').is_some_and(|stem| stem.ends_with(s)))
    {
        return &["NNS"];
    }
    if len > 4 && ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return &["JJ"];
    }
    if len > 2 && lower.ends_with('s') && !lower.ends_with("ss") {
        return &["NNS", "VBZ"];
    }
    &["NN", "VB", "VBP"]
}

/// Pick one candidate given the previous non-adverb token
fn choose(word: &str, candidates: &[String], prev: Option<&TaggedToken>) -> String {
    let default = candidates
        .first()
        .cloned()
        .unwrap_or_else(|| "NN".to_string());
    if candidates.len() < 2 {
        return default;
    }
    let Some(prev) = prev else {
        return default;
    };

    let has = |tag: &str| candidates.iter().any(|c| c == tag);
    let pick = |tag: &str| has(tag).then(|| tag.to_string());
    let prev_word = prev.word.to_lowercase();
    let prev_tag = prev.tag.as_str();

    if word == "'s" {
        let tag = if prev_tag.starts_with("NN") { "POS" } else { "VBZ" };
        return pick(tag).unwrap_or(default);
    }

    let chosen = match prev_tag {
        "MD" | "TO" => pick("VB"),
        _ if DO_FORMS.contains(&prev_word.as_str()) => pick("VB"),
        _ if HAVE_FORMS.contains(&prev_word.as_str()) => pick("VBN"),
        _ if BE_FORMS.contains(&prev_word.as_str()) => {
            pick("VBG").or_else(|| pick("VBN")).or_else(|| pick("JJ"))
        }
        "DT" | "PRP$" | "JJ" | "JJR" | "JJS" | "POS" | "CD" | "WP$" | "IN" => candidates
            .iter()
            .find(|c| c.starts_with("NN"))
            .cloned()
            .or_else(|| pick("JJ")),
        "PRP" | "EX" | "WP" | "WDT" if THIRD_PERSON.contains(&prev_word.as_str()) => {
            pick("VBZ").or_else(|| pick("VBD"))
        }
        "PRP" => pick("VBP").or_else(|| pick("VBD")),
        "NNS" | "NNPS" => pick("VBP").or_else(|| pick("VBD")),
        "NN" | "NNP" => pick("VBZ").or_else(|| pick("VBD")),
        _ => None,
    };
    chosen.unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagger() -> RuleTagger {
        let mut lexicon = Lexicon::builtin();
        lexicon
            .merge_tsv("cat\tNN\ndog\tNN\nrun\tVB\tVBP\tNN\nwalk\tVB\tVBP\tNN\nsleep\tVB\tVBP\tNN\n")
            .unwrap();
        RuleTagger::new(lexicon)
    }

    fn tags(sentence: &str) -> Vec<String> {
        tagger()
            .tag_tokens(sentence)
            .unwrap()
            .into_iter()
            .map(|t| t.tag)
            .collect()
    }

    #[test]
    fn test_simple_sentences() {
        assert_eq!(tags("The cat sleeps."), vec!["DT", "NN", "VBZ", "."]);
        assert_eq!(tags("Dogs run quickly."), vec!["NNS", "VBP", "RB", "."]);
    }

    #[test]
    fn test_modal_and_infinitive_take_base_form() {
        assert_eq!(tags("I can run"), vec!["PRP", "MD", "VB"]);
        assert_eq!(tags("We want to walk"), vec!["PRP", "VBP", "TO", "VB"]);
    }

    #[test]
    fn test_do_support_skips_negation() {
        assert_eq!(tags("I don't run"), vec!["PRP", "VBP", "RB", "VB"]);
    }

    #[test]
    fn test_determiner_prefers_noun_reading() {
        assert_eq!(tags("The run"), vec!["DT", "NN"]);
    }

    #[test]
    fn test_participles_after_auxiliaries() {
        assert_eq!(tags("She has walked"), vec!["PRP", "VBZ", "VBN"]);
        assert_eq!(tags("They are jumping"), vec!["PRP", "VBP", "VBG"]);
    }

    #[test]
    fn test_possessive_vs_is() {
        assert_eq!(tags("The cat's toy"), vec!["DT", "NN", "POS", "NN"]);
        assert_eq!(tags("It's late"), vec!["PRP", "VBZ", "NN"]);
    }

    #[test]
    fn test_unknown_word_shapes() {
        assert_eq!(guess_unknown("42"), ["CD"]);
        assert_eq!(guess_unknown("happily")[0], "RB");
        assert_eq!(guess_unknown("information")[0], "NN");
        assert_eq!(guess_unknown("informations")[0], "NNS");
        assert_eq!(guess_unknown("wonderful")[0], "JJ");
        assert_eq!(guess_unknown("&")[0], "SYM");
    }

    #[test]
    fn test_proper_noun_mid_sentence() {
        assert_eq!(tags("I visited Paris"), vec!["PRP", "VBD", "NNP"]);
    }

    #[test]
    fn test_word_count_matches_tokens() {
        let t = tagger();
        for s in ["The cat sleeps.", "I don't know, really!", "A well-known fact."] {
            let tagged = t.tag(s).unwrap();
            assert_eq!(tagged.word_count, tagged.tokens.len());
        }
        assert_eq!(t.tag("She has walked and run.").unwrap().verb_count, 3);
    }
}
