//! Rule-based sentence segmentation
//!
//! Text converted from PDFs wraps sentences across lines and separates
//! headings with blank lines, so blank lines are hard boundaries and single
//! line breaks are treated as spaces.

use super::Segmenter;

/// Abbreviations that do not end a sentence when followed by a period
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "e.g", "i.e", "cf",
    "fig", "p", "pp", "vol", "ed", "approx", "dept", "inc", "ltd", "co", "jan", "feb", "mar",
    "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

/// Capitalized words that usually open a sentence rather than continue a name
const SENTENCE_OPENERS: &[&str] = &[
    "I", "It", "He", "She", "We", "They", "You", "The", "A", "An", "This", "That", "There",
    "These", "Those", "But", "And", "So", "Then", "In", "On", "At",
];

/// Characters that may open a sentence before its first word
const OPENERS: &[char] = &['"', '\'', '(', '[', '\u{201C}', '\u{2018}'];

/// Characters that may trail sentence-final punctuation
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '\u{201D}', '\u{2019}', '\u{00BB}'];

/// Sentence splitter driven by terminal punctuation and abbreviations
#[derive(Debug, Clone, Default)]
pub struct RuleSegmenter;

impl RuleSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl Segmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        for paragraph in paragraphs(text) {
            split_paragraph(&paragraph, &mut sentences);
        }
        sentences
    }
}

/// Group non-blank lines into paragraphs
fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join(" "));
    }
    out
}

fn split_paragraph(paragraph: &str, sentences: &mut Vec<String>) {
    let words: Vec<&str> = paragraph.split_whitespace().collect();
    let mut current: Vec<&str> = Vec::new();

    for (i, word) in words.iter().enumerate() {
        // Only words inside the current sentence count as context
        let prev = (!current.is_empty()).then(|| words[i - 1]);
        current.push(word);
        let next = words.get(i + 1).copied();
        if next.is_some_and(|next| ends_sentence(prev, word, next)) {
            sentences.push(current.join(" "));
            current.clear();
        }
    }
    if !current.is_empty() {
        sentences.push(current.join(" "));
    }
}

/// Whether `word` closes a sentence given its neighbours
fn ends_sentence(prev: Option<&str>, word: &str, next: &str) -> bool {
    let core = word.trim_end_matches(CLOSERS);
    let Some(last) = core.chars().last() else {
        return false;
    };
    if !matches!(last, '.' | '!' | '?' | '\u{2026}') {
        return false;
    }
    if !starts_new_sentence(next) {
        return false;
    }
    // Only a bare period can belong to an abbreviation
    if core.ends_with('.') && !core.ends_with("..") {
        let stem = core.trim_end_matches('.').trim_start_matches(OPENERS);
        if is_abbreviation(stem) || is_name_initial(prev, stem, next) {
            return false;
        }
    }
    true
}

fn starts_new_sentence(next: &str) -> bool {
    let Some(first) = next.chars().find(|c| !OPENERS.contains(c)) else {
        return true;
    };
    first.is_uppercase() || first.is_ascii_digit()
}

/// Listed abbreviations and dotted forms such as "U.S." or "e.g."
fn is_abbreviation(stem: &str) -> bool {
    let lower = stem.to_lowercase();
    if ABBREVIATIONS.contains(&lower.as_str()) {
        return true;
    }
    let parts: Vec<&str> = lower.split('.').collect();
    parts.len() > 1
        && parts
            .iter()
            .all(|part| part.chars().count() == 1 && part.chars().all(char::is_alphabetic))
}

/// An uppercase initial inside a name: "J. R. Brown", "John F. Kennedy".
///
/// Lowercase single letters ("plan b.") always end a sentence.
fn is_name_initial(prev: Option<&str>, stem: &str, next: &str) -> bool {
    if !is_single_capital(stem) {
        return false;
    }
    let prev_is_initial = prev.is_some_and(|p| is_single_capital(p.trim_end_matches('.')));
    if prev_is_initial || is_initial_word(next) {
        return true;
    }
    let next_word = bare(next);
    prev.is_some_and(|p| is_capitalized(bare(p)))
        && is_capitalized(next_word)
        && !SENTENCE_OPENERS.contains(&next_word)
}

fn is_single_capital(stem: &str) -> bool {
    let mut chars = stem.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

fn is_initial_word(word: &str) -> bool {
    word.trim_start_matches(OPENERS)
        .strip_suffix('.')
        .is_some_and(is_single_capital)
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(char::is_uppercase) && chars.next().is_some()
}

/// Word without surrounding punctuation
fn bare(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}
