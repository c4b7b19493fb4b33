//! Treebank-style word tokenization
//!
//! Splits negative contractions (`don't` -> `do` + `n't`), clitics
//! (`John's` -> `John` + `'s`) and punctuation into separate tokens.

use regex::Regex;
use std::sync::OnceLock;

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn token_pattern() -> &'static Regex {
    TOKEN_PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"\.\.\.",
            r"|[A-Za-z]+[nN]'[tT]",
            r"|'(?:[sSdDmM]|re|RE|ve|VE|ll|LL)\b",
            r"|\d+(?:[.,]\d+)*",
            r"|\w+(?:-\w+)*",
            r"|[^\w\s]",
        ))
        .expect("valid regex")
    })
}

/// Split a sentence into tokens, in order
pub fn tokenize(sentence: &str) -> Vec<String> {
    let normalized = sentence.replace(['\u{2019}', '\u{2018}'], "'");
    let mut tokens = Vec::new();

    for m in token_pattern().find_iter(&normalized) {
        let token = m.as_str();
        if let Some(stem) = negative_contraction_stem(token) {
            tokens.push(stem.to_string());
            tokens.push(token[stem.len()..].to_string());
        } else {
            tokens.push(token.to_string());
        }
    }
    tokens
}

/// `don't` -> `do`, `can't` -> `ca`
fn negative_contraction_stem(token: &str) -> Option<&str> {
    if token.len() > 3 && token.to_ascii_lowercase().ends_with("n't") {
        Some(&token[..token.len() - 3])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_and_punctuation() {
        assert_eq!(tokenize("The cat sleeps."), vec!["The", "cat", "sleeps", "."]);
        assert_eq!(
            tokenize("Well, (maybe) not!"),
            vec!["Well", ",", "(", "maybe", ")", "not", "!"]
        );
    }

    #[test]
    fn test_contractions() {
        assert_eq!(tokenize("I don't know"), vec!["I", "do", "n't", "know"]);
        assert_eq!(tokenize("You can't"), vec!["You", "ca", "n't"]);
        assert_eq!(tokenize("John's car"), vec!["John", "'s", "car"]);
        assert_eq!(tokenize("We're here"), vec!["We", "'re", "here"]);
        assert_eq!(tokenize("It\u{2019}s fine"), vec!["It", "'s", "fine"]);
    }

    #[test]
    fn test_numbers_hyphens_and_ellipsis() {
        assert_eq!(
            tokenize("A well-known fact: 3.5 or 1,000..."),
            vec!["A", "well-known", "fact", ":", "3.5", "or", "1,000", "..."]
        );
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokenize("  \t ").is_empty());
    }
}
