/*!
 * Lossless tokenization of subtitle text.
 *
 * Text is split on whitespace runs and on the single punctuation characters
 * `. , ! ? ; : ( ) "`. Separators become tokens of their own, so joining all
 * tokens in order gives back the original text byte for byte.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// @const: Characters that split words and get stripped from clean forms
pub const PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '(', ')', '"'];

// @const: Separator pattern (whitespace run or one punctuation character)
static SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\s+|[.,!?;:()"]"#).unwrap()
});

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Punctuation,
    Whitespace,
}

/// A classified substring of subtitle text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Position within the tokenization
    pub index: usize,
    /// Original text of the token (display form)
    pub text: &'a str,
    /// Token class
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    /// Whether clicks on this token are ignored
    pub fn is_skippable(&self) -> bool {
        self.kind != TokenKind::Word || self.clean_form().is_empty()
    }

    /// Whether the token can be clicked and copied
    pub fn is_addressable(&self) -> bool {
        !self.is_skippable()
    }

    /// Token text with leading and trailing punctuation stripped
    pub fn clean_form(&self) -> &'a str {
        self.text.trim_matches(PUNCTUATION)
    }

    /// Token text exactly as it appears in the subtitle
    pub fn display_form(&self) -> &'a str {
        self.text
    }
}

fn classify(text: &str) -> TokenKind {
    if text.chars().all(char::is_whitespace) {
        TokenKind::Whitespace
    } else if text.chars().all(|c| PUNCTUATION.contains(&c)) {
        TokenKind::Punctuation
    } else {
        TokenKind::Word
    }
}

/// Split subtitle text into word, punctuation and whitespace tokens.
///
/// Empty text yields no tokens.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut pieces: Vec<&str> = Vec::new();
    let mut last = 0;

    for separator in SEPARATOR_REGEX.find_iter(text) {
        if separator.start() > last {
            pieces.push(&text[last..separator.start()]);
        }
        pieces.push(separator.as_str());
        last = separator.end();
    }
    if last < text.len() {
        pieces.push(&text[last..]);
    }

    pieces
        .into_iter()
        .enumerate()
        .map(|(index, piece)| Token {
            index,
            text: piece,
            kind: classify(piece),
        })
        .collect()
}

/// Concatenate tokens `start..=end` of `text` and trim the result.
///
/// Out-of-range bounds are clipped to the tokenization.
pub fn phrase_between(text: &str, start: usize, end: usize) -> String {
    let tokens = tokenize(text);
    let (start, end) = (start.min(end), start.max(end));

    tokens
        .iter()
        .skip(start)
        .take((end - start).saturating_add(1))
        .map(|t| t.text)
        .collect::<String>()
        .trim()
        .to_string()
}
