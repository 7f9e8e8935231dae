/*!
 * Word and phrase selection over one tokenized subtitle.
 *
 * A plain click anchors a single word and produces a word explanation request.
 * A shift-click extends from the anchor to the clicked token and produces a
 * phrase explanation request. Releasing shift drops an active range.
 *
 * The machine only tracks state and builds the request text; writing the text
 * to the clipboard and timing the acknowledgment belong to the panel.
 */

use log::debug;

use crate::tokenizer::{self, TokenKind};

/// Request text for a single word
pub fn word_request(word: &str, full_text: &str) -> String {
    format!("Explain this word to me in English: {} (Context: {})", word, full_text)
}

/// Request text for a shift-selected phrase
pub fn phrase_request(phrase: &str, full_text: &str) -> String {
    format!(
        "Please explain this phrase in English within the context of the whole subtitle: {} (Context: {})",
        phrase, full_text
    )
}

/// Request text for a whole subtitle line
pub fn sentence_request(full_text: &str) -> String {
    format!(
        "Explain this sentence to me in the context of the whole subtitle: {}",
        full_text
    )
}

/// Anchor state of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing anchored
    #[default]
    Idle,
    /// A single word was clicked last
    SingleAnchor(usize),
    /// A shift-extended range is shown; `anchor` is the word it extends from
    RangeActive { anchor: usize, start: usize, end: usize },
}

/// Acknowledgment highlight shown after a successful copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// One token was copied
    Token(usize),
    /// The whole active range was copied
    Range,
}

/// Visual state of one token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStyle {
    Copied,
    InRange,
    Normal,
}

/// Click on an addressable token
#[derive(Debug, Clone, Copy)]
pub struct Interaction<'a> {
    /// Token index within the tokenization of `full_text`
    pub index: usize,
    /// Clean form of the clicked token
    pub word: &'a str,
    /// Complete subtitle text
    pub full_text: &'a str,
    /// Whether shift was held during the click
    pub shift_held: bool,
}

/// Text to hand to the clipboard plus the highlight to show once it lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainRequest {
    pub text: String,
    pub highlight: Highlight,
}

/// Selection state machine for one subtitle entry
#[derive(Debug, Default)]
pub struct SelectionMachine {
    state: SelectionState,
    highlight: Option<Highlight>,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    /// Inclusive bounds of the active range, if any
    pub fn active_range(&self) -> Option<(usize, usize)> {
        match self.state {
            SelectionState::RangeActive { start, end, .. } => Some((start, end)),
            _ => None,
        }
    }

    fn anchor(&self) -> Option<usize> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::SingleAnchor(index) => Some(index),
            SelectionState::RangeActive { anchor, .. } => Some(anchor),
        }
    }

    /// Apply a click and return the request text it produces
    pub fn interact(&mut self, interaction: Interaction<'_>) -> ExplainRequest {
        match (interaction.shift_held, self.anchor()) {
            (true, Some(anchor)) => {
                let start = anchor.min(interaction.index);
                let end = anchor.max(interaction.index);
                self.state = SelectionState::RangeActive { anchor, start, end };

                let phrase = tokenizer::phrase_between(interaction.full_text, start, end);
                debug!("Range selection {}..={}: '{}'", start, end, phrase);

                ExplainRequest {
                    text: phrase_request(&phrase, interaction.full_text),
                    highlight: Highlight::Range,
                }
            }
            _ => {
                self.state = SelectionState::SingleAnchor(interaction.index);
                debug!("Word selection {}: '{}'", interaction.index, interaction.word);

                ExplainRequest {
                    text: word_request(interaction.word, interaction.full_text),
                    highlight: Highlight::Token(interaction.index),
                }
            }
        }
    }

    /// Tokenize `full_text` and click the token at `index`.
    ///
    /// Returns `None` for whitespace, punctuation and out-of-range indices.
    pub fn interact_at(&mut self, full_text: &str, index: usize, shift_held: bool) -> Option<ExplainRequest> {
        let tokens = tokenizer::tokenize(full_text);
        let token = tokens.get(index).filter(|t| t.is_addressable())?;

        Some(self.interact(Interaction {
            index,
            word: token.clean_form(),
            full_text,
            shift_held,
        }))
    }

    /// Global shift release. Returns whether a range was dropped.
    pub fn release_shift(&mut self) -> bool {
        if let SelectionState::RangeActive { .. } = self.state {
            self.state = SelectionState::Idle;
            true
        } else {
            false
        }
    }

    /// Show the acknowledgment highlight for a completed copy
    pub fn acknowledge(&mut self, highlight: Highlight) {
        self.highlight = Some(highlight);
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    /// Visual state of the token at `index`
    pub fn token_style(&self, index: usize) -> TokenStyle {
        let in_range = self
            .active_range()
            .is_some_and(|(start, end)| (start..=end).contains(&index));

        let copied = match self.highlight {
            Some(Highlight::Token(i)) => i == index,
            Some(Highlight::Range) => in_range,
            None => false,
        };

        if copied {
            TokenStyle::Copied
        } else if in_range {
            TokenStyle::InRange
        } else {
            TokenStyle::Normal
        }
    }

    /// Styles for every token of `full_text`; skippable tokens are always `Normal`
    pub fn token_styles(&self, full_text: &str) -> Vec<TokenStyle> {
        tokenizer::tokenize(full_text)
            .iter()
            .map(|t| match t.kind {
                TokenKind::Word if t.is_addressable() => self.token_style(t.index),
                _ => TokenStyle::Normal,
            })
            .collect()
    }
}
