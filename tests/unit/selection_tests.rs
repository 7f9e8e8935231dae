/*!
 * Tests for the selection state machine
 */

use listenup::selection::{Highlight, Interaction, SelectionMachine, SelectionState, phrase_request, sentence_request, word_request};
use listenup::tokenizer::tokenize;

const TEXT: &str = "She sells sea shells by the sea shore.";

fn addressable_indices(text: &str) -> Vec<usize> {
    tokenize(text)
        .iter()
        .filter(|t| t.is_addressable())
        .map(|t| t.index)
        .collect()
}

/// Shift-clicking a then b yields the same range as b then a from the same anchor
#[test]
fn test_shift_range_withEitherOrder_shouldBeSymmetric() {
    let words = addressable_indices(TEXT);

    for &anchor in &words {
        for &a in &words {
            for &b in &words {
                let mut first = SelectionMachine::new();
                first.interact_at(TEXT, anchor, false);
                first.interact_at(TEXT, a, true);
                let first_request = first.interact_at(TEXT, b, true).unwrap();

                let mut second = SelectionMachine::new();
                second.interact_at(TEXT, anchor, false);
                second.interact_at(TEXT, b, true);

                let expected = SelectionState::RangeActive {
                    anchor,
                    start: anchor.min(b),
                    end: anchor.max(b),
                };
                assert_eq!(first.state(), expected);
                assert_eq!(second.state(), expected);
                assert_eq!(first.active_range(), Some((anchor.min(b), anchor.max(b))));
                assert_eq!(first_request.highlight, Highlight::Range);
            }
        }
    }
}

/// Shift release always lands in Idle from a range, whatever came before
#[test]
fn test_release_shift_withAnyRangeHistory_shouldReturnToIdle() {
    let words = addressable_indices(TEXT);

    for &anchor in &words {
        for &other in &words {
            let mut machine = SelectionMachine::new();
            machine.interact_at(TEXT, words[0], false);
            machine.interact_at(TEXT, anchor, false);
            machine.interact_at(TEXT, other, true);
            machine.release_shift();
            assert_eq!(machine.state(), SelectionState::Idle);
            assert!(machine.active_range().is_none());
        }
    }
}

/// A single-word anchor survives shift release
#[test]
fn test_release_shift_withSingleAnchor_shouldKeepAnchor() {
    let mut machine = SelectionMachine::new();
    machine.interact_at(TEXT, 2, false);
    assert!(!machine.release_shift());
    assert_eq!(machine.state(), SelectionState::SingleAnchor(2));
}

/// Range over the whole sentence uses the trimmed phrase and the full context
#[test]
fn test_interact_withWholeSentenceRange_shouldEmitPhraseTemplate() {
    let mut machine = SelectionMachine::new();
    machine.interact_at(TEXT, 0, false);
    let request = machine.interact_at(TEXT, 14, true).unwrap();

    assert_eq!(
        request.text,
        "Please explain this phrase in English within the context of the whole subtitle: She sells sea shells by the sea shore (Context: She sells sea shells by the sea shore.)"
    );
}

/// The raw interaction API takes the clean word as given
#[test]
fn test_interact_withExplicitInteraction_shouldUseGivenWord() {
    let mut machine = SelectionMachine::new();
    let request = machine.interact(Interaction {
        index: 6,
        word: "shells",
        full_text: TEXT,
        shift_held: false,
    });
    assert_eq!(request.text, word_request("shells", TEXT));
    assert_eq!(request.highlight, Highlight::Token(6));
}

/// Template strings are exact
#[test]
fn test_templates_withSampleInput_shouldMatchContract() {
    assert_eq!(word_request("sea", "ctx"), "Explain this word to me in English: sea (Context: ctx)");
    assert_eq!(
        phrase_request("sea shells", "ctx"),
        "Please explain this phrase in English within the context of the whole subtitle: sea shells (Context: ctx)"
    );
    assert_eq!(
        sentence_request("ctx"),
        "Explain this sentence to me in the context of the whole subtitle: ctx"
    );
}
