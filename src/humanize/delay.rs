//! Contextual delay pass.
//!
//! Every op's delay is the pause after it, so the delay chosen for an op
//! is written onto the op before it ("time to decide on the next key").
//! The first op of a script never receives a delay from this pass, nor
//! does the last one.

use crate::config::DelayConfig;
use crate::diff::{LetterOp, OpKind};

/// Backspaces are quick.
pub const BACKSPACE: f64 = 0.6;
/// Short connector words roll off the fingers.
pub const QUICK_WORD: f64 = 0.7;
/// A space is nearly free.
pub const SPACE: f64 = 0.7;
/// First letters of a word come slightly faster.
pub const WORD_START: f64 = 0.8;
/// Anything else.
pub const DEFAULT: f64 = 1.0;
/// Punctuation needs a look at the keyboard.
pub const PUNCTUATION: f64 = 1.2;
/// Words typed with a small hitch.
pub const SLOW_WORD: f64 = 1.4;
/// Shift-modified letters.
pub const UPPERCASE: f64 = 1.8;
/// Empty placeholder nodes.
pub const BLANK: f64 = 2.5;

/// Every multiplier the pass can assign.
pub const MULTIPLIERS: [f64; 9] = [
    BACKSPACE,
    QUICK_WORD,
    SPACE,
    WORD_START,
    DEFAULT,
    PUNCTUATION,
    SLOW_WORD,
    UPPERCASE,
    BLANK,
];

const PUNCTUATION_CHARS: &[char] = &[
    '.', ',', '!', '?', ':', ';', '-', '–', '—', '(', ')', '[', ']', '{', '}', '\'', '"', '…',
    '/', '\\', '|', '_', '&', '@', '#', '%', '^', '~', '`', '*', '+', '=', '<', '>', '$',
];

const QUICK_WORDS: [&str; 4] = ["and", "out", "is", "as"];
const SLOW_WORDS: [&str; 2] = ["from", "in"];

/// How far back a space still counts as "near the start of a word".
const WORD_START_WINDOW: usize = 4;

/// Delay for a multiplier, in whole milliseconds.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn scale(base_delay_ms: u64, multiplier: f64) -> u64 {
    (base_delay_ms as f64 * multiplier).round() as u64
}

/// Outcome of classifying the op at one position.
enum Step {
    /// A single op with its multiplier.
    Single(f64),
    /// A matched word of `len` ops sharing one multiplier.
    Word { len: usize, multiplier: f64 },
}

/// Assign contextual delays to a script in place.
pub fn assign_delays(script: &mut [LetterOp], config: &DelayConfig) {
    if script.len() < 2 {
        return;
    }

    let kinds: Vec<OpKind> = script[1..].iter().map(|op| op.kind).collect();
    let mut set = |index: usize, multiplier: f64| {
        // Trimmed index `index` maps to script index `index + 1`, so the op
        // before it sits at script index `index`.
        if index != 0 {
            script[index].delay_ms = scale(config.base_delay_ms, multiplier);
        }
    };

    let mut i = 0;
    while i < kinds.len() {
        match classify(&kinds, i) {
            Step::Single(multiplier) => {
                set(i, multiplier);
                i += 1;
            }
            Step::Word { len, multiplier } => {
                for j in i..i + len {
                    set(j, multiplier);
                }
                i += len;
            }
        }
    }
}

fn classify(kinds: &[OpKind], i: usize) -> Step {
    let ch = match kinds[i] {
        OpKind::Backspace => return Step::Single(BACKSPACE),
        OpKind::Type(ch) if PUNCTUATION_CHARS.contains(&ch) => return Step::Single(PUNCTUATION),
        OpKind::Type(ch) => Some(ch),
        OpKind::Blank => None,
    };

    let rest = &kinds[i..];
    if let Some(len) = match_word(rest, &QUICK_WORDS) {
        return Step::Word {
            len,
            multiplier: QUICK_WORD,
        };
    }
    if let Some(len) = match_word(rest, &SLOW_WORDS) {
        return Step::Word {
            len,
            multiplier: SLOW_WORD,
        };
    }

    let Some(ch) = ch else {
        return Step::Single(BLANK);
    };
    if ch.is_alphabetic() && ch.to_uppercase().eq(std::iter::once(ch)) {
        return Step::Single(UPPERCASE);
    }
    if ch == ' ' {
        return Step::Single(SPACE);
    }
    if kinds[i.saturating_sub(WORD_START_WINDOW)..i].contains(&OpKind::Type(' ')) {
        return Step::Single(WORD_START);
    }
    Step::Single(DEFAULT)
}

/// Length of the first word in `words` the upcoming ops spell out.
fn match_word(rest: &[OpKind], words: &[&str]) -> Option<usize> {
    words.iter().find_map(|word| {
        let len = word.chars().count();
        let spelled = rest.len() >= len
            && word
                .chars()
                .zip(rest)
                .all(|(ch, kind)| *kind == OpKind::Type(ch));
        spelled.then_some(len)
    })
}
