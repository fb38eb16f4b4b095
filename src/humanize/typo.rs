//! Typo injection pass.
//!
//! A burst rewrites a short run of typed ops into a mistake, then splices
//! in the correction right after it:
//!
//! ```text
//!   before:  ... t h e ...
//!   after:   ... h t e <bs> <bs> <bs> t h e ...
//!                ^^^^^ original run, corrupted
//!                      ^^^^^^^^^^^^^^ backspaces
//!                                     ^^^^^ retype
//! ```

use super::delay::{scale, BACKSPACE};
use crate::config::{DelayConfig, TypoConfig};
use crate::diff::{LetterOp, OpKind};
use rand::Rng;
use std::ops::Range;
use std::sync::Arc;

/// The kind of mistake a burst simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mistake {
    /// The first two characters were swapped.
    Transposition,
    /// The first character was replaced with this letter.
    Substitution(char),
}

/// Position of one injected correction burst in the final script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Burst {
    /// Index of the first op of the corrupted run.
    pub start: usize,
    /// Number of ops in the run.
    pub len: usize,
    /// What went wrong.
    pub mistake: Mistake,
}

impl Burst {
    /// The corrupted run.
    pub const fn original(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// The backspaces that undo the run.
    pub const fn backspaces(&self) -> Range<usize> {
        self.start + self.len..self.start + 2 * self.len
    }

    /// The corrected retype.
    pub const fn retype(&self) -> Range<usize> {
        self.start + 2 * self.len..self.start + 3 * self.len
    }
}

/// Splice randomized typo-and-correction bursts into a delayed script.
///
/// Bursts only cover runs of typed characters and never share ops with one
/// another. Returns the bursts in script order.
///
/// # Panics
///
/// Panics if `typo.probability` is outside `[0, 1]` or the run range is
/// empty; [`TypistConfig::validate`](crate::config::TypistConfig::validate)
/// rejects both.
pub fn inject_typos<R: Rng>(
    script: &mut Vec<LetterOp>,
    delay: &DelayConfig,
    typo: &TypoConfig,
    rng: &mut R,
) -> Vec<Burst> {
    let backspace_ms = scale(delay.base_delay_ms, BACKSPACE);
    let mut bursts = Vec::new();
    let mut last_end: Option<usize> = None;

    let mut i = typo.min_run;
    while i < script.len() {
        let drawn = rng.gen_range(typo.min_run..typo.max_run);
        if !rng.gen_bool(typo.probability) {
            i += 1;
            continue;
        }

        let mut len = drawn.min(i);
        if let Some(end) = last_end {
            len = len.min(i - end);
        }
        len = script[..=i]
            .iter()
            .rev()
            .take(len)
            .take_while(|op| op.typed_char().is_some())
            .count();
        if len == 0 {
            i += 1;
            continue;
        }

        let start = i + 1 - len;
        let lead_in = script[start - 1].delay_ms;
        let original = script[start..=i].to_vec();

        let mut correction: Vec<LetterOp> = original
            .iter()
            .rev()
            .map(|op| LetterOp {
                delay_ms: backspace_ms,
                ..LetterOp::backspace(Arc::clone(&op.target))
            })
            .collect();
        if let Some(last) = correction.last_mut() {
            last.delay_ms = lead_in;
        }
        correction.extend(original);
        script.splice(i + 1..i + 1, correction);

        let mistake = corrupt(&mut script[start..=i], rng);
        script[i].delay_ms += typo.hesitation_ms;

        bursts.push(Burst {
            start,
            len,
            mistake,
        });
        last_end = Some(i + 2 * len);
        i += 2 * len + typo.min_run + 1;
    }

    bursts
}

/// Turn a correctly typed run into a mistake.
fn corrupt<R: Rng>(run: &mut [LetterOp], rng: &mut R) -> Mistake {
    let transpose = rng.gen_bool(0.5);
    if transpose && run.len() >= 2 {
        let first = run[0].kind;
        run[0].kind = run[1].kind;
        run[1].kind = first;
        Mistake::Transposition
    } else {
        let letter = char::from(rng.gen_range(b'a'..=b'z'));
        run[0].kind = OpKind::Type(letter);
        Mistake::Substitution(letter)
    }
}
