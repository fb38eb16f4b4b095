//! Humanizer: Making a letter script feel typed by a person.
//!
//! Two passes run over a freshly built script:
//! 1. [`assign_delays`]: contextual cadence (punctuation, capitals, common words)
//! 2. [`inject_typos`]: random typo bursts with backspace-and-retype corrections

pub mod delay;
mod typo;

pub use delay::{assign_delays, scale};
pub use typo::{inject_typos, Burst, Mistake};

use crate::config::HumanizeConfig;
use crate::diff::LetterOp;
use rand::Rng;

/// Run both passes in order. Returns the injected bursts.
pub fn humanize<R: Rng>(
    script: &mut Vec<LetterOp>,
    config: &HumanizeConfig,
    rng: &mut R,
) -> Vec<Burst> {
    assign_delays(script, &config.delay);
    let bursts = inject_typos(script, &config.delay, &config.typo, rng);
    tracing::debug!(ops = script.len(), bursts = bursts.len(), "humanized script");
    bursts
}
