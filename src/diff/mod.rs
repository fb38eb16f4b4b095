//! Diffing Engine: From two node sequences to a flat edit script.
//!
//! This module implements the structural half of the typing effect:
//! 1. Compare the displayed nodes against the target nodes ([`diff`])
//! 2. Expand the difference into per-character ops ([`build_script`])
//!
//! The comparison is positional and front-anchored. It yields a plausible
//! linear edit for an animated cursor, not a minimal edit distance.

mod nodes;
mod script;

pub use nodes::{diff, word_difference, NodeDifference, PartialEdit};
pub use script::{apply_script, build_script, LetterOp, OpKind};
