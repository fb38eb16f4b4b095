//! # Typist
//!
//! A humanized live-typing engine for terminal and document surfaces.
//!
//! Given the content currently displayed and the content that should be
//! displayed, Typist computes a front-anchored structural difference, turns
//! it into a flat script of per-character operations and plays that script
//! back with human cadence: contextual delays, occasional typos that get
//! noticed and corrected, and a caret that settles when typing stops.
//!
//! ## Core Concepts
//!
//! - **Structural diff**: Shared prefix kept, changed tail retyped, one partial word edit
//! - **Letter script**: One op per keystroke, with its own delay
//! - **Humanizer**: Cadence multipliers and typo bursts that always self-correct
//! - **Preemptible playback**: A new run cancels the old one before its next op
//!
//! ## Example
//!
//! ```rust
//! use std::time::Instant;
//! use typist::{MemorySurface, NodeSpec, Player, TypistConfig};
//!
//! let surface = MemorySurface::with_target(vec![NodeSpec::text("Hello")]);
//! let mut player = Player::new(surface, TypistConfig::default()).unwrap();
//!
//! player.run(Instant::now()).unwrap();
//! while let Some(deadline) = player.next_deadline() {
//!     player.poll(deadline).unwrap();
//! }
//! assert_eq!(player.surface().visible_text(), "Hello");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod config;
pub mod diff;
pub mod error;
pub mod humanize;
pub mod node;
pub mod player;
pub mod surface;
pub mod terminal;

// Re-exports for convenience
pub use actor::{PlayerActor, PlayerCommand, PlayerEvent};
pub use config::{DelayConfig, HumanizeConfig, TypistConfig, TypoConfig};
pub use diff::{build_script, diff, LetterOp, NodeDifference, OpKind, PartialEdit};
pub use error::{ConfigError, Result, SurfaceError, TypistError};
pub use humanize::{humanize, Burst, Mistake};
pub use node::{ContentNode, NodeId, NodeKind, NodeSpec};
pub use player::{Cursor, CursorFlags, Phase, Player, PollOutcome};
pub use surface::{MemorySurface, Surface};
pub use terminal::TerminalSurface;
