//! Message types for the player actor.
//!
//! These enums define the protocol between the application and the
//! player thread.

use crate::player::Cursor;
use std::fmt;

/// Commands sent to the player thread.
pub enum PlayerCommand<S> {
    /// Start (or restart) typing towards the surface's target.
    Run,

    /// Run a closure against the surface on the player thread.
    ///
    /// Typically used to swap the target before a [`PlayerCommand::Run`].
    Edit(Box<dyn FnOnce(&mut S) + Send>),

    /// Shutdown the player thread.
    Shutdown,
}

impl<S> fmt::Debug for PlayerCommand<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run => f.write_str("Run"),
            Self::Edit(_) => f.write_str("Edit(..)"),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}

/// Events from the player thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// A run started.
    Started {
        /// Ops in the humanized script.
        ops: usize,
    },

    /// Ops were applied to the surface.
    Progress {
        /// Ops applied so far in this run.
        applied: usize,
        /// Ops in the script.
        total: usize,
    },

    /// The script ran out; the cursor settles next.
    Completed,

    /// The caret changed state.
    Cursor(Cursor),

    /// A run was aborted.
    Error(String),

    /// The player thread is shutting down.
    Shutdown,
}
