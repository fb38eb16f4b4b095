//! Cursor: The caret state the player drives and surfaces draw.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Caret state bits.
    ///
    /// # Example
    /// ```
    /// use typist::CursorFlags;
    /// let settled = CursorFlags::FULL | CursorFlags::BLINK;
    /// assert!(!settled.contains(CursorFlags::HIDDEN));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CursorFlags: u8 {
        /// Caret is not drawn.
        const HIDDEN = 0b0000_0001;
        /// Block caret instead of a thin bar.
        const FULL = 0b0000_0010;
        /// Caret blinks.
        const BLINK = 0b0000_0100;
        /// Stay visible after a run completes.
        const STAY = 0b0000_1000;
    }
}

impl fmt::Debug for CursorFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// The caret shown at the end of the typed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    flags: CursorFlags,
}

impl Cursor {
    /// Idle caret: visible, thin, blinking.
    pub const fn new(stay: bool) -> Self {
        let flags = if stay {
            CursorFlags::BLINK.union(CursorFlags::STAY)
        } else {
            CursorFlags::BLINK
        };
        Self { flags }
    }

    /// Raw flags.
    #[inline]
    pub const fn flags(&self) -> CursorFlags {
        self.flags
    }

    /// Caret is not drawn.
    #[inline]
    pub const fn hidden(&self) -> bool {
        self.flags.contains(CursorFlags::HIDDEN)
    }

    /// Block caret.
    #[inline]
    pub const fn full(&self) -> bool {
        self.flags.contains(CursorFlags::FULL)
    }

    /// Caret blinks.
    #[inline]
    pub const fn blink(&self) -> bool {
        self.flags.contains(CursorFlags::BLINK)
    }

    /// Caret stays after completion.
    #[inline]
    pub const fn stay(&self) -> bool {
        self.flags.contains(CursorFlags::STAY)
    }

    /// Change whether the caret stays after completion.
    pub fn set_stay(&mut self, stay: bool) {
        self.flags.set(CursorFlags::STAY, stay);
    }

    /// Visible, thin and steady while ops are firing.
    pub(crate) fn begin_typing(&mut self) {
        self.flags
            .remove(CursorFlags::HIDDEN | CursorFlags::FULL | CursorFlags::BLINK);
    }

    /// Terminal state after the settle delay.
    pub(crate) fn settle(&mut self) {
        if self.stay() {
            self.flags.remove(CursorFlags::HIDDEN);
            self.flags.insert(CursorFlags::FULL | CursorFlags::BLINK);
        } else {
            self.flags.insert(CursorFlags::HIDDEN);
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(false)
    }
}
