//! `Frame`: Single-syscall output buffer for one redraw of the typed line.

use crate::player::Cursor;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use std::io::{self, Write};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Thin caret, drawn while typing.
pub const CARET_THIN: char = '▏';
/// Block caret, drawn once settled with `stay`.
pub const CARET_FULL: char = '█';

/// Pre-allocated buffer for the escape sequences of one frame.
///
/// A frame is accumulated here, then flushed in a single `write_all` so the
/// line never shows half-drawn.
pub struct Frame {
    data: Vec<u8>,
}

impl Frame {
    /// Create a frame buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a frame buffer sized for a single line (512B).
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Move to (col, row), 0-indexed.
    pub fn move_to(&mut self, col: u16, row: u16) -> io::Result<()> {
        queue!(self.data, MoveTo(col, row))
    }

    /// Switch an attribute on, or everything off with [`Attribute::Reset`].
    pub fn attribute(&mut self, attribute: Attribute) -> io::Result<()> {
        queue!(self.data, SetAttribute(attribute))
    }

    /// Print whole graphemes of `text` while they fit in `limit` columns.
    ///
    /// `used` is advanced by the width printed. Returns `true` if `text` was
    /// clipped.
    pub fn text(&mut self, text: &str, limit: usize, used: &mut usize) -> io::Result<bool> {
        for grapheme in text.graphemes(true) {
            let width = grapheme.width();
            if *used + width > limit {
                return Ok(true);
            }
            queue!(self.data, Print(grapheme))?;
            *used += width;
        }
        Ok(false)
    }

    /// Draw the caret glyph for `cursor` (one column).
    pub fn caret(&mut self, cursor: Cursor) -> io::Result<()> {
        let glyph = if cursor.full() { CARET_FULL } else { CARET_THIN };
        if cursor.blink() {
            queue!(
                self.data,
                SetAttribute(Attribute::SlowBlink),
                Print(glyph),
                SetAttribute(Attribute::Reset)
            )
        } else {
            queue!(self.data, Print(glyph))
        }
    }

    /// Blank `columns` cells.
    pub fn pad(&mut self, columns: usize) -> io::Result<()> {
        queue!(self.data, Print(" ".repeat(columns)))
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}
