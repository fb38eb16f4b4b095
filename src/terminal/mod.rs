//! Terminal surface: Types onto one row of a terminal.
//!
//! Bookkeeping is delegated to a [`MemorySurface`]; every mutation redraws
//! the row into a [`Frame`] and flushes it in one write. Elements tagged
//! `b`/`strong`, `i`/`em` or `u` are drawn bold, italic or underlined.

mod frame;

pub use frame::{Frame, CARET_FULL, CARET_THIN};

use crate::error::SurfaceError;
use crate::node::{ContentNode, NodeId, NodeSpec};
use crate::player::Cursor;
use crate::surface::{MemorySurface, Surface};
use crossterm::style::Attribute;
use std::io::Write;

/// A [`Surface`] rendering to a terminal line.
pub struct TerminalSurface<W: Write> {
    /// Node bookkeeping.
    memory: MemorySurface,
    /// Where frames go.
    out: W,
    /// Frame being built.
    frame: Frame,
    /// Top-left cell of the line (col, row).
    origin: (u16, u16),
    /// Columns available.
    width: u16,
    /// Columns holding glyphs after the last frame.
    painted: usize,
    /// Caret to draw.
    cursor: Cursor,
}

impl<W: Write> TerminalSurface<W> {
    /// Surface drawing at `origin` (col, row), at most `width` columns wide.
    pub fn new(out: W, origin: (u16, u16), width: u16) -> Self {
        Self {
            memory: MemorySurface::new(),
            out,
            frame: Frame::new(),
            origin,
            width,
            painted: 0,
            cursor: Cursor::default(),
        }
    }

    /// Replace the desired content.
    pub fn set_target(&mut self, target: Vec<NodeSpec>) {
        self.memory.set_target(target);
    }

    /// Concatenated text of the live nodes, unclipped.
    pub fn visible_text(&self) -> String {
        self.memory.visible_text()
    }

    /// Node bookkeeping.
    pub const fn memory(&self) -> &MemorySurface {
        &self.memory
    }

    /// The writer frames are flushed to.
    pub const fn writer(&self) -> &W {
        &self.out
    }

    /// Give the writer back.
    pub fn into_writer(self) -> W {
        self.out
    }

    /// Redraw the line.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Io`] if writing the frame fails.
    pub fn render(&mut self) -> Result<(), SurfaceError> {
        let limit = usize::from(self.width);
        let (col, row) = self.origin;

        self.frame.clear();
        self.frame.move_to(col, row)?;

        let mut used = 0;
        let mut clipped = false;
        for node in self.memory.nodes() {
            let attribute = node.kind.tag().and_then(tag_attribute);
            if let Some(attribute) = attribute {
                self.frame.attribute(attribute)?;
            }
            clipped = self.frame.text(&node.text, limit, &mut used)?;
            if attribute.is_some() {
                self.frame.attribute(Attribute::Reset)?;
            }
            if clipped {
                break;
            }
        }

        if !clipped && !self.cursor.hidden() && used < limit {
            self.frame.caret(self.cursor)?;
            used += 1;
        }

        let blank = self.painted.max(self.memory.reserved_width()).min(limit);
        if used < blank {
            self.frame.pad(blank - used)?;
        }
        self.painted = used;

        self.frame.flush_to(&mut self.out)?;
        Ok(())
    }
}

/// Attribute an element tag is drawn with.
fn tag_attribute(tag: &str) -> Option<Attribute> {
    match tag {
        "b" | "strong" => Some(Attribute::Bold),
        "i" | "em" => Some(Attribute::Italic),
        "u" => Some(Attribute::Underlined),
        _ => None,
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn current_nodes(&self) -> Vec<ContentNode> {
        self.memory.current_nodes()
    }

    fn target_nodes(&mut self) -> Vec<ContentNode> {
        self.memory.target_nodes()
    }

    fn text(&self, id: NodeId) -> Result<String, SurfaceError> {
        self.memory.text(id)
    }

    fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), SurfaceError> {
        self.memory.set_text(id, text)?;
        self.render()
    }

    fn attach(&mut self, node: &ContentNode) -> Result<(), SurfaceError> {
        self.memory.attach(node)
    }

    fn detach(&mut self, id: NodeId) -> Result<(), SurfaceError> {
        self.memory.detach(id)?;
        self.render()
    }

    fn reserve_layout_space(&mut self) -> Result<(), SurfaceError> {
        self.memory.reserve_layout_space()?;
        self.render()
    }

    fn cursor_changed(&mut self, cursor: Cursor) -> Result<(), SurfaceError> {
        self.cursor = cursor;
        self.memory.cursor_changed(cursor)?;
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TypistConfig, TypoConfig};
    use crate::player::Player;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io;
    use std::time::Instant;

    fn screen(surface: &TerminalSurface<Vec<u8>>, rows: u16, cols: u16) -> vt100::Parser {
        let mut parser = vt100::Parser::new(rows, cols, 0);
        parser.process(surface.writer());
        parser
    }

    fn typed(surface: TerminalSurface<Vec<u8>>) -> Player<TerminalSurface<Vec<u8>>, StdRng> {
        let mut config = TypistConfig::default();
        config.humanize.typo = TypoConfig::disabled();
        Player::with_rng(surface, config, StdRng::seed_from_u64(3)).unwrap()
    }

    #[test]
    fn test_types_styled_line() {
        let mut surface = TerminalSurface::new(Vec::new(), (0, 0), 20);
        surface.set_target(vec![NodeSpec::text("Hi "), NodeSpec::element("b", "there")]);
        let mut player = typed(surface);

        player.run(Instant::now()).unwrap();
        while let Some(deadline) = player.next_deadline() {
            player.poll(deadline).unwrap();
        }

        let parser = screen(player.surface(), 2, 20);
        let screen = parser.screen();
        assert_eq!(screen.contents().trim_end(), "Hi there");
        assert!(!screen.cell(0, 1).unwrap().bold());
        assert!(screen.cell(0, 3).unwrap().bold());
        assert!(screen.cell(0, 7).unwrap().bold());
    }

    #[test]
    fn test_caret_follows_text_while_typing() {
        let mut surface = TerminalSurface::new(Vec::new(), (0, 0), 20);
        surface.set_target(vec![NodeSpec::text("abcdef")]);
        let mut player = typed(surface);

        player.run(Instant::now()).unwrap();
        while player.applied() < 2 {
            let deadline = player.next_deadline().unwrap();
            player.poll(deadline).unwrap();
        }

        let parser = screen(player.surface(), 2, 20);
        let screen = parser.screen();
        assert_eq!(screen.cell(0, 1).unwrap().contents(), "b");
        assert_eq!(screen.cell(0, 2).unwrap().contents(), CARET_THIN.to_string());
    }

    #[test]
    fn test_settled_caret_with_stay_is_full() {
        let mut surface = TerminalSurface::new(Vec::new(), (0, 0), 20);
        surface.set_target(vec![NodeSpec::text("ok")]);
        let mut config = TypistConfig {
            stay: true,
            ..TypistConfig::default()
        };
        config.humanize.typo = TypoConfig::disabled();
        let mut player = Player::with_rng(surface, config, StdRng::seed_from_u64(3)).unwrap();

        player.run(Instant::now()).unwrap();
        while let Some(deadline) = player.next_deadline() {
            player.poll(deadline).unwrap();
        }

        let parser = screen(player.surface(), 2, 20);
        assert_eq!(
            parser.screen().cell(0, 2).unwrap().contents(),
            CARET_FULL.to_string()
        );
    }

    #[test]
    fn test_shrinking_text_blanks_old_cells() {
        let mut surface = TerminalSurface::new(Vec::new(), (0, 0), 20);
        surface.set_target(vec![NodeSpec::text("hello")]);
        let node = surface.target_nodes().remove(0);
        surface.attach(&node).unwrap();
        surface.set_text(node.id, "hello").unwrap();
        surface.set_text(node.id, "he").unwrap();

        let parser = screen(&surface, 2, 20);
        assert_eq!(parser.screen().contents().trim_end(), "he\u{258f}");
    }

    #[test]
    fn test_wide_text_is_clipped_at_origin() {
        let mut surface = TerminalSurface::new(Vec::new(), (2, 1), 5);
        let node = ContentNode::new(NodeId(7), crate::node::NodeKind::Text, String::new());
        surface.attach(&node).unwrap();
        surface.set_text(node.id, "日本語").unwrap();

        let parser = screen(&surface, 3, 10);
        let screen = parser.screen();
        assert_eq!(screen.cell(1, 2).unwrap().contents(), "日");
        assert_eq!(screen.cell(1, 4).unwrap().contents(), "本");
        assert_eq!(screen.cell(1, 6).unwrap().contents(), "");
        assert!(!screen.contents().contains('語'));
        assert_eq!(surface.visible_text(), "日本語");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_surface_error() {
        let mut surface = TerminalSurface::new(BrokenPipe, (0, 0), 10);
        let node = ContentNode::new(NodeId(0), crate::node::NodeKind::Text, String::new());
        surface.attach(&node).unwrap();
        let err = surface.set_text(node.id, "x").unwrap_err();
        assert!(matches!(err, SurfaceError::Io(_)));
    }
}
