//! Surfaces: Where typed content lives.
//!
//! The engine never owns displayed content. It reads snapshots from a
//! [`Surface`] at the start of every run and sends text mutations back one
//! op at a time. [`MemorySurface`] keeps everything in a `Vec` and is the
//! bookkeeping core of the terminal surface as well.

use crate::error::SurfaceError;
use crate::node::{ContentNode, NodeId, NodeSpec};
use crate::player::Cursor;
use unicode_width::UnicodeWidthStr;

/// The live display the player types into.
pub trait Surface {
    /// Live nodes in display order, excluding the cursor marker.
    fn current_nodes(&self) -> Vec<ContentNode>;

    /// A detached snapshot of the desired content.
    ///
    /// Every call yields fresh identities, so snapshot nodes never alias
    /// live ones.
    fn target_nodes(&mut self) -> Vec<ContentNode>;

    /// Current text of a live node.
    fn text(&self, id: NodeId) -> Result<String, SurfaceError>;

    /// Replace the text of a live node.
    fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), SurfaceError>;

    /// Insert `node` before the cursor with empty text, unless it is live.
    fn attach(&mut self, node: &ContentNode) -> Result<(), SurfaceError>;

    /// Remove a live node.
    fn detach(&mut self, id: NodeId) -> Result<(), SurfaceError>;

    /// Empty a live node.
    fn clear_text(&mut self, id: NodeId) -> Result<(), SurfaceError> {
        self.set_text(id, "")
    }

    /// Pre-size the display for the final content so typing doesn't reflow.
    fn reserve_layout_space(&mut self) -> Result<(), SurfaceError>;

    /// The caret changed state.
    fn cursor_changed(&mut self, _cursor: Cursor) -> Result<(), SurfaceError> {
        Ok(())
    }
}

/// An in-memory surface.
#[derive(Debug, Default)]
pub struct MemorySurface {
    /// Live nodes in display order.
    live: Vec<ContentNode>,
    /// Desired content.
    target: Vec<NodeSpec>,
    /// Next id to hand out.
    next_id: u64,
    /// Display width reserved by the last reservation.
    reserved_width: usize,
    /// Number of reservations made.
    reservations: usize,
    /// Last caret state reported by the player.
    cursor: Option<Cursor>,
}

impl MemorySurface {
    /// Empty surface with no target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty surface with the given target.
    pub fn with_target(target: Vec<NodeSpec>) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Replace the desired content.
    pub fn set_target(&mut self, target: Vec<NodeSpec>) {
        self.target = target;
    }

    /// Desired content.
    pub fn target(&self) -> &[NodeSpec] {
        &self.target
    }

    /// Live nodes in display order.
    pub fn nodes(&self) -> &[ContentNode] {
        &self.live
    }

    /// Concatenated text of the live nodes.
    pub fn visible_text(&self) -> String {
        self.live.iter().map(|node| node.text.as_str()).collect()
    }

    /// Display width of the desired content.
    pub fn target_width(&self) -> usize {
        self.target.iter().map(|spec| spec.text.width()).sum()
    }

    /// Width set aside by the last reservation.
    pub const fn reserved_width(&self) -> usize {
        self.reserved_width
    }

    /// How many times layout space was reserved.
    pub const fn reservations(&self) -> usize {
        self.reservations
    }

    /// Last caret state reported, if any.
    pub const fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn live_mut(&mut self, id: NodeId) -> Result<&mut ContentNode, SurfaceError> {
        self.live
            .iter_mut()
            .find(|node| node.id == id)
            .ok_or(SurfaceError::UnknownNode(id))
    }
}

impl Surface for MemorySurface {
    fn current_nodes(&self) -> Vec<ContentNode> {
        self.live.clone()
    }

    fn target_nodes(&mut self) -> Vec<ContentNode> {
        let specs = self.target.clone();
        specs
            .into_iter()
            .map(|spec| ContentNode::from_spec(self.allocate(), spec))
            .collect()
    }

    fn text(&self, id: NodeId) -> Result<String, SurfaceError> {
        self.live
            .iter()
            .find(|node| node.id == id)
            .map(|node| node.text.clone())
            .ok_or(SurfaceError::UnknownNode(id))
    }

    fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), SurfaceError> {
        let node = self.live_mut(id)?;
        text.clone_into(&mut node.text);
        Ok(())
    }

    fn attach(&mut self, node: &ContentNode) -> Result<(), SurfaceError> {
        if self.live.iter().all(|live| live.id != node.id) {
            self.live
                .push(ContentNode::new(node.id, node.kind.clone(), String::new()));
        }
        Ok(())
    }

    fn detach(&mut self, id: NodeId) -> Result<(), SurfaceError> {
        let index = self
            .live
            .iter()
            .position(|node| node.id == id)
            .ok_or(SurfaceError::UnknownNode(id))?;
        self.live.remove(index);
        Ok(())
    }

    fn reserve_layout_space(&mut self) -> Result<(), SurfaceError> {
        self.reserved_width = self.target_width();
        self.reservations += 1;
        Ok(())
    }

    fn cursor_changed(&mut self, cursor: Cursor) -> Result<(), SurfaceError> {
        self.cursor = Some(cursor);
        Ok(())
    }
}
