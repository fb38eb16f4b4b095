//! Letter scripts: Flattening a [`NodeDifference`] into per-character ops.

use super::nodes::NodeDifference;
use crate::node::{ContentNode, NodeId};
use std::collections::HashMap;
use std::sync::Arc;

/// What a single op does to its target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Append a character.
    Type(char),
    /// Remove the last character.
    Backspace,
    /// Step past an empty node without a visible change.
    Blank,
}

/// One atomic edit step of the typing animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterOp {
    /// The edit.
    pub kind: OpKind,
    /// Node the edit applies to.
    pub target: Arc<ContentNode>,
    /// Pause after this op before the next one fires, in milliseconds.
    pub delay_ms: u64,
    /// Remove the target from the surface after applying this op.
    pub detaches: bool,
}

impl LetterOp {
    /// Typed character op.
    pub const fn typed(ch: char, target: Arc<ContentNode>) -> Self {
        Self::new(OpKind::Type(ch), target)
    }

    /// Backspace op.
    pub const fn backspace(target: Arc<ContentNode>) -> Self {
        Self::new(OpKind::Backspace, target)
    }

    /// Empty placeholder op.
    pub const fn blank(target: Arc<ContentNode>) -> Self {
        Self::new(OpKind::Blank, target)
    }

    const fn new(kind: OpKind, target: Arc<ContentNode>) -> Self {
        Self {
            kind,
            target,
            delay_ms: 0,
            detaches: false,
        }
    }

    /// Whether this op is a backspace.
    pub const fn is_backspace(&self) -> bool {
        matches!(self.kind, OpKind::Backspace)
    }

    /// The typed character, if any.
    pub const fn typed_char(&self) -> Option<char> {
        match self.kind {
            OpKind::Type(ch) => Some(ch),
            _ => None,
        }
    }
}

/// Expand a node difference into a flat script.
///
/// All deletions play out first, newest content first, then the additions
/// are typed in display order.
pub fn build_script(difference: &NodeDifference) -> Vec<LetterOp> {
    let partial = difference
        .partial_edit
        .as_ref()
        .map(|edit| (Arc::new(edit.node.clone()), edit));

    let mut backspaces = Vec::new();
    if let Some((node, edit)) = &partial {
        backspaces.extend(
            edit.deleted_text
                .chars()
                .map(|_| LetterOp::backspace(Arc::clone(node))),
        );
    }
    for node in &difference.delete_nodes {
        let node = Arc::new(node.clone());
        let start = backspaces.len();
        push_node_ops(&mut backspaces, &node, |_| LetterOp::backspace(Arc::clone(&node)));
        // Reversal makes the first op of the node the last one played.
        backspaces[start].detaches = true;
    }
    backspaces.reverse();

    let mut script = backspaces;
    if let Some((node, edit)) = &partial {
        script.extend(
            edit.added_text
                .chars()
                .map(|ch| LetterOp::typed(ch, Arc::clone(node))),
        );
    }
    for node in &difference.add_nodes {
        let node = Arc::new(node.clone());
        push_node_ops(&mut script, &node, |ch| LetterOp::typed(ch, Arc::clone(&node)));
    }

    script
}

/// One op per char, or a single blank op for an empty node.
fn push_node_ops(
    ops: &mut Vec<LetterOp>,
    node: &Arc<ContentNode>,
    make: impl Fn(char) -> LetterOp,
) {
    if node.text.is_empty() {
        ops.push(LetterOp::blank(Arc::clone(node)));
    } else {
        ops.extend(node.text.chars().map(make));
    }
}

/// Replay a script against plain node texts, without timing.
///
/// Nodes missing from `texts` start empty, the same way freshly attached
/// nodes do on a surface. Detached nodes are removed from the map.
pub fn apply_script(texts: &mut HashMap<NodeId, String>, script: &[LetterOp]) {
    for op in script {
        let text = texts.entry(op.target.id).or_default();
        match op.kind {
            OpKind::Type(ch) => text.push(ch),
            OpKind::Backspace => {
                text.pop();
            }
            OpKind::Blank => {}
        }
        if op.detaches {
            texts.remove(&op.target.id);
        }
    }
}
