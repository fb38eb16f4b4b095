//! Node diffing: Positional, front-anchored comparison of sibling sequences.

use crate::node::ContentNode;

/// In-place text edit on the boundary node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialEdit {
    /// The displayed node being edited.
    pub node: ContentNode,
    /// Suffix of the old text that gets backspaced.
    pub deleted_text: String,
    /// Suffix of the new text that gets typed.
    pub added_text: String,
}

/// Result of one diff run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeDifference {
    /// Displayed nodes that must be removed, in display order.
    pub delete_nodes: Vec<ContentNode>,
    /// Target nodes that must be introduced, in display order.
    pub add_nodes: Vec<ContentNode>,
    /// At most one boundary node edited in place.
    pub partial_edit: Option<PartialEdit>,
}

impl NodeDifference {
    /// No work to do.
    pub fn is_empty(&self) -> bool {
        self.delete_nodes.is_empty() && self.add_nodes.is_empty() && self.partial_edit.is_none()
    }
}

/// Compare what is displayed (`current`) against what should be (`target`).
///
/// The scan stops at the first divergence; everything after it is treated
/// as a wholesale replacement. When the diverging pair shares its shape the
/// text of that pair is edited in place through a common-prefix split.
pub fn diff(current: &[ContentNode], target: &[ContentNode]) -> NodeDifference {
    for (i, wanted) in target.iter().enumerate() {
        let Some(shown) = current.get(i) else {
            return NodeDifference {
                delete_nodes: Vec::new(),
                add_nodes: target[i..].to_vec(),
                partial_edit: None,
            };
        };

        if wanted.structurally_eq(shown) {
            continue;
        }

        if wanted.loosely_eq(shown) {
            let (deleted_text, added_text) = word_difference(&shown.text, &wanted.text);
            return NodeDifference {
                delete_nodes: current[i + 1..].to_vec(),
                add_nodes: target[i + 1..].to_vec(),
                partial_edit: Some(PartialEdit {
                    node: shown.clone(),
                    deleted_text,
                    added_text,
                }),
            };
        }

        return NodeDifference {
            delete_nodes: current[i..].to_vec(),
            add_nodes: target[i..].to_vec(),
            partial_edit: None,
        };
    }

    NodeDifference {
        delete_nodes: current.get(target.len()..).unwrap_or_default().to_vec(),
        add_nodes: Vec::new(),
        partial_edit: None,
    }
}

/// Split two strings at their first diverging char.
///
/// Returns `(deleted, added)`: the remainder of `old` and the remainder of
/// `new` after the common prefix.
pub fn word_difference(old: &str, new: &str) -> (String, String) {
    let split = old
        .char_indices()
        .zip(new.char_indices())
        .find(|((_, a), (_, b))| a != b)
        .map_or_else(
            || {
                let common = old.chars().count().min(new.chars().count());
                (byte_offset(old, common), byte_offset(new, common))
            },
            |((old_at, _), (new_at, _))| (old_at, new_at),
        );

    (old[split.0..].to_string(), new[split.1..].to_string())
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(at, _)| at)
}
