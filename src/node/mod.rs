//! Content nodes: The sibling units the diff engine compares.
//!
//! A [`ContentNode`] is either an element-like container (whose text is its
//! inner markup) or a plain text run. Nodes are owned by a
//! [`Surface`](crate::surface::Surface); the engine only reads snapshots of
//! them and asks the surface to mutate text by [`NodeId`].

use std::fmt;

/// Identity of a node on a surface.
///
/// Ids are allocated by the surface and never reused within its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural kind of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Container with a tag and ordered attributes.
    Element {
        /// Tag name, e.g. `b` or `span`.
        tag: String,
        /// Attributes in authoring order.
        attrs: Vec<(String, String)>,
    },
    /// Raw text run.
    Text,
}

impl NodeKind {
    /// Element kind without attributes.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element {
            tag: tag.into(),
            attrs: Vec::new(),
        }
    }

    /// Tag name for elements, `None` for text runs.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text => None,
        }
    }
}

/// Detached description of a node, used to author target content.
///
/// Surfaces turn specs into [`ContentNode`]s by assigning ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    /// Structural kind.
    pub kind: NodeKind,
    /// Text content (inner markup for elements).
    pub text: String,
}

impl NodeSpec {
    /// Text run spec.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            text: text.into(),
        }
    }

    /// Element spec without attributes.
    pub fn element(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::element(tag),
            text: text.into(),
        }
    }

    /// Add an attribute (builder style).
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let NodeKind::Element { attrs, .. } = &mut self.kind {
            attrs.push((name.into(), value.into()));
        }
        self
    }
}

/// A unit of displayable content with identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentNode {
    /// Surface-assigned identity.
    pub id: NodeId,
    /// Structural kind.
    pub kind: NodeKind,
    /// Current text content.
    pub text: String,
}

impl ContentNode {
    /// Create a node from its parts.
    pub fn new(id: NodeId, kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            text: text.into(),
        }
    }

    /// Bind a spec to an id.
    pub fn from_spec(id: NodeId, spec: NodeSpec) -> Self {
        Self {
            id,
            kind: spec.kind,
            text: spec.text,
        }
    }

    /// Same shape and same text. Identity is not compared.
    pub fn structurally_eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }

    /// Same shape, text ignored.
    pub fn loosely_eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }

    /// Length in Unicode scalar values, the unit the script types in.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether this is a text run.
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text)
    }
}
