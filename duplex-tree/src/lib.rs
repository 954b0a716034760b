#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use indexmap::IndexMap;
use indextree::Arena;

pub use indextree::NodeId;

/// Text content held directly by a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    /// Ordinary character data, escaped when printed.
    Plain(String),
    /// A CDATA section, printed verbatim.
    CData(String),
}

impl Text {
    /// The raw text, regardless of how it is printed.
    pub fn as_str(&self) -> &str {
        match self {
            Text::Plain(s) | Text::CData(s) => s,
        }
    }

    /// Returns `true` if this text is a CDATA section.
    pub fn is_cdata(&self) -> bool {
        matches!(self, Text::CData(_))
    }
}

/// Data stored in each node of a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeData {
    /// The node name. Empty for the document node.
    pub name: String,

    /// Attributes in insertion order. Names are unique; setting an existing
    /// name replaces its value in place.
    pub attributes: IndexMap<String, String>,

    /// Direct text content, if any.
    pub text: Option<Text>,
}

impl NodeData {
    /// Create node data with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A hierarchical document.
///
/// Every document owns an unnamed *document node*; the nodes appended to it
/// are top-level nodes and the first of them is the *document element*.
/// Nodes are addressed by [`NodeId`]s, which stay valid for the lifetime of
/// the document (nodes are never removed).
#[derive(Debug, Clone)]
pub struct Document {
    arena: Arena<NodeData>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData::default());
        Self { arena, root }
    }

    /// Create a document whose document element is named `name`.
    ///
    /// Returns the document and the id of its document element.
    pub fn with_element(name: impl Into<String>) -> (Self, NodeId) {
        let mut doc = Self::new();
        let root = doc.root;
        let element = doc.append_child(root, name);
        (doc, element)
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The first top-level node, if the document is not empty.
    pub fn document_element(&self) -> Option<NodeId> {
        self.arena[self.root].first_child()
    }

    /// Returns `true` if the document has no top-level node.
    pub fn is_empty(&self) -> bool {
        self.document_element().is_none()
    }

    /// Number of nodes, not counting the document node.
    pub fn node_count(&self) -> usize {
        self.root.descendants(&self.arena).count() - 1
    }

    /// Borrow the data of a node.
    pub fn data(&self, id: NodeId) -> &NodeData {
        self.arena[id].get()
    }

    /// Mutably borrow the data of a node.
    pub fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        self.arena[id].get_mut()
    }

    /// The name of a node.
    pub fn name(&self, id: NodeId) -> &str {
        &self.data(id).name
    }

    /// Rename a node.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) {
        self.data_mut(id).name = name.into();
    }

    /// The parent of a node, `None` for the document node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    /// Iterate the children of a node in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// The first child of `parent` named `name`.
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent).find(|&c| self.name(c) == name)
    }

    /// The first sibling after `id` named `name`.
    pub fn next_sibling(&self, id: NodeId, name: &str) -> Option<NodeId> {
        id.following_siblings(&self.arena)
            .skip(1)
            .find(|&s| self.name(s) == name)
    }

    /// Append a new, empty child named `name` to `parent`.
    pub fn append_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let child = self.arena.new_node(NodeData::named(name));
        parent.append(child, &mut self.arena);
        child
    }

    /// Insert a new, empty node named `name` right after `sibling`.
    ///
    /// Returns `None` when `sibling` has no parent (the document node).
    pub fn insert_after(&mut self, sibling: NodeId, name: impl Into<String>) -> Option<NodeId> {
        self.parent(sibling)?;
        let node = self.arena.new_node(NodeData::named(name));
        sibling.insert_after(node, &mut self.arena);
        Some(node)
    }

    /// The text content of a node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.data(id).text.as_ref().map(Text::as_str)
    }

    /// The text content of a node, with its kind.
    pub fn text_content(&self, id: NodeId) -> Option<&Text> {
        self.data(id).text.as_ref()
    }

    /// Replace the text content of a node with plain text.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.data_mut(id).text = Some(Text::Plain(text.into()));
    }

    /// Replace the text content of a node with a CDATA section.
    pub fn set_cdata(&mut self, id: NodeId, text: impl Into<String>) {
        self.data_mut(id).text = Some(Text::CData(text.into()));
    }

    /// The value of an attribute.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.data(id).attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value of the same name.
    pub fn set_attribute(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        self.data_mut(id)
            .attributes
            .insert(name.into(), value.into());
    }

    /// Iterate the attributes of a node in insertion order.
    pub fn attributes(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.data(id)
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Compare the subtree at `id` with the subtree at `other_id` in `other`.
    ///
    /// Names, text and attributes must match (attribute order is ignored);
    /// children must match pairwise in order.
    pub fn subtree_eq(&self, id: NodeId, other: &Document, other_id: NodeId) -> bool {
        if self.data(id) != other.data(other_id) {
            return false;
        }
        let mut ours = self.children(id);
        let mut theirs = other.children(other_id);
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) => {
                    if !self.subtree_eq(a, other, b) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.subtree_eq(self.root, other, other.root)
    }
}

impl Eq for Document {}
