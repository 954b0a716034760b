//! The tree contract consumed by the accessors.

use core::fmt;

use duplex_tree::{Document, NodeId};

/// The primitives a hierarchical document must offer to be serialized to or
/// from.
///
/// Reading only uses the `&self` methods; writing additionally uses the
/// `&mut self` ones, and only ever appends nodes or sets names, text and
/// attributes.
pub trait Tree {
    /// A handle to a node. Handles stay valid as long as the tree lives.
    type Node: Copy + Eq + fmt::Debug;

    /// The document node, parent of all top-level nodes.
    fn root(&self) -> Self::Node;

    /// The first top-level node, if any.
    fn document_element(&self) -> Option<Self::Node>;

    /// The name of `node`.
    fn node_name(&self, node: Self::Node) -> &str;

    /// Rename `node`.
    fn set_node_name(&mut self, node: Self::Node, name: &str);

    /// The first child of `parent` named `name`.
    fn first_child(&self, parent: Self::Node, name: &str) -> Option<Self::Node>;

    /// The first sibling following `node` named `name`.
    fn next_sibling(&self, node: Self::Node, name: &str) -> Option<Self::Node>;

    /// Append a new child named `name` to `parent`. Same-named children are
    /// allowed.
    fn append_child(&mut self, parent: Self::Node, name: &str) -> Self::Node;

    /// Insert a new node named `name` right after `node`. `None` if `node`
    /// has no parent.
    fn insert_sibling_after(&mut self, node: Self::Node, name: &str) -> Option<Self::Node>;

    /// The text content of `node`.
    fn text(&self, node: Self::Node) -> Option<&str>;

    /// Replace the text content of `node`.
    fn set_text(&mut self, node: Self::Node, text: String);

    /// Replace the text content of `node` with a CDATA section.
    fn set_cdata(&mut self, node: Self::Node, text: String);

    /// The value of attribute `name` on `node`.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Set attribute `name` on `node`, overwriting a previous value.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: String);
}

impl Tree for Document {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        Document::root(self)
    }

    fn document_element(&self) -> Option<NodeId> {
        Document::document_element(self)
    }

    fn node_name(&self, node: NodeId) -> &str {
        self.name(node)
    }

    fn set_node_name(&mut self, node: NodeId, name: &str) {
        self.set_name(node, name);
    }

    fn first_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.child(parent, name)
    }

    fn next_sibling(&self, node: NodeId, name: &str) -> Option<NodeId> {
        Document::next_sibling(self, node, name)
    }

    fn append_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        Document::append_child(self, parent, name)
    }

    fn insert_sibling_after(&mut self, node: NodeId, name: &str) -> Option<NodeId> {
        self.insert_after(node, name)
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        Document::text(self, node)
    }

    fn set_text(&mut self, node: NodeId, text: String) {
        Document::set_text(self, node, text);
    }

    fn set_cdata(&mut self, node: NodeId, text: String) {
        Document::set_cdata(self, node, text);
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        Document::attribute(self, node, name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: String) {
        Document::set_attribute(self, node, name, value);
    }
}
