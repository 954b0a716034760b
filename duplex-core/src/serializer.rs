//! Cursors over a tree and the sessions that hand them out.

use core::fmt;

use duplex_tree::Document;

use crate::accessor::{Accessor, Mode, NodeAccessor};
use crate::tracing_macros::debug;
use crate::{Result, Scalar, Tree};

/// A position in a tree, bound to the accessor of its [`Session`].
///
/// Serializers are cheap to copy. Moving to a child or sibling returns a new
/// serializer and leaves the current one untouched. A serializer whose read
/// lookup failed is *invalid*; every call on it is a no-op when writing and
/// yields the default when reading.
pub struct Serializer<'s, 'd, T: Tree = Document> {
    node: Option<T::Node>,
    accessor: &'s Accessor<'d, T>,
}

impl<T: Tree> Clone for Serializer<'_, '_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Tree> Copy for Serializer<'_, '_, T> {}

impl<T: Tree> fmt::Debug for Serializer<'_, '_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializer")
            .field("node", &self.node)
            .field("mode", &self.mode())
            .finish()
    }
}

impl<'s, 'd, T: Tree> Serializer<'s, 'd, T> {
    /// Returns `true` if this serializer points at an existing node.
    pub fn is_valid(&self) -> bool {
        self.node.is_some()
    }

    /// The current node, `None` if invalid.
    pub fn node(&self) -> Option<T::Node> {
        self.node
    }

    /// The direction of the pass.
    pub fn mode(&self) -> Mode {
        self.accessor.mode()
    }

    /// Returns `true` when loading from a tree.
    pub fn reading(&self) -> bool {
        self.mode() == Mode::Read
    }

    /// Returns `true` when saving into a tree.
    pub fn writing(&self) -> bool {
        self.mode() == Mode::Write
    }

    /// Whether defaulted writes emit values equal to their default.
    pub fn write_default_values(&self) -> bool {
        self.accessor.write_default_values()
    }

    /// Change the write-defaults policy for the whole session.
    pub fn set_write_default_values(&self, write: bool) {
        self.accessor.set_write_default_values(write);
    }

    /// An invalid serializer sharing this one's session.
    pub fn invalid(&self) -> Self {
        Self {
            node: None,
            accessor: self.accessor,
        }
    }

    fn at(&self, node: Option<T::Node>) -> Self {
        Self {
            node,
            accessor: self.accessor,
        }
    }

    /// Move to a child named `name`: a new one when writing, the first
    /// existing one when reading.
    pub fn child(&self, name: &str) -> Self {
        self.at(self.accessor.child(self.node, name))
    }

    /// Move to a sibling named `name`: a new one inserted right after this
    /// node when writing, the next existing one when reading.
    pub fn next_sibling(&self, name: &str) -> Self {
        self.at(self.accessor.next_sibling(self.node, name))
    }

    /// Transfer the name of the current node.
    pub fn node_name(&self, name: &mut String) {
        self.accessor.node_name(self.node, name);
    }

    /// Transfer `value` through the text of the current node.
    ///
    /// Reading a node without text yields `V::default()`.
    pub fn text<V: Scalar>(&self, value: &mut V) -> Result<()> {
        self.accessor.text(self.node, value, None)
    }

    /// Like [`text`](Self::text), with `default` standing in for missing
    /// text on read and suppressing the write of an equal value when
    /// defaults are not written.
    pub fn text_or<V: Scalar>(&self, value: &mut V, default: impl Into<V>) -> Result<()> {
        self.accessor.text(self.node, value, Some(default.into()))
    }

    /// Transfer `value` through attribute `name` of the current node.
    pub fn attribute<V: Scalar>(&self, name: &str, value: &mut V) -> Result<()> {
        self.accessor.attribute(self.node, name, value, None)
    }

    /// Like [`attribute`](Self::attribute), with a default.
    pub fn attribute_or<V: Scalar>(
        &self,
        name: &str,
        value: &mut V,
        default: impl Into<V>,
    ) -> Result<()> {
        self.accessor
            .attribute(self.node, name, value, Some(default.into()))
    }

    /// Transfer `text` as a CDATA section of the current node.
    pub fn cdata(&self, text: &mut String) {
        self.accessor.cdata(self.node, text);
    }

    /// Transfer `value` through the text of a child named `child`.
    ///
    /// When writing, the child is created only if `value` is emitted;
    /// otherwise no node is created and an invalid serializer is returned.
    /// When reading, a missing child or empty text yields `default`.
    /// Returns the child serializer so callers can add attributes to it.
    pub fn child_with_text<V: Scalar>(
        &self,
        child: &str,
        value: &mut V,
        default: impl Into<V>,
    ) -> Result<Self> {
        let default = default.into();
        if !self.accessor.should_emit(value, &default) {
            return Ok(self.invalid());
        }
        let child = self.child(child);
        child.text_or(value, default)?;
        Ok(child)
    }

    /// Transfer `value` through attribute `attribute` of a child named
    /// `child`, with the same creation rules as
    /// [`child_with_text`](Self::child_with_text).
    pub fn child_with_attribute<V: Scalar>(
        &self,
        child: &str,
        attribute: &str,
        value: &mut V,
        default: impl Into<V>,
    ) -> Result<Self> {
        let default = default.into();
        if !self.accessor.should_emit(value, &default) {
            return Ok(self.invalid());
        }
        let child = self.child(child);
        child.attribute_or(attribute, value, default)?;
        Ok(child)
    }
}

/// A serialization pass over one tree.
///
/// The session owns the accessor, and with it the borrow of the tree: a
/// shared borrow for readers, an exclusive one for writers. All serializers
/// come from [`serializer`](Self::serializer) and cannot outlive the session.
pub struct Session<'d, T: Tree = Document> {
    accessor: Accessor<'d, T>,
    entry: Option<T::Node>,
}

impl<'d, T: Tree> Session<'d, T> {
    /// Read from the document element of `tree`.
    ///
    /// The entry serializer is invalid if the tree is empty.
    pub fn reader(tree: &'d T) -> Self {
        let entry = tree.document_element();
        debug!(valid = entry.is_some(), "reading from document element");
        Self {
            accessor: Accessor::reader(tree),
            entry,
        }
    }

    /// Read from `node` of `tree`.
    pub fn reader_at(tree: &'d T, node: T::Node) -> Self {
        Self {
            accessor: Accessor::reader(tree),
            entry: Some(node),
        }
    }

    /// Write under the document node of `tree`. The first child created
    /// becomes the document element.
    ///
    /// The document node itself only holds children: text, CDATA,
    /// attributes and a name written at the entry cursor are skipped.
    pub fn writer(tree: &'d mut T) -> Self {
        let root = tree.root();
        Self::writer_at(tree, root)
    }

    /// Append a document element named `name` to `tree` and write into it.
    pub fn writer_with_root(tree: &'d mut T, name: &str) -> Self {
        let root = tree.root();
        let element = tree.append_child(root, name);
        debug!(name, "writing into new document element");
        Self::writer_at(tree, element)
    }

    /// Write into `node` of `tree`.
    pub fn writer_at(tree: &'d mut T, node: T::Node) -> Self {
        Self {
            accessor: Accessor::writer(tree),
            entry: Some(node),
        }
    }

    /// The serializer at the entry node.
    pub fn serializer(&self) -> Serializer<'_, 'd, T> {
        Serializer {
            node: self.entry,
            accessor: &self.accessor,
        }
    }

    /// The direction of the pass.
    pub fn mode(&self) -> Mode {
        self.accessor.mode()
    }

    /// Whether defaulted writes emit values equal to their default.
    pub fn write_default_values(&self) -> bool {
        self.accessor.write_default_values()
    }

    /// Change the write-defaults policy. Ignored when reading.
    pub fn set_write_default_values(&self, write: bool) {
        self.accessor.set_write_default_values(write);
    }
}

impl<T: Tree> fmt::Debug for Session<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("accessor", &self.accessor)
            .field("entry", &self.entry)
            .finish()
    }
}
