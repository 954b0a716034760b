//! Mode-specific primitives over a [`Tree`].
//!
//! A [`ReadAccessor`] locates nodes and parses their text; a
//! [`WriteAccessor`] creates nodes and renders values into them. Both expose
//! the same [`NodeAccessor`] surface, and [`Accessor`] selects one of them
//! once, when a session is built.
//!
//! Every operation takes the current node as an `Option`: `None` stands for a
//! node that a read lookup did not find. Such calls never fail. Writes are
//! skipped, reads yield the default.

use core::cell::{Cell, RefCell};
use core::fmt;

use crate::tracing_macros::trace;
use crate::{Error, Result, Scalar, Tree};

/// The direction of a serialization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Values are loaded from an existing tree.
    Read,
    /// Values are saved into a tree being built.
    Write,
}

/// The primitive operations a serialization pass performs on a tree.
pub trait NodeAccessor<T: Tree> {
    /// The mode this accessor was built for.
    fn mode(&self) -> Mode;

    /// Whether defaulted writes emit values equal to their default.
    fn write_default_values(&self) -> bool;

    /// Change the write-defaults policy. Ignored when reading.
    fn set_write_default_values(&self, write: bool);

    /// Write: append a new child named `name`. Read: the first child named
    /// `name`.
    fn child(&self, node: Option<T::Node>, name: &str) -> Option<T::Node>;

    /// Write: insert a new sibling named `name` right after `node`. Read: the
    /// next sibling named `name`.
    fn next_sibling(&self, node: Option<T::Node>, name: &str) -> Option<T::Node>;

    /// Write: rename `node` to `name`. Read: store the name of `node` in
    /// `name`.
    fn node_name(&self, node: Option<T::Node>, name: &mut String);

    /// Transfer `value` to or from the text of `node`.
    fn text<V: Scalar>(&self, node: Option<T::Node>, value: &mut V, default: Option<V>)
    -> Result<()>;

    /// Transfer `value` to or from attribute `name` of `node`.
    fn attribute<V: Scalar>(
        &self,
        node: Option<T::Node>,
        name: &str,
        value: &mut V,
        default: Option<V>,
    ) -> Result<()>;

    /// Transfer `text` to or from `node` as a CDATA section.
    fn cdata(&self, node: Option<T::Node>, text: &mut String);

    /// Whether a value guarded by `default` takes part in this pass.
    ///
    /// Always `true` when reading. When writing, `false` only if `value`
    /// equals `default` and defaults are not written.
    fn should_emit<V: PartialEq>(&self, value: &V, default: &V) -> bool {
        match self.mode() {
            Mode::Read => true,
            Mode::Write => self.write_default_values() || value != default,
        }
    }
}

/// Loads values out of a tree. Never mutates it.
pub struct ReadAccessor<'d, T: Tree> {
    tree: &'d T,
    write_defaults: Cell<bool>,
}

impl<'d, T: Tree> ReadAccessor<'d, T> {
    /// Create a reader over `tree`.
    pub fn new(tree: &'d T) -> Self {
        Self {
            tree,
            write_defaults: Cell::new(true),
        }
    }

    /// The tree being read.
    pub fn tree(&self) -> &'d T {
        self.tree
    }

    fn assign<V: Scalar>(
        &self,
        node: T::Node,
        attribute: Option<&str>,
        text: Option<&str>,
        value: &mut V,
        default: Option<V>,
    ) -> Result<()> {
        let Some(text) = text else {
            *value = default.unwrap_or_default();
            return Ok(());
        };
        *value = V::parse(text).map_err(|source| {
            let name = self.tree.node_name(node);
            match attribute {
                Some(attribute) => Error::attribute(name, attribute, source),
                None => Error::text(name, source),
            }
        })?;
        Ok(())
    }
}

impl<T: Tree> NodeAccessor<T> for ReadAccessor<'_, T> {
    fn mode(&self) -> Mode {
        Mode::Read
    }

    fn write_default_values(&self) -> bool {
        self.write_defaults.get()
    }

    fn set_write_default_values(&self, write: bool) {
        self.write_defaults.set(write);
    }

    fn child(&self, node: Option<T::Node>, name: &str) -> Option<T::Node> {
        self.tree.first_child(node?, name)
    }

    fn next_sibling(&self, node: Option<T::Node>, name: &str) -> Option<T::Node> {
        self.tree.next_sibling(node?, name)
    }

    fn node_name(&self, node: Option<T::Node>, name: &mut String) {
        name.clear();
        if let Some(node) = node {
            name.push_str(self.tree.node_name(node));
        }
    }

    fn text<V: Scalar>(
        &self,
        node: Option<T::Node>,
        value: &mut V,
        default: Option<V>,
    ) -> Result<()> {
        let Some(node) = node else {
            *value = default.unwrap_or_default();
            return Ok(());
        };
        let text = self.tree.text(node).filter(|text| !text.is_empty());
        self.assign(node, None, text, value, default)
    }

    fn attribute<V: Scalar>(
        &self,
        node: Option<T::Node>,
        name: &str,
        value: &mut V,
        default: Option<V>,
    ) -> Result<()> {
        let Some(node) = node else {
            *value = default.unwrap_or_default();
            return Ok(());
        };
        let text = self.tree.attribute(node, name);
        self.assign(node, Some(name), text, value, default)
    }

    fn cdata(&self, node: Option<T::Node>, text: &mut String) {
        text.clear();
        if let Some(content) = node.and_then(|node| self.tree.text(node)) {
            text.push_str(content);
        }
    }
}

/// Saves values into a tree, creating nodes and attributes as it goes.
///
/// Only ever appends nodes or sets names, text and attributes.
pub struct WriteAccessor<'d, T: Tree> {
    tree: RefCell<&'d mut T>,
    write_defaults: Cell<bool>,
}

impl<'d, T: Tree> WriteAccessor<'d, T> {
    /// Create a writer over `tree`. Default values are written until
    /// [`set_write_default_values`](NodeAccessor::set_write_default_values)
    /// says otherwise.
    pub fn new(tree: &'d mut T) -> Self {
        Self {
            tree: RefCell::new(tree),
            write_defaults: Cell::new(true),
        }
    }

    fn skips<V: PartialEq>(&self, value: &V, default: Option<&V>) -> bool {
        default.is_some_and(|default| !self.should_emit(value, default))
    }

    /// `node`, unless it is the document node, which only holds children.
    fn content_node(&self, node: Option<T::Node>) -> Option<T::Node> {
        let node = node?;
        if node == self.tree.borrow().root() {
            trace!("document node carries no name, text or attributes, skipped");
            return None;
        }
        Some(node)
    }
}

impl<T: Tree> NodeAccessor<T> for WriteAccessor<'_, T> {
    fn mode(&self) -> Mode {
        Mode::Write
    }

    fn write_default_values(&self) -> bool {
        self.write_defaults.get()
    }

    fn set_write_default_values(&self, write: bool) {
        self.write_defaults.set(write);
    }

    fn child(&self, node: Option<T::Node>, name: &str) -> Option<T::Node> {
        let child = self.tree.borrow_mut().append_child(node?, name);
        trace!(name, "appended child");
        Some(child)
    }

    fn next_sibling(&self, node: Option<T::Node>, name: &str) -> Option<T::Node> {
        let sibling = self.tree.borrow_mut().insert_sibling_after(node?, name);
        trace!(name, inserted = sibling.is_some(), "inserted sibling");
        sibling
    }

    fn node_name(&self, node: Option<T::Node>, name: &mut String) {
        if let Some(node) = self.content_node(node) {
            self.tree.borrow_mut().set_node_name(node, name);
        }
    }

    fn text<V: Scalar>(
        &self,
        node: Option<T::Node>,
        value: &mut V,
        default: Option<V>,
    ) -> Result<()> {
        let Some(node) = self.content_node(node) else {
            return Ok(());
        };
        if self.skips(value, default.as_ref()) {
            trace!(kind = V::KIND, "text equals its default, skipped");
            return Ok(());
        }
        self.tree.borrow_mut().set_text(node, value.render());
        Ok(())
    }

    fn attribute<V: Scalar>(
        &self,
        node: Option<T::Node>,
        name: &str,
        value: &mut V,
        default: Option<V>,
    ) -> Result<()> {
        let Some(node) = self.content_node(node) else {
            return Ok(());
        };
        if self.skips(value, default.as_ref()) {
            trace!(name, "attribute equals its default, skipped");
            return Ok(());
        }
        self.tree
            .borrow_mut()
            .set_attribute(node, name, value.render());
        Ok(())
    }

    fn cdata(&self, node: Option<T::Node>, text: &mut String) {
        if let Some(node) = self.content_node(node) {
            self.tree.borrow_mut().set_cdata(node, text.clone());
        }
    }
}

/// One of the two accessors, chosen when a session is built.
pub enum Accessor<'d, T: Tree> {
    /// Loading from a tree.
    Read(ReadAccessor<'d, T>),
    /// Saving into a tree.
    Write(WriteAccessor<'d, T>),
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            Accessor::Read($inner) => $body,
            Accessor::Write($inner) => $body,
        }
    };
}

impl<'d, T: Tree> Accessor<'d, T> {
    /// An accessor reading from `tree`.
    pub fn reader(tree: &'d T) -> Self {
        Self::Read(ReadAccessor::new(tree))
    }

    /// An accessor writing into `tree`.
    pub fn writer(tree: &'d mut T) -> Self {
        Self::Write(WriteAccessor::new(tree))
    }
}

impl<T: Tree> NodeAccessor<T> for Accessor<'_, T> {
    fn mode(&self) -> Mode {
        dispatch!(self, a => a.mode())
    }

    fn write_default_values(&self) -> bool {
        dispatch!(self, a => a.write_default_values())
    }

    fn set_write_default_values(&self, write: bool) {
        dispatch!(self, a => a.set_write_default_values(write))
    }

    fn child(&self, node: Option<T::Node>, name: &str) -> Option<T::Node> {
        dispatch!(self, a => a.child(node, name))
    }

    fn next_sibling(&self, node: Option<T::Node>, name: &str) -> Option<T::Node> {
        dispatch!(self, a => a.next_sibling(node, name))
    }

    fn node_name(&self, node: Option<T::Node>, name: &mut String) {
        dispatch!(self, a => a.node_name(node, name))
    }

    fn text<V: Scalar>(
        &self,
        node: Option<T::Node>,
        value: &mut V,
        default: Option<V>,
    ) -> Result<()> {
        dispatch!(self, a => a.text(node, value, default))
    }

    fn attribute<V: Scalar>(
        &self,
        node: Option<T::Node>,
        name: &str,
        value: &mut V,
        default: Option<V>,
    ) -> Result<()> {
        dispatch!(self, a => a.attribute(node, name, value, default))
    }

    fn cdata(&self, node: Option<T::Node>, text: &mut String) {
        dispatch!(self, a => a.cdata(node, text))
    }
}

impl<T: Tree> fmt::Debug for Accessor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("mode", &self.mode())
            .field("write_default_values", &self.write_default_values())
            .finish_non_exhaustive()
    }
}
