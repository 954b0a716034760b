//! The serialization contract and the algorithms for collections.

use std::collections::{LinkedList, VecDeque};

use duplex_tree::Document;

use crate::accessor::Mode;
use crate::tracing_macros::trace;
use crate::{Result, Scalar, Serializer, Session, Tree};

/// A type that serializes itself in both directions with one method.
///
/// `serialize` describes where each field lives relative to `ser`. When
/// `ser` is writing, the fields are saved; when it is reading, they are
/// loaded. The same body serves both.
pub trait Serializable<T: Tree = Document> {
    /// Save to or load from the node at `ser`.
    fn serialize(&mut self, ser: Serializer<'_, '_, T>) -> Result<()>;
}

impl<T: Tree, S: Serializable<T> + ?Sized> Serializable<T> for Box<S> {
    fn serialize(&mut self, ser: Serializer<'_, '_, T>) -> Result<()> {
        (**self).serialize(ser)
    }
}

/// A growable, ordered collection of items.
pub trait Container {
    /// The element type.
    type Item;

    /// Append `item` at the end.
    fn push_item(&mut self, item: Self::Item);

    /// Iterate the items in order.
    fn items_mut(&mut self) -> impl Iterator<Item = &mut Self::Item>;
}

impl<I> Container for Vec<I> {
    type Item = I;

    fn push_item(&mut self, item: I) {
        self.push(item);
    }

    fn items_mut(&mut self) -> impl Iterator<Item = &mut I> {
        self.iter_mut()
    }
}

impl<I> Container for VecDeque<I> {
    type Item = I;

    fn push_item(&mut self, item: I) {
        self.push_back(item);
    }

    fn items_mut(&mut self) -> impl Iterator<Item = &mut I> {
        self.iter_mut()
    }
}

impl<I> Container for LinkedList<I> {
    type Item = I;

    fn push_item(&mut self, item: I) {
        self.push_back(item);
    }

    fn items_mut(&mut self) -> impl Iterator<Item = &mut I> {
        self.iter_mut()
    }
}

/// Serialize a fixed number of items as children named `item_name`.
///
/// Writing creates one child per slot, in order. Reading fills the slots
/// from successive children named `item_name`, each into a fresh
/// `I::default()`, and stops when the slots run out: surplus children are
/// ignored. Slots with no matching child keep their value.
pub fn serialize_array<T, I>(
    ser: Serializer<'_, '_, T>,
    items: &mut [I],
    item_name: &str,
) -> Result<()>
where
    T: Tree,
    I: Serializable<T> + Default,
{
    match ser.mode() {
        Mode::Read => {
            let mut item_ser = ser.child(item_name);
            for slot in items.iter_mut() {
                if !item_ser.is_valid() {
                    break;
                }
                let mut item = I::default();
                item.serialize(item_ser)?;
                *slot = item;
                item_ser = item_ser.next_sibling(item_name);
            }
            if item_ser.is_valid() {
                trace!(item_name, capacity = items.len(), "array full, ignoring surplus items");
            }
        }
        Mode::Write => {
            for item in items.iter_mut() {
                item.serialize(ser.child(item_name))?;
            }
        }
    }
    Ok(())
}

/// Serialize a container as children named `item_name`.
///
/// Writing creates one child per item in iteration order. Reading appends a
/// fresh item for every child named `item_name`, in document order.
pub fn serialize_container<T, C>(
    ser: Serializer<'_, '_, T>,
    container: &mut C,
    item_name: &str,
) -> Result<()>
where
    T: Tree,
    C: Container,
    C::Item: Serializable<T> + Default,
{
    match ser.mode() {
        Mode::Read => {
            let mut item_ser = ser.child(item_name);
            while item_ser.is_valid() {
                let mut item = C::Item::default();
                item.serialize(item_ser)?;
                container.push_item(item);
                item_ser = item_ser.next_sibling(item_name);
            }
        }
        Mode::Write => {
            for item in container.items_mut() {
                item.serialize(ser.child(item_name))?;
            }
        }
    }
    Ok(())
}

/// Serialize a container of scalars as the text of children named
/// `item_name`.
pub fn serialize_scalar_container<T, C>(
    ser: Serializer<'_, '_, T>,
    container: &mut C,
    item_name: &str,
) -> Result<()>
where
    T: Tree,
    C: Container,
    C::Item: Scalar,
{
    match ser.mode() {
        Mode::Read => {
            let mut item_ser = ser.child(item_name);
            while item_ser.is_valid() {
                let mut item = C::Item::default();
                item_ser.text(&mut item)?;
                container.push_item(item);
                item_ser = item_ser.next_sibling(item_name);
            }
        }
        Mode::Write => {
            for item in container.items_mut() {
                ser.child(item_name).text(item)?;
            }
        }
    }
    Ok(())
}

/// Serialize a fixed number of scalars as the text of children named
/// `item_name`.
///
/// Reading stops when the slots run out, like [`serialize_array`]; slots
/// with no matching child keep their value.
pub fn serialize_scalar_array<T, V>(
    ser: Serializer<'_, '_, T>,
    values: &mut [V],
    item_name: &str,
) -> Result<()>
where
    T: Tree,
    V: Scalar,
{
    match ser.mode() {
        Mode::Read => {
            let mut item_ser = ser.child(item_name);
            for slot in values.iter_mut() {
                if !item_ser.is_valid() {
                    break;
                }
                item_ser.text(slot)?;
                item_ser = item_ser.next_sibling(item_name);
            }
            if item_ser.is_valid() {
                trace!(item_name, capacity = values.len(), "array full, ignoring surplus items");
            }
        }
        Mode::Write => {
            for value in values.iter_mut() {
                ser.child(item_name).text(value)?;
            }
        }
    }
    Ok(())
}

/// Serialize a growable container of strings as the text of children named
/// `item_name`.
///
/// Reading appends one string per child. For a fixed `[String; N]` use
/// [`serialize_scalar_array`].
pub fn serialize_string_array<T, C>(
    ser: Serializer<'_, '_, T>,
    strings: &mut C,
    item_name: &str,
) -> Result<()>
where
    T: Tree,
    C: Container<Item = String>,
{
    serialize_scalar_container(ser, strings, item_name)
}

/// Write `value` into a new document whose element is named `root_name`.
pub fn to_document<S>(
    value: &mut S,
    root_name: &str,
    write_default_values: bool,
) -> Result<Document>
where
    S: Serializable + ?Sized,
{
    let mut doc = Document::new();
    {
        let session = Session::writer_with_root(&mut doc, root_name);
        session.set_write_default_values(write_default_values);
        value.serialize(session.serializer())?;
    }
    Ok(doc)
}

/// Read a fresh `S` from the document element of `doc`.
pub fn from_document<S>(doc: &Document) -> Result<S>
where
    S: Serializable + Default,
{
    let mut value = S::default();
    value.serialize(Session::reader(doc).serializer())?;
    Ok(value)
}
