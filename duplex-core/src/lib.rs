#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod tracing_macros;

pub mod accessor;
mod convert;
mod error;
mod serializable;
mod serializer;
mod tree;

pub use accessor::{Accessor, Mode, NodeAccessor, ReadAccessor, WriteAccessor};
pub use convert::{ParseError, Scalar};
pub use error::{Error, Result};
pub use serializable::{
    Container, Serializable, from_document, serialize_array, serialize_container,
    serialize_scalar_array, serialize_scalar_container, serialize_string_array, to_document,
};
pub use serializer::{Serializer, Session};
pub use tree::Tree;

pub use duplex_tree::{Document, NodeId, Text};
