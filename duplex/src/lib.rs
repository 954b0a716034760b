#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use duplex_core::*;

/// The document type, for code that builds or inspects trees directly.
pub use duplex_tree as tree;

/// XML text for documents and serializable values.
#[cfg(feature = "xml")]
pub use duplex_xml as xml;
