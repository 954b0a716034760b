//! Error types for tree serialization.

use core::fmt;

use crate::ParseError;

/// Error raised while serializing.
///
/// Missing nodes and attributes are never errors; they resolve to defaults.
/// Only text that is present but cannot be converted is reported.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Node text or an attribute value did not parse as the requested type.
    Parse {
        /// Name of the node being read.
        node: String,
        /// The attribute being read, `None` for node text.
        attribute: Option<String>,
        /// The conversion failure.
        source: ParseError,
    },
}

impl Error {
    pub(crate) fn text(node: &str, source: ParseError) -> Self {
        Self::Parse {
            node: node.to_owned(),
            attribute: None,
            source,
        }
    }

    pub(crate) fn attribute(node: &str, attribute: &str, source: ParseError) -> Self {
        Self::Parse {
            node: node.to_owned(),
            attribute: Some(attribute.to_owned()),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse {
                node,
                attribute: Some(attribute),
                source,
            } => write!(f, "cannot read attribute `{attribute}` of <{node}>: {source}"),
            Self::Parse {
                node,
                attribute: None,
                source,
            } => write!(f, "cannot read text of <{node}>: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Result type for serialization.
pub type Result<T, E = Error> = core::result::Result<T, E>;
