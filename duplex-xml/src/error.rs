//! Error types for XML text.

use core::fmt;

/// XML parsing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// Error from quick-xml.
    Parse(String),
    /// The input ended inside an element.
    UnexpectedEof,
    /// A closing tag without a matching opening tag.
    UnbalancedTags,
    /// Invalid UTF-8.
    InvalidUtf8(core::str::Utf8Error),
    /// A second element at the top level.
    MultipleRoots,
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlError::Parse(msg) => write!(f, "XML parse error: {msg}"),
            XmlError::UnexpectedEof => write!(f, "Unexpected end of XML"),
            XmlError::UnbalancedTags => write!(f, "Unbalanced XML tags"),
            XmlError::InvalidUtf8(e) => write!(f, "Invalid UTF-8 in XML: {e}"),
            XmlError::MultipleRoots => write!(f, "XML has more than one root element"),
        }
    }
}

impl std::error::Error for XmlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            XmlError::InvalidUtf8(e) => Some(e),
            _ => None,
        }
    }
}

/// Error from reading or writing a serializable value as XML.
#[derive(Debug)]
pub enum Error {
    /// The XML text itself is malformed.
    Xml(XmlError),
    /// The document does not hold the values the type expects.
    Serialize(duplex_core::Error),
    /// Writing the output failed.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Xml(e) => write!(f, "{e}"),
            Error::Serialize(e) => write!(f, "{e}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Xml(e) => Some(e),
            Error::Serialize(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}

impl From<XmlError> for Error {
    fn from(e: XmlError) -> Self {
        Error::Xml(e)
    }
}

impl From<duplex_core::Error> for Error {
    fn from(e: duplex_core::Error) -> Self {
        Error::Serialize(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
