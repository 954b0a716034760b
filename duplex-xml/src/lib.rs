#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod tracing_macros;

mod error;
mod escaping;
mod parser;
mod writer;

use std::io::Write;

use duplex_core::{Serializable, from_document, to_document};

pub use error::{Error, XmlError};
pub use parser::{parse, parse_slice};
pub use writer::{
    SerializeOptions, to_string, to_string_pretty, to_string_with_options, to_vec_with_options,
    write_document,
};

/// Options for writing a [`Serializable`] value as XML.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether values equal to their default are written (default: true)
    pub write_default_values: bool,
    /// How the resulting document is printed
    pub format: SerializeOptions,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            write_default_values: true,
            format: SerializeOptions::default(),
        }
    }
}

impl WriteOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose whether values equal to their default are written.
    pub fn write_default_values(mut self, write: bool) -> Self {
        self.write_default_values = write;
        self
    }

    /// Set how the document is printed.
    pub fn format(mut self, format: SerializeOptions) -> Self {
        self.format = format;
        self
    }
}

/// Read a value from an XML string.
///
/// The value is serialized from the root element.
///
/// # Example
///
/// ```
/// use duplex_core::{Result, Serializable, Serializer};
/// use duplex_xml::from_str;
///
/// #[derive(Default)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// impl Serializable for Person {
///     fn serialize(&mut self, ser: Serializer<'_, '_>) -> Result<()> {
///         ser.child("name").text(&mut self.name)?;
///         ser.child("age").text(&mut self.age)
///     }
/// }
///
/// let xml = r#"<Person><name>Alice</name><age>30</age></Person>"#;
/// let person: Person = from_str(xml).unwrap();
/// assert_eq!(person.name, "Alice");
/// assert_eq!(person.age, 30);
/// ```
pub fn from_str<S>(input: &str) -> Result<S, Error>
where
    S: Serializable + Default,
{
    from_slice(input.as_bytes())
}

/// Read a value from XML bytes.
pub fn from_slice<S>(input: &[u8]) -> Result<S, Error>
where
    S: Serializable + Default,
{
    let doc = parse_slice(input)?;
    Ok(from_document(&doc)?)
}

/// Write a value as XML under a root element named `root_name`.
pub fn to_string_value<S>(
    value: &mut S,
    root_name: &str,
    options: &WriteOptions,
) -> Result<String, Error>
where
    S: Serializable + ?Sized,
{
    let doc = to_document(value, root_name, options.write_default_values)?;
    Ok(to_string_with_options(&doc, &options.format))
}

/// Write a value as XML to `out`.
pub fn to_writer_value<W, S>(
    out: &mut W,
    value: &mut S,
    root_name: &str,
    options: &WriteOptions,
) -> Result<(), Error>
where
    W: Write,
    S: Serializable + ?Sized,
{
    let doc = to_document(value, root_name, options.write_default_values)?;
    write_document(&doc, out, &options.format)?;
    Ok(())
}
