//! Printing a [`Document`] as XML text.

use std::borrow::Cow;
use std::io::{self, Write};

use duplex_tree::{Document, NodeId, Text};

use crate::escaping::{EscapingWriter, write_cdata};

/// Options for printing XML.
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Whether to pretty-print with indentation (default: false)
    pub pretty: bool,
    /// Indentation string for pretty-printing (default: "  ")
    pub indent: Cow<'static, str>,
    /// Whether to start with an XML declaration (default: false)
    pub declaration: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: Cow::Borrowed("  "),
            declaration: false,
        }
    }
}

impl SerializeOptions {
    /// Create new default options (compact output).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty-printing with default indentation.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Set a custom indentation string (implies pretty-printing).
    pub fn indent(mut self, indent: impl Into<Cow<'static, str>>) -> Self {
        self.indent = indent.into();
        self.pretty = true;
        self
    }

    /// Start the output with `<?xml version="1.0" encoding="UTF-8"?>`.
    pub fn declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}

/// Write `doc` as XML to `out`.
pub fn write_document<W: Write>(
    doc: &Document,
    out: &mut W,
    options: &SerializeOptions,
) -> io::Result<()> {
    let mut printer = Printer { doc, out, options };
    if options.declaration {
        printer.out.write_all(br#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        printer.newline()?;
    }
    for node in doc.children(doc.root()) {
        printer.element(node, 0, options.pretty)?;
    }
    Ok(())
}

/// Print `doc` as XML bytes.
pub fn to_vec_with_options(doc: &Document, options: &SerializeOptions) -> Vec<u8> {
    let mut out = Vec::new();
    write_document(doc, &mut out, options).expect("writing to a Vec cannot fail");
    out
}

/// Print `doc` as compact XML.
pub fn to_string(doc: &Document) -> String {
    to_string_with_options(doc, &SerializeOptions::default())
}

/// Print `doc` as XML indented with two spaces.
pub fn to_string_pretty(doc: &Document) -> String {
    to_string_with_options(doc, &SerializeOptions::default().pretty())
}

/// Print `doc` as XML with custom options.
pub fn to_string_with_options(doc: &Document, options: &SerializeOptions) -> String {
    let bytes = to_vec_with_options(doc, options);
    // Names, text and attribute values are all `String`s
    String::from_utf8(bytes).expect("printer produces valid UTF-8")
}

struct Printer<'a> {
    doc: &'a Document,
    out: &'a mut dyn Write,
    options: &'a SerializeOptions,
}

impl Printer<'_> {
    fn newline(&mut self) -> io::Result<()> {
        if self.options.pretty {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn indent(&mut self, depth: usize) -> io::Result<()> {
        for _ in 0..depth {
            self.out.write_all(self.options.indent.as_bytes())?;
        }
        Ok(())
    }

    /// Print one element. `pretty` is off inside elements that mix text and
    /// child elements, where added whitespace would change the text.
    fn element(&mut self, node: NodeId, depth: usize, pretty: bool) -> io::Result<()> {
        let doc = self.doc;
        let name = doc.name(node);
        let text = doc
            .text_content(node)
            .filter(|text| text.is_cdata() || !text.as_str().is_empty());
        let has_children = doc.children(node).next().is_some();

        if pretty {
            self.indent(depth)?;
        }
        write!(self.out, "<{name}")?;
        for (key, value) in doc.attributes(node) {
            write!(self.out, " {key}=\"")?;
            EscapingWriter::attribute(&mut *self.out).write_all(value.as_bytes())?;
            self.out.write_all(b"\"")?;
        }

        if text.is_none() && !has_children {
            self.out.write_all(b"/>")?;
        } else {
            self.out.write_all(b">")?;
            match text {
                Some(Text::CData(content)) => write_cdata(&mut *self.out, content)?,
                Some(Text::Plain(content)) => {
                    EscapingWriter::text(&mut *self.out).write_all(content.as_bytes())?;
                }
                None => {}
            }

            if has_children {
                let nested_pretty = pretty && text.is_none();
                if nested_pretty {
                    self.out.write_all(b"\n")?;
                }
                for child in doc.children(node) {
                    self.element(child, depth + 1, nested_pretty)?;
                }
                if nested_pretty {
                    self.indent(depth)?;
                }
            }
            write!(self.out, "</{name}>")?;
        }

        if pretty {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }
}
