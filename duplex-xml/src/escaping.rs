//! Escaping of text, attribute values and CDATA sections.

use std::io::{self, Write};

/// Wraps a `Write` and escapes XML special characters as bytes pass through.
pub struct EscapingWriter<'a> {
    inner: &'a mut dyn Write,
    attribute: bool,
}

impl<'a> EscapingWriter<'a> {
    /// Escapes `&` `<` `>` in element text.
    pub fn text(inner: &'a mut dyn Write) -> Self {
        Self {
            inner,
            attribute: false,
        }
    }

    /// Escapes `&` `<` `>` `"` in attribute values, plus tab, newline and
    /// carriage return, which attribute normalization would otherwise turn
    /// into spaces.
    pub fn attribute(inner: &'a mut dyn Write) -> Self {
        Self {
            inner,
            attribute: true,
        }
    }
}

impl Write for EscapingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut start = 0;
        for (i, &b) in buf.iter().enumerate() {
            let escaped: &[u8] = match b {
                b'&' => b"&amp;",
                b'<' => b"&lt;",
                b'>' => b"&gt;",
                b'"' if self.attribute => b"&quot;",
                b'\t' if self.attribute => b"&#9;",
                b'\n' if self.attribute => b"&#10;",
                b'\r' => b"&#13;",
                _ => continue,
            };
            self.inner.write_all(&buf[start..i])?;
            self.inner.write_all(escaped)?;
            start = i + 1;
        }
        self.inner.write_all(&buf[start..])?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Write `text` as one or more CDATA sections.
///
/// A `]]>` inside `text` is split across two sections.
pub fn write_cdata(out: &mut dyn Write, text: &str) -> io::Result<()> {
    out.write_all(b"<![CDATA[")?;
    let mut rest = text;
    while let Some(at) = rest.find("]]>") {
        out.write_all(rest[..at + 2].as_bytes())?;
        out.write_all(b"]]><![CDATA[")?;
        rest = &rest[at + 2..];
    }
    out.write_all(rest.as_bytes())?;
    out.write_all(b"]]>")
}
