//! Parsing XML text into a [`Document`] using quick-xml.

use duplex_tree::{Document, NodeId, Text};
use quick_xml::Reader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::Event;

use crate::XmlError;
use crate::tracing_macros::{debug, trace};

/// Parse XML text into a document.
///
/// Element text is kept verbatim, except whitespace-only runs between child
/// elements or next to a CDATA section, which are layout and get dropped.
/// Comments, processing instructions, the XML declaration and the doctype
/// are skipped. Input without any element yields an empty document.
pub fn parse(input: &str) -> Result<Document, XmlError> {
    parse_slice(input.as_bytes())
}

/// Parse XML bytes into a document.
pub fn parse_slice(input: &[u8]) -> Result<Document, XmlError> {
    trace!(input_len = input.len(), "parsing XML");

    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();
    let mut doc = Document::new();
    let mut open: Vec<(NodeId, TextBuffer)> = Vec::new();

    loop {
        buf.clear();
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| XmlError::Parse(e.to_string()))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let parent = match open.last_mut() {
                    Some((parent, buffer)) => {
                        buffer.child_element();
                        *parent
                    }
                    None if doc.is_empty() => doc.root(),
                    None => return Err(XmlError::MultipleRoots),
                };
                let name = e.name();
                let name =
                    core::str::from_utf8(name.as_ref()).map_err(XmlError::InvalidUtf8)?;
                let node = doc.append_child(parent, name);

                for attr in e.attributes() {
                    let attr = attr.map_err(|e| XmlError::Parse(e.to_string()))?;
                    let key = core::str::from_utf8(attr.key.as_ref())
                        .map_err(XmlError::InvalidUtf8)?;
                    let value = attr
                        .unescape_value()
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    doc.set_attribute(node, key, value.into_owned());
                }

                if matches!(event, Event::Start(_)) {
                    open.push((node, TextBuffer::default()));
                }
            }
            Event::End(_) => {
                let (node, text) = open.pop().ok_or(XmlError::UnbalancedTags)?;
                doc.data_mut(node).text = text.finish();
            }
            Event::Text(e) => {
                let text = e.decode().map_err(|e| XmlError::Parse(e.to_string()))?;
                match open.last_mut() {
                    Some((_, buffer)) => buffer.push_text(&text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(XmlError::Parse(
                            "text outside the root element".to_owned(),
                        ));
                    }
                }
            }
            Event::GeneralRef(e) => {
                let raw = e.decode().map_err(|e| XmlError::Parse(e.to_string()))?;
                let resolved = resolve_entity(&raw)?;
                match open.last_mut() {
                    Some((_, buffer)) => buffer.push_entity(&resolved),
                    None => {
                        return Err(XmlError::Parse(format!(
                            "entity &{raw}; outside the root element"
                        )));
                    }
                }
            }
            Event::CData(e) => {
                let text =
                    core::str::from_utf8(e.as_ref()).map_err(XmlError::InvalidUtf8)?;
                if let Some((_, buffer)) = open.last_mut() {
                    buffer.push_cdata(text);
                }
            }
            Event::Eof => {
                if !open.is_empty() {
                    return Err(XmlError::UnexpectedEof);
                }
                break;
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
        }
    }

    debug!(nodes = doc.node_count(), "parsed XML document");
    Ok(doc)
}

/// Text collected for one open element.
///
/// Character data accumulates in runs delimited by child elements and CDATA
/// sections. A run made only of whitespace that touches such a delimiter is
/// indentation and is dropped; every other run is kept as written. Entity
/// references always count as content, so `&#32;` survives.
#[derive(Default)]
struct TextBuffer {
    text: String,
    run: String,
    /// Whether the current run holds entity-produced characters.
    run_has_entity: bool,
    has_children: bool,
    cdata: bool,
}

impl TextBuffer {
    fn push_text(&mut self, text: &str) {
        self.run.push_str(text);
    }

    fn push_entity(&mut self, text: &str) {
        self.run.push_str(text);
        self.run_has_entity = true;
    }

    fn push_cdata(&mut self, text: &str) {
        self.end_run(true);
        self.text.push_str(text);
        self.cdata = true;
    }

    fn child_element(&mut self) {
        self.end_run(true);
        self.has_children = true;
    }

    fn end_run(&mut self, at_markup: bool) {
        let layout = at_markup && !self.run_has_entity && self.run.trim().is_empty();
        if !layout {
            self.text.push_str(&self.run);
        }
        self.run.clear();
        self.run_has_entity = false;
    }

    fn finish(mut self) -> Option<Text> {
        let at_markup = self.has_children || self.cdata;
        self.end_run(at_markup);
        if self.cdata {
            Some(Text::CData(self.text))
        } else if self.text.is_empty() {
            None
        } else {
            Some(Text::Plain(self.text))
        }
    }
}

/// Resolve a general entity reference.
fn resolve_entity(raw: &str) -> Result<String, XmlError> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.into());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            u32::from_str_radix(hex, 16)
                .map_err(|_| XmlError::Parse(format!("Invalid hex entity: #{rest}")))?
        } else {
            rest.parse::<u32>()
                .map_err(|_| XmlError::Parse(format!("Invalid decimal entity: #{rest}")))?
        };

        let ch = char::from_u32(code)
            .ok_or_else(|| XmlError::Parse(format!("Invalid Unicode: {code}")))?;
        return Ok(ch.to_string());
    }

    Err(XmlError::Parse(format!("Unknown entity: &{raw};")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_text(xml: &str) -> Option<Text> {
        let doc = parse(xml).unwrap();
        let root = doc.document_element().unwrap();
        doc.text_content(root).cloned()
    }

    #[test]
    fn builds_nested_elements() {
        let doc = parse(r#"<doc><node value="17">text</node><other/></doc>"#).unwrap();
        let root = doc.document_element().unwrap();
        assert_eq!(doc.name(root), "doc");

        let node = doc.child(root, "node").unwrap();
        assert_eq!(doc.attribute(node, "value"), Some("17"));
        assert_eq!(doc.text(node), Some("text"));
        assert!(doc.child(root, "other").is_some());
        assert_eq!(doc.node_count(), 3);
    }

    #[test]
    fn element_text_is_verbatim() {
        assert_eq!(
            element_text("<a>\n   Noddy &amp; Big Ears\n</a>"),
            Some(Text::Plain("\n   Noddy & Big Ears\n".into()))
        );
        assert_eq!(
            element_text("<a>  indented</a>"),
            Some(Text::Plain("  indented".into()))
        );
        assert_eq!(element_text("<a> </a>"), Some(Text::Plain(" ".into())));
        assert_eq!(element_text("<a></a>"), None);
        assert_eq!(element_text("<a/>"), None);
    }

    #[test]
    fn indentation_between_children_is_dropped() {
        assert_eq!(element_text("<a>\n  <b/>\n  <c/>\n</a>"), None);
        assert_eq!(
            element_text("<p>hello <b/> world</p>"),
            Some(Text::Plain("hello  world".into()))
        );
        assert_eq!(
            element_text("<a>\n  &#32;<b/>\n</a>"),
            Some(Text::Plain("\n  \u{20}".into()))
        );
    }

    #[test]
    fn cdata_is_verbatim() {
        assert_eq!(
            element_text("<a>\n  <![CDATA[ <raw> & ]]>\n</a>"),
            Some(Text::CData(" <raw> & ".into()))
        );
    }

    #[test]
    fn attributes_are_unescaped() {
        let doc = parse(r#"<a title="&lt;b&gt; &quot;q&quot;"/>"#).unwrap();
        let root = doc.document_element().unwrap();
        assert_eq!(doc.attribute(root, "title"), Some("<b> \"q\""));
    }

    #[test]
    fn prolog_and_comments_are_skipped() {
        let doc = parse(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE doc>\n<!-- hi -->\n<doc><?pi x?><a/></doc>\n",
        )
        .unwrap();
        let root = doc.document_element().unwrap();
        assert_eq!(doc.children(root).count(), 1);
    }

    #[test]
    fn empty_input_is_an_empty_document() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  <!-- nothing -->  ").unwrap().is_empty());
    }

    #[test]
    fn malformed_input() {
        assert_eq!(parse("<a><b></b>"), Err(XmlError::UnexpectedEof));
        assert_eq!(parse("<a/><b/>"), Err(XmlError::MultipleRoots));
        assert!(matches!(parse("<a></b>"), Err(XmlError::Parse(_))));
        assert!(matches!(parse("<a>&bogus;</a>"), Err(XmlError::Parse(_))));
        assert!(matches!(parse("stray<a/>"), Err(XmlError::Parse(_))));
    }
}
