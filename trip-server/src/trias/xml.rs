//! Generic namespace-preserving view of a parsed XML document.
//!
//! TRIAS servers wrap `TripResult` elements at different envelope depths, so
//! the response is kept as an untyped tree and searched, instead of being
//! deserialized against a fixed schema that would break on the next server.
//!
//! Conventions mirrored from the tag names on the wire:
//! - map keys are the qualified element names verbatim (`trias:TripResult`)
//! - attributes sit next to child elements under `@`-prefixed keys
//!   (`@xml:lang`), so they are preserved but never mistaken for elements
//! - when an element carries both attributes and text, the text is stored
//!   under the reserved `$text` key

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::TriasError;

/// Reserved key for the text content of an element that also has attributes.
const TEXT_KEY: &str = "$text";

/// One node of the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum XmlValue {
    /// Element content: ordered `(qualified name, value)` pairs.
    /// Repeated sibling names collapse into a single `Many` entry.
    Node(Vec<(String, XmlValue)>),

    /// Repeated sibling elements sharing one tag name.
    Many(Vec<XmlValue>),

    /// Text content of an element without attributes or children.
    Text(String),
}

impl XmlValue {
    /// Look up a child element by local name, ignoring its namespace prefix.
    ///
    /// Attribute (`@`) and text (`$`) entries never match.
    pub fn child(&self, name: &str) -> Option<&XmlValue> {
        match self {
            XmlValue::Node(entries) => entries
                .iter()
                .find(|(key, _)| element_local_name(key) == Some(name))
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// The text content of this node, if it has any.
    pub fn text(&self) -> Option<&str> {
        match self {
            XmlValue::Text(text) => Some(text),
            XmlValue::Node(entries) => entries
                .iter()
                .find(|(key, _)| key == TEXT_KEY)
                .and_then(|(_, value)| value.text()),
            XmlValue::Many(_) => None,
        }
    }

    /// The first element when this node is a repeated-sibling list, the node
    /// itself otherwise.
    pub fn first(&self) -> &XmlValue {
        match self {
            XmlValue::Many(items) => items.first().unwrap_or(self),
            other => other,
        }
    }
}

/// Local part of an element key; `None` for attribute and text entries.
pub(crate) fn element_local_name(key: &str) -> Option<&str> {
    if key.starts_with('@') || key.starts_with('$') {
        return None;
    }
    Some(key.rsplit(':').next().unwrap_or(key))
}

/// Parse an XML document into the generic tree.
///
/// Stateless; all parser options are fixed here (namespace prefixes kept,
/// attributes kept separate from text). Failure to parse is a
/// [`TriasError::MalformedResponse`].
pub fn parse(raw: &str) -> Result<XmlValue, TriasError> {
    let mut reader = Reader::from_str(raw);
    reader.config_mut().trim_text(true);

    let mut root = Vec::new();
    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => {
                let name = qualified_name(&start)?;
                let element = read_element(&mut reader, &start)?;
                insert(&mut root, name, element);
            }
            Event::Empty(start) => {
                let name = qualified_name(&start)?;
                insert(&mut root, name, empty_element(&start)?);
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions, stray text
            _ => {}
        }
    }

    Ok(XmlValue::Node(root))
}

/// Read the content of an element whose `Start` event was just consumed.
fn read_element(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<XmlValue, TriasError> {
    let mut entries = attribute_entries(start)?;
    let mut text = String::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(child) => {
                let name = qualified_name(&child)?;
                let element = read_element(reader, &child)?;
                insert(&mut entries, name, element);
            }
            Event::Empty(child) => {
                let name = qualified_name(&child)?;
                insert(&mut entries, name, empty_element(&child)?);
            }
            Event::Text(t) => text.push_str(&t.unescape().map_err(malformed)?),
            Event::CData(t) => {
                text.push_str(&String::from_utf8_lossy(&t.into_inner()));
            }
            // The reader checks that end tags match their start tag
            Event::End(_) => break,
            Event::Eof => {
                return Err(TriasError::MalformedResponse {
                    message: "unexpected end of document".into(),
                });
            }
            _ => {}
        }
    }

    if entries.is_empty() {
        return Ok(XmlValue::Text(text));
    }
    if !text.is_empty() {
        entries.push((TEXT_KEY.to_string(), XmlValue::Text(text)));
    }
    Ok(XmlValue::Node(entries))
}

/// A self-closing element: attributes only, no text.
fn empty_element(start: &BytesStart) -> Result<XmlValue, TriasError> {
    let entries = attribute_entries(start)?;
    if entries.is_empty() {
        Ok(XmlValue::Text(String::new()))
    } else {
        Ok(XmlValue::Node(entries))
    }
}

fn attribute_entries(start: &BytesStart) -> Result<Vec<(String, XmlValue)>, TriasError> {
    let mut entries = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(malformed)?;
        let key = format!("@{}", utf8(attribute.key.as_ref())?);
        let value = attribute.unescape_value().map_err(malformed)?.into_owned();
        entries.push((key, XmlValue::Text(value)));
    }
    Ok(entries)
}

/// Qualified tag name with its namespace prefix kept verbatim.
fn qualified_name(start: &BytesStart) -> Result<String, TriasError> {
    Ok(utf8(start.name().as_ref())?.to_string())
}

fn utf8(bytes: &[u8]) -> Result<&str, TriasError> {
    std::str::from_utf8(bytes).map_err(malformed)
}

fn malformed(err: impl std::fmt::Display) -> TriasError {
    TriasError::MalformedResponse {
        message: err.to_string(),
    }
}

/// Add a child entry, collapsing repeated sibling names into `Many`.
fn insert(entries: &mut Vec<(String, XmlValue)>, name: String, value: XmlValue) {
    match entries.iter_mut().find(|(key, _)| *key == name) {
        Some((_, XmlValue::Many(items))) => items.push(value),
        Some((_, existing)) => {
            let prev = std::mem::replace(existing, XmlValue::Many(Vec::new()));
            if let XmlValue::Many(items) = existing {
                items.push(prev);
                items.push(value);
            }
        }
        None => entries.push((name, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements() {
        let doc = parse(
            r#"<?xml version="1.0"?>
            <trias:Trip xmlns:trias="http://www.vdv.de/trias">
                <trias:Duration>PT27M</trias:Duration>
            </trias:Trip>"#,
        )
        .unwrap();

        let trip = doc.child("Trip").unwrap();
        assert_eq!(trip.child("Duration").and_then(XmlValue::text), Some("PT27M"));
    }

    #[test]
    fn keys_keep_namespace_prefixes() {
        let doc = parse("<trias:Trip><trias:Duration>PT5M</trias:Duration></trias:Trip>").unwrap();

        let XmlValue::Node(entries) = &doc else {
            panic!("expected a node at the root");
        };
        assert_eq!(entries[0].0, "trias:Trip");
    }

    #[test]
    fn child_lookup_ignores_prefix() {
        let doc = parse("<t:Trip><t:Duration>PT5M</t:Duration></t:Trip>").unwrap();

        let trip = doc.child("Trip").unwrap();
        assert_eq!(trip.child("Duration").and_then(XmlValue::text), Some("PT5M"));
    }

    #[test]
    fn repeated_siblings_collapse_into_many() {
        let doc = parse("<r><x>1</x><x>2</x><x>3</x><y>only</y></r>").unwrap();

        let root = doc.child("r").unwrap();
        let Some(XmlValue::Many(items)) = root.child("x") else {
            panic!("expected repeated siblings");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].text(), Some("1"));
        assert_eq!(root.child("x").unwrap().first().text(), Some("1"));
        assert_eq!(root.child("y").unwrap().first().text(), Some("only"));
    }

    #[test]
    fn attributes_kept_alongside_text() {
        let doc = parse(r#"<Text xml:lang="de">Hauptbahnhof</Text>"#).unwrap();

        let text = doc.child("Text").unwrap();
        assert_eq!(text.text(), Some("Hauptbahnhof"));

        let XmlValue::Node(entries) = text else {
            panic!("expected attributes to force a node");
        };
        assert!(entries.iter().any(|(k, v)| {
            k == "@xml:lang" && v.text() == Some("de")
        }));
    }

    #[test]
    fn attributes_never_match_element_lookups() {
        let doc = parse(r#"<r lang="x"><lang>element</lang></r>"#).unwrap();

        let root = doc.child("r").unwrap();
        assert_eq!(root.child("lang").and_then(XmlValue::text), Some("element"));
    }

    #[test]
    fn self_closing_elements_parse() {
        let doc = parse(r#"<r><empty/><flagged code="7"/></r>"#).unwrap();

        let root = doc.child("r").unwrap();
        assert_eq!(root.child("empty").and_then(XmlValue::text), Some(""));
        assert!(root.child("flagged").is_some());
    }

    #[test]
    fn escaped_text_is_unescaped() {
        let doc = parse("<r><name>Bahnhof &amp; Markt</name></r>").unwrap();

        let root = doc.child("r").unwrap();
        assert_eq!(
            root.child("name").and_then(XmlValue::text),
            Some("Bahnhof & Markt")
        );
    }

    #[test]
    fn mismatched_tags_are_malformed() {
        let err = parse("<a><b></a></b>").unwrap_err();
        assert!(matches!(err, TriasError::MalformedResponse { .. }));
    }

    #[test]
    fn truncated_document_is_malformed() {
        let err = parse("<a><b>").unwrap_err();
        assert!(matches!(err, TriasError::MalformedResponse { .. }));
    }

    #[test]
    fn empty_document_is_an_empty_node() {
        assert_eq!(parse("").unwrap(), XmlValue::Node(Vec::new()));
    }
}
