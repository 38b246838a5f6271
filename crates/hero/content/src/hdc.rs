//! `.hdc` character documents ⇄ [`Element`] trees.
//!
//! Reading accepts UTF-8 text with or without a byte-order mark. Detecting
//! other encodings is left to whoever turns bytes into a `&str`.

use hero_core::{Element, HeroError};
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

const BOM: char = '\u{feff}';
const INDENT: &str = "  ";

/// Parses document text into its root element.
///
/// # Errors
///
/// [`HeroError::MalformedDocument`] when the text is not well-formed XML,
/// has no root element, or has more than one.
pub fn read_document(text: &str) -> Result<Element, HeroError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            HeroError::malformed(format!("at byte {}: {e}", reader.buffer_position()))
        })?;
        match event {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let element = element_from(&start)?;
                close(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| HeroError::malformed("unbalanced end tag"))?;
                close(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let value = text.unescape().map_err(HeroError::malformed)?;
                append_text(&mut stack, &value);
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                append_text(&mut stack, &value);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(HeroError::malformed(format!(
            "element '{}' is never closed",
            open.name
        )));
    }
    let root = root.ok_or_else(|| HeroError::malformed("document has no root element"))?;
    tracing::debug!(root = %root.name, sections = root.children.len(), "read document");
    Ok(root)
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, HeroError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(HeroError::malformed)?
        .to_string();
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(HeroError::malformed)?;
        let key = std::str::from_utf8(attr.key.as_ref()).map_err(HeroError::malformed)?;
        let value = attr.unescape_value().map_err(HeroError::malformed)?;
        element.set_attr(key, value.into_owned());
    }
    Ok(element)
}

fn close(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), HeroError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_child(element);
            Ok(())
        }
        None if root.is_some() => Err(HeroError::malformed("more than one root element")),
        None => {
            *root = Some(element);
            Ok(())
        }
    }
}

fn append_text(stack: &mut [Element], value: &str) {
    if let Some(current) = stack.last_mut() {
        match &mut current.text {
            Some(text) => text.push_str(value),
            None => current.text = Some(value.to_string()),
        }
    }
}

/// Renders a tree as an indented UTF-8 document with an XML declaration.
pub fn write_document(root: &Element) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_element(root, 0, &mut out);
    out
}

fn write_element(element: &Element, depth: usize, out: &mut String) {
    let indent = INDENT.repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }

    let text = element.text.as_deref().filter(|t| !t.is_empty());
    match (text, element.children.is_empty()) {
        (None, true) => out.push_str("/>\n"),
        (Some(text), true) => {
            out.push('>');
            out.push_str(&escape(text));
            close_tag(&element.name, out);
        }
        (text, false) => {
            out.push_str(">\n");
            if let Some(text) = text {
                out.push_str(&INDENT.repeat(depth + 1));
                out.push_str(&escape(text));
                out.push('\n');
            }
            for child in &element.children {
                write_element(child, depth + 1, out);
            }
            out.push_str(&indent);
            close_tag(&element.name, out);
        }
    }
}

fn close_tag(name: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_attributes_children_and_text() {
        let doc = "\u{feff}<?xml version=\"1.0\" encoding=\"UTF-16\"?>\n\
            <CHARACTER version=\"6.0\">\n\
              <CHARACTER_INFO CHARACTER_NAME=\"Lady &amp; Tiger\">\n\
                <BACKGROUND>Born &lt;somewhere&gt;</BACKGROUND>\n\
              </CHARACTER_INFO>\n\
              <SKILLS/>\n\
            </CHARACTER>";
        let root = read_document(doc).expect("well-formed");

        assert_eq!(root.name, "CHARACTER");
        assert_eq!(root.attr("version"), Some("6.0"));
        let info = root.child("CHARACTER_INFO").expect("info");
        assert_eq!(info.attr("CHARACTER_NAME"), Some("Lady & Tiger"));
        assert_eq!(
            info.child("BACKGROUND").and_then(|b| b.text.as_deref()),
            Some("Born <somewhere>")
        );
        assert!(root.child("SKILLS").is_some());
    }

    #[test]
    fn malformed_documents_are_rejected() {
        for doc in ["", "   ", "<CHARACTER>", "<A></B>", "<A/><B/>"] {
            let err = read_document(doc).unwrap_err();
            assert!(
                matches!(err, HeroError::MalformedDocument { .. }),
                "{doc:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn written_documents_read_back() {
        let root = Element::new("CHARACTER")
            .with_attr("version", "6.0")
            .with_child(Element::new("CHARACTER_INFO").with_attr("GM", "\"Sam\" <sam@x>"))
            .with_child(
                Element::new("POWERS").with_child(
                    Element::new("POWER")
                        .with_attr("XMLID", "ENERGYBLAST")
                        .with_child(Element::new("NOTES").with_text("a & b")),
                ),
            );
        let text = write_document(&root);
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<CHARACTER"));
        assert_eq!(read_document(&text).expect("round trip"), root);
    }
}
