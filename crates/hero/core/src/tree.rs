//! Attributed tree and the typed attribute accessor.
//!
//! Character files arrive as a tree of named nodes carrying string
//! attributes, child nodes and optional text. Two encodings of the same field
//! are common in the wild: an attribute (`<SKILL LEVELS="2">`) and a child
//! element (`<SKILL><LEVELS>2</LEVELS></SKILL>`). [`AttributeNode`] reads both
//! and never fails: absent or malformed values degrade to the caller's
//! default.

use serde::{Deserialize, Serialize};

/// One node of the attributed tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute (builder pattern).
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Adds a child element (builder pattern).
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the text content (builder pattern).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets an attribute, replacing an existing value of the same name.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Typed reads over a tree node with explicit defaults.
///
/// Lookup order is attribute first, then a direct child element of the same
/// name (its text).
pub trait AttributeNode {
    /// Raw attribute value, if present.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Text of a direct child element with the given name, if present.
    fn child_text(&self, name: &str) -> Option<&str>;

    /// Raw value in either encoding.
    fn raw(&self, name: &str) -> Option<&str> {
        self.attribute(name).or_else(|| self.child_text(name))
    }

    fn has(&self, name: &str) -> bool {
        self.raw(name).is_some()
    }

    fn get_string(&self, name: &str, default: &str) -> String {
        self.raw(name).unwrap_or(default).to_string()
    }

    /// Present and non-blank string value.
    fn get_opt_string(&self, name: &str) -> Option<String> {
        self.raw(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn get_number(&self, name: &str, default: f64) -> f64 {
        self.get_opt_number(name).unwrap_or(default)
    }

    /// Numeric value, `None` when absent or not a number.
    fn get_opt_number(&self, name: &str) -> Option<f64> {
        self.raw(name)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// Numeric value rounded to the nearest integer.
    fn get_int(&self, name: &str, default: i32) -> i32 {
        self.get_opt_number(name)
            .map(|v| v.round() as i32)
            .unwrap_or(default)
    }

    fn get_bool(&self, name: &str, default: bool) -> bool {
        self.raw(name).map(parse_bool).unwrap_or(default)
    }
}

impl AttributeNode for Element {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attr(name)
    }

    fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.text.as_deref())
    }
}

/// Boolean coercion used by the accessor.
///
/// Case-insensitive: values starting with `y`, the literal `true`, or `1`
/// are true. Everything else is false.
pub fn parse_bool(raw: &str) -> bool {
    let value = raw.trim().to_ascii_lowercase();
    value.starts_with('y') || value == "true" || value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill() -> Element {
        Element::new("SKILL")
            .with_attr("XMLID", "ACROBATICS")
            .with_attr("LEVELS", "2")
            .with_attr("BASECOST", "3.0")
            .with_attr("EVERYMAN", "Yes")
            .with_attr("BROKEN", "abc")
            .with_child(Element::new("NOTES").with_text("tumbling"))
            .with_child(Element::new("FAMILIARITY").with_text("TRUE"))
    }

    #[test]
    fn reads_attribute_and_child_forms() {
        let node = skill();
        assert_eq!(node.get_string("XMLID", ""), "ACROBATICS");
        assert_eq!(node.get_string("NOTES", ""), "tumbling");
        assert!(node.get_bool("FAMILIARITY", false));
        assert_eq!(node.get_string("MISSING", "fallback"), "fallback");
    }

    #[test]
    fn numeric_reads_fall_back_on_garbage() {
        let node = skill();
        assert_eq!(node.get_int("LEVELS", 0), 2);
        assert_eq!(node.get_number("BASECOST", 0.0), 3.0);
        assert_eq!(node.get_number("BROKEN", 7.5), 7.5);
        assert_eq!(node.get_int("MISSING", -1), -1);
    }

    #[test]
    fn boolean_coercion() {
        assert!(parse_bool("Yes"));
        assert!(parse_bool("y"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("No"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("false"));

        let node = skill();
        assert!(node.get_bool("EVERYMAN", false));
        assert!(node.get_bool("MISSING", true));
        assert!(!node.get_bool("BROKEN", true));
    }

    #[test]
    fn set_attr_replaces_existing_value() {
        let mut node = Element::new("POWER").with_attr("LEVELS", "1");
        node.set_attr("LEVELS", "4");
        assert_eq!(node.attributes.len(), 1);
        assert_eq!(node.attr("LEVELS"), Some("4"));
    }
}
