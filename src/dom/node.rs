//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

use super::sheet::SheetHandle;

new_key_type! {
    /// Unique identifier for a document node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single document node.
///
/// Element nodes carry a tag and ordered string attributes. Text nodes carry
/// text and an empty tag. A `<style>` node also owns the rule list it exposes.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Lowercase element name (e.g. "div"). Empty for text nodes.
    pub tag: String,
    /// Attributes in insertion order. Keys are unique.
    pub attributes: Vec<(String, String)>,
    /// Text content, for text nodes.
    pub text: Option<String>,
    /// Rule list, for attached `<style>` nodes.
    pub sheet: Option<SheetHandle>,
}

impl NodeData {
    /// An element with no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            text: None,
            sheet: None,
        }
    }

    /// A text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: Vec::new(),
            text: Some(text.into()),
            sheet: None,
        }
    }

    /// Set an attribute (builder).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set the `id` attribute (builder).
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attribute("id", id)
    }

    /// Add a class to the `class` attribute (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(&class.into());
        self
    }

    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }

    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class").unwrap_or_default().split_whitespace()
    }

    /// Check whether this node has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.attribute("class").filter(|c| !c.trim().is_empty()) {
            Some(existing) => format!("{existing} {class}"),
            None => class.to_owned(),
        };
        self.set_attribute("class", joined);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lowercases_tag() {
        let data = NodeData::new("DIV");
        assert_eq!(data.tag, "div");
        assert!(data.attributes.is_empty());
        assert!(!data.is_text());
    }

    #[test]
    fn text_node() {
        let data = NodeData::text("hello");
        assert!(data.is_text());
        assert_eq!(data.text.as_deref(), Some("hello"));
        assert!(data.tag.is_empty());
    }

    #[test]
    fn attributes_replace_in_place() {
        let mut data = NodeData::new("a").with_attribute("href", "/").with_attribute("rel", "x");
        data.set_attribute("href", "/home");
        assert_eq!(data.attribute("href"), Some("/home"));
        assert_eq!(data.attributes[0].0, "href");
    }

    #[test]
    fn classes_come_from_attribute() {
        let data = NodeData::new("div").with_attribute("class", " card  styled-1 ");
        assert_eq!(data.classes().collect::<Vec<_>>(), vec!["card", "styled-1"]);
        assert!(data.has_class("styled-1"));
        assert!(!data.has_class("styled"));
    }

    #[test]
    fn with_class_dedups() {
        let data = NodeData::new("div").with_class("a").with_class("b").with_class("a");
        assert_eq!(data.attribute("class"), Some("a b"));
    }

    #[test]
    fn id_reads_attribute() {
        let data = NodeData::new("p").with_id("intro");
        assert_eq!(data.id(), Some("intro"));
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
