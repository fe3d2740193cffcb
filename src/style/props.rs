//! Render-time properties handed to a styled component.

use crate::dom::NodeId;
use crate::host::Attributes;
use crate::style::value::PropValue;

/// The properties object a styled component renders with.
///
/// Holds an optional caller-supplied class, ordered attributes and children.
/// Templates read attributes through [`Props::get`] and [`Props::flag`]; the
/// factory forwards everything except the class unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Props<N = NodeId> {
    class_name: Option<String>,
    attributes: Attributes,
    children: Vec<N>,
}

impl<N> Default for Props<N> {
    fn default() -> Self {
        Self {
            class_name: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl<N> Props<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the caller-supplied class (builder).
    pub fn class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Set an attribute (builder). Setting an existing key replaces its value
    /// in place. The `class` key is the caller-supplied class.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == "class" {
            self.class_name = Some(value.to_string());
            return self;
        }
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
        self
    }

    /// Append a child (builder).
    pub fn child(mut self, child: N) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children (builder).
    pub fn children(mut self, children: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(children);
        self
    }

    /// Look up an attribute.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Whether an attribute is present and truthy.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(PropValue::is_truthy)
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn attributes(&self) -> &[(String, PropValue)] {
        &self.attributes
    }

    pub fn child_nodes(&self) -> &[N] {
        &self.children
    }

    /// Split into `(class, attributes, children)`.
    pub fn into_parts(self) -> (Option<String>, Attributes, Vec<N>) {
        (self.class_name, self.attributes, self.children)
    }
}
