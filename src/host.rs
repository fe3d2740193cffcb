//! Platform seams consumed by the styling engine.
//!
//! The engine never touches a document directly. It needs two primitives from
//! the rendering layer: a way to attach a stylesheet and append rule text to
//! it ([`StyleHost`] + [`RuleList`]), and a way to build a node description
//! from a tag, attributes and children ([`ElementFactory`]). The headless
//! [`Document`](crate::dom::Document) implements both.

use crate::css::parser::ParseError;
use crate::style::value::PropValue;

/// Ordered attributes forwarded to [`ElementFactory::create_element`].
pub type Attributes = Vec<(String, PropValue)>;

/// Errors from inserting one rule into a [`RuleList`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InsertRuleError {
    /// The rule text is not a single well-formed style rule.
    #[error("invalid rule: {0}")]
    Syntax(#[from] ParseError),
    /// The insertion index is past the end of the list.
    #[error("index {index} is out of range for a list of {len} rules")]
    IndexOutOfRange { index: usize, len: usize },
}

/// An insertable, ordered list of rules belonging to one attached stylesheet.
pub trait RuleList {
    /// Current number of rules.
    fn len(&self) -> usize;

    /// Whether the list holds no rules.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert one rule's text at `index`, returning the index it landed at.
    fn insert_rule(&mut self, rule: &str, index: usize) -> Result<usize, InsertRuleError>;
}

/// Something that can create a style-carrying node and attach it to its
/// document.
pub trait StyleHost {
    type Sheet: RuleList;

    /// Create a new stylesheet, attach it, and return its rule list.
    fn attach_style_sheet(&mut self) -> Self::Sheet;
}

/// The rendering layer's "build a node description" primitive.
pub trait ElementFactory {
    type Node;

    fn create_element(
        &mut self,
        tag: &str,
        attributes: Attributes,
        children: Vec<Self::Node>,
    ) -> Self::Node;
}
