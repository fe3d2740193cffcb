//! Rule lists owned by attached `<style>` nodes.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::css::model::RuleSet;
use crate::css::parser::parse_rule;
use crate::host::{InsertRuleError, RuleList};

/// One accepted rule: its source text and parsed form.
#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    pub text: String,
    pub rule: RuleSet,
}

/// The ordered rules of one stylesheet.
///
/// Insertion validates the text as exactly one style rule; anything else is
/// refused and leaves the list unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CssRuleList {
    rules: Vec<CssRule>,
}

impl CssRuleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[CssRule] {
        &self.rules
    }

    /// Source texts in order.
    pub fn css_texts(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.text.clone()).collect()
    }
}

impl RuleList for CssRuleList {
    fn len(&self) -> usize {
        self.rules.len()
    }

    fn insert_rule(&mut self, rule: &str, index: usize) -> Result<usize, InsertRuleError> {
        if index > self.rules.len() {
            return Err(InsertRuleError::IndexOutOfRange {
                index,
                len: self.rules.len(),
            });
        }
        let parsed = parse_rule(rule)?;
        self.rules.insert(
            index,
            CssRule {
                text: rule.to_owned(),
                rule: parsed,
            },
        );
        Ok(index)
    }
}

/// Shared handle to a rule list. The document keeps one clone on the
/// `<style>` node; the engine keeps another to insert through.
#[derive(Debug, Clone, Default)]
pub struct SheetHandle(Rc<RefCell<CssRuleList>>);

impl SheetHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn borrow(&self) -> Ref<'_, CssRuleList> {
        self.0.borrow()
    }

    pub fn css_texts(&self) -> Vec<String> {
        self.0.borrow().css_texts()
    }

    /// Whether both handles refer to the same list.
    pub fn ptr_eq(&self, other: &SheetHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl RuleList for SheetHandle {
    fn len(&self) -> usize {
        self.0.borrow().len()
    }

    fn insert_rule(&mut self, rule: &str, index: usize) -> Result<usize, InsertRuleError> {
        self.0.borrow_mut().insert_rule(rule, index)
    }
}
