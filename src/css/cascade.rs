//! Cascade resolution over a document's attached stylesheets.
//!
//! Resolves which declarations apply to an element: every rule with a
//! matching selector contributes, ordered by [`Specificity`], and the last
//! declaration for each property wins. Source order runs across sheets in
//! attachment order, then rules in insertion order.
//!
//! Pseudo-classes and pseudo-elements never match: there is no interaction
//! state in a headless document.

use std::collections::BTreeMap;

use crate::css::model::{Combinator, CompoundSelector, Selector, SelectorComponent, SelectorPart};
use crate::css::specificity::Specificity;
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Document;

/// Resolved `property -> value` for `node`. Values are the raw declared text.
pub fn matched_declarations(doc: &Document, node: NodeId) -> BTreeMap<String, String> {
    let sheets: Vec<_> = doc.style_sheets().iter().map(|s| s.borrow()).collect();
    let mut matches: Vec<(Specificity, usize, &str, &str)> = Vec::new();

    let mut source_order: u32 = 0;
    for sheet in &sheets {
        for css_rule in sheet.rules() {
            let rule = &css_rule.rule;
            let best = rule
                .selectors
                .iter()
                .filter(|sel| matches_selector(sel, node, doc))
                .map(|sel| Specificity::from_selector(sel, source_order, false))
                .max();
            if let Some(specificity) = best {
                for (index, decl) in rule.declarations.iter().enumerate() {
                    matches.push((
                        specificity.with_important(decl.important),
                        index,
                        decl.property.as_str(),
                        decl.value.as_str(),
                    ));
                }
            }
            source_order += 1;
        }
    }

    // Ascending; later entries overwrite earlier ones.
    matches.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    let resolved = matches
        .into_iter()
        .map(|(_, _, property, value)| (property.to_owned(), value.to_owned()))
        .collect();
    resolved
}

/// Resolved value of one property for `node`.
pub fn computed_value(doc: &Document, node: NodeId, property: &str) -> Option<String> {
    matched_declarations(doc, node).remove(property)
}

impl Document {
    /// See [`matched_declarations`].
    pub fn matched_declarations(&self, node: NodeId) -> BTreeMap<String, String> {
        matched_declarations(self, node)
    }

    /// See [`computed_value`].
    pub fn computed_value(&self, node: NodeId, property: &str) -> Option<String> {
        computed_value(self, node, property)
    }
}

/// Check whether a full selector matches a given node.
///
/// Walks the selector parts from right to left, matching compound selectors
/// and navigating the tree via combinators.
pub fn matches_selector(selector: &Selector, node_id: NodeId, doc: &Document) -> bool {
    let parts = &selector.parts;
    let Some(SelectorPart::Compound(subject)) = parts.last() else {
        return false;
    };
    if !doc.get(node_id).is_some_and(|n| matches_compound(subject, n)) {
        return false;
    }
    matches_leftward(parts, parts.len() - 1, node_id, doc)
}

/// Match `parts[..end]` given that `parts[end]` matched `current`.
fn matches_leftward(parts: &[SelectorPart], end: usize, current: NodeId, doc: &Document) -> bool {
    if end == 0 {
        return true;
    }
    let (Some(SelectorPart::Combinator(combinator)), Some(SelectorPart::Compound(compound))) =
        (parts.get(end - 1), end.checked_sub(2).and_then(|i| parts.get(i)))
    else {
        // Combinator without a preceding compound: invalid.
        return false;
    };
    let next = end - 2;

    let candidates: Vec<NodeId> = match combinator {
        Combinator::Child => doc.parent(current).into_iter().collect(),
        Combinator::Descendant => doc.ancestors(current),
        Combinator::NextSibling => doc.previous_siblings(current).into_iter().take(1).collect(),
        Combinator::SubsequentSibling => doc.previous_siblings(current),
    };

    candidates.into_iter().any(|candidate| {
        doc.get(candidate)
            .is_some_and(|data| matches_compound(compound, data))
            && matches_leftward(parts, next, candidate, doc)
    })
}

/// Check whether a compound selector matches a single node's data.
fn matches_compound(compound: &CompoundSelector, node: &NodeData) -> bool {
    !node.is_text()
        && compound.components.iter().all(|component| match component {
            SelectorComponent::Type(name) => node.tag.eq_ignore_ascii_case(name),
            SelectorComponent::Class(name) => node.has_class(name),
            SelectorComponent::Id(name) => node.id() == Some(name.as_str()),
            SelectorComponent::Universal => true,
            SelectorComponent::Attribute(raw) => matches_attribute(raw, node),
            SelectorComponent::PseudoClass(_) | SelectorComponent::PseudoElement(_) => false,
        })
}

/// `[name]` presence or `[name=value]` equality, with optional quotes.
fn matches_attribute(raw: &str, node: &NodeData) -> bool {
    match raw.split_once('=') {
        None => node.attribute(raw.trim()).is_some(),
        Some((name, expected)) => {
            let expected = expected.trim().trim_matches(|c| c == '"' || c == '\'');
            node.attribute(name.trim()) == Some(expected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::parse_rule;
    use crate::host::{RuleList, StyleHost};
    use pretty_assertions::assert_eq;

    /// ```text
    ///   body
    ///    └── main#app.shell
    ///          ├── h1.title
    ///          ├── p.lead[data-kind=intro]
    ///          └── p#note
    /// ```
    fn build_doc() -> (Document, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let main = doc.insert_child(body, NodeData::new("main").with_id("app").with_class("shell"));
        let h1 = doc.insert_child(main, NodeData::new("h1").with_class("title"));
        let lead = doc.insert_child(
            main,
            NodeData::new("p").with_class("lead").with_attribute("data-kind", "intro"),
        );
        let note = doc.insert_child(main, NodeData::new("p").with_id("note"));
        (doc, main, h1, lead, note)
    }

    fn selector(text: &str) -> Selector {
        parse_rule(&format!("{text} {{}}")).unwrap().selectors.remove(0)
    }

    fn add_rules(doc: &mut Document, rules: &[&str]) {
        let mut sheet = doc.attach_style_sheet();
        for rule in rules {
            let end = sheet.len();
            sheet.insert_rule(rule, end).unwrap();
        }
    }

    #[test]
    fn matches_simple_components() {
        let (doc, main, h1, lead, note) = build_doc();
        assert!(matches_selector(&selector("main"), main, &doc));
        assert!(matches_selector(&selector("MAIN"), main, &doc));
        assert!(matches_selector(&selector(".title"), h1, &doc));
        assert!(matches_selector(&selector("#note"), note, &doc));
        assert!(matches_selector(&selector("*"), lead, &doc));
        assert!(!matches_selector(&selector("h1"), lead, &doc));
    }

    #[test]
    fn matches_attributes() {
        let (doc, _main, _h1, lead, note) = build_doc();
        assert!(matches_selector(&selector("[data-kind]"), lead, &doc));
        assert!(matches_selector(&selector("p[data-kind=\"intro\"]"), lead, &doc));
        assert!(!matches_selector(&selector("[data-kind=outro]"), lead, &doc));
        assert!(!matches_selector(&selector("[data-kind]"), note, &doc));
    }

    #[test]
    fn matches_combinators() {
        let (doc, _main, h1, lead, note) = build_doc();
        assert!(matches_selector(&selector(".shell > .title"), h1, &doc));
        assert!(matches_selector(&selector("body .lead"), lead, &doc));
        assert!(!matches_selector(&selector("body > .lead"), lead, &doc));
        assert!(matches_selector(&selector(".title + .lead"), lead, &doc));
        assert!(!matches_selector(&selector(".title + #note"), note, &doc));
        assert!(matches_selector(&selector(".title ~ #note"), note, &doc));
    }

    #[test]
    fn descendant_backtracks_past_first_ancestor() {
        // The nearest `p` above the span is not a child of `.shell`; the
        // outer one is.
        let mut doc = Document::new();
        let body = doc.body();
        let shell = doc.insert_child(body, NodeData::new("div").with_class("shell"));
        let outer = doc.insert_child(shell, NodeData::new("p"));
        let section = doc.insert_child(outer, NodeData::new("section"));
        let inner = doc.insert_child(section, NodeData::new("p"));
        let span = doc.insert_child(inner, NodeData::new("span"));
        assert!(matches_selector(&selector(".shell > p span"), span, &doc));
        assert!(!matches_selector(&selector(".shell > span"), span, &doc));
    }

    #[test]
    fn pseudo_selectors_never_match() {
        let (doc, _main, h1, ..) = build_doc();
        assert!(!matches_selector(&selector(".title:hover"), h1, &doc));
        assert!(!matches_selector(&selector(".title::before"), h1, &doc));
    }

    #[test]
    fn later_rule_wins_at_equal_specificity() {
        let (mut doc, _main, h1, ..) = build_doc();
        add_rules(&mut doc, &[".title { color: red; }", ".title { color: blue; }"]);
        assert_eq!(computed_value(&doc, h1, "color").as_deref(), Some("blue"));
    }

    #[test]
    fn specificity_beats_source_order() {
        let (mut doc, _main, h1, ..) = build_doc();
        add_rules(&mut doc, &["main .title { color: red; }", ".title { color: blue; }"]);
        assert_eq!(computed_value(&doc, h1, "color").as_deref(), Some("red"));
    }

    #[test]
    fn important_beats_specificity() {
        let (mut doc, _main, _h1, _lead, note) = build_doc();
        add_rules(&mut doc, &["p { color: red !important; }", "#note { color: blue; }"]);
        assert_eq!(computed_value(&doc, note, "color").as_deref(), Some("red"));
    }

    #[test]
    fn source_order_spans_sheets() {
        let (mut doc, _main, h1, ..) = build_doc();
        add_rules(&mut doc, &[".title { color: red; margin: 0; }"]);
        add_rules(&mut doc, &[".title { color: blue; }"]);
        let resolved = matched_declarations(&doc, h1);
        assert_eq!(
            resolved,
            BTreeMap::from([
                ("color".to_string(), "blue".to_string()),
                ("margin".to_string(), "0".to_string()),
            ])
        );
    }

    #[test]
    fn no_sheets_resolves_nothing() {
        let (doc, _main, h1, ..) = build_doc();
        assert!(matched_declarations(&doc, h1).is_empty());
    }
}
