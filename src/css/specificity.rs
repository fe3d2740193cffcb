//! CSS specificity calculation and comparison.
//!
//! Specificity determines which CSS declaration wins when multiple rules
//! match the same element. The model is a 5-tuple:
//!
//! ```text
//! (important, id_count, class_count, type_count, source_order)
//! ```
//!
//! Fields are ordered so that `Ord` (lexicographic) gives the correct result:
//! - `!important` beats normal (`important`: 1 > 0)
//! - More IDs beat fewer IDs
//! - More classes, attribute selectors and pseudo-classes beat fewer
//! - More type selectors and pseudo-elements beat fewer
//! - Later source order wins as tie-breaker
//!
//! Generated class selectors all share the same specificity, so between two
//! generated rules only `source_order`, i.e. the order of first injection,
//! decides.

use crate::css::model::{Selector, SelectorComponent, SelectorPart};

/// CSS specificity, ordered from highest to lowest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity {
    /// 1 if `!important`, 0 otherwise.
    pub important: u8,
    /// Number of ID selectors (`#id`).
    pub id_count: u16,
    /// Number of class, attribute and pseudo-class selectors.
    pub class_count: u16,
    /// Number of type selectors and pseudo-elements.
    pub type_count: u16,
    /// Source order across all attached sheets (later rules have higher values).
    pub source_order: u32,
}

impl Specificity {
    /// Create a zero specificity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute specificity from a parsed selector.
    ///
    /// - `source_order`: the rule's position across the document's sheets.
    /// - `important`: `true` if the declaration has `!important`.
    pub fn from_selector(selector: &Selector, source_order: u32, important: bool) -> Self {
        let mut id_count: u16 = 0;
        let mut class_count: u16 = 0;
        let mut type_count: u16 = 0;

        for part in &selector.parts {
            if let SelectorPart::Compound(compound) = part {
                for component in &compound.components {
                    match component {
                        SelectorComponent::Id(_) => id_count += 1,
                        SelectorComponent::Class(_)
                        | SelectorComponent::Attribute(_)
                        | SelectorComponent::PseudoClass(_) => class_count += 1,
                        SelectorComponent::Type(_) | SelectorComponent::PseudoElement(_) => {
                            type_count += 1
                        }
                        SelectorComponent::Universal => {}
                    }
                }
            }
        }

        Self {
            important: u8::from(important),
            id_count,
            class_count,
            type_count,
            source_order,
        }
    }

    /// The same specificity with the `!important` flag replaced.
    pub fn with_important(self, important: bool) -> Self {
        Self {
            important: u8::from(important),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::model::{Combinator, CompoundSelector};

    /// Build a selector from a list of components (single compound, no combinators).
    fn simple_selector(components: Vec<SelectorComponent>) -> Selector {
        Selector {
            parts: vec![SelectorPart::Compound(CompoundSelector { components })],
        }
    }

    #[test]
    fn test_specificity_new() {
        let s = Specificity::new();
        assert_eq!(s.important, 0);
        assert_eq!(s.id_count, 0);
        assert_eq!(s.class_count, 0);
        assert_eq!(s.type_count, 0);
        assert_eq!(s.source_order, 0);
    }

    #[test]
    fn test_from_selector_generated_class() {
        let sel = simple_selector(vec![SelectorComponent::Class("styled-1".into())]);
        let spec = Specificity::from_selector(&sel, 0, false);

        assert_eq!(spec.class_count, 1);
        assert_eq!(spec.type_count, 0);
        assert_eq!(spec.id_count, 0);
    }

    #[test]
    fn test_from_selector_pseudo_state() {
        // .styled-2:hover
        let sel = simple_selector(vec![
            SelectorComponent::Class("styled-2".into()),
            SelectorComponent::PseudoClass("hover".into()),
        ]);
        assert_eq!(Specificity::from_selector(&sel, 0, false).class_count, 2);
    }

    #[test]
    fn test_pseudo_element_counts_as_type() {
        // .field::placeholder
        let sel = simple_selector(vec![
            SelectorComponent::Class("field".into()),
            SelectorComponent::PseudoElement("placeholder".into()),
        ]);
        let spec = Specificity::from_selector(&sel, 0, false);
        assert_eq!(spec.class_count, 1);
        assert_eq!(spec.type_count, 1);
    }

    #[test]
    fn test_attribute_counts_as_class() {
        let sel = simple_selector(vec![
            SelectorComponent::Type("input".into()),
            SelectorComponent::Attribute("disabled".into()),
        ]);
        let spec = Specificity::from_selector(&sel, 0, false);
        assert_eq!(spec.class_count, 1);
        assert_eq!(spec.type_count, 1);
    }

    #[test]
    fn test_universal_zero_specificity() {
        let sel = simple_selector(vec![SelectorComponent::Universal]);
        let spec = Specificity::from_selector(&sel, 0, false);
        assert_eq!(spec, Specificity::new());
    }

    #[test]
    fn test_important_beats_normal() {
        let sel = simple_selector(vec![SelectorComponent::Type("p".into())]);
        let important = Specificity::from_selector(&sel, 0, true);
        let id_sel = simple_selector(vec![SelectorComponent::Id("x".into())]);
        let normal = Specificity::from_selector(&id_sel, 9, false);

        assert!(important > normal, "!important should beat normal");
    }

    #[test]
    fn test_id_beats_class() {
        let id_spec = Specificity::from_selector(
            &simple_selector(vec![SelectorComponent::Id("main".into())]),
            0,
            false,
        );
        let class_spec = Specificity::from_selector(
            &simple_selector(vec![SelectorComponent::Class("primary".into())]),
            7,
            false,
        );
        assert!(id_spec > class_spec);
    }

    #[test]
    fn test_source_order_tiebreak() {
        let sel = simple_selector(vec![SelectorComponent::Class("styled-1".into())]);
        let earlier = Specificity::from_selector(&sel, 0, false);
        let later = Specificity::from_selector(&sel, 1, false);

        assert!(later > earlier, "later source order should win as tiebreaker");
    }

    #[test]
    fn test_with_important() {
        let sel = simple_selector(vec![SelectorComponent::Class("a".into())]);
        let spec = Specificity::from_selector(&sel, 3, false).with_important(true);
        assert_eq!(spec.important, 1);
        assert_eq!(spec.source_order, 3);
    }

    #[test]
    fn test_descendant_selector_sums_compounds() {
        // .styled-3 .child
        let selector = Selector {
            parts: vec![
                SelectorPart::Compound(CompoundSelector {
                    components: vec![SelectorComponent::Class("styled-3".into())],
                }),
                SelectorPart::Combinator(Combinator::Descendant),
                SelectorPart::Compound(CompoundSelector {
                    components: vec![SelectorComponent::Class("child".into())],
                }),
            ],
        };

        let spec = Specificity::from_selector(&selector, 5, false);
        assert_eq!(spec.class_count, 2);
        assert_eq!(spec.source_order, 5);
    }
}
