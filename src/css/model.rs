//! CSS AST: Selector, RuleSet, Declaration.

use std::fmt;

/// A single CSS selector component.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Type selector: matches an element's tag name (e.g. `button`).
    Type(String),
    /// Universal selector: `*`.
    Universal,
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#id`.
    Id(String),
    /// Attribute selector, stored without its brackets: `type="text"`.
    Attribute(String),
    /// Pseudo-class, stored without the leading `:` and with any argument:
    /// `hover`, `nth-child(2n+1)`.
    PseudoClass(String),
    /// Pseudo-element, stored without the leading `::`: `placeholder`.
    PseudoElement(String),
}

impl fmt::Display for SelectorComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorComponent::Type(name) => f.write_str(name),
            SelectorComponent::Universal => f.write_str("*"),
            SelectorComponent::Class(name) => write!(f, ".{name}"),
            SelectorComponent::Id(name) => write!(f, "#{name}"),
            SelectorComponent::Attribute(raw) => write!(f, "[{raw}]"),
            SelectorComponent::PseudoClass(name) => write!(f, ":{name}"),
            SelectorComponent::PseudoElement(name) => write!(f, "::{name}"),
        }
    }
}

/// A combinator between selector components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (whitespace): `A B`.
    Descendant,
    /// Child combinator: `A > B`.
    Child,
    /// Next-sibling combinator: `A + B`.
    NextSibling,
    /// Subsequent-sibling combinator: `A ~ B`.
    SubsequentSibling,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Combinator::Descendant => " ",
            Combinator::Child => " > ",
            Combinator::NextSibling => " + ",
            Combinator::SubsequentSibling => " ~ ",
        })
    }
}

/// A single compound selector (sequence of components without combinators).
///
/// For example, `button.primary:hover` is one `CompoundSelector` with three
/// components: `Type("button")`, `Class("primary")`, `PseudoClass("hover")`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.components {
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// One element in a selector chain: either a compound selector or a combinator.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    Compound(CompoundSelector),
    Combinator(Combinator),
}

/// A full CSS selector: chain of compound selectors joined by combinators.
///
/// For example, `.styled-3 > .child` is a `Selector` with parts:
/// `[Compound(.styled-3), Combinator(Child), Compound(.child)]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selector {
    /// Alternating compound selectors and combinators.
    /// Always starts and ends with a `SelectorPart::Compound`.
    pub parts: Vec<SelectorPart>,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                SelectorPart::Compound(compound) => write!(f, "{compound}")?,
                SelectorPart::Combinator(combinator) => write!(f, "{combinator}")?,
            }
        }
        Ok(())
    }
}

/// A single CSS property declaration, e.g. `color: red` or `margin: 0 auto`.
///
/// Values are kept as source text; this engine validates structure, not
/// property grammars.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, e.g. `"color"`, `"--accent"`.
    pub property: String,
    /// The raw value text, trimmed, without `!important`.
    pub value: String,
    /// Whether `!important` was specified.
    pub important: bool,
}

impl Declaration {
    /// Create a new declaration.
    pub fn new(property: impl Into<String>, value: impl Into<String>, important: bool) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        f.write_str(";")
    }
}

/// A CSS rule: one or more selectors paired with declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// The selectors for this rule (comma-separated in CSS).
    pub selectors: Vec<Selector>,
    /// The property declarations inside the `{ ... }` block.
    pub declarations: Vec<Declaration>,
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        f.write_str(" {")?;
        for declaration in &self.declarations {
            write!(f, " {declaration}")?;
        }
        f.write_str(" }")
    }
}
