//! Styled component factory.
//!
//! ```
//! use stylekit::dom::{Document, SheetHandle};
//! use stylekit::style::{stylize, Props, StyleEngine, StyleTemplate};
//!
//! let button = stylize("button").template(
//!     StyleTemplate::new()
//!         .text("color: ")
//!         .computed(|p: &Props| p.get("color").cloned())
//!         .text(";"),
//! );
//!
//! let mut doc = Document::new();
//! let mut engine = StyleEngine::<SheetHandle>::new();
//! let node = button
//!     .render(&mut engine, &mut doc, Props::new().attr("color", "red"))
//!     .unwrap();
//! assert_eq!(doc.get(node).unwrap().attribute("class"), Some("styled-1"));
//! ```

use tracing::trace;

use crate::error::StyleError;
use crate::host::{ElementFactory, StyleHost};
use crate::style::engine::StyleEngine;
use crate::style::props::Props;
use crate::style::template::StyleTemplate;
use crate::style::value::PropValue;

/// First step of `stylize(tag).template(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylize {
    tag: String,
}

/// Begin defining a styled component for element `tag`.
pub fn stylize(tag: impl Into<String>) -> Stylize {
    Stylize { tag: tag.into() }
}

impl Stylize {
    /// Attach the style template, producing the component.
    pub fn template<N>(self, template: StyleTemplate<Props<N>>) -> StyledComponent<N> {
        StyledComponent {
            tag: self.tag,
            template,
        }
    }
}

/// A component that renders `tag` with a class derived from its template.
///
/// Holds no per-render state; the same component can be rendered any number
/// of times against any engine.
#[derive(Debug, Clone)]
pub struct StyledComponent<N> {
    tag: String,
    template: StyleTemplate<Props<N>>,
}

impl<N> StyledComponent<N> {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn style_template(&self) -> &StyleTemplate<Props<N>> {
        &self.template
    }

    /// Evaluate the template against `props` and resolve its class.
    pub fn class_name<H>(
        &self,
        engine: &mut StyleEngine<H::Sheet>,
        host: &mut H,
        props: &Props<N>,
    ) -> Result<String, StyleError>
    where
        H: StyleHost,
    {
        let style_text = self.template.evaluate(props)?;
        Ok(engine.class_for(host, &style_text))
    }

    /// Render one element.
    ///
    /// The element receives the caller's attributes and children unchanged,
    /// plus a `class` attribute merging the caller's class with the generated
    /// one. A failing slot aborts the render before anything is created.
    pub fn render<H>(
        &self,
        engine: &mut StyleEngine<H::Sheet>,
        host: &mut H,
        props: Props<N>,
    ) -> Result<N, StyleError>
    where
        H: StyleHost + ElementFactory<Node = N>,
    {
        let generated = self.class_name(engine, host, &props)?;
        let (caller_class, mut attributes, children) = props.into_parts();
        let class = merge_class_names(caller_class.as_deref(), &generated);
        trace!(tag = %self.tag, class = %class, "rendering styled element");
        attributes.push(("class".to_owned(), PropValue::Str(class)));
        Ok(host.create_element(&self.tag, attributes, children))
    }
}

/// `caller generated`, or just `generated` when the caller gave no class.
pub fn merge_class_names(caller: Option<&str>, generated: &str) -> String {
    match caller.map(str::trim).filter(|c| !c.is_empty()) {
        Some(caller) => format!("{caller} {generated}"),
        None => generated.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, NodeId, SheetHandle};
    use crate::host::RuleList;

    type P = Props<NodeId>;

    fn engine() -> StyleEngine<SheetHandle> {
        StyleEngine::new()
    }

    #[test]
    fn merge_prefers_caller_first() {
        assert_eq!(merge_class_names(Some("card"), "styled-1"), "card styled-1");
        assert_eq!(merge_class_names(None, "styled-1"), "styled-1");
        assert_eq!(merge_class_names(Some("  "), "styled-1"), "styled-1");
    }

    #[test]
    fn render_forwards_attributes_and_children() {
        let mut doc = Document::new();
        let mut engine = engine();
        let label = doc.create_text("Go");
        let button = stylize("button").template(StyleTemplate::<P>::from("padding: 4px;"));

        let node = button
            .render(
                &mut engine,
                &mut doc,
                Props::new().class("primary").attr("type", "submit").child(label),
            )
            .unwrap();

        let data = doc.get(node).unwrap();
        assert_eq!(data.tag, "button");
        assert_eq!(data.attribute("type"), Some("submit"));
        assert_eq!(data.attribute("class"), Some("primary styled-1"));
        assert!(data.has_class("primary"));
        assert_eq!(doc.children(node), &[label]);
    }

    #[test]
    fn props_drive_the_generated_class() {
        let mut doc = Document::new();
        let mut engine = engine();
        let component = stylize("div").template(
            StyleTemplate::<P>::new()
                .text("color: ")
                .computed(|p: &P| if p.flag("primary") { "blue" } else { "gray" })
                .text(";"),
        );

        let plain = component.class_name(&mut engine, &mut doc, &Props::new()).unwrap();
        let primary = component
            .class_name(&mut engine, &mut doc, &Props::new().attr("primary", true))
            .unwrap();
        let again = component.class_name(&mut engine, &mut doc, &Props::new()).unwrap();

        assert_eq!(plain, "styled-1");
        assert_eq!(primary, "styled-2");
        assert_eq!(again, plain);
        assert_eq!(engine.sheet().unwrap().len(), 2);
    }

    #[test]
    fn failing_slot_creates_nothing() {
        let mut doc = Document::new();
        let mut engine = engine();
        let before = doc.len();
        let component = stylize("span").template(
            StyleTemplate::<P>::new()
                .text("width: ")
                .try_computed(|p: &P| {
                    p.get("width")
                        .cloned()
                        .ok_or_else(|| "width is required".to_string())
                }),
        );

        let err = component.render(&mut engine, &mut doc, Props::new()).unwrap_err();
        assert!(matches!(err, StyleError::Evaluation { slot: 0, .. }));
        assert_eq!(doc.len(), before);
        assert!(engine.cache().is_empty());
    }
}
