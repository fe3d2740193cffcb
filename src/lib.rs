//! # stylekit
//!
//! Component-scoped styling for Rust renderers: write nested, SCSS-like style
//! text with dynamic slots, get back a stable generated class name, and have
//! the flattened rules injected into a stylesheet exactly once.
//!
//! ```
//! use stylekit::dom::{Document, SheetHandle};
//! use stylekit::style::{stylize, Props, StyleEngine, StyleTemplate};
//!
//! let card = stylize("div").template(
//!     StyleTemplate::new()
//!         .text("padding: 8px;\n&:hover {\n  color: ")
//!         .computed(|p: &Props| if p.flag("danger") { "red" } else { "black" })
//!         .text(";\n}\n"),
//! );
//!
//! let mut doc = Document::new();
//! let mut engine = StyleEngine::<SheetHandle>::new();
//! let node = card.render(&mut engine, &mut doc, Props::new()).unwrap();
//! doc.mount(node);
//!
//! assert_eq!(
//!     doc.style_sheets()[0].css_texts(),
//!     vec![
//!         ".styled-1 { padding: 8px; }".to_string(),
//!         ".styled-1:hover { color: black; }".to_string(),
//!     ]
//! );
//! ```
//!
//! ## Core Systems
//!
//! - **[`style`]**: templates, nested rule flattening, the class cache,
//!   stylesheet injection and the component factory
//! - **[`host`]**: the two seams the engine needs from a renderer
//! - **[`dom`]**: a headless slotmap document implementing those seams
//! - **[`css`]**: tokenizer, rule parser, specificity and cascade used to
//!   validate and resolve injected rules
//! - **[`error`]**: render errors

// Foundation
pub mod error;
pub mod host;

// Core systems
pub mod css;
pub mod dom;
pub mod style;

pub use error::StyleError;
pub use host::{ElementFactory, InsertRuleError, RuleList, StyleHost};
pub use style::{stylize, EngineConfig, Props, PropValue, StyleEngine, StyleTemplate, StyledComponent};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use stylekit_macros::css;
