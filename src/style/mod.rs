//! Styled components: templates, nested rule flattening, class caching and
//! stylesheet injection.

pub mod cache;
pub mod diagnostics;
pub mod engine;
pub mod factory;
pub mod injector;
pub mod nested;
pub mod props;
pub mod template;
pub mod value;

pub use cache::{ClassNameGenerator, StyleCache};
pub use diagnostics::{lint, Diagnostic, DiagnosticKind};
pub use engine::{EngineConfig, StyleEngine};
pub use factory::{merge_class_names, stylize, StyledComponent, Stylize};
pub use injector::{Injection, StylesheetInjector};
pub use nested::{flatten, NestedParser};
pub use props::Props;
pub use template::{Slot, StyleTemplate};
pub use value::PropValue;
