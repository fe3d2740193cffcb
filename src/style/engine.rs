//! The style engine: signature cache, class generation, flattening and
//! injection behind one call.

use tracing::{debug, trace, warn};

use crate::host::{RuleList, StyleHost};
use crate::style::cache::{ClassNameGenerator, StyleCache};
use crate::style::diagnostics;
use crate::style::injector::StylesheetInjector;
use crate::style::nested;

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Prefix of generated classes (`{prefix}-{n}`).
    pub class_prefix: String,
    /// First numeric id handed out.
    pub first_id: u64,
    /// Lint style text on every cache miss and log findings at `warn`.
    pub diagnostics: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            class_prefix: "styled".into(),
            first_id: 1,
            diagnostics: false,
        }
    }
}

impl EngineConfig {
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    pub fn with_first_id(mut self, id: u64) -> Self {
        self.first_id = id;
        self
    }

    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }
}

/// Maps style text to class names, injecting the flattened rules of each new
/// text exactly once.
///
/// One engine owns one stylesheet on its host. Every component rendered
/// through the same engine shares its cache and counter.
#[derive(Debug)]
pub struct StyleEngine<S> {
    config: EngineConfig,
    cache: StyleCache,
    ids: ClassNameGenerator,
    injector: StylesheetInjector<S>,
}

impl<S: RuleList> Default for StyleEngine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RuleList> StyleEngine<S> {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let ids = ClassNameGenerator::new(config.class_prefix.clone(), config.first_id);
        Self {
            config,
            cache: StyleCache::new(),
            ids,
            injector: StylesheetInjector::new(),
        }
    }

    /// Return the class for `style_text`, generating and injecting it on
    /// first sight.
    ///
    /// Identical text always yields the same class and injects nothing the
    /// second time. Never fails: malformed nesting flattens to whatever the
    /// heuristics produce, and rules the sheet rejects are logged.
    pub fn class_for<H>(&mut self, host: &mut H, style_text: &str) -> String
    where
        H: StyleHost<Sheet = S>,
    {
        if let Some(class) = self.cache.lookup(style_text) {
            trace!(class, "style cache hit");
            return class.to_owned();
        }

        let class = self.ids.next_class();
        debug!(class = %class, "style cache miss");

        if self.config.diagnostics {
            for finding in diagnostics::lint(style_text) {
                warn!(class = %class, line = finding.line, "{}", finding.kind);
            }
        }

        let rules = nested::flatten(style_text, &format!(".{class}"));
        self.injector.insert_batch(host, &rules);
        self.cache.record(style_text, class).to_owned()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &StyleCache {
        &self.cache
    }

    pub fn injector(&self) -> &StylesheetInjector<S> {
        &self.injector
    }

    /// The engine's stylesheet, attached on the first non-empty injection.
    pub fn sheet(&self) -> Option<&S> {
        self.injector.sheet()
    }
}
