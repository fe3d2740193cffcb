//! Stylesheet injection with batch deduplication.

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::host::{RuleList, StyleHost};

/// Outcome of [`StylesheetInjector::insert_batch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
    /// An identical batch was injected before; nothing happened.
    Duplicate,
    /// The batch was processed. Rejected rules were logged and skipped.
    Applied { inserted: usize, rejected: usize },
}

/// Owns the engine's single attached stylesheet.
///
/// The sheet is attached on first use and reused afterwards. Batches are
/// deduplicated on their full text, so the same rule set is never appended
/// twice.
#[derive(Debug)]
pub struct StylesheetInjector<S> {
    sheet: Option<S>,
    injected: HashSet<String>,
}

impl<S> Default for StylesheetInjector<S> {
    fn default() -> Self {
        Self {
            sheet: None,
            injected: HashSet::new(),
        }
    }
}

impl<S: RuleList> StylesheetInjector<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append each rule of `rules` to the end of the sheet.
    ///
    /// A rule the sheet refuses is logged at `warn` and skipped; the rest of
    /// the batch still goes in. The batch counts as injected either way.
    pub fn insert_batch<H>(&mut self, host: &mut H, rules: &[String]) -> Injection
    where
        H: StyleHost<Sheet = S>,
    {
        let key = rules.join("\n");
        if self.injected.contains(&key) {
            trace!(rules = rules.len(), "rule batch already injected");
            return Injection::Duplicate;
        }
        if rules.is_empty() {
            self.injected.insert(key);
            return Injection::Applied {
                inserted: 0,
                rejected: 0,
            };
        }

        let sheet = self.sheet.get_or_insert_with(|| {
            debug!("attaching stylesheet");
            host.attach_style_sheet()
        });

        let mut inserted = 0;
        let mut rejected = 0;
        for rule in rules {
            let end = sheet.len();
            match sheet.insert_rule(rule, end) {
                Ok(index) => {
                    trace!(index, rule = %rule, "inserted rule");
                    inserted += 1;
                }
                Err(error) => {
                    warn!(rule = %rule, %error, "stylesheet rejected rule");
                    rejected += 1;
                }
            }
        }
        debug!(inserted, rejected, "injected rule batch");

        self.injected.insert(key);
        Injection::Applied { inserted, rejected }
    }

    /// The attached sheet, once any rule has been injected.
    pub fn sheet(&self) -> Option<&S> {
        self.sheet.as_ref()
    }

    pub fn is_injected(&self, rules: &[String]) -> bool {
        self.injected.contains(&rules.join("\n"))
    }

    /// Number of distinct batches seen.
    pub fn batches(&self) -> usize {
        self.injected.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::ParseError;
    use crate::host::InsertRuleError;
    use tracing_test::traced_test;

    /// Records rules; refuses anything containing `&`.
    #[derive(Debug, Default)]
    struct Rules(Vec<String>);

    impl RuleList for Rules {
        fn len(&self) -> usize {
            self.0.len()
        }

        fn insert_rule(&mut self, rule: &str, index: usize) -> Result<usize, InsertRuleError> {
            if rule.contains('&') {
                return Err(InsertRuleError::Syntax(ParseError::InvalidCharacter {
                    offset: rule.find('&').unwrap_or_default(),
                    text: "&".into(),
                }));
            }
            self.0.insert(index, rule.to_owned());
            Ok(index)
        }
    }

    #[derive(Default)]
    struct Host {
        attached: usize,
    }

    impl StyleHost for Host {
        type Sheet = Rules;

        fn attach_style_sheet(&mut self) -> Rules {
            self.attached += 1;
            Rules::default()
        }
    }

    fn batch(rules: &[&str]) -> Vec<String> {
        rules.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn attaches_once_and_appends_in_order() {
        let mut host = Host::default();
        let mut injector = StylesheetInjector::new();
        injector.insert_batch(&mut host, &batch(&[".a { x: 1; }", ".a:hover { x: 2; }"]));
        injector.insert_batch(&mut host, &batch(&[".b { y: 1; }"]));

        assert_eq!(host.attached, 1);
        let sheet = injector.sheet().unwrap();
        assert_eq!(sheet.0, vec![".a { x: 1; }", ".a:hover { x: 2; }", ".b { y: 1; }"]);
    }

    #[test]
    fn duplicate_batches_are_skipped() {
        let mut host = Host::default();
        let mut injector = StylesheetInjector::new();
        let rules = batch(&[".a { x: 1; }"]);
        assert_eq!(
            injector.insert_batch(&mut host, &rules),
            Injection::Applied { inserted: 1, rejected: 0 }
        );
        assert_eq!(injector.insert_batch(&mut host, &rules), Injection::Duplicate);
        assert_eq!(injector.sheet().unwrap().len(), 1);
        assert!(injector.is_injected(&rules));
    }

    #[test]
    fn empty_batch_attaches_nothing() {
        let mut host = Host::default();
        let mut injector: StylesheetInjector<Rules> = StylesheetInjector::new();
        assert_eq!(
            injector.insert_batch(&mut host, &[]),
            Injection::Applied { inserted: 0, rejected: 0 }
        );
        assert_eq!(host.attached, 0);
        assert!(injector.sheet().is_none());
        assert_eq!(injector.insert_batch(&mut host, &[]), Injection::Duplicate);
    }

    #[test]
    #[traced_test]
    fn rejected_rule_is_logged_and_skipped() {
        let mut host = Host::default();
        let mut injector = StylesheetInjector::new();
        let outcome = injector.insert_batch(
            &mut host,
            &batch(&[".a { x: 1; }", "&:bad { x: 2; }", ".a .b { x: 3; }"]),
        );
        assert_eq!(outcome, Injection::Applied { inserted: 2, rejected: 1 });
        assert_eq!(injector.sheet().unwrap().0, vec![".a { x: 1; }", ".a .b { x: 3; }"]);
        assert!(logs_contain("stylesheet rejected rule"));
        assert!(logs_contain("&:bad"));
    }
}
