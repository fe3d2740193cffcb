//! Opt-in lint for nested style text.
//!
//! The flattener never fails: unbalanced braces and missing semicolons
//! degrade into odd-looking rules. This pass spots those shapes up front so
//! the engine can log them. It never changes what gets flattened.

use std::fmt;

use crate::css::tokenizer::{tokenize, Token};
use crate::style::nested::is_declaration;

/// A suspicious spot in a style text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A `}` with no open block; the root selector stays current.
    UnbalancedClose,
    /// A `{` never closed before the end of the text.
    UnclosedBlock,
    /// A declaration without `;` that runs into the following line.
    MissingSemicolon,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticKind::UnbalancedClose => "`}` without a matching `{`",
            DiagnosticKind::UnclosedBlock => "`{` is never closed",
            DiagnosticKind::MissingSemicolon => "declaration is missing its `;`",
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

/// Lint `style`, returning findings ordered by line.
pub fn lint(style: &str) -> Vec<Diagnostic> {
    let mut found = Vec::new();
    let mut open_lines: Vec<usize> = Vec::new();
    let mut continuation_start: Option<usize> = None;

    for (index, raw) in style.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let tokens = tokenize(line);
        let has_brace = tokens
            .iter()
            .any(|(t, _)| matches!(t, Token::BraceOpen | Token::BraceClose));

        if let Some(start) = continuation_start {
            if has_brace || starts_declaration(&tokens) {
                found.push(Diagnostic {
                    line: start,
                    kind: DiagnosticKind::MissingSemicolon,
                });
                continuation_start = None;
            } else {
                if line.ends_with(';') {
                    continuation_start = None;
                }
                continue;
            }
        }

        if is_declaration(line) && !line.ends_with(';') {
            continuation_start = Some(line_no);
            continue;
        }

        for (token, _) in &tokens {
            match token {
                Token::BraceOpen => open_lines.push(line_no),
                Token::BraceClose => {
                    if open_lines.pop().is_none() {
                        found.push(Diagnostic {
                            line: line_no,
                            kind: DiagnosticKind::UnbalancedClose,
                        });
                    }
                }
                _ => {}
            }
        }
    }

    if let Some(start) = continuation_start {
        found.push(Diagnostic {
            line: start,
            kind: DiagnosticKind::MissingSemicolon,
        });
    }
    found.extend(open_lines.into_iter().map(|line| Diagnostic {
        line,
        kind: DiagnosticKind::UnclosedBlock,
    }));
    found.sort_by_key(|d| d.line);
    found
}

/// `name:` or `name:value` at the head of a line.
fn starts_declaration(tokens: &[(Token, String)]) -> bool {
    matches!(
        tokens,
        [(Token::Ident, _), (Token::Colon | Token::PseudoClass, _), ..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(style: &str) -> Vec<(usize, DiagnosticKind)> {
        lint(style).into_iter().map(|d| (d.line, d.kind)).collect()
    }

    #[test]
    fn clean_text_has_no_findings() {
        let style = "color: red;\n.child {\n  width: 1px;\n  &:hover { opacity: 0; }\n}\n";
        assert!(lint(style).is_empty());
    }

    #[test]
    fn multi_line_value_is_not_flagged() {
        let style = "box-shadow: 0 0 1px red,\n  0 0 2px blue;\ncolor: red;";
        assert!(lint(style).is_empty());
    }

    #[test]
    fn reports_unbalanced_close() {
        assert_eq!(
            kinds("color: red;\n}\n"),
            vec![(2, DiagnosticKind::UnbalancedClose)]
        );
    }

    #[test]
    fn reports_unclosed_block_at_its_opening_line() {
        assert_eq!(
            kinds("width: 1px;\n.a {\ncolor: red;\n"),
            vec![(2, DiagnosticKind::UnclosedBlock)]
        );
    }

    #[test]
    fn reports_missing_semicolon_before_next_declaration() {
        assert_eq!(
            kinds("color: red\nbackground: blue;"),
            vec![(1, DiagnosticKind::MissingSemicolon)]
        );
        assert_eq!(
            kinds("color:red\nbackground:blue;"),
            vec![(1, DiagnosticKind::MissingSemicolon)]
        );
    }

    #[test]
    fn reports_missing_semicolon_before_close() {
        assert_eq!(
            kinds(".a {\ncolor: red\n}"),
            vec![(2, DiagnosticKind::MissingSemicolon)]
        );
    }

    #[test]
    fn reports_trailing_unterminated_declaration() {
        assert_eq!(kinds("color: red"), vec![(1, DiagnosticKind::MissingSemicolon)]);
    }

    #[test]
    fn display_names_the_line() {
        let d = Diagnostic {
            line: 3,
            kind: DiagnosticKind::UnclosedBlock,
        };
        assert_eq!(d.to_string(), "line 3: `{` is never closed");
    }
}
