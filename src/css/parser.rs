//! Recursive descent CSS parser.
//!
//! Parses one CSS rule at a time into a [`RuleSet`], for rule-at-a-time
//! insertion into a stylesheet. Uses the logos-based tokenizer from
//! [`crate::css::tokenizer`]. Selectors are parsed strictly; declaration
//! values are captured as source text by byte span.

use logos::Logos;

use crate::css::model::*;
use crate::css::tokenizer::Token;

/// Errors from CSS parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("invalid character {text:?} at byte {offset}")]
    InvalidCharacter { offset: usize, text: String },
    #[error("at-rule `{0}` is not supported")]
    UnsupportedAtRule(String),
}

/// A positioned token with byte-level span information for whitespace detection.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    /// Byte offset where this token starts in the source.
    byte_start: usize,
    /// Byte offset where this token ends in the source.
    byte_end: usize,
}

/// Strip CSS block comments (`/* ... */`) from the input, replacing each
/// comment with a single space.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        result.push(' ');
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            // Unterminated comment: consume the rest of the input.
            None => "",
        };
    }
    result.push_str(rest);

    result
}

/// Tokenize input using logos with span information preserved.
///
/// Unlike [`crate::css::tokenizer::tokenize`], characters that fail to lex are
/// an error: a rule containing them must be rejected, not silently repaired.
fn tokenize_with_spans(input: &str) -> Result<Vec<PToken>, ParseError> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();

    for (idx, (result, span)) in lexer.spanned().enumerate() {
        let text = input[span.clone()].to_string();
        match result {
            Ok(token) => tokens.push(PToken {
                token,
                text,
                pos: idx,
                byte_start: span.start,
                byte_end: span.end,
            }),
            Err(()) => {
                return Err(ParseError::InvalidCharacter {
                    offset: span.start,
                    text,
                })
            }
        }
    }

    Ok(tokens)
}

fn parser_for(input: &str) -> Result<Parser, ParseError> {
    let source = strip_comments(input);
    let tokens = tokenize_with_spans(&source)?;
    Ok(Parser {
        tokens,
        cursor: 0,
        source,
    })
}

/// Parse exactly one CSS rule. Trailing input after the closing brace is an
/// error, as is empty input.
pub fn parse_rule(input: &str) -> Result<RuleSet, ParseError> {
    let mut parser = parser_for(input)?;

    if parser.is_eof() {
        return Err(ParseError::UnexpectedEof("expected a rule".into()));
    }
    let rule = parser.parse_rule()?;
    if let Some(extra) = parser.peek() {
        return Err(ParseError::UnexpectedToken {
            position: extra.pos,
            message: format!("unexpected '{}' after end of rule", extra.text),
        });
    }

    Ok(rule)
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
    /// Comment-stripped source, for slicing raw declaration values.
    source: String,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&PToken> {
        if self.cursor < self.tokens.len() {
            let tok = &self.tokens[self.cursor];
            self.cursor += 1;
            Some(tok)
        } else {
            None
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!(
                    "expected {:?}, got {:?} '{}'",
                    expected, tok.token, tok.text
                ),
            }),
            None => Err(ParseError::UnexpectedEof(format!(
                "expected {:?}",
                expected
            ))),
        }
    }

    fn current_pos(&self) -> usize {
        self.peek().map(|t| t.pos).unwrap_or(self.tokens.len())
    }

    /// Returns `true` if the current token is immediately adjacent (no whitespace)
    /// to the previous token.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        match self.peek() {
            Some(curr) => curr.byte_start == prev.byte_end,
            None => false,
        }
    }

    /// Parse a single CSS rule: selector(s) `{` declarations `}`.
    fn parse_rule(&mut self) -> Result<RuleSet, ParseError> {
        if let Some(tok) = self.peek() {
            if tok.token == Token::AtKeyword {
                return Err(ParseError::UnsupportedAtRule(tok.text.clone()));
            }
        }

        let selectors = self.parse_selector_list()?;
        self.expect(&Token::BraceOpen)?;
        let declarations = self.parse_declarations()?;
        self.expect(&Token::BraceClose)?;

        Ok(RuleSet {
            selectors,
            declarations,
        })
    }

    /// Parse a comma-separated list of selectors (before `{`).
    fn parse_selector_list(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = vec![self.parse_selector()?];

        while self.peek().is_some_and(|t| t.token == Token::Comma) {
            self.advance();
            selectors.push(self.parse_selector()?);
        }

        Ok(selectors)
    }

    /// Parse a single selector: a sequence of compound selectors with combinators.
    ///
    /// A selector like `.styled-1 > li:hover` becomes parts:
    /// - SelectorPart::Compound([Class("styled-1")])
    /// - SelectorPart::Combinator(Child)
    /// - SelectorPart::Compound([Type("li"), PseudoClass("hover")])
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut parts = vec![SelectorPart::Compound(self.parse_compound_selector()?)];

        loop {
            let combinator = match self.peek().map(|t| &t.token) {
                Some(Token::GreaterThan) => Some(Combinator::Child),
                Some(Token::Plus) => Some(Combinator::NextSibling),
                Some(Token::Tilde) => Some(Combinator::SubsequentSibling),
                _ => None,
            };
            if let Some(combinator) = combinator {
                self.advance();
                parts.push(SelectorPart::Combinator(combinator));
                parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                continue;
            }

            // A selector-starting token separated by whitespace is a
            // descendant combinator; adjacent ones were consumed by the
            // compound parser already.
            match self.peek() {
                Some(t) if starts_compound(&t.token) => {
                    parts.push(SelectorPart::Combinator(Combinator::Descendant));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                _ => break,
            }
        }

        Ok(Selector { parts })
    }

    /// Parse a compound selector: a sequence of simple selector components with
    /// no whitespace between them, e.g. `li.item:hover`.
    ///
    /// Uses span-based adjacency detection: `.class`, `#id`, `[attr]` and
    /// pseudo selectors are only appended to the current compound if they
    /// appear immediately after the previous token.
    fn parse_compound_selector(&mut self) -> Result<CompoundSelector, ParseError> {
        let mut components = Vec::new();

        match self.peek().map(|t| t.token.clone()) {
            Some(Token::Ident) => {
                let name = self.advance().map(|t| t.text.clone()).unwrap_or_default();
                components.push(SelectorComponent::Type(name));
            }
            Some(Token::Star) => {
                self.advance();
                components.push(SelectorComponent::Universal);
            }
            Some(_) => match self.parse_subclass_component()? {
                Some(component) => components.push(component),
                None => {
                    return Err(ParseError::UnexpectedToken {
                        position: self.current_pos(),
                        message: "expected selector part".into(),
                    });
                }
            },
            None => {
                return Err(ParseError::UnexpectedEof("expected selector part".into()));
            }
        }

        // Continue appending to this compound only while the next token is
        // adjacent (no whitespace gap).
        while self.is_adjacent() {
            match self.parse_subclass_component()? {
                Some(component) => components.push(component),
                None => break,
            }
        }

        Ok(CompoundSelector { components })
    }

    /// Parse one class, id, attribute or pseudo component at the cursor.
    /// Returns `None` (consuming nothing) if the cursor holds something else.
    fn parse_subclass_component(&mut self) -> Result<Option<SelectorComponent>, ParseError> {
        let Some(tok) = self.peek().cloned() else {
            return Ok(None);
        };

        let component = match tok.token {
            Token::Dot => {
                self.advance();
                let adjacent = self.is_adjacent();
                let name_tok = self.advance().cloned().ok_or_else(|| {
                    ParseError::UnexpectedEof("expected class name after '.'".into())
                })?;
                if name_tok.token != Token::Ident || !adjacent {
                    return Err(ParseError::UnexpectedToken {
                        position: name_tok.pos,
                        message: format!(
                            "expected class name, got {:?} '{}'",
                            name_tok.token, name_tok.text
                        ),
                    });
                }
                SelectorComponent::Class(name_tok.text)
            }
            Token::Hash => {
                self.advance();
                SelectorComponent::Id(tok.text[1..].to_string())
            }
            Token::Attribute => {
                self.advance();
                let inner = tok.text[1..tok.text.len() - 1].trim();
                if inner.is_empty() {
                    return Err(ParseError::UnexpectedToken {
                        position: tok.pos,
                        message: "empty attribute selector".into(),
                    });
                }
                SelectorComponent::Attribute(inner.to_string())
            }
            Token::PseudoClass => {
                self.advance();
                SelectorComponent::PseudoClass(tok.text[1..].to_string())
            }
            Token::PseudoElement => {
                self.advance();
                SelectorComponent::PseudoElement(tok.text[2..].to_string())
            }
            _ => return Ok(None),
        };

        Ok(Some(component))
    }

    /// Parse declarations between `{` and `}`.
    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();

        loop {
            match self.peek().map(|t| &t.token) {
                None | Some(Token::BraceClose) => break,
                // Stray semicolons between declarations are legal.
                Some(Token::Semicolon) => {
                    self.advance();
                }
                Some(_) => declarations.push(self.parse_declaration()?),
            }
        }

        Ok(declarations)
    }

    /// Parse a single declaration: `property: raw value [!important];`
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let prop_tok = self.advance().cloned().ok_or_else(|| {
            ParseError::UnexpectedEof("expected property name".into())
        })?;
        if prop_tok.token != Token::Ident {
            return Err(ParseError::UnexpectedToken {
                position: prop_tok.pos,
                message: format!(
                    "expected property name, got {:?} '{}'",
                    prop_tok.token, prop_tok.text
                ),
            });
        }
        let property = prop_tok.text;

        // `color:red` lexes as Ident + PseudoClass; the value then starts
        // right after the colon and already covers the rest of that token.
        let (value_start, mut value_end) = match self.peek() {
            Some(t) if t.token == Token::Colon => {
                let start = t.byte_end;
                self.advance();
                (start, start)
            }
            Some(t) if t.token == Token::PseudoClass && t.byte_start == prop_tok.byte_end => {
                let span = (t.byte_start + 1, t.byte_end);
                self.advance();
                span
            }
            Some(t) => {
                return Err(ParseError::UnexpectedToken {
                    position: t.pos,
                    message: format!("expected ':' after `{property}`, got '{}'", t.text),
                });
            }
            None => {
                return Err(ParseError::UnexpectedEof(format!(
                    "expected ':' after `{property}`"
                )));
            }
        };

        let mut paren_depth = 0usize;
        let mut important = false;

        loop {
            let Some(tok) = self.peek().cloned() else {
                break;
            };
            match tok.token {
                Token::Semicolon | Token::BraceClose if paren_depth == 0 => break,
                Token::BraceOpen => {
                    return Err(ParseError::UnexpectedToken {
                        position: tok.pos,
                        message: format!("unexpected '{{' in value of `{property}`"),
                    });
                }
                Token::Important if paren_depth == 0 => {
                    self.advance();
                    important = true;
                    break;
                }
                Token::ParenOpen => paren_depth += 1,
                Token::ParenClose => {
                    paren_depth = paren_depth.checked_sub(1).ok_or_else(|| {
                        ParseError::UnexpectedToken {
                            position: tok.pos,
                            message: "unbalanced ')'".into(),
                        }
                    })?;
                }
                _ => {}
            }
            // Functions like `rgba(` keep the ident and paren in one value.
            value_end = tok.byte_end;
            self.advance();
        }

        if paren_depth != 0 {
            return Err(ParseError::UnexpectedEof(format!(
                "unclosed '(' in value of `{property}`"
            )));
        }

        let value = self.source[value_start..value_end.max(value_start)].trim();
        if value.is_empty() {
            return Err(ParseError::UnexpectedToken {
                position: self.current_pos(),
                message: format!("property `{property}` has no value"),
            });
        }
        let value = value.to_string();

        // After `!important` only the terminator may follow.
        if important {
            match self.peek() {
                None => {}
                Some(t) if matches!(t.token, Token::Semicolon | Token::BraceClose) => {}
                Some(t) => {
                    return Err(ParseError::UnexpectedToken {
                        position: t.pos,
                        message: format!("unexpected '{}' after !important", t.text),
                    });
                }
            }
        }

        if self.peek().is_some_and(|t| t.token == Token::Semicolon) {
            self.advance();
        }

        Ok(Declaration {
            property,
            value,
            important,
        })
    }
}

/// Whether a token can begin a compound selector.
fn starts_compound(token: &Token) -> bool {
    matches!(
        token,
        Token::Ident
            | Token::Hash
            | Token::Dot
            | Token::Star
            | Token::Attribute
            | Token::PseudoClass
            | Token::PseudoElement
    )
}
