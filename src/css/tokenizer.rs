//! logos-based CSS tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `::before` as PseudoElement beats two `Colon`s)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `10px` matches [`Token::Dimension`], not `Number` + `Ident`
//! - `:hover` matches [`Token::PseudoClass`], not `Colon` + `Ident`
//! - `:nth-child(2n+1)` is one [`Token::PseudoClass`] including its argument
//! - `#main` matches [`Token::Hash`] whether or not the name looks like hex

use logos::Logos;

/// CSS token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// `!important` flag.
    #[token("!important")]
    Important,

    /// At-keyword: `@media`, `@keyframes`.
    #[regex(r"@-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    AtKeyword,

    /// Hash: `#main`, `#fff`. Used for id selectors and hex colors alike.
    #[regex(r"#[a-zA-Z0-9_-]+")]
    Hash,

    /// Dimension: number with a unit suffix like `10px`, `1.5em`, `50%`.
    #[regex(r"-?([0-9]+|[0-9]*\.[0-9]+)([a-zA-Z]+|%)")]
    Dimension,

    /// Pseudo-element: `::before`, `::placeholder`.
    #[regex(r"::[a-zA-Z][a-zA-Z0-9_-]*")]
    PseudoElement,

    /// Pseudo-class: `:hover`, `:focus`, `:nth-child(2n+1)`, `:not(.a)`.
    #[regex(r":[a-zA-Z][a-zA-Z0-9_-]*(\([^)]*\))?")]
    PseudoClass,

    /// Attribute selector including its brackets: `[type="text"]`.
    #[regex(r"\[[^\]]*\]")]
    Attribute,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Number: integer or float, possibly negative.
    #[regex(r"-?([0-9]+|[0-9]*\.[0-9]+)")]
    Number,

    /// Identifier: property names, selector names, keywords, custom properties.
    #[regex(r"(--|-)?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    // ── Single-character punctuation ─────────────────────────────────

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `*`
    #[token("*")]
    Star,

    /// `>`
    #[token(">")]
    GreaterThan,

    /// `+`
    #[token("+")]
    Plus,

    /// `~`
    #[token("~")]
    Tilde,

    /// `/`
    #[token("/")]
    Slash,

    /// `=`
    #[token("=")]
    Equals,

    /// Any other single character: `-`, `?`, `&`, `\`. Values accept it;
    /// selectors and property names do not.
    #[regex(r"[^\s{};]", priority = 0)]
    Delim,
}

/// Tokenize a CSS string into a vector of `(Token, String)` pairs.
///
/// Characters that fail to lex (whitespace the lexer does not skip) are
/// dropped. The rule parser reports them instead.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    let lexer = Token::lexer(input);
    lexer
        .spanned()
        .filter_map(|(result, span)| {
            result.ok().map(|token| (token, input[span].to_string()))
        })
        .collect()
}
