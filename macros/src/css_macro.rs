//! `css!` macro: split a string literal on `${expr}` interpolations and emit a
//! `StyleTemplate` builder chain.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, Expr, LitStr, Result};

// ---------------------------------------------------------------------------
// Splitting
// ---------------------------------------------------------------------------

/// One piece of the literal, in source order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Piece {
    /// Literal style text.
    Text(String),
    /// The source of a `${...}` interpolation, without the delimiters.
    Slot(String),
}

/// Split `source` into text and slot pieces.
///
/// Slot bodies may contain braces (closures with blocks), string literals
/// and char literals; the slot ends at the `}` that balances its `${`.
pub(crate) fn split_pieces(source: &str) -> std::result::Result<Vec<Piece>, String> {
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut rest = source;

    while let Some(start) = rest.find("${") {
        text.push_str(&rest[..start]);
        let body_start = start + 2;
        let end = slot_end(&rest[body_start..])
            .ok_or_else(|| format!("unterminated `${{` at byte {}", source.len() - rest.len() + start))?;
        let body = rest[body_start..body_start + end].trim();
        if body.is_empty() {
            return Err("empty `${}` interpolation".to_owned());
        }
        if !text.is_empty() {
            pieces.push(Piece::Text(std::mem::take(&mut text)));
        }
        pieces.push(Piece::Slot(body.to_owned()));
        rest = &rest[body_start + end + 1..];
    }
    text.push_str(rest);
    if !text.is_empty() {
        pieces.push(Piece::Text(text));
    }
    Ok(pieces)
}

/// Byte offset of the `}` closing a slot body, if any.
fn slot_end(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in body.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' => quote = Some('"'),
            '\'' if is_char_literal(&body[i + 1..]) => quote = Some('\''),
            '{' => depth += 1,
            '}' if depth == 0 => return Some(i),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Whether the text after a `'` is the rest of a char literal (`'}'`,
/// `'\n'`) rather than a lifetime (`'a`).
fn is_char_literal(after: &str) -> bool {
    let mut chars = after.chars();
    match chars.next() {
        Some('\\') => true,
        Some(_) => chars.next() == Some('\''),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

fn generate_piece(piece: &Piece, lit: &LitStr) -> Result<TokenStream> {
    match piece {
        Piece::Text(text) => Ok(quote! { .text(#text) }),
        Piece::Slot(source) => {
            let expr: Expr = syn::parse_str(source).map_err(|err| {
                Error::new(lit.span(), format!("invalid expression in `${{{source}}}`: {err}"))
            })?;
            Ok(match expr {
                Expr::Closure(_) => quote! { .computed(#expr) },
                _ => quote! { .literal(#expr) },
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Entry point: generate code for the entire css! macro.
pub(crate) fn css_impl(input: TokenStream) -> Result<TokenStream> {
    let lit: LitStr = syn::parse2(input)?;
    let pieces = split_pieces(&lit.value()).map_err(|msg| Error::new(lit.span(), msg))?;

    let calls = pieces
        .iter()
        .map(|piece| generate_piece(piece, &lit))
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        ::stylekit::style::template::StyleTemplate::new() #(#calls)*
    })
}

// ===========================================================================
// Tests
// ===========================================================================
