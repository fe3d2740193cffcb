//! Proc macros for stylekit: `css!` style templates.
//!
//! This crate is not meant to be used directly; enable the `macros` feature on `stylekit`.

use proc_macro::TokenStream;

mod css_macro;

/// Style template macro.
///
/// Takes one string literal. Each `${expr}` becomes a slot of the resulting
/// `stylekit::style::StyleTemplate`: a closure expression becomes a computed
/// slot evaluated against the render-time props, any other expression a
/// literal slot evaluated once, where the template is built.
///
/// # Syntax
///
/// ```ignore
/// const GAP: i32 = 4;
///
/// let template = css!(r#"
///     padding: ${GAP}px;
///     color: ${|p: &Props| p.get("color").cloned()};
///     &:hover {
///         opacity: 0.8;
///     }
/// "#);
/// ```
///
/// An unterminated `${`, an empty `${}` or an expression that does not parse
/// is a compile error.
#[proc_macro]
pub fn css(input: TokenStream) -> TokenStream {
    css_macro::css_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
