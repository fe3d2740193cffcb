//! Errors surfaced to callers of the styling engine.
//!
//! Only template evaluation can fail a render. Nesting irregularities degrade
//! silently in the flattener, and rejected rules are logged and skipped by the
//! injector.

/// Boxed error returned by a fallible slot computation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from rendering a styled component.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// A computed slot returned an error. The slot's own error is kept intact
    /// as the source.
    #[error("style slot {slot} failed to evaluate")]
    Evaluation {
        /// Zero-based index of the failing slot in its template.
        slot: usize,
        #[source]
        source: BoxError,
    },
}
