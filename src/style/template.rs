//! Style templates: literal segments interleaved with dynamic slots.
//!
//! A template is the Rust form of a tagged template literal. Evaluating it
//! against a properties object yields the style text the rest of the engine
//! keys on.

use std::fmt;
use std::rc::Rc;

use crate::error::{BoxError, StyleError};
use crate::style::value::PropValue;

type Compute<P> = Rc<dyn Fn(&P) -> Result<PropValue, BoxError>>;

/// One dynamic slot of a template.
pub enum Slot<P> {
    /// A fixed value, stringified as-is.
    Literal(PropValue),
    /// A computation over the render-time properties.
    Computed(Compute<P>),
}

impl<P> Slot<P> {
    pub fn literal(value: impl Into<PropValue>) -> Self {
        Slot::Literal(value.into())
    }

    /// An infallible computation.
    pub fn computed<F, R>(f: F) -> Self
    where
        F: Fn(&P) -> R + 'static,
        R: Into<PropValue>,
    {
        Slot::Computed(Rc::new(move |props: &P| -> Result<PropValue, BoxError> {
            Ok(f(props).into())
        }))
    }

    /// A fallible computation. Its error fails the render.
    pub fn try_computed<F, R, E>(f: F) -> Self
    where
        F: Fn(&P) -> Result<R, E> + 'static,
        R: Into<PropValue>,
        E: Into<BoxError>,
    {
        Slot::Computed(Rc::new(move |props: &P| -> Result<PropValue, BoxError> {
            f(props).map(Into::into).map_err(Into::into)
        }))
    }

    fn evaluate(&self, props: &P) -> Result<PropValue, BoxError> {
        match self {
            Slot::Literal(value) => Ok(value.clone()),
            Slot::Computed(compute) => compute(props),
        }
    }
}

impl<P> Clone for Slot<P> {
    fn clone(&self) -> Self {
        match self {
            Slot::Literal(value) => Slot::Literal(value.clone()),
            Slot::Computed(compute) => Slot::Computed(Rc::clone(compute)),
        }
    }
}

impl<P> fmt::Debug for Slot<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Slot::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// An immutable style template over properties of type `P`.
///
/// Invariant: `segments.len() == slots.len() + 1`; slot `i` sits between
/// segment `i` and segment `i + 1`.
pub struct StyleTemplate<P> {
    segments: Vec<String>,
    slots: Vec<Slot<P>>,
}

impl<P> StyleTemplate<P> {
    /// An empty template.
    pub fn new() -> Self {
        Self {
            segments: vec![String::new()],
            slots: Vec::new(),
        }
    }

    /// Build from tagged-template parts. Segment `i` precedes slot `i`;
    /// missing segments are empty and surplus segments are appended as text.
    pub fn from_parts<S: Into<String>>(
        segments: impl IntoIterator<Item = S>,
        slots: impl IntoIterator<Item = Slot<P>>,
    ) -> Self {
        let mut template = Self::new();
        let mut slots = slots.into_iter();
        for segment in segments {
            template = template.text(segment);
            if let Some(slot) = slots.next() {
                template = template.slot(slot);
            }
        }
        for slot in slots {
            template = template.slot(slot);
        }
        template
    }

    /// Append literal text (builder).
    pub fn text(mut self, text: impl Into<String>) -> Self {
        if let Some(last) = self.segments.last_mut() {
            last.push_str(&text.into());
        }
        self
    }

    /// Append a slot (builder).
    pub fn slot(mut self, slot: Slot<P>) -> Self {
        self.slots.push(slot);
        self.segments.push(String::new());
        self
    }

    /// Append a literal slot (builder).
    pub fn literal(self, value: impl Into<PropValue>) -> Self {
        self.slot(Slot::literal(value))
    }

    /// Append an infallible computed slot (builder).
    pub fn computed<F, R>(self, f: F) -> Self
    where
        F: Fn(&P) -> R + 'static,
        R: Into<PropValue>,
    {
        self.slot(Slot::computed(f))
    }

    /// Append a fallible computed slot (builder).
    pub fn try_computed<F, R, E>(self, f: F) -> Self
    where
        F: Fn(&P) -> Result<R, E> + 'static,
        R: Into<PropValue>,
        E: Into<BoxError>,
    {
        self.slot(Slot::try_computed(f))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn slots(&self) -> &[Slot<P>] {
        &self.slots
    }

    /// Whether evaluation is independent of the properties.
    pub fn is_static(&self) -> bool {
        self.slots.iter().all(|slot| matches!(slot, Slot::Literal(_)))
    }

    /// Resolve the template against `props` into one style text.
    ///
    /// Slots are evaluated in order; the first failing slot aborts evaluation
    /// and its error is returned as the source of [`StyleError::Evaluation`].
    pub fn evaluate(&self, props: &P) -> Result<String, StyleError> {
        let mut out = String::with_capacity(self.segments.iter().map(String::len).sum());
        for (index, segment) in self.segments.iter().enumerate() {
            out.push_str(segment);
            if let Some(slot) = self.slots.get(index) {
                let value = slot
                    .evaluate(props)
                    .map_err(|source| StyleError::Evaluation { slot: index, source })?;
                out.push_str(&value.to_string());
            }
        }
        Ok(out)
    }
}

impl<P> Default for StyleTemplate<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for StyleTemplate<P> {
    fn clone(&self) -> Self {
        Self {
            segments: self.segments.clone(),
            slots: self.slots.clone(),
        }
    }
}

impl<P> fmt::Debug for StyleTemplate<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleTemplate")
            .field("segments", &self.segments)
            .field("slots", &self.slots)
            .finish()
    }
}

impl<P> From<&str> for StyleTemplate<P> {
    fn from(text: &str) -> Self {
        Self::new().text(text)
    }
}
