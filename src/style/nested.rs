//! Nested rule flattening.
//!
//! Turns SCSS-like nested style text into flat `selector { declarations }`
//! rules rooted at a generated class selector. This is a line-oriented
//! heuristic, not a CSS grammar. The accepted dialect:
//!
//! - One declaration per line, terminated by `;`. A declaration whose line
//!   has no trailing `;` continues on the following lines until one ends
//!   with `;`. A single-line declaration that forgets its `;` therefore
//!   swallows the next line.
//! - A block opens with `<selector> {` on one line. The selector may also sit
//!   alone on the line before a bare `{`.
//! - `&rest` attaches to the parent (`&:hover`, `&.active`), a leading `:` or
//!   `::` attaches as a pseudo selector, anything else is a descendant.
//! - A line is a declaration before it is a selector: `a:hover {` does not
//!   open a block; write `& a:hover {` instead.
//! - `}` closes the innermost block. Surplus closes never pop the root.
//! - At-rules are not supported.
//!
//! Declarations written above a nested block belong to the enclosing
//! selector; declarations are always flushed before a push and before a pop.

use tracing::trace;

/// How a single trimmed line is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Declaration,
    Selector,
    Other,
}

/// `property: value` shaped, not selector-marked, and brace-free.
pub fn is_declaration(line: &str) -> bool {
    line.contains(':')
        && !line.starts_with('.')
        && !line.starts_with('&')
        && !line.contains('{')
        && !line.contains('}')
}

/// Selector-marked, tag-like, or containing selector punctuation or spaces.
pub fn is_selector(line: &str) -> bool {
    line.starts_with('.')
        || line.starts_with('&')
        || line.starts_with(|c: char| c.is_ascii_alphabetic())
        || line.contains(['.', '#', ':', '['])
        || line.contains(char::is_whitespace)
}

/// Classify a trimmed line. Declarations win over selectors.
pub fn classify(line: &str) -> LineKind {
    if is_declaration(line) {
        LineKind::Declaration
    } else if is_selector(line) {
        LineKind::Selector
    } else {
        LineKind::Other
    }
}

/// Compose a nested selector token with its parent selector.
///
/// ```
/// use stylekit::style::nested::compose_selector;
///
/// assert_eq!(compose_selector(".a", "&:hover"), ".a:hover");
/// assert_eq!(compose_selector(".a", "::placeholder"), ".a::placeholder");
/// assert_eq!(compose_selector(".a", ".b"), ".a .b");
/// ```
pub fn compose_selector(parent: &str, child: &str) -> String {
    let child = child.trim();
    if let Some(rest) = child.strip_prefix('&') {
        format!("{parent}{rest}")
    } else if child.starts_with(':') {
        format!("{parent}{child}")
    } else {
        format!("{parent} {child}")
    }
}

/// Flatten `style` into rules rooted at `root` (e.g. `.styled-1`).
///
/// Rules come out in discovery order. Identical input always produces
/// identical output.
pub fn flatten(style: &str, root: &str) -> Vec<String> {
    let mut parser = NestedParser::new(root);
    for line in style.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// Incremental state for [`flatten`], fed one line at a time.
#[derive(Debug, Clone)]
pub struct NestedParser {
    /// Selector stack; index 0 is the root and is never popped. The top is
    /// the current selector.
    stack: Vec<String>,
    /// Declarations read for the current selector and not yet emitted.
    pending: Vec<String>,
    /// Flattened rules, append-only.
    output: Vec<String>,
    /// Net `{` minus `}` seen so far. Informational; may go negative.
    depth: i32,
    /// A declaration still waiting for its terminating `;`.
    continuation: Option<String>,
}

impl NestedParser {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            stack: vec![root.into()],
            pending: Vec::new(),
            output: Vec::new(),
            depth: 0,
            continuation: None,
        }
    }

    /// The selector declarations are currently attributed to.
    pub fn current_selector(&self) -> &str {
        // The stack is never empty.
        self.stack.last().map(String::as_str).unwrap_or_default()
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Rules emitted so far.
    pub fn rules(&self) -> &[String] {
        &self.output
    }

    /// Process one raw line of style text.
    pub fn feed(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        if let Some(mut buffer) = self.continuation.take() {
            buffer.push(' ');
            buffer.push_str(line);
            if buffer.ends_with(';') {
                self.pending.push(buffer);
            } else {
                self.continuation = Some(buffer);
            }
            return;
        }

        if is_declaration(line) && !line.ends_with(';') {
            self.continuation = Some(line.to_owned());
            return;
        }

        if let Some((pre, post)) = line.split_once('{') {
            self.depth += 1;
            let pre = pre.trim();
            if !pre.is_empty() && classify(pre) == LineKind::Selector {
                self.flush();
                self.push_selector(pre);
            }
            let post = post.trim();
            if !post.is_empty() {
                self.feed_block_tail(post);
            }
            return;
        }

        if line.contains('}') {
            self.close_line(line);
            return;
        }

        match classify(line) {
            LineKind::Declaration => self.pending.push(line.to_owned()),
            LineKind::Selector => {
                self.flush();
                self.push_selector(line);
            }
            LineKind::Other => {}
        }
    }

    /// Emit any remaining declarations and return the rule batch.
    ///
    /// An unterminated continuation is dropped.
    pub fn finish(mut self) -> Vec<String> {
        self.flush();
        if let Some(dropped) = self.continuation.take() {
            trace!(declaration = %dropped, "dropping unterminated declaration");
        }
        self.output
    }

    /// Text following a `{` on the same line.
    fn feed_block_tail(&mut self, tail: &str) {
        match (tail.find('{'), tail.find('}')) {
            (Some(open), Some(close)) if close < open => self.close_line(tail),
            (Some(_), _) => self.feed(tail),
            (None, Some(_)) => self.close_line(tail),
            (None, None) => {
                if is_declaration(tail) {
                    self.pending.push(tail.to_owned());
                }
            }
        }
    }

    /// A line holding a `}`: declarations before it belong to the block
    /// being closed; anything after it is processed as a new line.
    fn close_line(&mut self, line: &str) {
        let Some((inner, rest)) = line.split_once('}') else {
            return;
        };
        let inner = inner.trim();
        if !inner.is_empty() && is_declaration(inner) {
            self.pending.push(inner.to_owned());
        }
        self.close();
        self.feed(rest);
    }

    fn close(&mut self) {
        self.depth -= 1;
        self.flush();
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    fn push_selector(&mut self, token: &str) {
        let composed = compose_selector(self.current_selector(), token);
        self.stack.push(composed);
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let rule = format!(
            "{} {{ {} }}",
            self.current_selector(),
            self.pending.join(" ")
        );
        self.output.push(rule);
        self.pending.clear();
    }
}
