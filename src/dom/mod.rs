//! Headless document: slotmap-backed node tree with attachable stylesheets.

pub mod node;
pub mod sheet;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use sheet::{CssRule, CssRuleList, SheetHandle};
pub use tree::Document;
