//! The headless document: an arena tree with `<html>`, `<head>` and `<body>`.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};
use tracing::debug;

use super::node::{NodeData, NodeId};
use super::sheet::SheetHandle;
use crate::host::{Attributes, ElementFactory, StyleHost};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// An in-memory document, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is
/// O(1). A new document already holds `<html>` with `<head>` and `<body>`.
///
/// Nodes created through [`ElementFactory`] start detached; [`Document::mount`]
/// attaches them under `<body>`. Stylesheets attached through [`StyleHost`]
/// become `<style>` elements under `<head>`, in attachment order.
#[derive(Debug)]
pub struct Document {
    nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    sheets: Vec<SheetHandle>,
}

impl Document {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::new("html"));
        let head = nodes.insert(NodeData::new("head"));
        let body = nodes.insert(NodeData::new("body"));

        let mut children = SecondaryMap::new();
        children.insert(root, vec![head, body]);
        children.insert(head, Vec::new());
        children.insert(body, Vec::new());

        let mut parent = SecondaryMap::new();
        parent.insert(head, root);
        parent.insert(body, root);

        Self {
            nodes,
            children,
            parent,
            root,
            head,
            body,
            sheets: Vec::new(),
        }
    }

    /// Insert a detached node.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Insert a node as the last child of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.insert(data);
        self.append_child(parent, id);
        id
    }

    /// Move `node` (and its subtree) to the end of `parent`'s children.
    ///
    /// # Panics
    ///
    /// Panics (debug) if either node does not exist, or if `parent` lies
    /// inside `node`'s subtree.
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) {
        debug_assert!(self.nodes.contains_key(node), "node does not exist");
        debug_assert!(self.nodes.contains_key(parent), "parent does not exist");
        debug_assert!(
            parent != node && !self.ancestors(parent).contains(&node),
            "appending a node under its own subtree"
        );

        self.detach(node);
        self.parent.insert(node, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(node);
        }
    }

    /// Attach `node` as the last child of `<body>`.
    pub fn mount(&mut self, node: NodeId) {
        self.append_child(self.body, node);
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.insert(NodeData::text(text))
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't
    /// exist. The three structural nodes cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) || [self.root, self.head, self.body].contains(&id) {
            return None;
        }
        self.detach(id);

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if let Some(sheet) = data.as_ref().and_then(|d| d.sheet.as_ref()) {
                self.sheets.retain(|s| !s.ptr_eq(sheet));
            }
            if current == id {
                removed = data;
            }
        }

        removed
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(old_parent) = self.parent.remove(node) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != node);
            }
        }
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the root, nearest ancestor first. Excludes `id`.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Element siblings before `id`, nearest first. Text nodes are skipped.
    pub fn previous_siblings(&self, id: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.parent(id) else {
            return Vec::new();
        };
        let siblings = self.children(parent);
        let position = siblings.iter().position(|&s| s == id).unwrap_or_default();
        siblings[..position]
            .iter()
            .rev()
            .copied()
            .filter(|&s| self.get(s).is_some_and(|d| !d.is_text()))
            .collect()
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// The `<html>` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `<head>` element.
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// The `<body>` element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Attached stylesheets, in attachment order.
    pub fn style_sheets(&self) -> &[SheetHandle] {
        &self.sheets
    }

    /// Number of nodes, including the structural ones and detached ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a document holds at least its structural nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the document contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementFactory for Document {
    type Node = NodeId;

    fn create_element(
        &mut self,
        tag: &str,
        attributes: Attributes,
        children: Vec<NodeId>,
    ) -> NodeId {
        let mut data = NodeData::new(tag);
        for (name, value) in attributes {
            data.set_attribute(name, value.to_string());
        }
        let id = self.insert(data);
        for child in children {
            self.append_child(id, child);
        }
        id
    }
}

impl StyleHost for Document {
    type Sheet = SheetHandle;

    fn attach_style_sheet(&mut self) -> SheetHandle {
        let sheet = SheetHandle::new();
        let mut data = NodeData::new("style");
        data.sheet = Some(sheet.clone());
        let node = self.insert_child(self.head, data);
        self.sheets.push(sheet.clone());
        debug!(?node, sheets = self.sheets.len(), "attached <style> to <head>");
        sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RuleList;
    use crate::style::value::PropValue;

    /// Build a small test tree under `<body>`:
    /// ```text
    ///      main
    ///     /    \
    ///    a      b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Document, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let main = doc.insert_child(body, NodeData::new("main").with_id("main"));
        let a = doc.insert_child(main, NodeData::new("section").with_class("left"));
        let b = doc.insert_child(main, NodeData::new("section").with_class("right"));
        let c = doc.insert_child(a, NodeData::new("button").with_id("c"));
        let d = doc.insert_child(a, NodeData::new("span").with_id("d"));
        (doc, main, a, b, c, d)
    }

    #[test]
    fn new_document_structure() {
        let doc = Document::new();
        assert_eq!(doc.children(doc.root()), &[doc.head(), doc.body()]);
        assert_eq!(doc.get(doc.head()).unwrap().tag, "head");
        assert_eq!(doc.len(), 3);
        assert!(doc.style_sheets().is_empty());
    }

    #[test]
    fn parent_and_children() {
        let (doc, main, a, b, c, d) = build_tree();
        assert_eq!(doc.parent(main), Some(doc.body()));
        assert_eq!(doc.children(main), &[a, b]);
        assert_eq!(doc.children(a), &[c, d]);
        assert!(doc.children(c).is_empty());
    }

    #[test]
    fn ancestors_end_at_root() {
        let (doc, main, a, _b, c, _d) = build_tree();
        assert_eq!(doc.ancestors(c), vec![a, main, doc.body(), doc.root()]);
        assert!(doc.ancestors(doc.root()).is_empty());
    }

    #[test]
    fn previous_siblings_nearest_first() {
        let (mut doc, main, a, b, ..) = build_tree();
        let text = doc.create_text("x");
        doc.append_child(main, text);
        let e = doc.insert_child(main, NodeData::new("p"));
        assert_eq!(doc.previous_siblings(e), vec![b, a]);
        assert!(doc.previous_siblings(a).is_empty());
    }

    #[test]
    fn append_child_moves_node() {
        let (mut doc, _main, a, b, c, _d) = build_tree();
        doc.append_child(b, c);
        assert_eq!(doc.parent(c), Some(b));
        assert!(!doc.children(a).contains(&c));
    }

    #[test]
    fn remove_subtree() {
        let (mut doc, main, a, b, c, d) = build_tree();
        doc.remove(a);
        assert!(!doc.contains(a));
        assert!(!doc.contains(c));
        assert!(!doc.contains(d));
        assert_eq!(doc.children(main), &[b]);
    }

    #[test]
    fn structural_nodes_cannot_be_removed() {
        let mut doc = Document::new();
        assert!(doc.remove(doc.body()).is_none());
        assert!(doc.remove(doc.root()).is_none());
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn create_element_is_detached_until_mounted() {
        let mut doc = Document::new();
        let label = doc.create_text("Hi");
        let el = doc.create_element(
            "BUTTON",
            vec![
                ("type".into(), PropValue::from("button")),
                ("tabindex".into(), PropValue::from(0)),
            ],
            vec![label],
        );
        assert_eq!(doc.parent(el), None);
        assert_eq!(doc.parent(label), Some(el));

        doc.mount(el);
        assert_eq!(doc.parent(el), Some(doc.body()));
        let data = doc.get(el).unwrap();
        assert_eq!(data.tag, "button");
        assert_eq!(data.attribute("tabindex"), Some("0"));
        assert_eq!(doc.get(label).unwrap().text.as_deref(), Some("Hi"));
    }

    #[test]
    fn attach_style_sheet_adds_style_under_head() {
        let mut doc = Document::new();
        let mut sheet = doc.attach_style_sheet();
        sheet.insert_rule(".a { color: red; }", 0).unwrap();

        let style = doc.children(doc.head())[0];
        let data = doc.get(style).unwrap();
        assert_eq!(data.tag, "style");
        assert!(data.sheet.as_ref().unwrap().ptr_eq(&sheet));
        assert_eq!(doc.style_sheets().len(), 1);
        assert_eq!(doc.style_sheets()[0].len(), 1);
    }

    #[test]
    fn removing_style_detaches_sheet() {
        let mut doc = Document::new();
        doc.attach_style_sheet();
        let style = doc.children(doc.head())[0];
        doc.remove(style);
        assert!(doc.style_sheets().is_empty());
    }
}
