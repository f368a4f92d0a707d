//! A minimal element tree standing in for the page
//!
//! Only the parts of the DOM the catalog touches are modeled: element ids,
//! tags, class lists, attributes, text and parent/child structure. Nodes
//! live in a flat arena and are addressed by [`NodeId`]; removed nodes leave
//! a tombstone so stale ids resolve to `None` instead of another element.

use indexmap::IndexMap;

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element id (may be empty)
    pub id: String,

    /// Tag name, e.g. `div`
    pub tag: String,

    /// Text content
    pub text: String,

    classes: Vec<String>,
    attributes: IndexMap<String, String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(id: &str, tag: &str, text: &str, parent: Option<NodeId>) -> Self {
        Self {
            id: id.to_string(),
            tag: tag.to_string(),
            text: text.to_string(),
            classes: Vec::new(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            parent,
        }
    }

    /// Class list in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Attribute value, if set.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Child elements in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent element, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// An element tree rooted at a `body` element.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only an empty `body`.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Element::new("", "body", "", None))],
            root: NodeId(0),
        }
    }

    /// The `body` element.
    pub fn body(&self) -> NodeId {
        self.root
    }

    // ═══════════════════════════════════════════════════════════════════
    // Tree Construction
    // ═══════════════════════════════════════════════════════════════════

    /// Create an element and append it to `parent`.
    ///
    /// Returns `None` if `parent` has been removed.
    pub fn add_element(
        &mut self,
        parent: NodeId,
        id: &str,
        tag: &str,
        text: &str,
        classes: &[&str],
    ) -> Option<NodeId> {
        self.element(parent)?;
        let node = NodeId(self.nodes.len());
        let mut element = Element::new(id, tag, text, Some(parent));
        element.classes = classes.iter().map(|c| c.to_string()).collect();
        self.nodes.push(Some(element));
        if let Some(p) = self.element_mut(parent) {
            p.children.push(node);
        }
        Some(node)
    }

    /// Detach `node` and everything under it. Removing the root is ignored.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.root {
            return;
        }
        let parent = match self.element(node) {
            Some(element) => element.parent,
            None => return,
        };
        if let Some(p) = parent.and_then(|p| self.element_mut(p)) {
            p.children.retain(|c| *c != node);
        }
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.nodes.get_mut(current.0).and_then(Option::take) {
                stack.extend(element.children);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Element Access
    // ═══════════════════════════════════════════════════════════════════

    /// Element behind `node`, `None` if it has been removed.
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    /// Mutable element behind `node`.
    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0).and_then(Option::as_mut)
    }

    /// Set an attribute on `node`.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.element_mut(node) {
            element.attributes.insert(name.to_string(), value.into());
        }
    }

    /// Remove an attribute from `node`.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attributes.shift_remove(name);
        }
    }

    /// Add `class` to `node` unless already present.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            if !element.has_class(class) {
                element.classes.push(class.to_string());
            }
        }
    }

    /// Remove `class` from `node`.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            element.classes.retain(|c| c != class);
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Queries (document order)
    // ═══════════════════════════════════════════════════════════════════

    /// Live nodes in document (pre-order) order.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if let Some(element) = self.element(node) {
                out.push(node);
                stack.extend(element.children.iter().rev().copied());
            }
        }
        out
    }

    /// First element with the given id.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants()
            .into_iter()
            .find(|n| self.element(*n).map_or(false, |e| e.id == id))
    }

    /// Every element carrying `class`.
    pub fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants()
            .into_iter()
            .filter(|n| self.element(*n).map_or(false, |e| e.has_class(class)))
            .collect()
    }
}
