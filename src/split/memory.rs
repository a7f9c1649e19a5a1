//! Arena-backed in-memory document tree.

use super::universe::Universe;

/// Handle to a node in a [`MemoryUniverse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Element(String),
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A minimal element/text tree.
///
/// Nodes are never freed; detached nodes stay in the arena. Handles from a
/// different universe are a programming error and panic on use.
#[derive(Debug, Clone)]
pub struct MemoryUniverse {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Default for MemoryUniverse {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUniverse {
    /// Creates a tree holding a single `body` element.
    pub fn new() -> Self {
        let mut universe = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        universe.root = universe.push(NodeKind::Element("body".to_string()));
        universe
    }

    /// Creates a tree with one paragraph holding `text`, returning the text node.
    pub fn with_paragraph(text: &str) -> (Self, NodeId) {
        let mut universe = Self::new();
        let p = universe.create_element("p");
        universe.append_child(universe.root, p);
        let node = universe.create_text(text);
        universe.append_child(p, node);
        (universe, node)
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(tag.to_string()))
    }

    /// Tag name of an element; `None` for text nodes.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element(tag) => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Text of a text node; `None` for elements.
    pub fn text_of(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Texts of the text children of `parent`, in sibling order.
    pub fn child_texts(&self, parent: NodeId) -> Vec<String> {
        self.children(parent)
            .iter()
            .filter_map(|&child| self.text_of(child).map(str::to_string))
            .collect()
    }

    /// Moves `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    /// Total number of nodes ever created, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Universe for MemoryUniverse {
    type Node = NodeId;

    fn is_text(&self, node: &NodeId) -> bool {
        matches!(self.nodes[node.0].kind, NodeKind::Text(_))
    }

    fn get_text(&self, node: &NodeId) -> String {
        self.text_of(*node).unwrap_or_default().to_string()
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        if let NodeKind::Text(current) = &mut self.nodes[node.0].kind {
            *current = text.to_string();
        }
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    /// A detached anchor has no siblings, so nothing is inserted.
    fn insert_after(&mut self, anchor: &NodeId, node: &NodeId) {
        let Some(parent) = self.nodes[anchor.0].parent else {
            return;
        };
        self.detach(*node);
        let siblings = &mut self.nodes[parent.0].children;
        let index = siblings
            .iter()
            .position(|c| c == anchor)
            .map_or(siblings.len(), |i| i + 1);
        siblings.insert(index, *node);
        self.nodes[node.0].parent = Some(parent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_paragraph() {
        let (universe, node) = MemoryUniverse::with_paragraph("hello");
        let p = universe.parent(node).unwrap();
        assert_eq!(universe.tag(p), Some("p"));
        assert_eq!(universe.parent(p), Some(universe.root()));
        assert_eq!(universe.child_texts(p), vec!["hello"]);
    }

    #[test]
    fn test_insert_after_places_next_sibling() {
        let (mut universe, first) = MemoryUniverse::with_paragraph("a");
        let p = universe.parent(first).unwrap();
        let last = universe.create_text("c");
        universe.append_child(p, last);
        let middle = universe.create_text("b");

        universe.insert_after(&first, &middle);
        assert_eq!(universe.child_texts(p), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_insert_after_all_keeps_order() {
        let (mut universe, first) = MemoryUniverse::with_paragraph("a");
        let p = universe.parent(first).unwrap();
        let b = universe.create_text("b");
        let c = universe.create_text("c");

        universe.insert_after_all(&first, &[b, c]);
        assert_eq!(universe.child_texts(p), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_insert_after_moves_attached_node() {
        let (mut universe, a) = MemoryUniverse::with_paragraph("a");
        let p = universe.parent(a).unwrap();
        let b = universe.create_text("b");
        universe.append_child(p, b);

        universe.insert_after(&b, &a);
        assert_eq!(universe.child_texts(p), vec!["b", "a"]);
    }

    #[test]
    fn test_detached_anchor_is_noop() {
        let mut universe = MemoryUniverse::new();
        let anchor = universe.create_text("x");
        let node = universe.create_text("y");
        universe.insert_after(&anchor, &node);
        assert_eq!(universe.parent(node), None);
    }

    #[test]
    fn test_elements_have_no_text() {
        let mut universe = MemoryUniverse::new();
        let span = universe.create_element("span");
        assert!(!universe.is_text(&span));
        assert_eq!(universe.get_text(&span), "");
        universe.set_text(&span, "ignored");
        assert_eq!(universe.text_of(span), None);
    }
}
