//! The tree capability the splitter works through.

/// An editable document tree.
///
/// The splitter never sees a concrete tree; it inspects and mutates nodes only
/// through this trait. Node handles are opaque and owned by the tree.
pub trait Universe {
    /// Handle to a node in the tree
    type Node: Clone;

    /// Returns true for text-bearing nodes.
    fn is_text(&self, node: &Self::Node) -> bool;

    /// Text content of a text node; empty for other nodes.
    fn get_text(&self, node: &Self::Node) -> String;

    /// Replaces the text content of a text node.
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Creates a detached text node.
    fn create_text(&mut self, text: &str) -> Self::Node;

    /// Inserts `node` as the next sibling of `anchor`.
    fn insert_after(&mut self, anchor: &Self::Node, node: &Self::Node);

    /// Inserts `nodes` after `anchor`, keeping their order.
    fn insert_after_all(&mut self, anchor: &Self::Node, nodes: &[Self::Node]) {
        let mut current = anchor.clone();
        for node in nodes {
            self.insert_after(&current, node);
            current = node.clone();
        }
    }
}
