//! Splitting text nodes at character offsets.
//!
//! Both operations preserve the text: concatenating the resulting sibling
//! texts left to right gives back the original. They only ever insert new
//! sibling nodes; nothing is removed. Offsets are checked before the first
//! mutation, so a failed call leaves the tree untouched.

use super::errors::{SplitError, SplitResult};
use super::text::{splits, utf16_len};
use super::universe::Universe;
use crate::observability::Event;

/// The two sides of a cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSplit<N> {
    /// Node holding the text before the cut, absent when the cut is at the start
    pub before: Option<N>,
    /// Node holding the text after the cut, absent when the cut is at the end
    pub after: Option<N>,
}

impl<N> TextSplit<N> {
    pub fn new(before: Option<N>, after: Option<N>) -> Self {
        Self { before, after }
    }
}

/// Splits `node` at `position` (UTF-16 code units).
///
/// Non-text nodes and cuts at either end leave the tree unchanged. Otherwise
/// `node` keeps the left part and a new text node holding the right part is
/// inserted after it.
///
/// # Errors
///
/// `InvalidOffset` when `position` is past the end of the text,
/// `InsideCodePoint` when it would cut a surrogate pair.
pub fn split<U: Universe>(
    universe: &mut U,
    node: &U::Node,
    position: usize,
) -> SplitResult<TextSplit<U::Node>> {
    if !universe.is_text(node) {
        return Ok(TextSplit::new(None, Some(node.clone())));
    }

    let text = universe.get_text(node);
    let len = utf16_len(&text);
    if position > len {
        return Err(SplitError::InvalidOffset {
            offset: position,
            len,
        });
    }
    if position == 0 {
        return Ok(TextSplit::new(None, Some(node.clone())));
    }
    if position == len {
        return Ok(TextSplit::new(Some(node.clone()), None));
    }

    let mut parts = splits(&text, &[position])?.into_iter();
    let left = parts.next().unwrap_or_default();
    let right = parts.next().unwrap_or_default();

    universe.set_text(node, &left);
    let after = universe.create_text(&right);
    universe.insert_after(node, &after);

    tracing::trace!(event = %Event::TextSplit, position, len, "text node split");
    Ok(TextSplit::new(Some(node.clone()), Some(after)))
}

/// Isolates the range `[start, end)` of `node` in its own text node and
/// returns that node. The bounds may be given in either order.
///
/// - Empty ranges, non-text nodes and whole-text ranges return `node` as is.
/// - A range starting at 0 leaves the range in `node` and moves the remainder
///   to a new next sibling.
/// - Otherwise `node` keeps the prefix, and new nodes for the range and the
///   (non-empty) suffix follow it.
///
/// # Errors
///
/// Same as [`split`], for either bound.
pub fn split_by_pair<U: Universe>(
    universe: &mut U,
    node: &U::Node,
    start: usize,
    end: usize,
) -> SplitResult<U::Node> {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    if !universe.is_text(node) {
        return Ok(node.clone());
    }

    let text = universe.get_text(node);
    let mut parts = splits(&text, &[start, end])?.into_iter();
    let prefix = parts.next().unwrap_or_default();
    let middle = parts.next().unwrap_or_default();
    let suffix = parts.next().unwrap_or_default();

    if start == end || (prefix.is_empty() && suffix.is_empty()) {
        return Ok(node.clone());
    }

    let isolated = if start == 0 {
        universe.set_text(node, &middle);
        let rest = universe.create_text(&suffix);
        universe.insert_after(node, &rest);
        node.clone()
    } else {
        universe.set_text(node, &prefix);
        let middle_node = universe.create_text(&middle);
        let mut created = vec![middle_node.clone()];
        if !suffix.is_empty() {
            created.push(universe.create_text(&suffix));
        }
        universe.insert_after_all(node, &created);
        middle_node
    };

    tracing::trace!(event = %Event::TextSplit, start, end, "text range isolated");
    Ok(isolated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::{MemoryUniverse, NodeId};

    fn texts(universe: &MemoryUniverse, node: NodeId) -> Vec<String> {
        let parent = universe.parent(node).unwrap();
        universe.child_texts(parent)
    }

    #[test]
    fn test_split_hello_world() {
        let (mut universe, node) = MemoryUniverse::with_paragraph("hello world");
        let result = split(&mut universe, &node, 5).unwrap();

        let before = result.before.unwrap();
        let after = result.after.unwrap();
        assert_eq!(before, node);
        assert_eq!(universe.text_of(before), Some("hello"));
        assert_eq!(universe.text_of(after), Some(" world"));
        assert_eq!(texts(&universe, node), vec!["hello", " world"]);
    }

    #[test]
    fn test_split_at_start_and_end_are_noops() {
        let (mut universe, node) = MemoryUniverse::with_paragraph("abc");

        let at_start = split(&mut universe, &node, 0).unwrap();
        assert_eq!(at_start, TextSplit::new(None, Some(node)));

        let at_end = split(&mut universe, &node, 3).unwrap();
        assert_eq!(at_end, TextSplit::new(Some(node), None));

        assert_eq!(texts(&universe, node), vec!["abc"]);
    }

    #[test]
    fn test_split_non_text_node() {
        let mut universe = MemoryUniverse::new();
        let root = universe.root();
        let result = split(&mut universe, &root, 3).unwrap();
        assert_eq!(result, TextSplit::new(None, Some(root)));
    }

    #[test]
    fn test_split_rejects_out_of_range_without_mutation() {
        let (mut universe, node) = MemoryUniverse::with_paragraph("abc");
        let count = universe.node_count();

        let err = split(&mut universe, &node, 4).unwrap_err();
        assert_eq!(err, SplitError::InvalidOffset { offset: 4, len: 3 });
        assert_eq!(universe.node_count(), count);
        assert_eq!(texts(&universe, node), vec!["abc"]);
    }

    #[test]
    fn test_split_counts_utf16_units() {
        let (mut universe, node) = MemoryUniverse::with_paragraph("a\u{1F600}b");
        let result = split(&mut universe, &node, 3).unwrap();
        assert_eq!(universe.text_of(node), Some("a\u{1F600}"));
        assert_eq!(universe.text_of(result.after.unwrap()), Some("b"));

        let err = split(&mut universe, &node, 2).unwrap_err();
        assert_eq!(err, SplitError::InsideCodePoint { offset: 2 });
    }

    #[test]
    fn test_split_by_pair_middle() {
        let (mut universe, node) = MemoryUniverse::with_paragraph("hello world");
        let middle = split_by_pair(&mut universe, &node, 2, 5).unwrap();

        assert_ne!(middle, node);
        assert_eq!(universe.text_of(middle), Some("llo"));
        assert_eq!(texts(&universe, node), vec!["he", "llo", " world"]);
    }

    #[test]
    fn test_split_by_pair_swaps_bounds() {
        let (mut universe, node) = MemoryUniverse::with_paragraph("hello world");
        let middle = split_by_pair(&mut universe, &node, 5, 2).unwrap();
        assert_eq!(universe.text_of(middle), Some("llo"));
    }

    #[test]
    fn test_split_by_pair_from_start() {
        let (mut universe, node) = MemoryUniverse::with_paragraph("hello world");
        let middle = split_by_pair(&mut universe, &node, 0, 5).unwrap();

        assert_eq!(middle, node);
        assert_eq!(texts(&universe, node), vec!["hello", " world"]);
    }

    #[test]
    fn test_split_by_pair_to_end_has_no_suffix_node() {
        let (mut universe, node) = MemoryUniverse::with_paragraph("hello world");
        let middle = split_by_pair(&mut universe, &node, 6, 11).unwrap();

        assert_eq!(universe.text_of(middle), Some("world"));
        assert_eq!(texts(&universe, node), vec!["hello ", "world"]);
    }

    #[test]
    fn test_split_by_pair_noops() {
        let (mut universe, node) = MemoryUniverse::with_paragraph("hello");
        let count = universe.node_count();

        assert_eq!(split_by_pair(&mut universe, &node, 0, 5).unwrap(), node);
        assert_eq!(split_by_pair(&mut universe, &node, 2, 2).unwrap(), node);
        assert_eq!(universe.node_count(), count);
        assert_eq!(texts(&universe, node), vec!["hello"]);

        let root = universe.root();
        assert_eq!(split_by_pair(&mut universe, &root, 1, 3).unwrap(), root);
    }

    #[test]
    fn test_split_by_pair_rejects_out_of_range() {
        let (mut universe, node) = MemoryUniverse::with_paragraph("hello");
        let err = split_by_pair(&mut universe, &node, 2, 9).unwrap_err();
        assert_eq!(err, SplitError::InvalidOffset { offset: 9, len: 5 });
        assert_eq!(texts(&universe, node), vec!["hello"]);
    }
}
