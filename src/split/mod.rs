//! Text splitter for editable document trees
//!
//! Splits text nodes at one or two UTF-16 offsets. Works through the
//! [`Universe`] trait, so any tree can be split; [`MemoryUniverse`] is the
//! in-crate implementation used by the CLI and tests.

mod errors;
mod memory;
mod splitter;
pub mod text;
mod universe;

pub use errors::{SplitError, SplitResult};
pub use memory::{MemoryUniverse, NodeId};
pub use splitter::{split, split_by_pair, TextSplit};
pub use universe::Universe;
