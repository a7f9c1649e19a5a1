//! Text split error types
//!
//! Offsets are `usize`, so negative offsets cannot be expressed. Everything
//! else outside the text is rejected before the tree is touched; offsets are
//! never clamped.

use thiserror::Error;

/// Result type for split operations
pub type SplitResult<T> = Result<T, SplitError>;

/// Split errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("Offset {offset} is beyond text length {len}")]
    InvalidOffset { offset: usize, len: usize },

    #[error("Offset {offset} falls between the halves of a surrogate pair")]
    InsideCodePoint { offset: usize },
}

impl SplitError {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SplitError::InvalidOffset { .. } => "EK_SPLIT_INVALID_OFFSET",
            SplitError::InsideCodePoint { .. } => "EK_SPLIT_INSIDE_CODE_POINT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            SplitError::InvalidOffset { offset: 9, len: 3 }.code(),
            "EK_SPLIT_INVALID_OFFSET"
        );
        assert_eq!(
            SplitError::InsideCodePoint { offset: 1 }.code(),
            "EK_SPLIT_INSIDE_CODE_POINT"
        );
    }

    #[test]
    fn test_display() {
        let err = SplitError::InvalidOffset { offset: 9, len: 3 };
        assert_eq!(err.to_string(), "Offset 9 is beyond text length 3");
    }
}
