//! UTF-16 offset helpers.
//!
//! Positions handed to the splitter count UTF-16 code units, the unit editors
//! use for selection offsets. Rust strings are UTF-8, so every position is
//! mapped to a byte offset first.

use super::errors::{SplitError, SplitResult};

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Maps a UTF-16 offset to a byte offset into `text`.
///
/// # Errors
///
/// `InvalidOffset` past the end of the text, `InsideCodePoint` when the offset
/// lands between the two units of a surrogate pair.
pub fn byte_offset(text: &str, offset: usize) -> SplitResult<usize> {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units == offset {
            return Ok(byte);
        }
        units += ch.len_utf16();
        if units > offset {
            return Err(SplitError::InsideCodePoint { offset });
        }
    }

    if units == offset {
        Ok(text.len())
    } else {
        Err(SplitError::InvalidOffset { offset, len: units })
    }
}

/// Splits `text` at each UTF-16 position, returning `positions.len() + 1`
/// parts. Positions are sorted first; duplicates yield empty parts.
pub fn splits(text: &str, positions: &[usize]) -> SplitResult<Vec<String>> {
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();

    let mut parts = Vec::with_capacity(sorted.len() + 1);
    let mut last = 0;
    for position in sorted {
        let at = byte_offset(text, position)?;
        parts.push(text[last..at].to_string());
        last = at;
    }
    parts.push(text[last..].to_string());
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets_are_bytes() {
        assert_eq!(utf16_len("hello"), 5);
        assert_eq!(byte_offset("hello", 0), Ok(0));
        assert_eq!(byte_offset("hello", 3), Ok(3));
        assert_eq!(byte_offset("hello", 5), Ok(5));
    }

    #[test]
    fn test_multibyte_offsets() {
        // 'é' is one UTF-16 unit and two UTF-8 bytes
        assert_eq!(utf16_len("café!"), 5);
        assert_eq!(byte_offset("café!", 4), Ok(5));
    }

    #[test]
    fn test_surrogate_pairs() {
        // U+1F600 is two UTF-16 units and four UTF-8 bytes
        let text = "a\u{1F600}b";
        assert_eq!(utf16_len(text), 4);
        assert_eq!(byte_offset(text, 1), Ok(1));
        assert_eq!(byte_offset(text, 3), Ok(5));
        assert_eq!(
            byte_offset(text, 2),
            Err(SplitError::InsideCodePoint { offset: 2 })
        );
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            byte_offset("abc", 4),
            Err(SplitError::InvalidOffset { offset: 4, len: 3 })
        );
        assert_eq!(byte_offset("", 0), Ok(0));
    }

    #[test]
    fn test_splits_into_parts() {
        assert_eq!(
            splits("hello world", &[5, 2]).unwrap(),
            vec!["he", "llo", " world"]
        );
        assert_eq!(splits("abc", &[]).unwrap(), vec!["abc"]);
        assert_eq!(splits("abc", &[3]).unwrap(), vec!["abc", ""]);
        assert!(splits("abc", &[1, 7]).is_err());
    }
}
