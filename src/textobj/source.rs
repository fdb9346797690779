//! Read-only text access used by the argument scanners.

/// A character-addressable text snapshot with line-oriented offset queries.
///
/// Offsets count characters, not bytes. Implementations must stay unchanged
/// for the duration of a query; callers holding a live buffer should hand
/// the scanners a frozen snapshot.
pub trait TextSource {
    /// Number of characters in the text.
    fn len(&self) -> usize;

    /// Character at `offset`. Panics when `offset >= self.len()`.
    fn char_at(&self, offset: usize) -> char;

    /// Zero-based line containing `offset`.
    fn line_number(&self, offset: usize) -> usize;

    /// Offset of the first character of `line`.
    fn line_start_offset(&self, line: usize) -> usize;

    /// Offset of the line terminator of `line`, or the text length for the last line.
    fn line_end_offset(&self, line: usize) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Plain character slices, for callers that do not keep a line table.
///
/// Line queries scan the slice, so prefer [`crate::LineIndex`] for repeated use.
impl TextSource for [char] {
    fn len(&self) -> usize {
        <[char]>::len(self)
    }

    fn char_at(&self, offset: usize) -> char {
        self[offset]
    }

    fn line_number(&self, offset: usize) -> usize {
        self[..offset.min(<[char]>::len(self))]
            .iter()
            .filter(|&&c| c == '\n')
            .count()
    }

    fn line_start_offset(&self, line: usize) -> usize {
        if line == 0 {
            return 0;
        }
        self.iter()
            .enumerate()
            .filter(|(_, c)| **c == '\n')
            .nth(line - 1)
            .map(|(i, _)| i + 1)
            .unwrap_or(<[char]>::len(self))
    }

    fn line_end_offset(&self, line: usize) -> usize {
        let start = self.line_start_offset(line);
        self[start..]
            .iter()
            .position(|&c| c == '\n')
            .map(|i| start + i)
            .unwrap_or(<[char]>::len(self))
    }
}
