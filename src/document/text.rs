//! Text snapshot with line lookup and position conversion.
//!
//! Offsets are character offsets, matching what the argument scanners use.
//! LSP positions count UTF-16 code units within a line.

use tower_lsp::lsp_types::Position;

use crate::textobj::TextSource;

/// Pre-computed line index over an owned copy of the document.
///
/// Line lookup is O(log n) by binary search over line starts.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Character offset where each line starts.
    line_starts: Vec<usize>,
    /// Document text, one entry per character.
    chars: Vec<char>,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(source: String) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let mut line_starts = vec![0];

        for (i, &c) in chars.iter().enumerate() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }

        Self { line_starts, chars }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Characters in `range` as a string.
    pub fn slice(&self, range: std::ops::Range<usize>) -> String {
        self.chars[range].iter().collect()
    }

    /// Line containing `offset`, clamped to the last line.
    fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,                    // Exact match (start of line)
            Err(line) => line.saturating_sub(1), // In the middle of a line
        }
    }

    /// Offset one past the last character of `line`, excluding the newline.
    fn line_end(&self, line: usize) -> usize {
        self.line_starts
            .get(line + 1)
            .map(|&next| next - 1)
            .unwrap_or(self.chars.len())
    }

    /// Convert a character offset to an LSP position.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.chars.len());
        let line = self.line_of(offset);
        let line_start = self.line_starts[line];

        let col: u32 = self.chars[line_start..offset]
            .iter()
            .map(|c| c.len_utf16() as u32)
            .sum();

        Position::new(line as u32, col)
    }

    /// Convert an LSP position to a character offset.
    ///
    /// Returns None if the line is out of bounds. Columns past the end of the
    /// line clamp to the line end.
    pub fn position_to_offset(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let line_start = *self.line_starts.get(line)?;
        let line_end = self.line_end(line);

        let mut utf16_col = 0u32;
        for (i, c) in self.chars[line_start..line_end].iter().enumerate() {
            if utf16_col >= position.character {
                return Some(line_start + i);
            }
            utf16_col += c.len_utf16() as u32;
        }

        Some(line_end)
    }

    /// Convert a character span to an LSP range.
    pub fn span_to_range(&self, span: &std::ops::Range<usize>) -> tower_lsp::lsp_types::Range {
        let start = self.offset_to_position(span.start);
        let end = self.offset_to_position(span.end);
        tower_lsp::lsp_types::Range::new(start, end)
    }
}

impl TextSource for LineIndex {
    fn len(&self) -> usize {
        self.chars.len()
    }

    fn char_at(&self, offset: usize) -> char {
        self.chars[offset]
    }

    fn line_number(&self, offset: usize) -> usize {
        self.line_of(offset)
    }

    fn line_start_offset(&self, line: usize) -> usize {
        self.line_starts[line]
    }

    fn line_end_offset(&self, line: usize) -> usize {
        self.line_end(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line() {
        let idx = LineIndex::new("hello world".to_string());
        assert_eq!(idx.offset_to_position(0), Position::new(0, 0));
        assert_eq!(idx.offset_to_position(5), Position::new(0, 5));
        assert_eq!(idx.offset_to_position(11), Position::new(0, 11));
    }

    #[test]
    fn multi_line() {
        let idx = LineIndex::new("hello\nworld\ntest".to_string());
        assert_eq!(idx.line_count(), 3);
        assert_eq!(idx.offset_to_position(5), Position::new(0, 5)); // newline
        assert_eq!(idx.offset_to_position(6), Position::new(1, 0)); // 'w'
        assert_eq!(idx.offset_to_position(12), Position::new(2, 0)); // 't'
    }

    #[test]
    fn position_to_offset_multi_line() {
        let idx = LineIndex::new("hello\nworld".to_string());
        assert_eq!(idx.position_to_offset(Position::new(0, 0)), Some(0));
        assert_eq!(idx.position_to_offset(Position::new(0, 5)), Some(5));
        assert_eq!(idx.position_to_offset(Position::new(1, 0)), Some(6));
        assert_eq!(idx.position_to_offset(Position::new(1, 5)), Some(11));
    }

    #[test]
    fn column_past_line_end_clamps() {
        let idx = LineIndex::new("ab\ncd".to_string());
        assert_eq!(idx.position_to_offset(Position::new(0, 40)), Some(2));
    }

    #[test]
    fn utf16_columns_map_to_char_offsets() {
        // '😀' is one char but two UTF-16 code units.
        let idx = LineIndex::new("a😀b".to_string());
        assert_eq!(idx.offset_to_position(1), Position::new(0, 1));
        assert_eq!(idx.offset_to_position(2), Position::new(0, 3));
        assert_eq!(idx.position_to_offset(Position::new(0, 3)), Some(2));
        assert_eq!(idx.char_at(2), 'b');
    }

    #[test]
    fn out_of_bounds() {
        let idx = LineIndex::new("hello".to_string());
        assert_eq!(idx.position_to_offset(Position::new(5, 0)), None);
    }

    #[test]
    fn span_to_range() {
        let idx = LineIndex::new("hello\nworld".to_string());
        let range = idx.span_to_range(&(6..11));
        assert_eq!(range.start, Position::new(1, 0));
        assert_eq!(range.end, Position::new(1, 5));
    }

    #[test]
    fn text_source_line_queries() {
        let idx = LineIndex::new("f(a,\n  b)\n".to_string());
        assert_eq!(idx.line_number(3), 0);
        assert_eq!(idx.line_number(4), 0);
        assert_eq!(idx.line_number(7), 1);
        assert_eq!(idx.line_start_offset(1), 5);
        assert_eq!(idx.line_end_offset(0), 4);
        assert_eq!(idx.line_end_offset(1), 9);
        assert_eq!(idx.line_end_offset(2), 10);
        assert_eq!(idx.slice(5..9), "  b)");
    }
}
